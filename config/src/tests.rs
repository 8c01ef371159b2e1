//! # Tests for Language Tables
//!
//! Unit tests verifying the keyword tables, character classes and limits.

use crate::constants::*;

// =============================================================================
// KEYWORD TESTS
// =============================================================================

#[test]
fn test_keywords_grow_with_standard() {
    let cpp98 = Standard::Cpp98.keywords().count();
    let cpp11 = Standard::Cpp11.keywords().count();
    let cpp20 = Standard::Cpp20.keywords().count();
    assert!(cpp98 < cpp11);
    assert!(cpp11 < cpp20);
    assert_eq!(Standard::Cpp17.keywords().count(), cpp11);
    assert_eq!(Standard::Cpp23.keywords().count(), cpp20);
}

#[test]
fn test_structural_keywords_always_present() {
    for word in ["class", "struct", "namespace", "template", "typename"] {
        assert!(is_keyword(word, Standard::Cpp98), "{word} should be a keyword");
    }
}

#[test]
fn test_type_keywords_are_keywords() {
    for word in Standard::Cpp23.type_keywords() {
        assert!(is_keyword(word, Standard::Cpp23), "{word} missing from keywords");
    }
    assert!(is_type_keyword("char8_t", Standard::Cpp20));
    assert!(!is_type_keyword("char8_t", Standard::Cpp17));
}

#[test]
fn test_identifiers_are_not_keywords() {
    assert!(!is_keyword("hello", Standard::Cpp23));
    assert!(!is_keyword("std", Standard::Cpp23));
}

// =============================================================================
// CHARACTER CLASS TESTS
// =============================================================================

#[test]
fn test_operator_chars_are_delimiters() {
    for c in OPERATOR_CHARS {
        assert!(DELIMITER_CHARS.contains(c), "{c:?} must split into its own token");
    }
}

#[test]
fn test_angles_are_not_operator_chars() {
    assert!(!OPERATOR_CHARS.contains(&'<'));
    assert!(!OPERATOR_CHARS.contains(&'>'));
}

#[test]
fn test_fused_operators_avoid_leading_angles() {
    for op in FUSED_OPERATORS_2.iter().chain(FUSED_OPERATORS_3) {
        assert!(!op.starts_with(&['<', '>'][..]), "{op} must be fused after templates");
    }
}

#[test]
fn test_angle_operators_longest_first() {
    let lens: Vec<usize> = ANGLE_OPERATORS.iter().map(|op| op.len()).collect();
    let mut sorted = lens.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(lens, sorted);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_red_zone_smaller_than_stack() {
    assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
}
