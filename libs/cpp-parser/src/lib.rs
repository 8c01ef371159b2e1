//! # C++ Source Parser (Pure Rust)
//!
//! A source-fidelity parser for a practical subset of C++: functions,
//! classes, structs, namespaces, templates, lambdas and preprocessor
//! directives. Every byte of the input is kept, so the parse inverts back to
//! the exact source text.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Labeler → content + style leaves
//!             → Structure → Declarations → Preprocessor → ParsedSource
//! ```
//!
//! The *content* tree holds what the code means; the *style* tree holds
//! whitespace, comments and delimiters. [`invert`] merges them back.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::{parse, query};
//!
//! let source = "/** Greets. */\nvoid hello(int x1 = 25, int y2 = 100);\n";
//! let parsed = parse(source).unwrap();
//! assert_eq!(parsed.invert(), source);
//!
//! let hello = &query::functions(&parsed.content)[0];
//! assert_eq!(hello.return_type, "void");
//! assert_eq!(hello.params.len(), 2);
//! ```
//!
//! ## Errors
//!
//! Unterminated literals and unbalanced brackets are fatal and returned as
//! `Err`. Conditional-compilation problems are collected in
//! [`ParsedSource::errors`] next to a best-effort tree.

pub mod batch;
pub mod declarations;
pub mod error;
pub mod invert;
pub mod labeler;
pub mod lexer;
pub mod preprocessor;
pub mod query;
pub mod session;
pub mod span;
pub mod structure;
pub mod tree;

// Re-export public API
pub use batch::{parse_files, ParseCache, SourceError};
pub use error::{ParseError, ParseErrorKind, Severity};
pub use invert::invert;
pub use preprocessor::{MacroDef, MacroTable};
pub use session::{ParsedSource, Session};
pub use span::{Position, Span, Spanned};
pub use tree::{Declaration, NodeKind, ParseNode};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse C++ source with the default configuration.
///
/// ## Parameters
///
/// - `source`: C++ source text
///
/// ## Returns
///
/// The content and style trees with any recoverable errors, or the first
/// fatal error.
///
/// ## Example
///
/// ```rust
/// use cpp_parser::{parse, NodeKind};
///
/// let parsed = parse("namespace hello { class test { }; }").unwrap();
/// let ns = &parsed.content.children[0];
/// assert_eq!(ns.kind, NodeKind::NamespaceDefn);
/// assert_eq!(ns.name(), Some("hello"));
/// ```
pub fn parse(source: &str) -> Result<ParsedSource, ParseError> {
    Session::default().parse(source)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parsed = parse("").unwrap();
        assert!(parsed.content.children.is_empty());
        assert_eq!(parsed.invert(), "");
    }

    #[test]
    fn test_parse_whitespace_only() {
        let parsed = parse("  \n\t\n").unwrap();
        assert!(parsed.content.children.is_empty());
        assert_eq!(parsed.invert(), "  \n\t\n");
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let err = parse("auto s = \"open;").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.offset(), 9);
    }
}
