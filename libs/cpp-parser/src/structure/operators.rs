//! Multi-character operator fusion.
//!
//! Fusion runs twice. The first stage runs before template recognition and
//! never touches patterns starting with an angle bracket, so `>>` closing two
//! nested template lists survives. The second stage runs afterwards on the
//! angles no template list claimed.

use crate::tree::{NodeKind, ParseNode};
use config::constants::{ANGLE_OPERATORS, FUSED_OPERATORS_2, FUSED_OPERATORS_3};

/// Fuse operators that cannot be confused with template brackets.
pub(super) fn fuse_operators(seq: Vec<ParseNode>) -> Vec<ParseNode> {
    fuse(seq, &[FUSED_OPERATORS_3, FUSED_OPERATORS_2])
}

/// Fuse angle operators, then turn every remaining angle into a plain
/// operator.
pub(super) fn fuse_angles(seq: Vec<ParseNode>) -> Vec<ParseNode> {
    let mut seq = fuse(seq, &[ANGLE_OPERATORS]);
    for node in &mut seq {
        if matches!(node.kind, NodeKind::AngleLeft | NodeKind::AngleRight) {
            node.kind = NodeKind::Operator;
        }
    }
    seq
}

fn fuse(mut seq: Vec<ParseNode>, tables: &[&[&str]]) -> Vec<ParseNode> {
    let mut i = 0;
    while i < seq.len() {
        if let Some(len) = match_len(&seq[i..], tables) {
            let parts: Vec<ParseNode> = seq.drain(i..i + len).collect();
            seq.insert(i, fused(parts));
        }
        i += 1;
    }
    seq
}

/// Single-character leaf that may take part in an operator.
fn is_fusable(node: &ParseNode) -> bool {
    matches!(node.kind, NodeKind::Operator | NodeKind::AngleLeft | NodeKind::AngleRight)
        && node.is_leaf()
        && node.text().chars().count() == 1
}

/// Length of the longest pattern matching at the start of `window`.
fn match_len(window: &[ParseNode], tables: &[&[&str]]) -> Option<usize> {
    let mut text = String::new();
    let mut run = 0;
    for (k, node) in window.iter().take(3).enumerate() {
        if !is_fusable(node) || (k > 0 && window[k - 1].end != node.start) {
            break;
        }
        text.push_str(&node.text());
        run += 1;
    }

    (2..=run).rev().find(|&len| {
        let candidate = &text[..len];
        tables.iter().any(|table| table.contains(&candidate))
    })
}

fn fused(parts: Vec<ParseNode>) -> ParseNode {
    let start = parts.first().and_then(|p| p.start).unwrap_or_default();
    let text: String = parts.iter().map(|p| p.text().into_owned()).collect();
    ParseNode::leaf(NodeKind::Operator, text, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(items: &[(NodeKind, &str, usize)]) -> Vec<ParseNode> {
        items.iter().map(|&(kind, text, start)| ParseNode::leaf(kind, text, start)).collect()
    }

    fn texts(seq: &[ParseNode]) -> Vec<String> {
        seq.iter().map(|n| n.text().into_owned()).collect()
    }

    #[test]
    fn test_fuse_arrow_and_increment() {
        let seq = leaves(&[
            (NodeKind::Text, "p", 0),
            (NodeKind::Operator, "-", 1),
            (NodeKind::AngleRight, ">", 2),
            (NodeKind::Text, "n", 3),
            (NodeKind::Operator, "+", 4),
            (NodeKind::Operator, "+", 5),
        ]);
        let fused = fuse_operators(seq);
        assert_eq!(texts(&fused), ["p", "->", "n", "++"]);
        assert_eq!(fused[1].kind, NodeKind::Operator);
        assert_eq!(fused[1].extent(), Some(1..3));
    }

    #[test]
    fn test_no_fusion_across_whitespace() {
        let seq = leaves(&[(NodeKind::Operator, "+", 0), (NodeKind::Operator, "+", 2)]);
        assert_eq!(fuse_operators(seq).len(), 2);
    }

    #[test]
    fn test_angles_untouched_by_first_stage() {
        let seq = leaves(&[(NodeKind::AngleRight, ">", 0), (NodeKind::AngleRight, ">", 1)]);
        let fused = fuse_operators(seq);
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].kind, NodeKind::AngleRight);
    }

    #[test]
    fn test_angle_stage_longest_first() {
        let seq = leaves(&[
            (NodeKind::AngleLeft, "<", 0),
            (NodeKind::AngleLeft, "<", 1),
            (NodeKind::Operator, "=", 2),
            (NodeKind::AngleRight, ">", 4),
        ]);
        let fused = fuse_angles(seq);
        assert_eq!(texts(&fused), ["<<=", ">"]);
        assert!(fused.iter().all(|n| n.kind == NodeKind::Operator));
    }

    #[test]
    fn test_spaceship() {
        let seq = leaves(&[
            (NodeKind::AngleLeft, "<", 0),
            (NodeKind::Operator, "=", 1),
            (NodeKind::AngleRight, ">", 2),
        ]);
        assert_eq!(texts(&fuse_angles(seq)), ["<=>"]);
    }
}
