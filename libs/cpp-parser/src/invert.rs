//! # Inversion
//!
//! Rebuilds the source text from the content and style trees. Every source
//! byte sits in exactly one fragment leaf of one of the two trees, so sorting
//! all fragments by offset and concatenating them reproduces the input.
//!
//! ## Example
//!
//! ```rust
//! let source = "int  main() { /* hi */ return 0; }\n";
//! let parsed = cpp_parser::parse(source).unwrap();
//! assert_eq!(cpp_parser::invert(&parsed.content, &parsed.style), source);
//! ```

use crate::tree::ParseNode;

/// Reconstruct source text from a content tree and a style tree.
pub fn invert(content: &ParseNode, style: &ParseNode) -> String {
    let mut fragments = content.fragments();
    fragments.extend(style.fragments());
    fragments.sort_by_key(|f| f.start);

    let mut out = String::with_capacity(fragments.last().and_then(|f| f.end).unwrap_or_default());
    for fragment in fragments {
        out.push_str(&fragment.text());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    #[test]
    fn test_interleaves_both_trees() {
        let content = ParseNode::branch(NodeKind::Root, vec![
            ParseNode::leaf(NodeKind::Text, "a", 0),
            ParseNode::leaf(NodeKind::Comment, " c", 2),
            ParseNode::leaf(NodeKind::Text, "b", 7),
        ]);
        let style = ParseNode::branch(NodeKind::Root, vec![
            ParseNode::leaf(NodeKind::Whitespace, " ", 1).hide(),
            ParseNode::branch(NodeKind::LineComment, vec![
                ParseNode::leaf(NodeKind::Delimiter, "//", 2).hide(),
                ParseNode::leaf(NodeKind::Raw, " c", 4),
            ])
            .hide(),
            ParseNode::leaf(NodeKind::Whitespace, "\n", 6).hide(),
        ]);
        assert_eq!(invert(&content, &style), "a // c\nb");
    }

    #[test]
    fn test_empty_trees() {
        let root = ParseNode::branch(NodeKind::Root, Vec::new());
        assert_eq!(invert(&root, &root), "");
    }
}
