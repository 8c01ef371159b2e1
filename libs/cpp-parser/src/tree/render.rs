//! Normalized single-line rendering of content nodes.
//!
//! Rendering rebuilds readable source from the content tree alone, without
//! the style tree: words are separated by one space, pointer and reference
//! markers attach to the left, binary operators get a space on each side,
//! and bracket delimiters are re-inserted around groups.

use super::{NodeKind, ParseNode};

impl ParseNode {
    /// Render this node as normalized source text.
    ///
    /// ## Example
    ///
    /// ```rust
    /// let parsed = cpp_parser::parse("std::map<int, Foo*> m;").unwrap();
    /// let rendered: Vec<_> = parsed.content.children.iter().map(|n| n.render()).collect();
    /// assert_eq!(rendered[1], "<int, Foo*>");
    /// ```
    pub fn render(&self) -> String {
        match self.kind {
            NodeKind::String => format!("\"{}\"", self.text()),
            NodeKind::Char => format!("'{}'", self.text()),
            NodeKind::Comment | NodeKind::LineComment | NodeKind::BlockComment => String::new(),
            NodeKind::Params | NodeKind::TemplateParams => {
                let (open, close) = self.kind.brackets().unwrap_or_default();
                let params: Vec<String> = self.children.iter().map(ParseNode::render).collect();
                format!("{open}{}{close}", params.join(", "))
            }
            NodeKind::Parens | NodeKind::Brackets | NodeKind::Braces | NodeKind::Body => {
                let (open, close) = self.kind.brackets().unwrap_or_default();
                format!("{open}{}{close}", render_sequence(&self.children))
            }
            NodeKind::QualifiedName | NodeKind::Preprocessor => self.text().into_owned(),
            _ if self.is_leaf() => self.text().into_owned(),
            _ => render_sequence(&self.children),
        }
    }
}

/// Render a sibling sequence with normalized spacing.
pub fn render_sequence(nodes: &[ParseNode]) -> String {
    let mut out = String::new();
    let mut prev: Option<&ParseNode> = None;
    let mut prev_unary = false;
    for node in nodes.iter().filter(|n| !n.kind.is_comment()) {
        let piece = node.render();
        if piece.is_empty() && node.is_leaf() {
            continue;
        }
        let unary = is_unary(prev, node);
        if prev.is_some() && needs_space(prev_unary, node) {
            out.push(' ');
        }
        out.push_str(&piece);
        prev = Some(node);
        prev_unary = unary;
    }
    out
}

fn is_pointer_marker(node: &ParseNode) -> bool {
    node.is_operator("*") || node.is_operator("&") || node.is_operator("&&")
}

/// An operator is unary when nothing operand-like precedes it.
fn is_unary(prev: Option<&ParseNode>, node: &ParseNode) -> bool {
    if node.kind != NodeKind::Operator || is_pointer_marker(node) {
        return false;
    }
    match prev {
        None => true,
        Some(prev) => matches!(prev.kind, NodeKind::Operator | NodeKind::Comma | NodeKind::Colon),
    }
}

/// Spacing rule between two adjacent rendered siblings.
fn needs_space(prev_unary: bool, next: &ParseNode) -> bool {
    match next.kind {
        NodeKind::Comma
        | NodeKind::Semicolon
        | NodeKind::TemplateParams
        | NodeKind::Params
        | NodeKind::Parens
        | NodeKind::Brackets => return false,
        NodeKind::QualifiedName if next.text().starts_with("::") => return false,
        _ => {}
    }
    !(is_pointer_marker(next) || prev_unary)
}

// =============================================================================
// TESTS
// =============================================================================
