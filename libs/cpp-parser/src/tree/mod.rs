//! # Parse Tree
//!
//! The single node type shared by every phase. A parse produces two trees of
//! it: the *content* tree holds what the source means, the *style* tree holds
//! whitespace, comments and delimiters. Together their fragment leaves cover
//! every source byte exactly once.
//!
//! Children are owned. Moving a subtree to another parent moves it; nothing
//! is ever shared between two parents.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::tree::{NodeKind, ParseNode};
//!
//! let mut name = ParseNode::branch(NodeKind::QualifiedName, vec![
//!     ParseNode::leaf(NodeKind::Text, "std", 0),
//!     ParseNode::leaf(NodeKind::Colon, ":", 3),
//!     ParseNode::leaf(NodeKind::Colon, ":", 4),
//!     ParseNode::leaf(NodeKind::Text, "size_t", 5),
//! ]);
//! name.join();
//! assert_eq!(name.value.as_deref(), Some("std::size_t"));
//! assert_eq!(name.extent(), Some(0..11));
//! ```

mod kind;
mod render;

pub use kind::NodeKind;
pub use render::render_sequence;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Range;

// =============================================================================
// DECLARATION
// =============================================================================

/// Attributes derived for function, class and namespace definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declared name.
    pub name: String,
    /// Return type, for functions.
    pub return_type: Option<String>,
    /// Leading specifiers in source order.
    pub specifiers: Vec<String>,
    /// Trailing qualifiers after a function's parameter list.
    pub qualifiers: Vec<String>,
    /// Text of an immediately preceding comment.
    pub doc_comment: Option<String>,
}

// =============================================================================
// PARSE NODE
// =============================================================================

/// A node of the content or style tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseNode {
    /// Node type.
    pub kind: NodeKind,
    /// Leaf text, or the join of the non-hidden children once materialized.
    pub value: Option<String>,
    /// Byte offset of the first covered source byte.
    pub start: Option<usize>,
    /// Byte offset just past the last covered source byte.
    pub end: Option<usize>,
    /// Style-only node.
    pub hidden: bool,
    /// Owned child nodes.
    pub children: Vec<ParseNode>,
    /// Derived attributes for definitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decl: Option<Box<Declaration>>,
}

impl ParseNode {
    /// Create a leaf carrying source text at `start`.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Node type
    /// - `value`: Exact source text
    /// - `start`: Byte offset of the text
    pub fn leaf(kind: NodeKind, value: impl Into<String>, start: usize) -> Self {
        let value = value.into();
        Self {
            kind,
            start: Some(start),
            end: Some(start + value.len()),
            value: Some(value),
            hidden: false,
            children: Vec::new(),
            decl: None,
        }
    }

    /// Create an interior node whose extent covers its children.
    ///
    /// The value stays unset until [`ParseNode::join`]; a node without
    /// children resolves to the empty string immediately.
    pub fn branch(kind: NodeKind, children: Vec<ParseNode>) -> Self {
        let start = children.iter().filter_map(|c| c.start).min();
        let end = children.iter().filter_map(|c| c.end).max();
        Self {
            kind,
            value: children.is_empty().then(String::new),
            start,
            end,
            hidden: false,
            children,
            decl: None,
        }
    }

    /// Create an interior node and materialize its value.
    pub fn joined(kind: NodeKind, children: Vec<ParseNode>) -> Self {
        let mut node = Self::branch(kind, children);
        node.join();
        node
    }

    /// Mark node as style-only.
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Override the source extent.
    pub fn with_extent(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set `value` to the concatenation of the non-hidden children.
    ///
    /// Leaves keep their value.
    pub fn join(&mut self) {
        if !self.children.is_empty() {
            self.value = Some(self.text().into_owned());
        }
    }

    /// The node's text: its value, or the join of its non-hidden children
    /// when the value has not been materialized.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.value {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(
                self.children
                    .iter()
                    .filter(|c| !c.hidden)
                    .map(|c| c.text())
                    .collect(),
            ),
        }
    }

    /// Check if node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether inversion emits this node.
    pub fn is_fragment(&self) -> bool {
        self.is_leaf() && self.start.is_some() && self.kind.is_fragment()
    }

    /// Source byte range, when known.
    pub fn extent(&self) -> Option<Range<usize>> {
        Some(self.start?..self.end?)
    }

    /// Check for an operator leaf with exactly this text.
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == NodeKind::Operator && self.value.as_deref() == Some(op)
    }

    /// Check for a word leaf with exactly this text.
    pub fn is_word_text(&self, word: &str) -> bool {
        self.is_leaf() && self.kind.is_word() && self.value.as_deref() == Some(word)
    }

    /// Check if the node's text is one of `words`.
    pub fn text_in(&self, words: &[&str]) -> bool {
        let text = self.text();
        words.contains(&text.as_ref())
    }

    /// Find first child with given kind.
    pub fn find_child(&self, kind: NodeKind) -> Option<&ParseNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Find all children with given kind.
    pub fn find_children(&self, kind: NodeKind) -> impl Iterator<Item = &ParseNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Index of the first child with given kind.
    pub fn position(&self, kind: NodeKind) -> Option<usize> {
        self.children.iter().position(|c| c.kind == kind)
    }

    /// Derived declaration name, if extracted.
    pub fn name(&self) -> Option<&str> {
        self.decl.as_ref().map(|d| d.name.as_str())
    }

    /// Collect fragment leaves in tree order without recursing on the call
    /// stack.
    pub fn fragments(&self) -> Vec<&ParseNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_fragment() {
                out.push(node);
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
