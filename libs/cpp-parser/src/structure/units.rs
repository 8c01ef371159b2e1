//! Declarator units.
//!
//! A declaration run like `static const std::vector<int>& items` is read as
//! a list of *units*: a head word plus whatever attaches to it on the right.
//!
//! | Head                         | Attachments                       |
//! |------------------------------|-----------------------------------|
//! | word, keyword, qualified name| template list, `::name`, `*` `&`  |
//! | `~` + name                   | (same)                            |
//! | `operator` + symbol          | (same)                            |
//!
//! Statement keywords such as `return` or `if` never start a unit. Comment
//! mirrors between units are stepped over and stay inside the run.

use crate::tree::{NodeKind, ParseNode};
use config::constants::STATEMENT_KEYWORDS;
use std::ops::Range;

/// Split the start of `nodes` into units.
///
/// Returns the unit ranges and how many nodes they cover. Scanning stops at
/// the first node that neither starts nor continues a unit.
///
/// ## Example
///
/// ```text
/// const char * name ( ...
/// [const] [char *] [name]      -> consumed = 4
/// ```
pub(crate) fn scan_units(nodes: &[ParseNode]) -> (Vec<Range<usize>>, usize) {
    let mut units: Vec<Range<usize>> = Vec::new();
    let mut j = 0;
    loop {
        let start = if units.is_empty() { j } else { skip_comments(nodes, j) };
        let Some(len) = head_len(nodes, start) else {
            break;
        };
        j = start + len;
        loop {
            let next = skip_comments(nodes, j);
            if !nodes.get(next).map_or(false, is_attachment) {
                break;
            }
            j = next + 1;
        }
        units.push(start..j);
    }
    (units, j)
}

/// Index of the first node at or after `j` that is not a comment mirror.
pub(crate) fn skip_comments(nodes: &[ParseNode], mut j: usize) -> usize {
    while nodes.get(j).map_or(false, |n| n.kind == NodeKind::Comment) {
        j += 1;
    }
    j
}

/// Check for a trailing `*`, `&` or `&&`.
pub(crate) fn is_pointer_marker(node: &ParseNode) -> bool {
    node.is_operator("*") || node.is_operator("&") || node.is_operator("&&")
}

fn is_attachment(node: &ParseNode) -> bool {
    match node.kind {
        NodeKind::TemplateParams => true,
        NodeKind::QualifiedName => node.text().starts_with("::"),
        _ => is_pointer_marker(node),
    }
}

/// Nodes taken by the head of a unit starting at `j`.
fn head_len(nodes: &[ParseNode], j: usize) -> Option<usize> {
    let node = nodes.get(j)?;
    match node.kind {
        NodeKind::Text | NodeKind::QualifiedName | NodeKind::TypeKeyword => Some(1 + symbol_len(nodes, j)),
        NodeKind::Keyword if !node.text_in(STATEMENT_KEYWORDS) => Some(1 + symbol_len(nodes, j)),
        NodeKind::Operator if node.is_operator("~") => {
            let next = nodes.get(j + 1)?;
            (next.kind == NodeKind::Text && node.end == next.start).then_some(2)
        }
        _ => None,
    }
}

/// Nodes naming the overloaded operator after an `operator` head.
fn symbol_len(nodes: &[ParseNode], j: usize) -> usize {
    let head = nodes[j].text();
    if head != "operator" && !head.ends_with("::operator") {
        return 0;
    }
    let is_empty = |k: usize, kind: NodeKind| nodes.get(k).map_or(false, |n| n.kind == kind && n.children.is_empty());
    let Some(next) = nodes.get(j + 1) else {
        return 0;
    };
    match next.kind {
        NodeKind::Operator | NodeKind::Comma | NodeKind::TypeKeyword | NodeKind::Text => 1,
        NodeKind::Keyword if next.text_in(&["new", "delete"]) => {
            if is_empty(j + 2, NodeKind::Brackets) {
                2
            } else {
                1
            }
        }
        NodeKind::Brackets if next.children.is_empty() => 1,
        NodeKind::Parens if next.children.is_empty() && nodes.get(j + 2).map_or(false, |n| n.kind == NodeKind::Parens) => 1,
        _ => 0,
    }
}
