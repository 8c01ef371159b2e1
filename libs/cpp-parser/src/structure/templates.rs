//! Template parameter and argument lists.
//!
//! A `<` only opens a list after something that can be templated: a name, a
//! `template` keyword or a cast keyword. The matching `>` is searched for
//! without touching the sequence; if the search hits a statement boundary
//! the `<` stays a comparison and nothing changes.
//!
//! ## Example
//!
//! ```text
//! std::map<std::string, std::vector<int>> m;
//! QualifiedName TemplateParams[Param[std::string], Param[std::vector TemplateParams[int]]] Text ;
//! ```

use super::operators::fuse_angles;
use super::split_params;
use crate::tree::{NodeKind, ParseNode};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

/// Cast keywords taking a template argument.
const CAST_KEYWORDS: &[&str] = &["static_cast", "dynamic_cast", "const_cast", "reinterpret_cast"];

/// Rewrite every recognizable `< ... >` in `seq` into a `TemplateParams`
/// node. The angle leaves move to the style tree.
pub(super) fn templates(mut seq: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Vec<ParseNode> {
    let mut i = 0;
    while i < seq.len() {
        if opens_template(&seq, i) {
            if let Some(close) = find_close(&seq, i) {
                let inner: Vec<ParseNode> = seq.drain(i + 1..close).collect();
                let close = seq.remove(i + 1);
                let open = seq.remove(i);

                let start = open.start.unwrap_or_default();
                let end = close.end.unwrap_or(start);
                style.push(ParseNode::branch(NodeKind::TemplateParams, vec![open.hide(), close.hide()]).hide());

                let params = split_params(template_args(inner, style), style);
                seq.insert(i, ParseNode::branch(NodeKind::TemplateParams, params).with_extent(start, end));
            }
        }
        i += 1;
    }
    seq
}

/// Recognize nested lists inside an argument list, then settle its
/// remaining angles.
fn template_args(inner: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Vec<ParseNode> {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || fuse_angles(templates(inner, style)))
}

/// Whether the `<` at `i` may open a template list.
fn opens_template(seq: &[ParseNode], i: usize) -> bool {
    if seq[i].kind != NodeKind::AngleLeft || i == 0 {
        return false;
    }
    // `<<` and `<=` are operators.
    if let Some(next) = seq.get(i + 1) {
        let text = next.text();
        if next.start == seq[i].end && (text.starts_with('<') || text.starts_with('=')) {
            return false;
        }
    }
    let prev = &seq[i - 1];
    match prev.kind {
        NodeKind::Text | NodeKind::QualifiedName | NodeKind::TemplateKeyword => !prev.text().ends_with("::operator"),
        NodeKind::Keyword => prev.text_in(CAST_KEYWORDS),
        _ => false,
    }
}

/// Index of the `>` closing the list opened at `open`, if any.
fn find_close(seq: &[ParseNode], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for k in open + 1..seq.len() {
        let node = &seq[k];
        match node.kind {
            NodeKind::AngleLeft if opens_template(seq, k) => depth += 1,
            NodeKind::AngleRight => {
                depth -= 1;
                if depth == 0 {
                    return Some(k);
                }
            }
            NodeKind::Semicolon | NodeKind::Braces => return None,
            NodeKind::Operator if node.is_operator("&&") || node.is_operator("||") => return None,
            _ => {}
        }
    }
    None
}
