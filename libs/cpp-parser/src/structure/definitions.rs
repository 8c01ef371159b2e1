//! Qualified names and scope definitions (`class`, `struct`, `namespace`,
//! `extern "C"`).

use super::body_after;
use super::units::skip_comments;
use crate::tree::{NodeKind, ParseNode};
use std::ops::Range;

// =============================================================================
// QUALIFIED NAMES
// =============================================================================

/// Collapse `a :: b :: c` (with an optional leading `::`) into one
/// `QualifiedName` node. The two colons of each `::` must touch.
pub(super) fn qualified_names(mut seq: Vec<ParseNode>) -> Vec<ParseNode> {
    let mut i = 0;
    while i < seq.len() {
        if let Some(end) = qualified_end(&seq, i) {
            let parts: Vec<ParseNode> = seq.drain(i..end).collect();
            seq.insert(i, ParseNode::joined(NodeKind::QualifiedName, parts));
        }
        i += 1;
    }
    seq
}

fn qualified_end(seq: &[ParseNode], i: usize) -> Option<usize> {
    let mut j = i + segment_len(seq, i, false);
    let mut scopes = 0;
    while is_scope(seq, j) {
        let len = segment_len(seq, j + 2, true);
        if len == 0 {
            break;
        }
        j += 2 + len;
        scopes += 1;
    }
    (scopes > 0).then_some(j)
}

/// Two touching colons at `j`.
fn is_scope(seq: &[ParseNode], j: usize) -> bool {
    match (seq.get(j), seq.get(j + 1)) {
        (Some(a), Some(b)) => a.kind == NodeKind::Colon && b.kind == NodeKind::Colon && a.end == b.start,
        _ => false,
    }
}

/// Nodes in the name segment at `j`: `name`, `~name`, or, after a scope,
/// `operator`.
fn segment_len(seq: &[ParseNode], j: usize, after_scope: bool) -> usize {
    let Some(node) = seq.get(j) else {
        return 0;
    };
    match node.kind {
        NodeKind::Text => 1,
        NodeKind::Keyword if after_scope && node.is_word_text("operator") => 1,
        NodeKind::Operator if after_scope && node.is_operator("~") => {
            match seq.get(j + 1) {
                Some(next) if next.kind == NodeKind::Text && node.end == next.start => 2,
                _ => 0,
            }
        }
        _ => 0,
    }
}

// =============================================================================
// SCOPES
// =============================================================================

/// Rewrite class, struct and namespace definitions and linkage blocks.
///
/// ```text
/// class Name : public Base { ... }   -> ClassDefn [class, Name, Inheritance, Body]
/// struct Name;                       -> ClassDefn [struct, Name]
/// namespace a::b { ... }             -> NamespaceDefn [namespace, a::b, Body]
/// extern "C" { ... }                 -> LinkageSpec [extern, "C", Body]
/// ```
pub(super) fn scopes(mut seq: Vec<ParseNode>) -> Vec<ParseNode> {
    let mut i = 0;
    while i < seq.len() {
        let planned = match seq[i].kind {
            NodeKind::ClassKeyword | NodeKind::StructKeyword => class_plan(&seq, i).map(|p| (NodeKind::ClassDefn, p)),
            NodeKind::NamespaceKeyword if !(i > 0 && seq[i - 1].is_word_text("using")) => {
                namespace_plan(&seq, i).map(|p| (NodeKind::NamespaceDefn, p))
            }
            NodeKind::Keyword if seq[i].is_word_text("extern") => linkage_plan(&seq, i).map(|p| (NodeKind::LinkageSpec, p)),
            _ => None,
        };
        if let Some((kind, plan)) = planned {
            let start = if i > 0 && seq[i - 1].kind == NodeKind::Comment { i - 1 } else { i };
            let mut nodes: Vec<ParseNode> = seq.drain(start..plan.end).collect();
            if let Some(body) = plan.body {
                nodes[body - start].kind = NodeKind::Body;
            }
            if let Some(range) = plan.inheritance {
                let clause: Vec<ParseNode> = nodes.drain(range.start - start..range.end - start).collect();
                nodes.insert(range.start - start, ParseNode::branch(NodeKind::Inheritance, clause));
            }
            seq.insert(start, ParseNode::branch(kind, nodes));
            i = start;
        }
        i += 1;
    }
    seq
}

struct ScopePlan {
    inheritance: Option<Range<usize>>,
    body: Option<usize>,
    end: usize,
}

fn is_name(node: Option<&ParseNode>) -> bool {
    node.map_or(false, |n| matches!(n.kind, NodeKind::Text | NodeKind::QualifiedName))
}

fn class_plan(seq: &[ParseNode], i: usize) -> Option<ScopePlan> {
    let kind_at = |j: usize| seq.get(j).map(|n| n.kind);
    let mut j = i + 1;
    let named = is_name(seq.get(j));
    if named {
        j += 1;
        if seq.get(j).map_or(false, |n| n.is_word_text("final")) {
            j += 1;
        }
    }

    let mut inheritance = None;
    let colon = skip_comments(seq, j);
    if kind_at(colon) == Some(NodeKind::Colon) {
        j = colon;
        let stop = seq[j..]
            .iter()
            .position(|n| matches!(n.kind, NodeKind::Braces | NodeKind::Semicolon))
            .map(|p| p + j);
        match stop {
            Some(k) if seq[k].kind == NodeKind::Braces => {
                inheritance = Some(j..k);
                j = k;
            }
            _ => {
                return named.then_some(ScopePlan {
                    inheritance: None,
                    body: None,
                    end: j,
                });
            }
        }
    }

    let (body, end) = body_after(seq, j);
    (named || body.is_some()).then_some(ScopePlan { inheritance, body, end })
}

fn namespace_plan(seq: &[ParseNode], i: usize) -> Option<ScopePlan> {
    let mut j = i + 1;
    let named = is_name(seq.get(j));
    if named {
        j += 1;
    }
    let (body, end) = body_after(seq, j);
    (named || body.is_some()).then_some(ScopePlan {
        inheritance: None,
        body,
        end,
    })
}

/// `extern "lang" { ... }`; without braces the keyword is a plain specifier.
fn linkage_plan(seq: &[ParseNode], i: usize) -> Option<ScopePlan> {
    if seq.get(i + 1)?.kind != NodeKind::String {
        return None;
    }
    let (body, end) = body_after(seq, i + 2);
    body.map(|body| ScopePlan {
        inheritance: None,
        body: Some(body),
        end,
    })
}
