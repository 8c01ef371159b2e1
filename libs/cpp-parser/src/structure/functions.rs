//! Lambda and function recognition.

use super::{body_after, into_params};
use super::units::{scan_units, skip_comments};
use crate::tree::{NodeKind, ParseNode};
use config::constants::FUNCTION_QUALIFIERS;

// =============================================================================
// LAMBDAS
// =============================================================================

/// Specifiers allowed between a lambda's parameters and its body.
const LAMBDA_SPECIFIERS: &[&str] = &["mutable", "constexpr", "consteval", "noexcept", "static"];

/// Rewrite `[captures] <tparams>? words? (params) specifiers? -> type? {body}?`
/// into `Lambda` nodes.
pub(super) fn lambdas(mut seq: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Vec<ParseNode> {
    let mut i = 0;
    while i < seq.len() {
        if let Some(plan) = lambda_plan(&seq, i) {
            let mut nodes: Vec<ParseNode> = seq.drain(i..plan.end).collect();
            into_params(&mut nodes[plan.params - i], style);
            if let Some(body) = plan.body {
                nodes[body - i].kind = NodeKind::Body;
            }
            seq.insert(i, ParseNode::branch(NodeKind::Lambda, nodes));
        }
        i += 1;
    }
    seq
}

struct LambdaPlan {
    params: usize,
    body: Option<usize>,
    end: usize,
}

fn lambda_plan(seq: &[ParseNode], i: usize) -> Option<LambdaPlan> {
    let captures = &seq[i];
    if captures.kind != NodeKind::Brackets || is_attribute(captures) {
        return None;
    }
    if i > 0 && ends_expression(&seq[i - 1]) {
        return None;
    }

    let kind_at = |j: usize| seq.get(j).map(|n| n.kind);
    let mut j = i + 1;
    if kind_at(j) == Some(NodeKind::TemplateParams) {
        j += 1;
    }
    while seq.get(j).map_or(false, |n| n.kind == NodeKind::Text) {
        j += 1;
    }
    if kind_at(j) != Some(NodeKind::Parens) {
        return None;
    }
    let params = j;
    j += 1;

    loop {
        let k = skip_comments(seq, j);
        let Some(node) = seq.get(k) else {
            break;
        };
        if node.kind.is_word() && node.text_in(LAMBDA_SPECIFIERS) {
            j = k + 1;
            if node.is_word_text("noexcept") {
                j = parens_after(seq, j);
            }
        } else if node.is_operator("->") {
            j = k + 1 + scan_units(&seq[k + 1..]).1;
        } else {
            break;
        }
    }

    let (body, end) = body_after(seq, j);
    Some(LambdaPlan { params, body, end })
}

/// `[[attribute]]`
fn is_attribute(brackets: &ParseNode) -> bool {
    matches!(brackets.children.as_slice(), [inner] if inner.kind == NodeKind::Brackets)
}

/// Nodes after which `[` is a subscript rather than a capture list.
fn ends_expression(node: &ParseNode) -> bool {
    matches!(
        node.kind,
        NodeKind::Text
            | NodeKind::Number
            | NodeKind::QualifiedName
            | NodeKind::Parens
            | NodeKind::Brackets
            | NodeKind::TemplateParams
            | NodeKind::String
            | NodeKind::Char
            | NodeKind::FunctionDef
            | NodeKind::Lambda
    ) || node.is_word_text("operator")
}

// =============================================================================
// FUNCTIONS
// =============================================================================

/// Rewrite `doc? run (params) qualifiers? body?` into `FunctionDef` nodes.
///
/// Whether a definition is really a call is decided later, once the run is
/// split into units.
pub(super) fn functions(mut seq: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Vec<ParseNode> {
    let mut i = 0;
    while i < seq.len() {
        if let Some(plan) = function_plan(&seq, i) {
            let start = if i > 0 && seq[i - 1].kind == NodeKind::Comment { i - 1 } else { i };
            let mut nodes: Vec<ParseNode> = seq.drain(start..plan.end).collect();
            into_params(&mut nodes[plan.params - start], style);
            if let Some(body) = plan.body {
                nodes[body - start].kind = NodeKind::Body;
            }
            seq.insert(start, ParseNode::branch(NodeKind::FunctionDef, nodes));
            i = start;
        }
        i += 1;
    }
    seq
}

struct FunctionPlan {
    params: usize,
    body: Option<usize>,
    end: usize,
}

fn function_plan(seq: &[ParseNode], i: usize) -> Option<FunctionPlan> {
    let (units, consumed) = scan_units(&seq[i..]);
    if units.is_empty() {
        return None;
    }
    let params = skip_comments(seq, i + consumed);
    let parens = seq.get(params)?;
    if parens.kind != NodeKind::Parens || parens.find_child(NodeKind::Semicolon).is_some() {
        return None;
    }

    let mut j = params + 1;
    loop {
        let k = skip_comments(seq, j);
        let Some(node) = seq.get(k) else {
            break;
        };
        if node.kind.is_word() && node.text_in(FUNCTION_QUALIFIERS) {
            j = k + 1;
            if node.is_word_text("noexcept") {
                j = parens_after(seq, j);
            }
        } else if node.is_operator("->") {
            j = k + 1 + scan_units(&seq[k + 1..]).1;
        } else if node.kind == NodeKind::Colon {
            // Constructor initializer list, up to the body.
            match initializer_end(seq, k) {
                Some(body) => j = body,
                None => break,
            }
        } else {
            break;
        }
    }

    let (body, end) = body_after(seq, j);
    Some(FunctionPlan { params, body, end })
}

/// Past a `(...)` operand at `j`, comments allowed before it.
fn parens_after(seq: &[ParseNode], j: usize) -> usize {
    let k = skip_comments(seq, j);
    match seq.get(k) {
        Some(node) if node.kind == NodeKind::Parens => k + 1,
        _ => j,
    }
}

/// Index of the `Braces` ending an initializer list starting at `colon`.
fn initializer_end(seq: &[ParseNode], colon: usize) -> Option<usize> {
    let stop = seq[colon + 1..]
        .iter()
        .position(|n| matches!(n.kind, NodeKind::Braces | NodeKind::Semicolon | NodeKind::Colon))?;
    let index = colon + 1 + stop;
    (seq[index].kind == NodeKind::Braces && stop > 0).then_some(index)
}
