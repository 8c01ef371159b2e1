//! # Grouping & Fusion Pass
//!
//! Turns the flat labeled content sequence into nested structure.
//!
//! ## Stages
//!
//! 1. **Grouping**: `( )`, `[ ]` and `{ }` pairs become group nodes. The
//!    bracket leaves move to the style tree.
//! 2. Per sequence, innermost groups first:
//!    - operator fusion (`++`, `->`, `&&`, ...)
//!    - qualified names (`a::b::c`)
//!    - template lists (`<...>`), tried speculatively
//!    - angle operator fusion (`<<`, `>=`, ...) for the angles left over
//!    - lambdas
//!    - class, struct and namespace definitions
//!    - function definitions
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::tree::NodeKind;
//!
//! let parsed = cpp_parser::parse("namespace a::b { int f(); }").unwrap();
//! let ns = &parsed.content.children[0];
//! assert_eq!(ns.kind, NodeKind::NamespaceDefn);
//! assert_eq!(ns.children[1].kind, NodeKind::QualifiedName);
//! ```

mod definitions;
mod functions;
mod groups;
mod operators;
mod templates;
pub(crate) mod units;

use crate::error::ParseError;
use crate::tree::{NodeKind, ParseNode};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

/// Group and recognize a labeled content sequence.
///
/// ## Parameters
///
/// - `nodes`: Labeled content leaves in source order
/// - `style`: Style sequence; receives moved-out delimiters and commas
///
/// ## Errors
///
/// `UnterminatedGroup` or `UnbalancedCloser` for mismatched brackets.
pub fn structure(nodes: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Result<Vec<ParseNode>, ParseError> {
    let grouped = groups::group(nodes, style)?;
    Ok(recognize(grouped, style))
}

/// Run recognition on a sequence whose groups are not yet recognized.
fn recognize(seq: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Vec<ParseNode> {
    let mut inner_done = Vec::with_capacity(seq.len());
    for mut node in seq {
        if matches!(node.kind, NodeKind::Parens | NodeKind::Brackets | NodeKind::Braces) {
            let children = std::mem::take(&mut node.children);
            node.children = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
                recognize(children, style)
            });
        }
        inner_done.push(node);
    }

    let seq = operators::fuse_operators(inner_done);
    let seq = definitions::qualified_names(seq);
    let seq = templates::templates(seq, style);
    let seq = operators::fuse_angles(seq);
    let seq = functions::lambdas(seq, style);
    let seq = definitions::scopes(seq);
    functions::functions(seq, style)
}

/// Split a sequence on commas into `Param` nodes. Commas move to the style
/// tree; empty entries are dropped.
fn split_params(nodes: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Vec<ParseNode> {
    let mut params = Vec::new();
    let mut current = Vec::new();
    for node in nodes {
        if node.kind == NodeKind::Comma {
            style.push(node.hide());
            if !current.is_empty() {
                params.push(ParseNode::branch(NodeKind::Param, std::mem::take(&mut current)));
            }
        } else {
            current.push(node);
        }
    }
    if !current.is_empty() {
        params.push(ParseNode::branch(NodeKind::Param, current));
    }
    params
}

/// Retype a `Parens` group as a parameter list.
fn into_params(node: &mut ParseNode, style: &mut Vec<ParseNode>) {
    node.kind = NodeKind::Params;
    let children = std::mem::take(&mut node.children);
    node.children = split_params(children, style);
    if node.children.is_empty() {
        node.value = Some(String::new());
    }
}

/// Optional `Braces` body at `j`. Comments before it are only taken when a
/// body follows them.
fn body_after(seq: &[ParseNode], j: usize) -> (Option<usize>, usize) {
    let k = units::skip_comments(seq, j);
    match seq.get(k) {
        Some(node) if node.kind == NodeKind::Braces => (Some(k), k + 1),
        _ => (None, j),
    }
}

// =============================================================================
// TESTS
// =============================================================================
