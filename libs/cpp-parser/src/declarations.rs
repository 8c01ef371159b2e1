//! # Declaration Extraction Pass
//!
//! Derives [`Declaration`] attributes for recognized definitions and splices
//! `template <...>` prefixes into the definition they introduce.
//!
//! | Node            | name                 | return type    | specifiers      |
//! |-----------------|----------------------|----------------|-----------------|
//! | `FunctionDef`   | last unit before `(` | unit before it | earlier units   |
//! | `ClassDefn`     | first name child     |                | class keyword   |
//! | `NamespaceDefn` | first name child     |                | `namespace`     |
//!
//! A `FunctionDef` with fewer than two units before its parameter list has
//! no return type and cannot be a definition; it becomes a `FunctionCall`.
//!
//! The pass is idempotent: running it on its own output changes nothing.
//!
//! ## Example
//!
//! ```rust
//! let parsed = cpp_parser::parse("/// Doc.\nstatic int twice(int x) { return 2 * x; }").unwrap();
//! let func = &parsed.content.children[0];
//! let decl = func.decl.as_deref().unwrap();
//! assert_eq!(decl.name, "twice");
//! assert_eq!(decl.return_type.as_deref(), Some("int"));
//! assert_eq!(decl.specifiers, ["static"]);
//! assert_eq!(decl.doc_comment.as_deref(), Some("/ Doc."));
//! ```

use crate::structure::units::scan_units;
use crate::tree::{render_sequence, Declaration, NodeKind, ParseNode};
use config::constants::{FUNCTION_QUALIFIERS, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

/// Run extraction over a sequence and every sequence nested in it.
///
/// ## Parameters
///
/// - `seq`: Structured content sequence
/// - `style`: Style sequence; receives spliced-out `template` keywords
pub fn extract(seq: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Vec<ParseNode> {
    let mut seq: Vec<ParseNode> = seq
        .into_iter()
        .map(|mut node| {
            if !node.children.is_empty() {
                let children = std::mem::take(&mut node.children);
                node.children = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
                    extract(children, style)
                });
            }
            node
        })
        .collect();

    splice_templates(&mut seq, style);
    for node in &mut seq {
        match node.kind {
            NodeKind::FunctionDef => describe_function(node),
            NodeKind::ClassDefn | NodeKind::NamespaceDefn => describe_scope(node),
            _ => {}
        }
    }
    seq
}

// =============================================================================
// TEMPLATE SPLICING
// =============================================================================

/// Move `[comment] template <params>` into the definition that follows.
fn splice_templates(seq: &mut Vec<ParseNode>, style: &mut Vec<ParseNode>) {
    let mut i = seq.len();
    while i > 0 {
        i -= 1;
        let matches = seq[i].kind == NodeKind::TemplateKeyword
            && seq.get(i + 1).map_or(false, |n| n.kind == NodeKind::TemplateParams)
            && seq
                .get(i + 2)
                .map_or(false, |n| matches!(n.kind, NodeKind::FunctionDef | NodeKind::ClassDefn));
        if !matches {
            continue;
        }

        let mut def = seq.remove(i + 2);
        let params = seq.remove(i + 1);
        let keyword = seq.remove(i);
        style.push(keyword.hide());

        let has_doc = def.children.first().map_or(false, |c| c.kind == NodeKind::Comment);
        def.children.insert(usize::from(has_doc), params);
        if !has_doc && i > 0 && seq[i - 1].kind == NodeKind::Comment {
            i -= 1;
            def.children.insert(0, seq.remove(i));
        }
        seq.insert(i, ParseNode::branch(def.kind, def.children));
    }
}

// =============================================================================
// DESCRIPTIONS
// =============================================================================

/// Leading children that precede a definition's own tokens.
fn prefix_len(children: &[ParseNode]) -> usize {
    children
        .iter()
        .take_while(|c| matches!(c.kind, NodeKind::Comment | NodeKind::TemplateParams))
        .count()
}

/// Only a leading comment documents the definition; comments further in are
/// part of the signature.
fn doc_comment(node: &ParseNode) -> Option<String> {
    node.children
        .first()
        .filter(|c| c.kind == NodeKind::Comment)
        .map(|c| c.text().into_owned())
}

fn describe_function(node: &mut ParseNode) {
    let Some(params) = node.position(NodeKind::Params) else {
        return;
    };
    let head = &node.children[prefix_len(&node.children)..params];
    let (units, _) = scan_units(head);
    let [specifiers @ .., return_type, name] = units.as_slice() else {
        node.kind = NodeKind::FunctionCall;
        node.decl = None;
        return;
    };

    let mut return_type = render_sequence(&head[return_type.clone()]);
    let tail = &node.children[params + 1..];
    if let Some(arrow) = tail.iter().position(|n| n.is_operator("->")) {
        // `auto f() -> T`
        let after = &tail[arrow + 1..];
        let (_, consumed) = scan_units(after);
        if return_type == "auto" && consumed > 0 {
            return_type = render_sequence(&after[..consumed]);
        }
    }
    let qualifiers = tail
        .iter()
        .filter(|n| n.kind.is_word() && n.text_in(FUNCTION_QUALIFIERS))
        .map(|n| n.text().into_owned())
        .collect();

    node.decl = Some(Box::new(Declaration {
        name: render_sequence(&head[name.clone()]),
        return_type: Some(return_type),
        specifiers: specifiers.iter().map(|u| render_sequence(&head[u.clone()])).collect(),
        qualifiers,
        doc_comment: doc_comment(node),
    }));
}

fn describe_scope(node: &mut ParseNode) {
    let name = node
        .children
        .iter()
        .find(|c| matches!(c.kind, NodeKind::Text | NodeKind::QualifiedName))
        .map(|c| c.text().into_owned())
        .unwrap_or_default();
    let specifiers = node
        .children
        .iter()
        .filter(|c| {
            matches!(
                c.kind,
                NodeKind::ClassKeyword | NodeKind::StructKeyword | NodeKind::NamespaceKeyword
            )
        })
        .map(|c| c.text().into_owned())
        .collect();

    node.decl = Some(Box::new(Declaration {
        name,
        return_type: None,
        specifiers,
        qualifiers: Vec::new(),
        doc_comment: doc_comment(node),
    }));
}

// =============================================================================
// TESTS
// =============================================================================
