//! # Query Surface
//!
//! Typed views over a parsed content tree for code generators: function
//! signatures with their parameters, and class, struct and namespace scopes.
//!
//! Conditional blocks and `extern "C"` blocks are transparent: a function
//! inside `#ifdef X ... #endif` is listed like any other. Nothing here reads
//! the style tree.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::query;
//!
//! let parsed = cpp_parser::parse("void hello(int x1 = 25, int y2 = 100);").unwrap();
//! let functions = query::functions(&parsed.content);
//! assert_eq!(functions[0].name, "hello");
//! assert_eq!(functions[0].params[1].param_name, "y2");
//! assert_eq!(functions[0].params[1].default_expr.as_deref(), Some("100"));
//! ```

use crate::structure::units::{is_pointer_marker, scan_units};
use crate::tree::{render_sequence, NodeKind, ParseNode};
use serde::Serialize;

// =============================================================================
// FUNCTIONS
// =============================================================================

/// One function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamInfo {
    /// Rendered type, like `const std::string&`.
    pub param_type: String,
    /// Parameter name; empty when unnamed.
    pub param_name: String,
    /// Rendered default value expression.
    pub default_expr: Option<String>,
}

/// A function declaration or definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    pub name: String,
    pub return_type: String,
    pub specifiers: Vec<String>,
    pub qualifiers: Vec<String>,
    pub doc_comment: Option<String>,
    pub params: Vec<ParamInfo>,
    /// Rendered template parameters, in order.
    pub template_params: Vec<String>,
    /// Whether a body follows the signature.
    pub has_body: bool,
}

impl FunctionInfo {
    /// Describe a `FunctionDef` node carrying extracted attributes.
    pub fn from_node(node: &ParseNode) -> Option<Self> {
        if node.kind != NodeKind::FunctionDef {
            return None;
        }
        let decl = node.decl.as_deref()?;
        let params = node
            .find_child(NodeKind::Params)
            .map(|p| p.children.iter().map(param_info).collect())
            .unwrap_or_default();
        let template_params = node
            .find_child(NodeKind::TemplateParams)
            .map(|t| t.children.iter().map(ParseNode::render).collect())
            .unwrap_or_default();

        Some(Self {
            name: decl.name.clone(),
            return_type: decl.return_type.clone().unwrap_or_default(),
            specifiers: decl.specifiers.clone(),
            qualifiers: decl.qualifiers.clone(),
            doc_comment: decl.doc_comment.clone(),
            params,
            template_params,
            has_body: node.find_child(NodeKind::Body).is_some(),
        })
    }
}

/// Functions declared directly in `scope`.
///
/// ## Parameters
///
/// - `scope`: A content root, or the `Body` of a class or namespace
pub fn functions(scope: &ParseNode) -> Vec<FunctionInfo> {
    members(scope).into_iter().filter_map(FunctionInfo::from_node).collect()
}

/// Split one `Param` into type, name and default.
///
/// The name is the last unit before `=` when there are at least two units
/// and it is a plain word without `*` or `&`.
fn param_info(param: &ParseNode) -> ParamInfo {
    let nodes: Vec<&ParseNode> = param.children.iter().filter(|c| !c.kind.is_comment()).collect();
    let eq = nodes.iter().position(|n| n.is_operator("="));
    let (left, default_expr) = match eq {
        Some(eq) => (&nodes[..eq], Some(render_refs(&nodes[eq + 1..]))),
        None => (&nodes[..], None),
    };

    let owned: Vec<ParseNode> = left.iter().map(|n| (*n).clone()).collect();
    let (units, consumed) = scan_units(&owned);
    let named = match units.last() {
        Some(last) if units.len() >= 2 => {
            let unit = &owned[last.clone()];
            unit[0].kind == NodeKind::Text && !unit.iter().any(is_pointer_marker)
        }
        _ => false,
    };

    match units.last() {
        Some(last) if named => {
            let mut name = render_sequence(&owned[last.clone()]);
            name.push_str(&render_sequence(&owned[consumed..]));
            ParamInfo {
                param_type: render_sequence(&owned[..last.start]),
                param_name: name,
                default_expr,
            }
        }
        _ => ParamInfo {
            param_type: render_sequence(&owned),
            param_name: String::new(),
            default_expr,
        },
    }
}

fn render_refs(nodes: &[&ParseNode]) -> String {
    let owned: Vec<ParseNode> = nodes.iter().map(|n| (*n).clone()).collect();
    render_sequence(&owned)
}

// =============================================================================
// SCOPES
// =============================================================================

/// Kind of a named scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Class,
    Struct,
    Namespace,
}

/// A class, struct or namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeInfo<'a> {
    /// Declared name; empty for anonymous scopes.
    pub name: String,
    pub kind: ScopeKind,
    /// Rendered base clauses, like `public Base`.
    pub bases: Vec<String>,
    pub doc_comment: Option<String>,
    /// Braced body, absent for forward declarations.
    #[serde(skip)]
    pub body: Option<&'a ParseNode>,
}

impl<'a> ScopeInfo<'a> {
    /// Describe a `ClassDefn` or `NamespaceDefn` node.
    pub fn from_node(node: &'a ParseNode) -> Option<Self> {
        let kind = match node.kind {
            NodeKind::NamespaceDefn => ScopeKind::Namespace,
            NodeKind::ClassDefn if node.find_child(NodeKind::StructKeyword).is_some() => ScopeKind::Struct,
            NodeKind::ClassDefn => ScopeKind::Class,
            _ => return None,
        };
        let decl = node.decl.as_deref()?;
        let bases = node.find_child(NodeKind::Inheritance).map(base_clauses).unwrap_or_default();

        Some(Self {
            name: decl.name.clone(),
            kind,
            bases,
            doc_comment: decl.doc_comment.clone(),
            body: node.find_child(NodeKind::Body),
        })
    }

    /// Functions declared in the body.
    pub fn functions(&self) -> Vec<FunctionInfo> {
        self.body.map(functions).unwrap_or_default()
    }

    /// Classes and structs nested in the body.
    pub fn classes(&self) -> Vec<ScopeInfo<'a>> {
        self.body.map(classes).unwrap_or_default()
    }

    /// Namespaces nested in the body.
    pub fn namespaces(&self) -> Vec<ScopeInfo<'a>> {
        self.body.map(namespaces).unwrap_or_default()
    }
}

/// Classes and structs declared directly in `scope`.
pub fn classes(scope: &ParseNode) -> Vec<ScopeInfo<'_>> {
    members(scope)
        .into_iter()
        .filter(|n| n.kind == NodeKind::ClassDefn)
        .filter_map(ScopeInfo::from_node)
        .collect()
}

/// Namespaces declared directly in `scope`.
pub fn namespaces(scope: &ParseNode) -> Vec<ScopeInfo<'_>> {
    members(scope)
        .into_iter()
        .filter(|n| n.kind == NodeKind::NamespaceDefn)
        .filter_map(ScopeInfo::from_node)
        .collect()
}

fn base_clauses(inheritance: &ParseNode) -> Vec<String> {
    inheritance
        .children
        .split(|n| n.kind == NodeKind::Comma)
        .map(|part| {
            let part: Vec<ParseNode> = part.iter().filter(|n| n.kind != NodeKind::Colon).cloned().collect();
            render_sequence(&part)
        })
        .filter(|base| !base.is_empty())
        .collect()
}

/// Children of `scope`, with conditional blocks flattened into their
/// branches and `extern "C"` blocks into their bodies.
fn members(scope: &ParseNode) -> Vec<&ParseNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&ParseNode> = scope.children.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if matches!(node.kind, NodeKind::ConditionalBlock | NodeKind::LinkageSpec) {
            let inner = node.find_children(NodeKind::Body).flat_map(|b| b.children.iter());
            let inner: Vec<&ParseNode> = inner.collect();
            stack.extend(inner.into_iter().rev());
        } else {
            out.push(node);
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
