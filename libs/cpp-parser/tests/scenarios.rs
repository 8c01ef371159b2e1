//! End-to-end scenarios over the public API.

use cpp_parser::{parse, query, NodeKind, ParseNode};

fn content_kinds(root: &ParseNode) -> Vec<NodeKind> {
    root.children
        .iter()
        .filter(|n| n.kind != NodeKind::Comment)
        .map(|n| n.kind)
        .collect()
}

#[test]
fn scenario_string_and_char() {
    let source = "\"1234\"\n'5'\n";
    let parsed = parse(source).unwrap();
    assert_eq!(content_kinds(&parsed.content), [NodeKind::String, NodeKind::Char]);
    assert_eq!(parsed.content.children[0].value.as_deref(), Some("1234"));
    assert_eq!(parsed.content.children[1].value.as_deref(), Some("5"));
    assert_eq!(parsed.invert(), source);
}

#[test]
fn scenario_comments_in_style_tree() {
    let source = "/* hello1 */\n// hello2\n\"123\"\n";
    let parsed = parse(source).unwrap();

    let block = parsed.style.find_child(NodeKind::BlockComment).unwrap();
    assert_eq!(block.value.as_deref(), Some(" hello1 "));
    let line = parsed.style.find_child(NodeKind::LineComment).unwrap();
    assert_eq!(line.value.as_deref(), Some(" hello2"));

    assert_eq!(content_kinds(&parsed.content), [NodeKind::String]);
    assert_eq!(parsed.content.find_child(NodeKind::String).unwrap().text(), "123");
    assert_eq!(parsed.invert(), source);
}

#[test]
fn scenario_function_with_defaults() {
    let source = "void hello(int x1 = 25, int y2 = 100);";
    let parsed = parse(source).unwrap();

    let func = &parsed.content.children[0];
    assert_eq!(func.kind, NodeKind::FunctionDef);
    let decl = func.decl.as_deref().unwrap();
    assert_eq!(decl.name, "hello");
    assert_eq!(decl.return_type.as_deref(), Some("void"));

    let info = &query::functions(&parsed.content)[0];
    let params: Vec<_> = info
        .params
        .iter()
        .map(|p| (p.param_type.as_str(), p.param_name.as_str(), p.default_expr.as_deref()))
        .collect();
    assert_eq!(params, [("int", "x1", Some("25")), ("int", "y2", Some("100"))]);
    assert_eq!(parsed.invert(), source);
}

#[test]
fn scenario_namespace_contains_class() {
    let source = "namespace hello { class test { }; }";
    let parsed = parse(source).unwrap();

    assert_eq!(content_kinds(&parsed.content), [NodeKind::NamespaceDefn]);
    let ns = &parsed.content.children[0];
    assert_eq!(ns.name(), Some("hello"));

    let body = ns.find_child(NodeKind::Body).unwrap();
    let classes: Vec<_> = body.find_children(NodeKind::ClassDefn).collect();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name(), Some("test"));
    assert_eq!(parsed.invert(), source);
}

#[test]
fn scenario_macro_substitution_view() {
    let source = "#define HELLO hi\nint HELLO = 5;";
    let parsed = parse(source).unwrap();

    let hello = parsed.macros().get("HELLO").unwrap();
    assert_eq!(hello.body, "hi");
    assert!(!hello.is_function_like());

    let statement = &parsed.content.children[1..];
    assert_eq!(parsed.expand_nodes(statement).as_deref(), Some("int hi = 5;"));
    assert_eq!(parsed.invert(), source);
}

#[test]
fn call_is_not_a_definition() {
    let parsed = parse("int main() { printf(\"%d\", 1); }").unwrap();
    let body = parsed.content.children[0].find_child(NodeKind::Body).unwrap();
    assert_eq!(body.children[0].kind, NodeKind::FunctionCall);
    assert!(parsed.is_ok());
}

#[test]
fn comment_inside_signature() {
    let source = "int /* id */ next_id();";
    let parsed = parse(source).unwrap();
    assert_eq!(content_kinds(&parsed.content), [NodeKind::FunctionDef, NodeKind::Semicolon]);

    let f = &query::functions(&parsed.content)[0];
    assert_eq!(f.name, "next_id");
    assert_eq!(f.return_type, "int");
    assert!(f.doc_comment.is_none());
    assert_eq!(parsed.invert(), source);
}

#[test]
fn comment_between_signature_and_body() {
    let source = "int main() // entry\n{ return 0; }";
    let parsed = parse(source).unwrap();
    assert_eq!(content_kinds(&parsed.content), [NodeKind::FunctionDef]);

    let f = &query::functions(&parsed.content)[0];
    assert_eq!(f.name, "main");
    assert!(f.has_body);
    assert_eq!(parsed.invert(), source);
}

#[test]
fn lambda_inside_function_body() {
    let parsed = parse("void run() { auto f = [=](int v) { return v * 2; }; }").unwrap();
    let body = parsed.content.children[0].find_child(NodeKind::Body).unwrap();
    assert!(body.find_child(NodeKind::Lambda).is_some());
}

#[test]
fn unbalanced_closer_is_fatal() {
    let err = parse("int f() { } }").unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.offset(), 12);
}
