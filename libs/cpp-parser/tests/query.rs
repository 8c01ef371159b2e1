//! Query surface and extraction properties over realistic headers.

use cpp_parser::declarations::extract;
use cpp_parser::query::{self, ScopeKind};
use cpp_parser::{parse, NodeKind};

const HEADER: &str = r#"
#pragma once
#include <string>

namespace audio {

/// Output device.
class Device : public Base {
public:
    /** Opens the device. */
    static Device* open(const std::string& name, int rate = 48000);
    virtual void close() noexcept;
    int channels() const;
};

struct Config;

namespace detail {
inline int clamp(int v, int lo, int hi) { return v < lo ? lo : (v > hi ? hi : v); }
}

}
"#;

#[test]
fn scopes_and_members() {
    let parsed = parse(HEADER).unwrap();
    assert!(parsed.is_ok());

    let audio = &query::namespaces(&parsed.content)[0];
    assert_eq!(audio.name, "audio");

    let classes = audio.classes();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0].name, "Device");
    assert_eq!(classes[0].doc_comment.as_deref(), Some("/ Output device."));
    assert_eq!(classes[1].kind, ScopeKind::Struct);
    assert!(classes[1].body.is_none());

    let methods = classes[0].functions();
    let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["open", "close", "channels"]);

    let open = &methods[0];
    assert_eq!(open.return_type, "Device*");
    assert_eq!(open.specifiers, ["static"]);
    assert_eq!(open.doc_comment.as_deref(), Some("* Opens the device. "));
    assert_eq!(open.params[0].param_type, "const std::string&");
    assert_eq!(open.params[1].default_expr.as_deref(), Some("48000"));
    assert_eq!(methods[1].qualifiers, ["noexcept"]);

    let detail = &audio.namespaces()[0];
    let clamp = &detail.functions()[0];
    assert_eq!(clamp.name, "clamp");
    assert!(clamp.has_body);
    assert_eq!(clamp.params.len(), 3);
}

#[test]
fn query_output_serializes() {
    let parsed = parse(HEADER).unwrap();
    let audio = &query::namespaces(&parsed.content)[0];
    let methods = audio.classes()[0].functions();
    let json = serde_json::to_value(&methods).unwrap();
    assert_eq!(json[0]["name"], "open");
    assert_eq!(json[0]["params"][1]["param_name"], "rate");
    assert_eq!(json[2]["qualifiers"][0], "const");
}

#[test]
fn extraction_is_idempotent() {
    let parsed = parse(HEADER).unwrap();
    let mut style = parsed.style.children.clone();
    let again = extract(parsed.content.children.clone(), &mut style);
    assert_eq!(again, parsed.content.children);
    assert_eq!(style.len(), parsed.style.children.len());
}

#[test]
fn includes_and_pragmas_are_opaque() {
    let parsed = parse(HEADER).unwrap();
    let directives: Vec<_> = parsed
        .content
        .children
        .iter()
        .filter(|n| n.kind == NodeKind::Preprocessor)
        .map(|n| n.text().into_owned())
        .collect();
    assert_eq!(directives, ["#pragma once", "#include <string>"]);
    assert_eq!(parsed.includes[0].target, "string");
}
