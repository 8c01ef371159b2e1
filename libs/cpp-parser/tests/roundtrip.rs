//! Round-trip tests: every accepted input inverts to itself.
//!
//! The property tests build sources from well-formed snippets, so every
//! generated input must parse, plus arbitrary printable text where only the
//! inputs that parse are checked.

use cpp_parser::{invert, parse};
use proptest::prelude::*;

fn assert_round_trip(source: &str) {
    let parsed = parse(source).unwrap();
    assert_eq!(invert(&parsed.content, &parsed.style), source);
}

#[test]
fn roundtrip_literals() {
    assert_round_trip("\"1234\"\n'5'\n");
    assert_round_trip("auto s = \"a \\\"quoted\\\" word\";\nchar c = '\\'';\n");
}

#[test]
fn roundtrip_comments() {
    assert_round_trip("/* hello1 */\n// hello2\n\"123\"\n");
    assert_round_trip("int a; /* multi\n   line */ int b; // tail\r\n");
}

#[test]
fn roundtrip_continuations() {
    assert_round_trip("#define LONG(a) \\\n    (a + 1)\nint x = LONG(2);\n");
    assert_round_trip("// comment \\\n continued\nint y;\n");
    assert_round_trip("const char* s = \"one \\\ntwo\";\n");
}

#[test]
fn roundtrip_templates_and_operators() {
    assert_round_trip("std::map<std::string, std::vector<int>> table;\n");
    assert_round_trip("if (a < b && c >= d) { x <<= 2; y = p->*m; }\n");
    assert_round_trip("template<typename T, typename Y = X<T>, class Z = std::conditional<true, T, Y>>\nclass Foo {};\n");
}

#[test]
fn roundtrip_definitions() {
    let source = r#"
/** Widget docs. */
namespace ui::widgets {

template <typename T>
class Widget : public Base<T>, private Noncopyable {
public:
    Widget(int w) : width(w) {}
    virtual ~Widget() = default;
    int area() const noexcept override { return width * height; }
    auto on_click = [this](int x) mutable -> bool { return x > 0; };
private:
    int width, height;
};

}  // namespace ui::widgets
"#;
    assert_round_trip(source);
}

#[test]
fn roundtrip_conditionals() {
    assert_round_trip("#ifdef _WIN32\n#  include <windows.h>\n#elif defined(__linux__)\n#include <unistd.h>\n#else\n#endif\n");
    assert_round_trip("#if A\nint a;\n");
    assert_round_trip("#endif\nint b;\n");
}

fn snippet() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "int x = 1;",
        "f(a, b);",
        "/* block */",
        "// line\n",
        "\"str\\\"q\"",
        "'c'",
        "#define A(x) ((x) * 2)\n",
        "#ifdef X\n",
        "#else\n",
        "#endif\n",
        "#include <vector>\n",
        "template <typename T> T id(T v) { return v; }",
        "a < b;",
        "x >> 2;",
        "std::vector<std::map<int, long>> v;",
        "\\\n",
        "{ }",
        "class A : public B { };",
        "struct S;",
        "namespace n { }",
        "auto l = [&](int y) { return y; };",
        "Foo::~Foo() {}",
        " ",
        "\t",
        "\n",
        "\r\n",
    ])
}

proptest! {
    #[test]
    fn roundtrip_snippet_sequences(parts in prop::collection::vec(snippet(), 0..24)) {
        let source: String = parts.concat();
        match parse(&source) {
            Ok(parsed) => prop_assert_eq!(parsed.invert(), source),
            Err(err) => prop_assert!(false, "{} in {:?}", err, source),
        }
    }

    #[test]
    fn roundtrip_arbitrary_text(source in "[ -~\t\n]{0,80}") {
        if let Ok(parsed) = parse(&source) {
            prop_assert_eq!(parsed.invert(), source);
        }
    }
}
