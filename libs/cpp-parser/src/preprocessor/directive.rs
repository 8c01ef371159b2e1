//! Directive line parsing.

use super::macros::{MacroDef, VA_ARGS};
use super::Include;
use crate::lexer::{Lexer, TokenKind};

/// A `#name rest` line split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Directive name, like `define` or `ifdef`. Empty for a lone `#`.
    pub name: &'a str,
    /// Text after the name, trimmed.
    pub rest: &'a str,
}

impl<'a> Directive<'a> {
    /// Split a preprocessor line. Returns `None` if it does not start with
    /// `#`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let after = text.strip_prefix('#')?.trim_start();
        let len = after
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        Some(Self {
            name: &after[..len],
            rest: after[len..].trim(),
        })
    }

    /// `#if`, `#ifdef`, `#ifndef`
    pub fn opens_block(&self) -> bool {
        matches!(self.name, "if" | "ifdef" | "ifndef")
    }

    /// `#elif`, `#elifdef`, `#elifndef`, `#else`
    pub fn starts_alternative(&self) -> bool {
        matches!(self.name, "elif" | "elifdef" | "elifndef" | "else")
    }

    /// `#endif`
    pub fn closes_block(&self) -> bool {
        self.name == "endif"
    }
}

/// Parse the text after `#define`.
///
/// The macro is function-like only when `(` immediately follows the name.
/// A trailing `...` formal becomes `__VA_ARGS__`; `args...` names the
/// variadic formal `args`.
pub(super) fn parse_define(rest: &str, offset: usize) -> Option<MacroDef> {
    let tokens = Lexer::new(rest).tokenize();
    let name = tokens.first().filter(|t| t.kind == TokenKind::Word)?;

    let mut body_start = name.end();
    let mut params = None;
    let mut variadic = false;
    if tokens.get(1).map_or(false, |t| t.is_punct('(')) {
        let mut formals = Vec::new();
        body_start = rest.len();
        for token in &tokens[2..] {
            if token.is_punct(')') {
                body_start = token.end();
                break;
            }
            if token.kind != TokenKind::Word {
                continue;
            }
            if token.text == "..." {
                formals.push(VA_ARGS.to_string());
                variadic = true;
            } else if let Some(named) = token.text.strip_suffix("...") {
                formals.push(named.to_string());
                variadic = true;
            } else {
                formals.push(token.text.clone());
            }
        }
        params = Some(formals);
    }

    Some(MacroDef {
        name: name.text.clone(),
        params,
        variadic,
        body: rest[body_start..].trim().to_string(),
        offset,
    })
}

/// Parse the text after `#undef`.
pub(super) fn parse_undef(rest: &str) -> Option<&str> {
    rest.split_whitespace().next()
}

/// Parse the text after `#include`. Computed includes are skipped.
pub(super) fn parse_include(rest: &str, offset: usize) -> Option<Include> {
    let (target, angled) = if let Some(inner) = rest.strip_prefix('<') {
        (inner.split_once('>')?.0, true)
    } else if let Some(inner) = rest.strip_prefix('"') {
        (inner.split_once('"')?.0, false)
    } else {
        return None;
    };
    Some(Include {
        target: target.to_string(),
        angled,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_directive() {
        let d = Directive::parse("#  ifdef  DEBUG ").unwrap();
        assert_eq!(d.name, "ifdef");
        assert_eq!(d.rest, "DEBUG");
        assert!(d.opens_block());
        assert!(Directive::parse("int x;").is_none());
    }

    #[test]
    fn test_object_like_define() {
        let def = parse_define("HELLO hi there", 4).unwrap();
        assert_eq!(def.name, "HELLO");
        assert_eq!(def.params, None);
        assert_eq!(def.body, "hi there");
        assert_eq!(def.offset, 4);
    }

    #[test]
    fn test_space_before_paren_is_object_like() {
        let def = parse_define("WRAP (x) x", 0).unwrap();
        assert!(!def.is_function_like());
        assert_eq!(def.body, "(x) x");
    }

    #[test]
    fn test_function_like_define() {
        let def = parse_define("MAX(a, b) ((a) > (b))", 0).unwrap();
        assert_eq!(def.params, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(def.body, "((a) > (b))");
    }

    #[test]
    fn test_variadic_formals() {
        let unnamed = parse_define("LOG(fmt, ...) printf(fmt, __VA_ARGS__)", 0).unwrap();
        assert!(unnamed.variadic);
        assert_eq!(unnamed.params.unwrap().last().map(String::as_str), Some(VA_ARGS));

        let named = parse_define("TRACE(args...) trace(args)", 0).unwrap();
        assert!(named.variadic);
        assert_eq!(named.params, Some(vec!["args".to_string()]));
    }

    #[test]
    fn test_include_forms() {
        let angled = parse_include("<vector>", 0).unwrap();
        assert_eq!((angled.target.as_str(), angled.angled), ("vector", true));
        let quoted = parse_include("\"util/io.h\"", 9).unwrap();
        assert_eq!((quoted.target.as_str(), quoted.angled, quoted.offset), ("util/io.h", false, 9));
        assert!(parse_include("HEADER_NAME", 0).is_none());
    }
}
