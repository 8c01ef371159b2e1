//! Macro definitions and the substitution view.
//!
//! Substitution never touches a parse tree. [`MacroTable::expand`] rewrites
//! a piece of text and returns a new string; the trees keep the original
//! source for inversion.

use crate::lexer::{Lexer, Token, TokenKind};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::Serialize;
use stacker::maybe_grow;
use std::collections::BTreeMap;

/// Formal parameter standing for unnamed variadic arguments.
pub const VA_ARGS: &str = "__VA_ARGS__";

// =============================================================================
// DEFINITIONS
// =============================================================================

/// A `#define`d macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroDef {
    /// Macro name.
    pub name: String,
    /// Formal parameters of a function-like macro; `None` for object-like.
    pub params: Option<Vec<String>>,
    /// Whether the last formal collects the remaining arguments.
    pub variadic: bool,
    /// Replacement text, trimmed.
    pub body: String,
    /// Byte offset of the defining directive; 0 for predefined macros.
    pub offset: usize,
}

impl MacroDef {
    /// An object-like macro.
    pub fn object(name: impl Into<String>, body: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            params: None,
            variadic: false,
            body: body.into(),
            offset,
        }
    }

    /// Check if the macro takes arguments.
    pub fn is_function_like(&self) -> bool {
        self.params.is_some()
    }
}

/// A change to the macro table, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MacroEvent {
    /// `#define`
    Define(MacroDef),
    /// `#undef`
    Undef {
        /// Name being removed.
        name: String,
        /// Byte offset of the directive.
        offset: usize,
    },
}

impl MacroEvent {
    /// Byte offset of the directive that caused the event.
    pub fn offset(&self) -> usize {
        match self {
            Self::Define(def) => def.offset,
            Self::Undef { offset, .. } => *offset,
        }
    }
}

// =============================================================================
// MACRO TABLE
// =============================================================================

/// Name-to-definition map owned by one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MacroTable {
    defs: BTreeMap<String, MacroDef>,
}

impl MacroTable {
    /// Table holding the configured object-like macros.
    pub fn seeded(predefined: &BTreeMap<String, String>) -> Self {
        let defs = predefined
            .iter()
            .map(|(name, body)| (name.clone(), MacroDef::object(name.as_str(), body.as_str(), 0)))
            .collect();
        Self { defs }
    }

    /// Add or replace a definition.
    pub fn define(&mut self, def: MacroDef) {
        self.defs.insert(def.name.clone(), def);
    }

    /// Remove a definition. Returns whether the name was defined.
    pub fn undef(&mut self, name: &str) -> bool {
        self.defs.remove(name).is_some()
    }

    /// Apply one event. Returns `false` for an `#undef` of an unknown name.
    pub fn apply(&mut self, event: &MacroEvent) -> bool {
        match event {
            MacroEvent::Define(def) => {
                self.define(def.clone());
                true
            }
            MacroEvent::Undef { name, .. } => self.undef(name),
        }
    }

    /// Table after applying every event located before `offset`.
    pub fn replay<'e>(mut self, events: impl IntoIterator<Item = &'e MacroEvent>, offset: usize) -> Self {
        for event in events.into_iter().filter(|e| e.offset() < offset) {
            self.apply(event);
        }
        self
    }

    /// Look up a definition.
    pub fn get(&self, name: &str) -> Option<&MacroDef> {
        self.defs.get(name)
    }

    /// Check if a name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MacroDef> {
        self.defs.values()
    }

    /// Substitute every macro use in `text`.
    ///
    /// String and char literals and comments are copied untouched. A macro
    /// is never expanded inside its own replacement.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use cpp_parser::preprocessor::{MacroDef, MacroTable};
    ///
    /// let mut table = MacroTable::default();
    /// table.define(MacroDef::object("HELLO", "hi", 0));
    /// assert_eq!(table.expand("int HELLO = 5; // HELLO"), "int hi = 5; // HELLO");
    /// ```
    pub fn expand(&self, text: &str) -> String {
        self.expand_with(text, &mut Vec::new())
    }

    fn expand_with<'s>(&'s self, text: &str, active: &mut Vec<&'s str>) -> String {
        let tokens = Lexer::new(text).tokenize();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while let Some(token) = tokens.get(i) {
            if let Some(end) = opaque_end(&tokens, i) {
                out.push_str(&text[token.start()..end]);
                i = tokens.iter().position(|t| t.start() >= end).unwrap_or(tokens.len());
                continue;
            }
            let def = match token.kind {
                TokenKind::Word => self.defs.get(token.text.as_str()),
                _ => None,
            };
            let Some(def) = def.filter(|d| !active.contains(&d.name.as_str())) else {
                out.push_str(&token.text);
                i += 1;
                continue;
            };

            let replacement = match &def.params {
                None => {
                    i += 1;
                    def.body.clone()
                }
                Some(params) => match call_args(&tokens, i + 1) {
                    Some((args, next)) => {
                        i = next;
                        let args: Vec<String> = args.iter().map(|a| self.expand_with(a, active)).collect();
                        substitute(def, params, &args)
                    }
                    None => {
                        out.push_str(&token.text);
                        i += 1;
                        continue;
                    }
                },
            };

            active.push(def.name.as_str());
            let expanded = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
                self.expand_with(&replacement, active)
            });
            active.pop();
            out.push_str(&expanded);
        }
        out
    }
}

// =============================================================================
// SCANNING HELPERS
// =============================================================================

/// End offset of a literal or comment starting at token `i`.
fn opaque_end(tokens: &[Token], i: usize) -> Option<usize> {
    let token = &tokens[i];
    let last = tokens.last().map_or(token.end(), Token::end);
    match token.punct() {
        Some(q @ ('"' | '\'')) => {
            let mut escaped = false;
            for t in &tokens[i + 1..] {
                if escaped {
                    escaped = false;
                } else if t.is_punct('\\') {
                    escaped = true;
                } else if t.is_punct(q) || (t.is_whitespace() && t.has_newline()) {
                    return Some(t.end());
                }
            }
            Some(last)
        }
        Some('/') if tokens.get(i + 1).map_or(false, |t| t.is_punct('*')) => {
            let close = tokens[i + 2..]
                .windows(2)
                .find(|w| w[0].is_punct('*') && w[1].is_punct('/'))
                .map(|w| w[1].end());
            Some(close.unwrap_or(last))
        }
        Some('/') if tokens.get(i + 1).map_or(false, |t| t.is_punct('/')) => {
            let newline = tokens[i + 2..].iter().find(|t| t.has_newline()).map(Token::start);
            Some(newline.unwrap_or(last))
        }
        _ => None,
    }
}

/// Arguments of a call whose `(` follows token `after`, skipping
/// whitespace. Returns the trimmed arguments and the index past `)`.
fn call_args(tokens: &[Token], after: usize) -> Option<(Vec<String>, usize)> {
    let open = after + tokens[after..].iter().take_while(|t| t.is_whitespace()).count();
    if !tokens.get(open)?.is_punct('(') {
        return None;
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut i = open + 1;
    while let Some(token) = tokens.get(i) {
        if let Some(end) = opaque_end(tokens, i) {
            let next = tokens.iter().position(|t| t.start() >= end).unwrap_or(tokens.len());
            tokens[i..next].iter().for_each(|t| current.push_str(&t.text));
            i = next;
            continue;
        }
        match token.punct() {
            Some('(') => depth += 1,
            Some(')') if depth == 0 => {
                if !(args.is_empty() && current.trim().is_empty()) {
                    args.push(current.trim().to_string());
                }
                return Some((args, i + 1));
            }
            Some(')') => depth -= 1,
            Some(',') if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                i += 1;
                continue;
            }
            _ => {}
        }
        current.push_str(&token.text);
        i += 1;
    }
    None
}

/// Replace each formal in the body with its argument.
fn substitute(def: &MacroDef, params: &[String], args: &[String]) -> String {
    let fixed = if def.variadic { params.len().saturating_sub(1) } else { params.len() };
    let variadic_text = args.get(fixed..).map(|rest| rest.join(", ")).unwrap_or_default();

    Lexer::new(&def.body)
        .tokenize()
        .into_iter()
        .map(|token| {
            if token.kind != TokenKind::Word {
                return token.text;
            }
            match params.iter().position(|p| *p == token.text) {
                Some(k) if def.variadic && k == params.len() - 1 => variadic_text.clone(),
                Some(k) => args.get(k).cloned().unwrap_or_default(),
                None => token.text,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_like(name: &str, params: &[&str], variadic: bool, body: &str) -> MacroDef {
        MacroDef {
            name: name.into(),
            params: Some(params.iter().map(|p| p.to_string()).collect()),
            variadic,
            body: body.into(),
            offset: 0,
        }
    }

    #[test]
    fn test_object_like_expansion() {
        let mut table = MacroTable::default();
        table.define(MacroDef::object("HELLO", "hi", 0));
        assert_eq!(table.expand("int HELLO = 5;"), "int hi = 5;");
    }

    #[test]
    fn test_strings_and_comments_untouched() {
        let mut table = MacroTable::default();
        table.define(MacroDef::object("X", "1", 0));
        assert_eq!(table.expand("f(\"X\", 'X') /* X */ X"), "f(\"X\", 'X') /* X */ 1");
    }

    #[test]
    fn test_function_like_expansion() {
        let mut table = MacroTable::default();
        table.define(function_like("MAX", &["a", "b"], false, "((a) > (b) ? (a) : (b))"));
        assert_eq!(table.expand("MAX(x, f(1, 2))"), "((x) > (f(1, 2)) ? (x) : (f(1, 2)))");
    }

    #[test]
    fn test_function_like_without_call_is_plain() {
        let mut table = MacroTable::default();
        table.define(function_like("F", &["a"], false, "a"));
        assert_eq!(table.expand("int F;"), "int F;");
    }

    #[test]
    fn test_self_reference_stops() {
        let mut table = MacroTable::default();
        table.define(MacroDef::object("A", "B + 1", 0));
        table.define(MacroDef::object("B", "A * 2", 0));
        assert_eq!(table.expand("A"), "A * 2 + 1");
    }

    #[test]
    fn test_nested_arguments_expanded() {
        let mut table = MacroTable::default();
        table.define(MacroDef::object("N", "10", 0));
        table.define(function_like("SQ", &["x"], false, "x * x"));
        assert_eq!(table.expand("SQ(N)"), "10 * 10");
    }

    #[test]
    fn test_variadic_arguments() {
        let mut table = MacroTable::default();
        table.define(function_like("LOG", &["fmt", VA_ARGS], true, "printf(fmt, __VA_ARGS__)"));
        assert_eq!(table.expand("LOG(\"%d %d\", a, b)"), "printf(\"%d %d\", a, b)");
    }

    #[test]
    fn test_replay_stops_at_offset() {
        let events = vec![
            MacroEvent::Define(MacroDef::object("A", "1", 0)),
            MacroEvent::Undef {
                name: "A".into(),
                offset: 20,
            },
        ];
        let before = MacroTable::default().replay(&events, 10);
        let after = MacroTable::default().replay(&events, 30);
        assert!(before.contains("A"));
        assert!(after.is_empty());
    }

    #[test]
    fn test_seeded_table() {
        let predefined = BTreeMap::from([("DEBUG".to_string(), "1".to_string())]);
        let table = MacroTable::seeded(&predefined);
        assert_eq!(table.get("DEBUG").map(|d| d.body.as_str()), Some("1"));
        assert!(!table.get("DEBUG").unwrap().is_function_like());
    }
}
