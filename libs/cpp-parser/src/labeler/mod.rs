//! # Structural Labeler
//!
//! Converts the flat token list into labeled leaves, split between a content
//! sequence and a style sequence. Every token lands in exactly one of them,
//! tagged with its source offset.
//!
//! Decision table, in priority order:
//!
//! | Token                   | Result                                  |
//! |-------------------------|-----------------------------------------|
//! | `"` / `'`               | string / char literal scan              |
//! | `/*` / `//`             | comment scan (style) + content mirror   |
//! | whitespace              | style leaf                              |
//! | `#`                     | preprocessor line scan                  |
//! | `( ) [ ] { }`           | bracket leaf                            |
//! | `< >`                   | angle leaf                              |
//! | `, : ;`                 | dedicated leaf                          |
//! | keyword                 | keyword leaf                            |
//! | operator character      | operator leaf                           |
//! | word starting with digit| number leaf                             |
//! | anything else           | text leaf                               |
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::labeler::label;
//! use cpp_parser::lexer::Lexer;
//! use cpp_parser::tree::NodeKind;
//! use config::constants::Standard;
//!
//! let tokens = Lexer::new("int x; // note\n").tokenize();
//! let labeled = label(&tokens, Standard::default()).unwrap();
//! let kinds: Vec<_> = labeled.content.iter().map(|n| n.kind).collect();
//! assert_eq!(kinds, [NodeKind::TypeKeyword, NodeKind::Text, NodeKind::Semicolon, NodeKind::Comment]);
//! ```

mod literals;

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::tree::{NodeKind, ParseNode};
use config::constants::{is_keyword, is_type_keyword, Standard, OPERATOR_CHARS};

// =============================================================================
// LABELED OUTPUT
// =============================================================================

/// Labeled leaves, in source order per sequence.
#[derive(Debug, Clone, Default)]
pub struct Labeled {
    /// Content leaves and literal/directive nodes.
    pub content: Vec<ParseNode>,
    /// Whitespace, comments, delimiters and continuations.
    pub style: Vec<ParseNode>,
}

/// Label a token list.
///
/// ## Parameters
///
/// - `tokens`: Output of [`crate::lexer::Lexer::tokenize`]
/// - `standard`: Keyword vocabulary
///
/// ## Errors
///
/// `UnterminatedLiteral` when a string, char or block comment never closes.
pub fn label(tokens: &[Token], standard: Standard) -> Result<Labeled, ParseError> {
    Labeler::new(tokens, standard).run()
}

/// Classify a word by keyword table and leading character.
pub fn classify_word(word: &str, standard: Standard) -> NodeKind {
    if is_keyword(word, standard) {
        match word {
            "class" => NodeKind::ClassKeyword,
            "struct" => NodeKind::StructKeyword,
            "namespace" => NodeKind::NamespaceKeyword,
            "template" => NodeKind::TemplateKeyword,
            _ if is_type_keyword(word, standard) => NodeKind::TypeKeyword,
            _ => NodeKind::Keyword,
        }
    } else if word.starts_with(|c: char| c.is_ascii_digit()) {
        NodeKind::Number
    } else {
        NodeKind::Text
    }
}

// =============================================================================
// LABELER
// =============================================================================

/// Single forward pass over the token list.
pub(crate) struct Labeler<'t> {
    tokens: &'t [Token],
    pos: usize,
    standard: Standard,
    content: Vec<ParseNode>,
    style: Vec<ParseNode>,
}

impl<'t> Labeler<'t> {
    fn new(tokens: &'t [Token], standard: Standard) -> Self {
        Self {
            tokens,
            pos: 0,
            standard,
            content: Vec::new(),
            style: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Labeled, ParseError> {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            match token.kind {
                TokenKind::Whitespace => {
                    self.style.push(leaf(NodeKind::Whitespace, token).hide());
                    self.pos += 1;
                }
                TokenKind::Word => {
                    let kind = classify_word(&token.text, self.standard);
                    self.content.push(leaf(kind, token));
                    self.pos += 1;
                }
                TokenKind::Punct => self.punct(token)?,
            }
        }
        Ok(Labeled {
            content: self.content,
            style: self.style,
        })
    }

    fn punct(&mut self, token: &Token) -> Result<(), ParseError> {
        let kind = match token.punct() {
            Some('"') => return self.quoted(NodeKind::String),
            Some('\'') => return self.quoted(NodeKind::Char),
            Some('/') if self.next_is('*') => return self.block_comment(true),
            Some('/') if self.next_is('/') => {
                self.line_comment(true);
                return Ok(());
            }
            Some('#') => {
                self.directive()?;
                return Ok(());
            }
            Some('\\') => {
                self.backslash();
                return Ok(());
            }
            Some('(') => NodeKind::ParenLeft,
            Some(')') => NodeKind::ParenRight,
            Some('[') => NodeKind::BracketLeft,
            Some(']') => NodeKind::BracketRight,
            Some('{') => NodeKind::BraceLeft,
            Some('}') => NodeKind::BraceRight,
            Some('<') => NodeKind::AngleLeft,
            Some('>') => NodeKind::AngleRight,
            Some(',') => NodeKind::Comma,
            Some(':') => NodeKind::Colon,
            Some(';') => NodeKind::Semicolon,
            Some(c) if OPERATOR_CHARS.contains(&c) => NodeKind::Operator,
            _ => NodeKind::Text,
        };
        self.content.push(leaf(kind, token));
        self.pos += 1;
        Ok(())
    }

    /// Check if the token after the current one is the delimiter `c`.
    fn next_is(&self, c: char) -> bool {
        self.tokens.get(self.pos + 1).map_or(false, |t| t.is_punct(c))
    }

    /// Length of the newline at the start of the token after the current
    /// one, if that token is whitespace beginning a new line.
    fn newline_after(&self) -> Option<usize> {
        self.tokens.get(self.pos + 1).and_then(|t| {
            if !t.is_whitespace() {
                None
            } else if t.text.starts_with("\r\n") {
                Some(2)
            } else if t.text.starts_with('\n') {
                Some(1)
            } else {
                None
            }
        })
    }
}

/// Leaf for a whole token.
fn leaf(kind: NodeKind, token: &Token) -> ParseNode {
    ParseNode::leaf(kind, token.text.clone(), token.start())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LiteralKind, ParseErrorKind};
    use crate::lexer::Lexer;

    fn label_str(source: &str) -> Result<Labeled, ParseError> {
        label(&Lexer::new(source).tokenize(), Standard::default())
    }

    fn reassemble(labeled: &Labeled) -> String {
        let mut fragments: Vec<&ParseNode> = labeled
            .content
            .iter()
            .chain(&labeled.style)
            .flat_map(ParseNode::fragments)
            .collect();
        fragments.sort_by_key(|f| f.start);
        fragments.iter().map(|f| f.text().into_owned()).collect()
    }

    #[test]
    fn test_classify_words() {
        let std = Standard::default();
        assert_eq!(classify_word("class", std), NodeKind::ClassKeyword);
        assert_eq!(classify_word("template", std), NodeKind::TemplateKeyword);
        assert_eq!(classify_word("void", std), NodeKind::TypeKeyword);
        assert_eq!(classify_word("return", std), NodeKind::Keyword);
        assert_eq!(classify_word("0x10", std), NodeKind::Number);
        assert_eq!(classify_word("hello", std), NodeKind::Text);
        assert_eq!(classify_word("concept", Standard::Cpp17), NodeKind::Text);
    }

    #[test]
    fn test_operator_chars_label_as_operators() {
        let labeled = label_str("a+=b%c").unwrap();
        let kinds: Vec<_> = labeled.content.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            [
                NodeKind::Text,
                NodeKind::Operator,
                NodeKind::Operator,
                NodeKind::Text,
                NodeKind::Operator,
                NodeKind::Text,
            ]
        );
    }

    #[test]
    fn test_string_and_char() {
        let labeled = label_str("\"1234\"\n'5'\n").unwrap();
        assert_eq!(labeled.content.len(), 2);
        assert_eq!(labeled.content[0].kind, NodeKind::String);
        assert_eq!(labeled.content[0].text(), "1234");
        assert_eq!(labeled.content[1].kind, NodeKind::Char);
        assert_eq!(labeled.content[1].text(), "5");
        let delimiters = labeled.style.iter().filter(|n| n.kind == NodeKind::Delimiter).count();
        assert_eq!(delimiters, 4);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let source = r#""a\"b" x"#;
        let labeled = label_str(source).unwrap();
        assert_eq!(labeled.content[0].text(), r#"a\"b"#);
        assert_eq!(labeled.content[1].text(), "x");
        assert_eq!(reassemble(&labeled), source);
    }

    #[test]
    fn test_string_line_continuation() {
        let source = "\"ab\\\n  cd\"";
        let labeled = label_str(source).unwrap();
        assert_eq!(labeled.content[0].text(), "ab  cd");
        assert!(labeled.style.iter().any(|n| n.kind == NodeKind::Continuation));
        assert_eq!(reassemble(&labeled), source);
    }

    #[test]
    fn test_comments_go_to_style_with_mirror() {
        let source = "/* hello1 */\n// hello2\n\"123\"\n";
        let labeled = label_str(source).unwrap();
        let block = labeled.style.iter().find(|n| n.kind == NodeKind::BlockComment).unwrap();
        assert_eq!(block.value.as_deref(), Some(" hello1 "));
        let line = labeled.style.iter().find(|n| n.kind == NodeKind::LineComment).unwrap();
        assert_eq!(line.value.as_deref(), Some(" hello2"));
        let mirrors: Vec<_> = labeled.content.iter().filter(|n| n.kind == NodeKind::Comment).collect();
        assert_eq!(mirrors.len(), 2);
        assert_eq!(reassemble(&labeled), source);
    }

    #[test]
    fn test_directive_spans_continuations() {
        let source = "#define MAX(a, b) \\\n  ((a) > (b))\nint x;";
        let labeled = label_str(source).unwrap();
        let directive = &labeled.content[0];
        assert_eq!(directive.kind, NodeKind::Preprocessor);
        assert_eq!(directive.text(), "#define MAX(a, b)   ((a) > (b))");
        assert_eq!(labeled.content[1].kind, NodeKind::TypeKeyword);
        assert_eq!(reassemble(&labeled), source);
    }

    #[test]
    fn test_directive_stops_before_line_comment() {
        let source = "#include <vector> // std\n";
        let labeled = label_str(source).unwrap();
        assert_eq!(labeled.content[0].text(), "#include <vector> ");
        assert!(labeled.style.iter().any(|n| n.kind == NodeKind::LineComment));
        assert_eq!(reassemble(&labeled), source);
    }

    #[test]
    fn test_directive_steps_over_block_comment() {
        let source = "#define A /* one */ 1\n";
        let labeled = label_str(source).unwrap();
        assert_eq!(labeled.content.len(), 1);
        assert_eq!(labeled.content[0].text(), "#define A  1");
        assert_eq!(reassemble(&labeled), source);
    }

    #[test]
    fn test_directive_quote_hides_comment_marker() {
        let source = "#define URL \"http://x\"\n";
        let labeled = label_str(source).unwrap();
        assert_eq!(labeled.content[0].text(), "#define URL \"http://x\"");
        assert!(labeled.style.iter().all(|n| !n.kind.is_comment()));
    }

    #[test]
    fn test_directive_apostrophe_ends_at_newline() {
        let labeled = label_str("#error don't\nint x;").unwrap();
        assert_eq!(labeled.content[0].text(), "#error don't");
        assert_eq!(labeled.content.len(), 4);
    }

    #[test]
    fn test_stray_backslash_continuation() {
        let source = "a \\\nb";
        let labeled = label_str(source).unwrap();
        assert_eq!(labeled.content.len(), 2);
        assert!(labeled.style.iter().any(|n| n.kind == NodeKind::Continuation));
        assert_eq!(reassemble(&labeled), source);
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let err = label_str("x = \"abc;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral { literal: LiteralKind::String });
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_unterminated_block_comment_is_fatal() {
        let err = label_str("int x; /* open").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral { literal: LiteralKind::BlockComment });
        assert!(err.is_fatal());
    }
}
