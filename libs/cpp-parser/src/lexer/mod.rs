//! # Tokenizer
//!
//! Splits source text into an ordered list of fragments. Every character
//! lands in exactly one token, so concatenating the tokens reproduces the
//! input.
//!
//! Splitting rule: each delimiter character (quotes, brackets, operator
//! characters, `,` `:` `;` `#` `~` `!` `%` `\`) is a token of its own, runs
//! of whitespace are one token, and everything else between delimiters is a
//! word.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("f(x);").tokenize();
//! assert_eq!(tokens.len(), 5);
//! assert_eq!(tokens[0].kind, TokenKind::Word);
//! assert!(tokens[1].is_punct('('));
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::Span;
use config::constants::DELIMITER_CHARS;

/// Check whether `c` always forms a token of its own.
pub fn is_delimiter(c: char) -> bool {
    DELIMITER_CHARS.contains(&c)
}

// =============================================================================
// LEXER
// =============================================================================

/// Source tokenizer.
pub struct Lexer<'a> {
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source. Never fails.
    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(c) = self.cursor.first() {
            let start = self.cursor.position();
            let kind = if c.is_whitespace() {
                self.cursor.eat_while(char::is_whitespace);
                TokenKind::Whitespace
            } else if is_delimiter(c) {
                self.cursor.bump();
                TokenKind::Punct
            } else {
                self.cursor.eat_while(|c| !c.is_whitespace() && !is_delimiter(c));
                TokenKind::Word
            };
            let text = self.cursor.slice_from(start).to_string();
            let span = Span::new(start, self.cursor.position());
            self.tokens.push(Token::new(kind, span, text));
        }
        self.tokens
    }
}

// =============================================================================
// TESTS
// =============================================================================
