//! # Tokens
//!
//! Token types produced by the tokenizer.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::lexer::{Token, TokenKind};
//! use cpp_parser::span::Span;
//!
//! let token = Token::new(TokenKind::Punct, Span::from_bytes(0, 1), "(".to_string());
//! assert_eq!(token.punct(), Some('('));
//! ```

use crate::span::{Span, Spanned};

// =============================================================================
// TOKEN
// =============================================================================

/// A contiguous source fragment.
///
/// Concatenating the text of every token of a source reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Byte offset of the first character.
    pub fn start(&self) -> usize {
        self.span.start.byte
    }

    /// Byte offset just past the last character.
    pub fn end(&self) -> usize {
        self.span.end.byte
    }

    /// The delimiter character, for punctuation tokens.
    pub fn punct(&self) -> Option<char> {
        match self.kind {
            TokenKind::Punct => self.text.chars().next(),
            TokenKind::Word | TokenKind::Whitespace => None,
        }
    }

    /// Check for a specific delimiter character.
    pub fn is_punct(&self, c: char) -> bool {
        self.punct() == Some(c)
    }

    /// Check if token is whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Whitespace that ends a physical line.
    pub fn has_newline(&self) -> bool {
        self.is_whitespace() && self.text.contains('\n')
    }

    /// Word starting with a decimal digit.
    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Word && self.text.starts_with(|c: char| c.is_ascii_digit())
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier, number or any other delimiter-free run.
    Word,
    /// A run of whitespace characters.
    Whitespace,
    /// A single delimiter character.
    Punct,
}

// =============================================================================
// TESTS
// =============================================================================
