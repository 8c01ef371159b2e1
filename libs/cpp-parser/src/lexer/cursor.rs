//! # Character Cursor
//!
//! Forward-only cursor over source characters that tracks byte offset, line
//! and column, and hands out slices of what it consumed.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("int x");
//! assert_eq!(cursor.eat_while(|c| c.is_alphabetic()), "int");
//! assert_eq!(cursor.first(), Some(' '));
//! ```

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current position.
    pos: Position,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: Position::default(),
        }
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Character under the cursor.
    pub fn first(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Unconsumed remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos.byte..]
    }

    /// Consume one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.first()?;
        self.pos.byte += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 0;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Consume characters while `predicate` holds and return them.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos.byte;
        while self.first().map_or(false, &predicate) {
            self.bump();
        }
        &self.source[start..self.pos.byte]
    }

    /// Source slice from `start` up to the cursor.
    pub fn slice_from(&self, start: Position) -> &'a str {
        &self.source[start.byte..self.pos.byte]
    }
}

// =============================================================================
// TESTS
// =============================================================================
