//! # Source Spans
//!
//! Byte/line/column positions and ranges used by tokens and diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::span::Span;
//!
//! let span = Span::from_bytes(4, 9);
//! assert_eq!(span.len(), 5);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A single point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the text.
    pub byte: usize,
    /// Line (0-indexed).
    pub line: usize,
    /// Column in characters (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A half-open range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Span {
    /// Create a span from two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from byte offsets only (line/column left at zero).
    ///
    /// Used where the tree model only tracks byte offsets.
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, 0, 0),
            end: Position::new(end, 0, 0),
        }
    }

    /// Empty span at the start of the text.
    pub const fn zero() -> Self {
        Self::from_bytes(0, 0)
    }

    /// Length in bytes.
    pub const fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// True when the span covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range, for slicing the source text.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.byte..self.end.byte
    }
}

/// Anything that knows where it came from.
pub trait Spanned {
    /// Source span of the item.
    fn span(&self) -> Span;
}

// =============================================================================
// TESTS
// =============================================================================
