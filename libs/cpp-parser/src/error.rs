//! # Parse Errors
//!
//! Error types for the C++ source parser.
//!
//! Two families exist. Fatal errors (unterminated literals, unbalanced
//! brackets) abort the parse and are returned as `Err`. Recoverable errors
//! (conditional-compilation problems) are collected on the parse result
//! while a best-effort tree is still produced.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::error::{LiteralKind, ParseError, ParseErrorKind};
//! use cpp_parser::span::Span;
//!
//! let error = ParseError::new(
//!     ParseErrorKind::UnterminatedLiteral { literal: LiteralKind::String },
//!     Span::from_bytes(5, 6),
//! );
//! assert!(error.is_fatal());
//! assert_eq!(error.to_string(), "unterminated string literal at byte 5");
//! ```

use crate::span::Span;
use std::fmt;
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create an error anchored at a byte offset.
    pub fn at(kind: ParseErrorKind, offset: usize, len: usize) -> Self {
        Self::new(kind, Span::from_bytes(offset, offset + len))
    }

    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        self.span.start.byte
    }

    /// Whether the error aborts the parse.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// How serious the error is.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.span.start.byte)
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// SEVERITY
// =============================================================================

/// Severity of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational; the tree is complete.
    Warning,
    /// The tree is a best-effort reconstruction.
    Error,
    /// No tree could be produced.
    Fatal,
}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Literal forms that need a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Char,
    BlockComment,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string literal"),
            Self::Char => write!(f, "char literal"),
            Self::BlockComment => write!(f, "block comment"),
        }
    }
}

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A string, char or block comment never found its terminator.
    #[error("unterminated {literal}")]
    UnterminatedLiteral {
        /// Which literal form was open.
        literal: LiteralKind,
    },

    /// An opening bracket was never closed.
    #[error("unterminated '{opener}' group")]
    UnterminatedGroup {
        /// The opening bracket.
        opener: char,
    },

    /// A closing bracket without a matching opener.
    #[error("unbalanced '{closer}'")]
    UnbalancedCloser {
        /// The closing bracket.
        closer: char,
    },

    /// A conditional block reached the end of its scope without `#endif`.
    #[error("missing #endif for '{directive}'")]
    MissingEndif {
        /// Text of the opening directive.
        directive: String,
    },

    /// `#elif`, `#else` or `#endif` without an open conditional block.
    #[error("'{directive}' without matching #if")]
    StrayDirective {
        /// Text of the directive.
        directive: String,
    },

    /// `#undef` of a name that is not defined.
    #[error("#undef of unknown macro '{name}'")]
    UndefUnknown {
        /// The macro name.
        name: String,
    },
}

impl ParseErrorKind {
    /// Severity of this kind of error.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnterminatedLiteral { .. }
            | Self::UnterminatedGroup { .. }
            | Self::UnbalancedCloser { .. } => Severity::Fatal,
            Self::MissingEndif { .. } | Self::StrayDirective { .. } => Severity::Error,
            Self::UndefUnknown { .. } => Severity::Warning,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
