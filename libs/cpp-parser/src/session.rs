//! # Parse Sessions
//!
//! A [`Session`] owns one [`ParseConfig`] and runs the whole pipeline for
//! each text it is given:
//!
//! ```text
//! Lexer → label → structure → extract → preprocess → ParsedSource
//! ```
//!
//! Sessions hold no mutable state, so one session can parse many texts,
//! from many threads.
//!
//! ## Example
//!
//! ```rust
//! use config::constants::ParseConfig;
//! use cpp_parser::Session;
//!
//! let config = ParseConfig::default().with_macro("VERSION", "3").unwrap();
//! let session = Session::new(config);
//! let parsed = session.parse("int v = VERSION;").unwrap();
//! assert_eq!(parsed.expand_range(0..16).as_deref(), Some("int v = 3;"));
//! ```

use crate::error::ParseError;
use crate::invert::invert;
use crate::lexer::Lexer;
use crate::preprocessor::{preprocess, Include, MacroEvent, MacroTable};
use crate::tree::{NodeKind, ParseNode};
use crate::{declarations, labeler, structure};
use config::constants::{ParseConfig, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;
use std::ops::Range;

// =============================================================================
// SESSION
// =============================================================================

/// Configured parser.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ParseConfig,
}

impl Session {
    /// Create a session using `config` for every parse.
    pub fn new(config: ParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parse one source text.
    ///
    /// ## Errors
    ///
    /// Fatal errors only: unterminated literals and unbalanced brackets.
    /// Recoverable problems are collected in [`ParsedSource::errors`].
    pub fn parse(&self, source: &str) -> Result<ParsedSource, ParseError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || self.run(source))
    }

    fn run(&self, source: &str) -> Result<ParsedSource, ParseError> {
        let tokens = Lexer::new(source).tokenize();
        let labeled = labeler::label(&tokens, self.config.standard)?;

        let mut style = labeled.style;
        let content = structure::structure(labeled.content, &mut style)?;
        let content = declarations::extract(content, &mut style);
        let pre = preprocess(content, &self.config.predefined_macros);
        style.sort_by_key(|n| n.start);

        Ok(ParsedSource {
            source: source.to_string(),
            content: root(pre.content, source),
            style: root(style, source),
            errors: pre.errors,
            includes: pre.includes,
            events: pre.events,
            seed: MacroTable::seeded(&self.config.predefined_macros),
            macros: pre.table,
        })
    }
}

fn root(children: Vec<ParseNode>, source: &str) -> ParseNode {
    ParseNode::branch(NodeKind::Root, children).with_extent(0, source.len())
}

// =============================================================================
// PARSED SOURCE
// =============================================================================

/// Everything one parse produced.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    /// The parsed text.
    pub source: String,
    /// Content tree.
    pub content: ParseNode,
    /// Style tree.
    pub style: ParseNode,
    /// Recoverable errors and warnings, ordered by offset.
    pub errors: Vec<ParseError>,
    /// `#include` directives, unresolved.
    pub includes: Vec<Include>,
    events: Vec<MacroEvent>,
    seed: MacroTable,
    macros: MacroTable,
}

impl ParsedSource {
    /// Check if the parse produced no errors or warnings.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Reconstruct the source text from both trees.
    pub fn invert(&self) -> String {
        invert(&self.content, &self.style)
    }

    /// Macro table at the end of the text.
    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    /// `#define` and `#undef` events in source order.
    pub fn macro_events(&self) -> &[MacroEvent] {
        &self.events
    }

    /// Macro table as seen by code at `offset`.
    pub fn macros_at(&self, offset: usize) -> MacroTable {
        self.seed.clone().replay(&self.events, offset)
    }

    /// Source text in `range` with macros substituted. The trees are not
    /// changed.
    ///
    /// Returns `None` when `range` is not a valid slice of the source.
    pub fn expand_range(&self, range: Range<usize>) -> Option<String> {
        let text = self.source.get(range.clone())?;
        Some(self.macros_at(range.start).expand(text))
    }

    /// Substituted source text covering `nodes`, from the first start to
    /// the last end.
    pub fn expand_nodes(&self, nodes: &[ParseNode]) -> Option<String> {
        let start = nodes.iter().filter_map(|n| n.start).min()?;
        let end = nodes.iter().filter_map(|n| n.end).max()?;
        self.expand_range(start..end)
    }
}

// =============================================================================
// TESTS
// =============================================================================
