//! # Macro/Conditional Pass
//!
//! Handles preprocessor directives without evaluating them.
//!
//! - `#if`/`#ifdef`/`#ifndef` families nest into `ConditionalBlock` nodes:
//!   `[#if, Body, #elif, Body, #else, Body, #endif]`. Every branch is kept.
//!   Directives are paired over the whole text first, so a family whose
//!   directives sit in different bracket groups (the `extern "C" {` guard)
//!   is still matched; its directives just stay plain `Preprocessor` nodes.
//! - `#define` and `#undef` become [`MacroEvent`]s in source order. Replaying
//!   them over the configured macros gives the table at any offset.
//! - `#include` targets are collected, never resolved.
//! - Everything else stays an opaque `Preprocessor` node.
//!
//! ## Example
//!
//! ```rust
//! use cpp_parser::tree::NodeKind;
//!
//! let parsed = cpp_parser::parse("#ifdef A\nint a;\n#else\nint b;\n#endif\n").unwrap();
//! let block = &parsed.content.children[0];
//! assert_eq!(block.kind, NodeKind::ConditionalBlock);
//! assert_eq!(block.children.len(), 5);
//! ```

mod directive;
mod macros;

pub use directive::Directive;
pub use macros::{MacroDef, MacroEvent, MacroTable, VA_ARGS};

use crate::error::{ParseError, ParseErrorKind};
use crate::tree::{NodeKind, ParseNode};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::Serialize;
use stacker::maybe_grow;
use std::collections::{BTreeMap, HashMap, HashSet};

/// An `#include` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Include {
    /// Header name between the brackets or quotes.
    pub target: String,
    /// `<...>` form.
    pub angled: bool,
    /// Byte offset of the directive.
    pub offset: usize,
}

/// Result of the pass.
#[derive(Debug, Clone, Default)]
pub struct Preprocessed {
    /// Content sequence with conditional blocks nested.
    pub content: Vec<ParseNode>,
    /// Recoverable problems, ordered by offset.
    pub errors: Vec<ParseError>,
    /// Macro table changes, ordered by offset.
    pub events: Vec<MacroEvent>,
    /// Include directives, ordered by offset.
    pub includes: Vec<Include>,
    /// Table after the last event.
    pub table: MacroTable,
}

/// Nest conditional blocks and record macro events.
///
/// ## Parameters
///
/// - `seq`: Content sequence after declaration extraction
/// - `predefined`: Configured object-like macros
pub fn preprocess(seq: Vec<ParseNode>, predefined: &BTreeMap<String, String>) -> Preprocessed {
    let mut pass = Pass::default();
    pass.families = Families::pair(&seq, &mut pass.errors);
    let content = pass.nest(seq);

    pass.events.sort_by_key(MacroEvent::offset);
    pass.includes.sort_by_key(|i| i.offset);

    let mut table = MacroTable::seeded(predefined);
    for event in &pass.events {
        if let MacroEvent::Undef { name, offset } = event {
            if !table.contains(name) {
                let kind = ParseErrorKind::UndefUnknown { name: name.clone() };
                pass.errors.push(ParseError::at(kind, *offset, 1));
            }
        }
        table.apply(event);
    }
    pass.errors.sort_by_key(ParseError::offset);

    Preprocessed {
        content,
        errors: pass.errors,
        events: pass.events,
        includes: pass.includes,
        table,
    }
}

// =============================================================================
// PAIRING
// =============================================================================

/// How conditional directives pair into families across the whole text,
/// regardless of bracket nesting.
#[derive(Debug, Default)]
struct Families {
    /// Family of each paired directive, by offset.
    member_of: HashMap<usize, usize>,
    /// Directive count of each family.
    sizes: Vec<usize>,
}

impl Families {
    /// Pair the conditional directives of `seq` in source order. Stray
    /// alternatives and `#endif`s and unclosed families are reported here,
    /// once.
    fn pair(seq: &[ParseNode], errors: &mut Vec<ParseError>) -> Self {
        let mut directives = Vec::new();
        collect_directives(seq, &mut directives);
        directives.sort_by_key(|n| n.start);

        let mut families = Self::default();
        let mut open: Vec<(usize, &ParseNode)> = Vec::new();
        for node in directives {
            let text = node.text();
            let Some(directive) = Directive::parse(&text) else {
                continue;
            };
            let offset = node.start.unwrap_or_default();
            if directive.opens_block() {
                let id = families.sizes.len();
                families.sizes.push(1);
                families.member_of.insert(offset, id);
                open.push((id, node));
            } else if directive.starts_alternative() || directive.closes_block() {
                match open.last().map(|&(id, _)| id) {
                    Some(id) => {
                        families.sizes[id] += 1;
                        families.member_of.insert(offset, id);
                        if directive.closes_block() {
                            open.pop();
                        }
                    }
                    None => {
                        let kind = ParseErrorKind::StrayDirective {
                            directive: text.trim().to_string(),
                        };
                        errors.push(error_at(kind, node));
                    }
                }
            }
        }

        for (_, opener) in open {
            let kind = ParseErrorKind::MissingEndif {
                directive: opener.text().trim().to_string(),
            };
            errors.push(error_at(kind, opener));
        }
        families
    }

    /// Families with every directive directly in `seq`.
    fn local_to(&self, seq: &[ParseNode]) -> HashSet<usize> {
        let mut present: HashMap<usize, usize> = HashMap::new();
        for id in seq.iter().filter_map(|n| self.family(n)) {
            *present.entry(id).or_default() += 1;
        }
        present
            .into_iter()
            .filter(|&(id, count)| self.sizes[id] == count)
            .map(|(id, _)| id)
            .collect()
    }

    fn family(&self, node: &ParseNode) -> Option<usize> {
        if node.kind != NodeKind::Preprocessor {
            return None;
        }
        node.start.and_then(|start| self.member_of.get(&start).copied())
    }
}

/// Every preprocessor line under `seq`, at any depth.
fn collect_directives<'a>(seq: &'a [ParseNode], out: &mut Vec<&'a ParseNode>) {
    for node in seq {
        if node.kind == NodeKind::Preprocessor {
            out.push(node);
        } else if !node.children.is_empty() {
            maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
                collect_directives(&node.children, out)
            });
        }
    }
}

// =============================================================================
// PASS STATE
// =============================================================================

/// An open conditional block.
struct Frame {
    /// Directives and finished bodies so far.
    parts: Vec<ParseNode>,
    /// Nodes of the branch being filled.
    body: Vec<ParseNode>,
}

impl Frame {
    fn open(directive: ParseNode) -> Self {
        Self {
            parts: vec![directive],
            body: Vec::new(),
        }
    }

    fn end_branch(&mut self) {
        let body = std::mem::take(&mut self.body);
        self.parts.push(ParseNode::branch(NodeKind::Body, body));
    }
}

#[derive(Default)]
struct Pass {
    families: Families,
    errors: Vec<ParseError>,
    events: Vec<MacroEvent>,
    includes: Vec<Include>,
}

impl Pass {
    fn nest(&mut self, seq: Vec<ParseNode>) -> Vec<ParseNode> {
        let local = self.families.local_to(&seq);
        let mut out = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for mut node in seq {
            if node.kind != NodeKind::Preprocessor {
                if !node.children.is_empty() {
                    let children = std::mem::take(&mut node.children);
                    node.children = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || self.nest(children));
                }
                push(&mut stack, &mut out, node);
                continue;
            }

            let text = node.text().into_owned();
            let Some(directive) = Directive::parse(&text) else {
                push(&mut stack, &mut out, node);
                continue;
            };
            self.record(&directive, &node);

            // Families split across bracket groups stay plain.
            if !self.families.family(&node).map_or(false, |id| local.contains(&id)) {
                push(&mut stack, &mut out, node);
                continue;
            }

            if directive.opens_block() {
                stack.push(Frame::open(node));
                continue;
            }
            match stack.last_mut() {
                Some(frame) => {
                    frame.end_branch();
                    frame.parts.push(node);
                }
                None => {
                    out.push(node);
                    continue;
                }
            }
            if directive.closes_block() {
                if let Some(frame) = stack.pop() {
                    let block = ParseNode::branch(NodeKind::ConditionalBlock, frame.parts);
                    push(&mut stack, &mut out, block);
                }
            }
        }

        // Unclosed blocks end with their sequence; pairing reported them.
        while let Some(mut frame) = stack.pop() {
            frame.end_branch();
            let block = ParseNode::branch(NodeKind::ConditionalBlock, frame.parts);
            push(&mut stack, &mut out, block);
        }
        out
    }

    fn record(&mut self, directive: &Directive<'_>, node: &ParseNode) {
        let offset = node.start.unwrap_or_default();
        match directive.name {
            "define" => {
                if let Some(def) = directive::parse_define(directive.rest, offset) {
                    self.events.push(MacroEvent::Define(def));
                }
            }
            "undef" => {
                if let Some(name) = directive::parse_undef(directive.rest) {
                    self.events.push(MacroEvent::Undef {
                        name: name.to_string(),
                        offset,
                    });
                }
            }
            "include" => {
                if let Some(include) = directive::parse_include(directive.rest, offset) {
                    self.includes.push(include);
                }
            }
            _ => {}
        }
    }
}

/// Append to the innermost open branch, or to the sequence.
fn push(stack: &mut [Frame], out: &mut Vec<ParseNode>, node: ParseNode) {
    match stack.last_mut() {
        Some(frame) => frame.body.push(node),
        None => out.push(node),
    }
}

fn error_at(kind: ParseErrorKind, node: &ParseNode) -> ParseError {
    let range = node.extent().unwrap_or_default();
    ParseError::at(kind, range.start, range.len())
}

// =============================================================================
// TESTS
// =============================================================================
