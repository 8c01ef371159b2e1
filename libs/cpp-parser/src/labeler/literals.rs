//! Delimited scans: string and char literals, comments, preprocessor lines
//! and line continuations.

use super::{leaf, Labeler};
use crate::error::{LiteralKind, ParseError, ParseErrorKind};
use crate::lexer::Token;
use crate::tree::{NodeKind, ParseNode};

impl<'t> Labeler<'t> {
    /// Scan a string or char literal starting at the opening quote.
    pub(super) fn quoted(&mut self, kind: NodeKind) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let open = &tokens[self.pos];
        let quote = open.punct();
        self.style.push(leaf(NodeKind::Delimiter, open).hide());
        self.pos += 1;

        let mut parts = Vec::new();
        let mut escaped = false;
        while let Some(token) = tokens.get(self.pos) {
            if token.is_punct('\\') {
                if let Some(rest) = self.continuation() {
                    parts.extend(rest.map(|(text, start)| ParseNode::leaf(NodeKind::Raw, text, start)));
                    escaped = false;
                    continue;
                }
            }
            if !escaped && token.punct() == quote {
                self.style.push(leaf(NodeKind::Delimiter, token).hide());
                self.pos += 1;
                let node = ParseNode::joined(kind, parts).with_extent(open.start(), token.end());
                self.content.push(node);
                return Ok(());
            }
            escaped = !escaped && token.is_punct('\\');
            parts.push(leaf(NodeKind::Raw, token));
            self.pos += 1;
        }

        let literal = match kind {
            NodeKind::Char => LiteralKind::Char,
            _ => LiteralKind::String,
        };
        Err(ParseError::at(ParseErrorKind::UnterminatedLiteral { literal }, open.start(), 1))
    }

    /// Scan a `/* ... */` comment. The comment goes to the style tree; with
    /// `mirror` set, a comment mirror is added to the content sequence.
    pub(super) fn block_comment(&mut self, mirror: bool) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let start = tokens[self.pos].start();
        let mut children = vec![ParseNode::leaf(NodeKind::Delimiter, "/*", start).hide()];
        self.pos += 2;

        while let Some(token) = tokens.get(self.pos) {
            if token.is_punct('*') && self.next_is('/') {
                children.push(ParseNode::leaf(NodeKind::Delimiter, "*/", token.start()).hide());
                self.pos += 2;
                self.push_comment(NodeKind::BlockComment, children, mirror);
                return Ok(());
            }
            children.push(leaf(NodeKind::Raw, token));
            self.pos += 1;
        }

        Err(ParseError::at(
            ParseErrorKind::UnterminatedLiteral { literal: LiteralKind::BlockComment },
            start,
            2,
        ))
    }

    /// Scan a `// ...` comment up to, not including, the line break.
    pub(super) fn line_comment(&mut self, mirror: bool) {
        let tokens = self.tokens;
        let start = tokens[self.pos].start();
        let mut children = vec![ParseNode::leaf(NodeKind::Delimiter, "//", start).hide()];
        self.pos += 2;

        while let Some(token) = tokens.get(self.pos) {
            if token.is_punct('\\') {
                if let Some(rest) = self.continuation_into(&mut children) {
                    match rest {
                        Some((text, start)) if text.contains('\n') => {
                            self.style.push(ParseNode::leaf(NodeKind::Whitespace, text, start).hide());
                            break;
                        }
                        Some((text, start)) => children.push(ParseNode::leaf(NodeKind::Raw, text, start)),
                        None => {}
                    }
                    continue;
                }
            }
            if token.has_newline() {
                break;
            }
            children.push(leaf(NodeKind::Raw, token));
            self.pos += 1;
        }
        self.push_comment(NodeKind::LineComment, children, mirror);
    }

    fn push_comment(&mut self, kind: NodeKind, children: Vec<ParseNode>, mirror: bool) {
        let comment = ParseNode::joined(kind, children).hide();
        if mirror {
            if let (Some(start), Some(end), Some(value)) = (comment.start, comment.end, &comment.value) {
                self.content.push(ParseNode::leaf(NodeKind::Comment, value.clone(), start).with_extent(start, end));
            }
        }
        self.style.push(comment);
    }

    /// Scan a preprocessor logical line starting at `#`.
    ///
    /// The line ends at an unescaped line break or before a `//` comment.
    /// Block comments inside it go to the style tree; quotes suppress
    /// comment detection until they close or the line ends.
    pub(super) fn directive(&mut self) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let mut parts = vec![leaf(NodeKind::Raw, &tokens[self.pos])];
        self.pos += 1;

        let mut quote: Option<char> = None;
        let mut escaped = false;
        while let Some(token) = tokens.get(self.pos) {
            if token.is_punct('\\') {
                if let Some(rest) = self.continuation() {
                    match rest {
                        Some((text, start)) if text.contains('\n') => {
                            self.style.push(ParseNode::leaf(NodeKind::Whitespace, text, start).hide());
                            break;
                        }
                        Some((text, start)) => parts.push(ParseNode::leaf(NodeKind::Raw, text, start)),
                        None => {}
                    }
                    escaped = false;
                    continue;
                }
            }
            if token.has_newline() {
                break;
            }
            match (quote, token.punct()) {
                (Some(q), c) => {
                    if escaped {
                        escaped = false;
                    } else if c == Some('\\') {
                        escaped = true;
                    } else if c == Some(q) {
                        quote = None;
                    }
                }
                (None, Some(c @ ('"' | '\''))) => quote = Some(c),
                (None, Some('/')) if self.next_is('/') => break,
                (None, Some('/')) if self.next_is('*') => {
                    self.block_comment(false)?;
                    continue;
                }
                (None, _) => {}
            }
            parts.push(leaf(NodeKind::Raw, token));
            self.pos += 1;
        }

        self.content.push(ParseNode::joined(NodeKind::Preprocessor, parts));
        Ok(())
    }

    /// A backslash outside any literal: a continuation when it ends the
    /// line, otherwise plain text.
    pub(super) fn backslash(&mut self) {
        let tokens = self.tokens;
        match self.continuation() {
            Some(Some((text, start))) => {
                self.style.push(ParseNode::leaf(NodeKind::Whitespace, text, start).hide());
            }
            Some(None) => {}
            None => {
                self.content.push(leaf(NodeKind::Text, &tokens[self.pos]));
                self.pos += 1;
            }
        }
    }

    /// Consume a backslash-newline pair at the cursor into the style
    /// sequence.
    ///
    /// Returns `None` when the backslash does not end the line. Otherwise
    /// returns the whitespace left over after the line break, if any.
    fn continuation(&mut self) -> Option<Option<(String, usize)>> {
        let (node, rest) = self.split_continuation()?;
        self.style.push(node);
        Some(rest)
    }

    /// Like [`Self::continuation`], but keeps the continuation leaf with the
    /// node being built.
    fn continuation_into(&mut self, children: &mut Vec<ParseNode>) -> Option<Option<(String, usize)>> {
        let (node, rest) = self.split_continuation()?;
        children.push(node);
        Some(rest)
    }

    fn split_continuation(&mut self) -> Option<(ParseNode, Option<(String, usize)>)> {
        let newline = self.newline_after()?;
        let tokens = self.tokens;
        let backslash: &Token = &tokens[self.pos];
        let ws: &Token = &tokens[self.pos + 1];
        self.pos += 2;

        let text = format!("\\{}", &ws.text[..newline]);
        let node = ParseNode::leaf(NodeKind::Continuation, text, backslash.start()).hide();
        let rest = (ws.text.len() > newline).then(|| (ws.text[newline..].to_string(), ws.start() + newline));
        Some((node, rest))
    }
}
