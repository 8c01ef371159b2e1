//! Bracket grouping.
//!
//! Conditional branches are never evaluated, so `#if A` / `#else` branches
//! that each open a brace would leave one brace unclosed. Only the first
//! branch of a family moves the bracket depth: groups an alternative branch
//! leaves open are dissolved back into plain leaves when the branch ends, and
//! a closer in an alternative branch that would close a group opened before
//! it stays a plain leaf.

use crate::error::{ParseError, ParseErrorKind};
use crate::preprocessor::Directive;
use crate::tree::{NodeKind, ParseNode};

/// An opened, not yet closed group.
struct Frame {
    kind: NodeKind,
    open: ParseNode,
    items: Vec<ParseNode>,
}

/// Nest bracket-delimited runs into `Parens`, `Brackets` and `Braces`.
///
/// Uses an explicit stack, so nesting depth never touches the call stack.
/// Each group's open and close leaves become the two children of a hidden
/// style node of the same kind.
pub(super) fn group(nodes: Vec<ParseNode>, style: &mut Vec<ParseNode>) -> Result<Vec<ParseNode>, ParseError> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut top = Vec::new();
    // Per open `#if` family: the depth its current alternative branch
    // started at, or `None` while in the first branch.
    let mut families: Vec<Option<usize>> = Vec::new();

    for node in nodes {
        if node.kind == NodeKind::Preprocessor {
            branch(&node, &mut families, &mut stack, &mut top);
        } else if let Some(kind) = node.kind.group_opened_by() {
            stack.push(Frame {
                kind,
                open: node,
                items: Vec::new(),
            });
            continue;
        }

        let floor = families.iter().flatten().max().copied();
        let node = if node.kind.is_closer() && floor.map_or(false, |floor| stack.len() <= floor) {
            node
        } else if node.kind.is_closer() {
            match stack.pop() {
                Some(frame) if frame.kind.closer() == Some(node.kind) => close(frame, node, style),
                _ => {
                    let closer = first_char(&node);
                    let offset = node.start.unwrap_or_default();
                    return Err(ParseError::at(ParseErrorKind::UnbalancedCloser { closer }, offset, 1));
                }
            }
        } else {
            node
        };

        match stack.last_mut() {
            Some(frame) => frame.items.push(node),
            None => top.push(node),
        }
    }

    // Families left open end with the input.
    while let Some(barrier) = families.pop() {
        if let Some(depth) = barrier {
            dissolve(&mut stack, &mut top, depth);
        }
    }

    match stack.pop() {
        Some(frame) => {
            let opener = first_char(&frame.open);
            let offset = frame.open.start.unwrap_or_default();
            Err(ParseError::at(ParseErrorKind::UnterminatedGroup { opener }, offset, 1))
        }
        None => Ok(top),
    }
}

/// Track `#if` families through a directive line.
fn branch(
    node: &ParseNode,
    families: &mut Vec<Option<usize>>,
    stack: &mut Vec<Frame>,
    top: &mut Vec<ParseNode>,
) {
    let text = node.text();
    let Some(directive) = Directive::parse(&text) else {
        return;
    };
    if directive.opens_block() {
        families.push(None);
    } else if directive.starts_alternative() {
        if let Some(barrier) = families.last_mut() {
            if let Some(depth) = *barrier {
                dissolve(stack, top, depth);
            }
            *barrier = Some(stack.len());
        }
    } else if directive.closes_block() {
        if let Some(Some(depth)) = families.pop() {
            dissolve(stack, top, depth);
        }
    }
}

/// Undo groups opened past `depth`: each opener and its items go back,
/// ungrouped, into the enclosing sequence.
fn dissolve(stack: &mut Vec<Frame>, top: &mut Vec<ParseNode>, depth: usize) {
    while stack.len() > depth {
        let Some(frame) = stack.pop() else {
            break;
        };
        let outer = match stack.last_mut() {
            Some(outer) => &mut outer.items,
            None => &mut *top,
        };
        outer.push(frame.open);
        outer.extend(frame.items);
    }
}

fn close(frame: Frame, close: ParseNode, style: &mut Vec<ParseNode>) -> ParseNode {
    let start = frame.open.start.unwrap_or_default();
    let end = close.end.unwrap_or(start);
    style.push(ParseNode::branch(frame.kind, vec![frame.open.hide(), close.hide()]).hide());
    ParseNode::branch(frame.kind, frame.items).with_extent(start, end)
}

fn first_char(node: &ParseNode) -> char {
    node.text().chars().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: NodeKind, text: &str, start: usize) -> ParseNode {
        ParseNode::leaf(kind, text, start)
    }

    #[test]
    fn test_nested_groups() {
        let nodes = vec![
            leaf(NodeKind::BraceLeft, "{", 0),
            leaf(NodeKind::ParenLeft, "(", 1),
            leaf(NodeKind::Text, "x", 2),
            leaf(NodeKind::ParenRight, ")", 3),
            leaf(NodeKind::BraceRight, "}", 4),
        ];
        let mut style = Vec::new();
        let grouped = group(nodes, &mut style).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].kind, NodeKind::Braces);
        assert_eq!(grouped[0].extent(), Some(0..5));
        assert_eq!(grouped[0].children[0].kind, NodeKind::Parens);
        assert_eq!(style.len(), 2);
        assert!(style.iter().all(|s| s.hidden && s.children.iter().all(|c| c.hidden)));
    }

    #[test]
    fn test_unclosed_opener() {
        let nodes = vec![leaf(NodeKind::Text, "f", 0), leaf(NodeKind::ParenLeft, "(", 1)];
        let err = group(nodes, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedGroup { opener: '(' });
        assert_eq!(err.offset(), 1);
    }

    #[test]
    fn test_mismatched_closer() {
        let nodes = vec![leaf(NodeKind::ParenLeft, "(", 0), leaf(NodeKind::BracketRight, "]", 1)];
        let err = group(nodes, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedCloser { closer: ']' });
    }

    fn directive(text: &str, start: usize) -> ParseNode {
        ParseNode::joined(NodeKind::Preprocessor, vec![leaf(NodeKind::Raw, text, start)])
    }

    #[test]
    fn test_alternative_branch_opener_dissolved() {
        // #if A { #else { #endif }
        let nodes = vec![
            directive("#if A", 0),
            leaf(NodeKind::BraceLeft, "{", 6),
            directive("#else", 8),
            leaf(NodeKind::BraceLeft, "{", 14),
            directive("#endif", 16),
            leaf(NodeKind::BraceRight, "}", 23),
        ];
        let mut style = Vec::new();
        let grouped = group(nodes, &mut style).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[1].kind, NodeKind::Braces);
        let inner: Vec<_> = grouped[1].children.iter().map(|n| n.kind).collect();
        assert_eq!(inner, [NodeKind::Preprocessor, NodeKind::BraceLeft, NodeKind::Preprocessor]);
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn test_alternative_branch_closer_kept_plain() {
        // { #if A } #else } #endif
        let nodes = vec![
            leaf(NodeKind::BraceLeft, "{", 0),
            directive("#if A", 2),
            leaf(NodeKind::BraceRight, "}", 8),
            directive("#else", 10),
            leaf(NodeKind::BraceRight, "}", 16),
            directive("#endif", 18),
        ];
        let grouped = group(nodes, &mut Vec::new()).unwrap();
        let kinds: Vec<_> = grouped.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, [
            NodeKind::Braces,
            NodeKind::Preprocessor,
            NodeKind::BraceRight,
            NodeKind::Preprocessor,
        ]);
    }

    #[test]
    fn test_first_branch_groups_across_directives() {
        // #ifdef X { #endif ; #ifdef X } #endif
        let nodes = vec![
            directive("#ifdef X", 0),
            leaf(NodeKind::BraceLeft, "{", 9),
            directive("#endif", 11),
            leaf(NodeKind::Semicolon, ";", 18),
            directive("#ifdef X", 20),
            leaf(NodeKind::BraceRight, "}", 29),
            directive("#endif", 31),
        ];
        let grouped = group(nodes, &mut Vec::new()).unwrap();
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[1].kind, NodeKind::Braces);
        assert_eq!(grouped[1].children.len(), 3);
    }

    #[test]
    fn test_stray_closer() {
        let err = group(vec![leaf(NodeKind::BraceRight, "}", 7)], &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedCloser { closer: '}' });
        assert_eq!(err.offset(), 7);
    }
}
