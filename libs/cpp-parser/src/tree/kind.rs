//! # Node Kinds
//!
//! The closed set of node kinds shared by the content and style trees.

use serde::{Deserialize, Serialize};

// =============================================================================
// NODE KIND
// =============================================================================

/// Types of parse nodes.
///
/// Leaf kinds that carry source text are *fragments*: the unit of inversion.
/// Everything else is structure synthesized by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Top-level
    /// Root of a content or style tree.
    Root,

    // Style fragments
    /// Uninterpreted text inside a literal, comment or directive.
    Raw,
    /// A run of whitespace.
    Whitespace,
    /// Quote or comment delimiter like `"` or `/*`.
    Delimiter,
    /// Backslash-newline pair.
    Continuation,

    // Literals and comments
    /// String literal; value is the text between the quotes.
    String,
    /// Char literal; value is the text between the quotes.
    Char,
    /// `// ...` comment (style tree).
    LineComment,
    /// `/* ... */` comment (style tree).
    BlockComment,
    /// Content-tree copy of a comment's text. Never emitted by inversion.
    Comment,
    /// A whole `#...` logical line.
    Preprocessor,

    // Keywords
    /// `class`
    ClassKeyword,
    /// `struct`
    StructKeyword,
    /// `namespace`
    NamespaceKeyword,
    /// `template`
    TemplateKeyword,
    /// Builtin type like `int` or `void`.
    TypeKeyword,
    /// Any other keyword.
    Keyword,

    // Punctuation
    /// `(`
    ParenLeft,
    /// `)`
    ParenRight,
    /// `[`
    BracketLeft,
    /// `]`
    BracketRight,
    /// `{`
    BraceLeft,
    /// `}`
    BraceRight,
    /// `<` not yet claimed by a template list.
    AngleLeft,
    /// `>` not yet claimed by a template list.
    AngleRight,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// Single or fused operator like `+` or `<<=`.
    Operator,

    // Words
    /// Numeric literal.
    Number,
    /// Identifier or other plain word.
    Text,
    /// `a::b::c`
    QualifiedName,

    // Groups
    /// `( ... )`
    Parens,
    /// `[ ... ]`
    Brackets,
    /// `{ ... }`
    Braces,
    /// `< ... >` template parameter or argument list.
    TemplateParams,
    /// Function parameter or call argument list.
    Params,
    /// One entry of a parameter list.
    Param,

    // Definitions
    /// Function definition or declaration.
    FunctionDef,
    /// Function call (a definition candidate without a return type).
    FunctionCall,
    /// `[captures](params) { ... }`
    Lambda,
    /// `class` or `struct` definition.
    ClassDefn,
    /// `: public Base, ...` clause of a class.
    Inheritance,
    /// `namespace` definition.
    NamespaceDefn,
    /// `extern "C" { ... }` block.
    LinkageSpec,
    /// Braced body of a definition.
    Body,
    /// `#if ... #endif` family.
    ConditionalBlock,
}

impl NodeKind {
    /// Whether leaves of this kind carry source text for inversion.
    pub const fn is_fragment(&self) -> bool {
        matches!(
            self,
            Self::Raw
                | Self::Whitespace
                | Self::Delimiter
                | Self::Continuation
                | Self::ClassKeyword
                | Self::StructKeyword
                | Self::NamespaceKeyword
                | Self::TemplateKeyword
                | Self::TypeKeyword
                | Self::Keyword
                | Self::ParenLeft
                | Self::ParenRight
                | Self::BracketLeft
                | Self::BracketRight
                | Self::BraceLeft
                | Self::BraceRight
                | Self::AngleLeft
                | Self::AngleRight
                | Self::Comma
                | Self::Colon
                | Self::Semicolon
                | Self::Operator
                | Self::Number
                | Self::Text
        )
    }

    /// Check if kind is any keyword.
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::ClassKeyword
                | Self::StructKeyword
                | Self::NamespaceKeyword
                | Self::TemplateKeyword
                | Self::TypeKeyword
                | Self::Keyword
        )
    }

    /// Identifier-like nodes that read as one word.
    pub const fn is_word(&self) -> bool {
        self.is_keyword() || matches!(self, Self::Text | Self::Number | Self::QualifiedName)
    }

    /// Check if kind is a comment in either tree.
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment | Self::Comment)
    }

    /// Opening and closing characters of a bracketed kind.
    pub const fn brackets(&self) -> Option<(char, char)> {
        match self {
            Self::Parens | Self::Params => Some(('(', ')')),
            Self::Brackets => Some(('[', ']')),
            Self::Braces | Self::Body => Some(('{', '}')),
            Self::TemplateParams => Some(('<', '>')),
            _ => None,
        }
    }

    /// Group kind opened by a bracket leaf.
    pub const fn group_opened_by(&self) -> Option<NodeKind> {
        match self {
            Self::ParenLeft => Some(Self::Parens),
            Self::BracketLeft => Some(Self::Brackets),
            Self::BraceLeft => Some(Self::Braces),
            _ => None,
        }
    }

    /// Bracket leaf that closes a group kind.
    pub const fn closer(&self) -> Option<NodeKind> {
        match self {
            Self::Parens => Some(Self::ParenRight),
            Self::Brackets => Some(Self::BracketRight),
            Self::Braces => Some(Self::BraceRight),
            _ => None,
        }
    }

    /// Check if kind is a closing bracket leaf.
    pub const fn is_closer(&self) -> bool {
        matches!(self, Self::ParenRight | Self::BracketRight | Self::BraceRight)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_are_not_fragments() {
        for kind in [NodeKind::Parens, NodeKind::FunctionDef, NodeKind::Comment, NodeKind::String] {
            assert!(!kind.is_fragment(), "{kind:?}");
        }
        assert!(NodeKind::Continuation.is_fragment());
    }

    #[test]
    fn test_group_pairing() {
        assert_eq!(NodeKind::BraceLeft.group_opened_by(), Some(NodeKind::Braces));
        assert_eq!(NodeKind::Braces.closer(), Some(NodeKind::BraceRight));
        assert_eq!(NodeKind::Body.brackets(), Some(('{', '}')));
        assert_eq!(NodeKind::Text.group_opened_by(), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&NodeKind::FunctionDef).unwrap();
        assert_eq!(json, "\"function_def\"");
    }
}
