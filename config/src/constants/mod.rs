//! Language tables and parse configuration shared by every parser phase.
//!
//! Each public item documents its purpose and, where useful, a minimal usage
//! example so downstream code never scatters literals.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// KEYWORD TABLES
// =============================================================================

/// Keywords present since the first standard.
pub const KEYWORDS_CPP98: &[&str] = &[
    "and", "and_eq", "asm", "atomic_cancel", "atomic_commit", "atomic_noexcept",
    "auto", "bitand", "bitor", "bool", "break", "case", "catch", "char", "class",
    "compl", "const", "const_cast", "continue", "default", "delete", "do",
    "double", "dynamic_cast", "else", "enum", "explicit", "export", "extern",
    "false", "float", "for", "friend", "goto", "if", "inline", "int", "long",
    "mutable", "namespace", "new", "not", "not_eq", "operator", "or", "or_eq",
    "private", "protected", "public", "reflexpr", "register", "reinterpret_cast",
    "return", "short", "signed", "sizeof", "static", "static_cast", "struct",
    "switch", "synchronized", "template", "this", "throw", "true", "try",
    "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual",
    "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Keywords added by C++11.
pub const KEYWORDS_CPP11: &[&str] = &[
    "alignas", "alignof", "char16_t", "char32_t", "constexpr", "decltype",
    "noexcept", "nullptr", "static_assert", "thread_local",
];

/// Keywords added by C++20.
pub const KEYWORDS_CPP20: &[&str] = &[
    "char8_t", "concept", "consteval", "constinit", "co_await", "co_return",
    "co_yield", "requires",
];

/// Builtin type keywords since the first standard.
pub const TYPE_KEYWORDS_CPP98: &[&str] = &["bool", "char", "double", "float", "int", "void", "wchar_t"];

/// Builtin type keywords added by C++11.
pub const TYPE_KEYWORDS_CPP11: &[&str] = &["char16_t", "char32_t"];

/// Builtin type keywords added by C++20.
pub const TYPE_KEYWORDS_CPP20: &[&str] = &["char8_t"];

/// Keywords that start a statement rather than a declaration. A function
/// signature run never contains one of these.
///
/// # Examples
/// ```
/// use config::constants::STATEMENT_KEYWORDS;
/// assert!(STATEMENT_KEYWORDS.contains(&"return"));
/// ```
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "return", "catch",
    "sizeof", "alignof", "decltype", "typeid", "throw", "new", "delete",
    "co_return", "co_await", "co_yield", "static_assert", "goto", "using",
    "typedef", "static_cast", "dynamic_cast", "const_cast", "reinterpret_cast",
];

/// Keywords that may trail a function parameter list.
///
/// # Examples
/// ```
/// use config::constants::FUNCTION_QUALIFIERS;
/// assert!(FUNCTION_QUALIFIERS.contains(&"override"));
/// ```
pub const FUNCTION_QUALIFIERS: &[&str] = &[
    "const", "volatile", "noexcept", "override", "final", "mutable", "constexpr",
    "consteval",
];

// =============================================================================
// CHARACTER CLASSES
// =============================================================================

/// Characters the tokenizer always splits into a token of their own.
///
/// # Examples
/// ```
/// use config::constants::DELIMITER_CHARS;
/// assert!(DELIMITER_CHARS.contains(&'#'));
/// assert!(!DELIMITER_CHARS.contains(&'_'));
/// ```
pub const DELIMITER_CHARS: &[char] = &[
    '\'', '"', '(', ')', '[', ']', '{', '}', '<', '>', '+', '-', '=', '*', '/',
    '|', '&', '^', '?', ',', ':', ';', '~', '!', '%', '#', '\\',
];

/// Delimiters labeled as operator leaves. `<` and `>` are labeled as angle
/// leaves instead and only become operators once template recognition
/// rejects them.
pub const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '=', '?', '%', '&', '^', '|', '!', '~'];

// =============================================================================
// OPERATOR FUSION
// =============================================================================

/// Three-character operators fused before template recognition.
pub const FUSED_OPERATORS_3: &[&str] = &["->*"];

/// Two-character operators fused before template recognition.
///
/// Operators starting with `<` or `>` are deliberately absent; they are fused
/// by [`ANGLE_OPERATORS`] after template lists have claimed their brackets.
pub const FUSED_OPERATORS_2: &[&str] = &[
    "++", "--", "==", "!=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "&&",
    "||", "->",
];

/// Angle-bracket operators, longest first.
///
/// # Examples
/// ```
/// use config::constants::ANGLE_OPERATORS;
/// assert_eq!(ANGLE_OPERATORS[0].len(), 3);
/// ```
pub const ANGLE_OPERATORS: &[&str] = &["<<=", ">>=", "<=>", "<<", ">>", "<=", ">="];

// =============================================================================
// LIMITS
// =============================================================================

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate. Every pass recurses once per bracket nesting level.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Stack headroom below which `stacker` allocates a fresh segment.
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

// =============================================================================
// LANGUAGE STANDARD
// =============================================================================

/// Language standard selecting the keyword vocabulary.
///
/// # Examples
/// ```
/// use config::constants::Standard;
/// assert!(Standard::Cpp20 > Standard::Cpp11);
/// assert_eq!(Standard::default(), Standard::Cpp23);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Standard {
    Cpp98,
    Cpp11,
    Cpp17,
    Cpp20,
    #[default]
    Cpp23,
}

impl Standard {
    /// All keywords recognized under this standard.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        let cpp11: &[&str] = if self >= Self::Cpp11 { KEYWORDS_CPP11 } else { &[] };
        let cpp20: &[&str] = if self >= Self::Cpp20 { KEYWORDS_CPP20 } else { &[] };
        KEYWORDS_CPP98.iter().chain(cpp11).chain(cpp20).copied()
    }

    /// Builtin type keywords recognized under this standard.
    pub fn type_keywords(self) -> impl Iterator<Item = &'static str> {
        let cpp11: &[&str] = if self >= Self::Cpp11 { TYPE_KEYWORDS_CPP11 } else { &[] };
        let cpp20: &[&str] = if self >= Self::Cpp20 { TYPE_KEYWORDS_CPP20 } else { &[] };
        TYPE_KEYWORDS_CPP98.iter().chain(cpp11).chain(cpp20).copied()
    }
}

/// Check whether `word` is a keyword under `standard`.
///
/// # Examples
/// ```
/// use config::constants::{is_keyword, Standard};
/// assert!(is_keyword("co_await", Standard::Cpp20));
/// assert!(!is_keyword("co_await", Standard::Cpp17));
/// ```
pub fn is_keyword(word: &str, standard: Standard) -> bool {
    standard.keywords().any(|k| k == word)
}

/// Check whether `word` is a builtin type keyword under `standard`.
pub fn is_type_keyword(word: &str, standard: Standard) -> bool {
    standard.type_keywords().any(|k| k == word)
}

/// Check whether `word` is a valid macro or identifier name.
///
/// # Examples
/// ```
/// use config::constants::is_identifier;
/// assert!(is_identifier("_MAX_SIZE2"));
/// assert!(!is_identifier("2fast"));
/// ```
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

// =============================================================================
// PARSE CONFIG
// =============================================================================

/// Immutable configuration for a parse session.
///
/// Include directories are accepted for collaborators but never resolved by
/// the parser.
///
/// # Examples
/// ```
/// use config::constants::ParseConfig;
/// let config = ParseConfig::default();
/// assert!(config.predefined_macros.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseConfig {
    /// Object-like macros seeded into every session's macro table.
    pub predefined_macros: BTreeMap<String, String>,
    /// Include-search directories, passed through untouched.
    pub include_dirs: Vec<PathBuf>,
    /// Keyword vocabulary.
    pub standard: Standard,
}

impl ParseConfig {
    /// Builds a configuration, validating macro names and include paths.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ParseConfig, Standard};
    /// let cfg = ParseConfig::new([("DEBUG", "1")], Vec::<&str>::new(), Standard::Cpp17)
    ///     .expect("valid config");
    /// assert_eq!(cfg.predefined_macros["DEBUG"], "1");
    /// ```
    pub fn new<N, V, P>(
        macros: impl IntoIterator<Item = (N, V)>,
        include_dirs: impl IntoIterator<Item = P>,
        standard: Standard,
    ) -> Result<Self, ConfigError>
    where
        N: Into<String>,
        V: Into<String>,
        P: Into<PathBuf>,
    {
        let mut config = Self {
            standard,
            ..Self::default()
        };
        for (name, value) in macros {
            config = config.with_macro(name, value)?;
        }
        for dir in include_dirs {
            config = config.with_include_dir(dir)?;
        }
        Ok(config)
    }

    /// Adds one predefined object-like macro.
    pub fn with_macro(mut self, name: impl Into<String>, value: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ConfigError::InvalidMacroName(name));
        }
        self.predefined_macros.insert(name, value.into());
        Ok(self)
    }

    /// Adds one include-search directory.
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyIncludeDir);
        }
        self.include_dirs.push(dir);
        Ok(self)
    }

    /// Replaces the language standard.
    pub fn with_standard(mut self, standard: Standard) -> Self {
        self.standard = standard;
        self
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when a predefined macro name is not an identifier.
    InvalidMacroName(String),
    /// Raised when an include directory is the empty path.
    EmptyIncludeDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMacroName(name) => {
                write!(f, "macro name must be an identifier: {name:?}")
            }
            ConfigError::EmptyIncludeDir => write!(f, "include directory must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
