// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for the Java member-declaration subset.
//!
//! Each token consists of:
//! - A [`TokenKind`] indicating the type of token
//! - A [`Span`] indicating its location in source
//! - Leading and trailing [`Trivia`] (whitespace and comments)
//!
//! Comments are trivia, never tokens: the construct matchers therefore never
//! have to skip or classify comment-only spans.

use ecow::EcoString;

use super::Span;

/// Java reserved words recognised by the lexer.
///
/// `true`, `false` and `null` are technically literals, but they are reserved
/// and never valid as identifiers, so they are lexed as keywords too.
pub const KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

/// Primitive type keywords (including `void` for return types).
pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short", "void",
];

/// Member modifier keywords.
pub const MODIFIERS: &[&str] = &[
    "abstract",
    "final",
    "native",
    "private",
    "protected",
    "public",
    "static",
    "strictfp",
    "synchronized",
    "transient",
    "volatile",
];

/// The kind of token, not including source location or trivia.
///
/// Tokens are cheap to clone ([`EcoString`] for string data).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier: `foo`, `Widget`, `MAX_SIZE`
    Identifier(EcoString),

    /// A reserved word: `class`, `static`, `new`, …
    Keyword(EcoString),

    /// An integer literal: `42`, `0xFF`, `1_000L`
    Integer(EcoString),

    /// A floating-point literal: `3.14`, `2.5e10f`
    Float(EcoString),

    /// A double-quoted string literal, raw text without the quotes.
    String(EcoString),

    /// A character literal, raw text without the quotes: `a`, `\n`
    Char(EcoString),

    /// An operator: `=`, `+`, `==`, `>>>=`, `->`, `::`, …
    Operator(EcoString),

    // === Delimiters (collapsed into groups by the grouper) ===
    /// Left parenthesis: `(`
    LeftParen,
    /// Right parenthesis: `)`
    RightParen,
    /// Left brace: `{`
    LeftBrace,
    /// Right brace: `}`
    RightBrace,
    /// Left bracket: `[`
    LeftBracket,
    /// Right bracket: `]`
    RightBracket,

    // === Punctuation ===
    /// Statement terminator: `;`
    Semicolon,
    /// Separator: `,`
    Comma,
    /// Member access / qualified name separator: `.`
    Dot,
    /// Annotation marker: `@`
    At,
    /// Varargs marker: `...`
    Ellipsis,

    /// End of file.
    Eof,

    /// Invalid/error token (preserves the unlexable text).
    Error(EcoString),
}

impl TokenKind {
    /// Returns `true` if this token is an identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Returns `true` if this token is the given reserved word.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        matches!(self, Self::Keyword(k) if k == word)
    }

    /// Returns `true` if this token is a modifier keyword.
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Keyword(k) if MODIFIERS.contains(&k.as_str()))
    }

    /// Returns `true` if this token is a primitive type keyword (incl. `void`).
    #[must_use]
    pub fn is_primitive_type(&self) -> bool {
        matches!(self, Self::Keyword(k) if PRIMITIVE_TYPES.contains(&k.as_str()))
    }

    /// Returns `true` if this token is the given operator.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        matches!(self, Self::Operator(o) if o == op)
    }

    /// Returns `true` if this token is an opening delimiter.
    #[must_use]
    pub const fn is_open_delimiter(&self) -> bool {
        matches!(self, Self::LeftParen | Self::LeftBrace | Self::LeftBracket)
    }

    /// Returns `true` if this token is a closing delimiter.
    #[must_use]
    pub const fn is_close_delimiter(&self) -> bool {
        matches!(self, Self::RightParen | Self::RightBrace | Self::RightBracket)
    }

    /// Returns `true` if this is the end-of-file marker.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` if this is an error token.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the string content if this token carries one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Identifier(s)
            | Self::Keyword(s)
            | Self::Integer(s)
            | Self::Float(s)
            | Self::String(s)
            | Self::Char(s)
            | Self::Operator(s)
            | Self::Error(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(s)
            | Self::Keyword(s)
            | Self::Integer(s)
            | Self::Float(s)
            | Self::Operator(s) => write!(f, "{s}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Char(s) => write!(f, "'{s}'"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::At => write!(f, "@"),
            Self::Ellipsis => write!(f, "..."),
            Self::Eof => write!(f, "<eof>"),
            Self::Error(s) => write!(f, "<error: {s}>"),
        }
    }
}

/// Trivia represents non-semantic content like whitespace and comments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trivia {
    /// Whitespace (spaces, tabs, newlines).
    Whitespace(EcoString),
    /// A line comment: `// comment text`
    LineComment(EcoString),
    /// A block comment: `/* comment text */` (includes Javadoc `/** … */`).
    BlockComment(EcoString),
}

impl Trivia {
    /// Returns the text content of this trivia.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Whitespace(s) | Self::LineComment(s) | Self::BlockComment(s) => s,
        }
    }

    /// Returns `true` if this is a comment.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment(_) | Self::BlockComment(_))
    }
}

/// A token with its source location and surrounding trivia.
///
/// # Examples
///
/// ```
/// use jport_core::source_analysis::{Span, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
/// assert!(token.kind().is_identifier());
/// assert_eq!(token.span().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
    leading_trivia: Vec<Trivia>,
    trailing_trivia: Vec<Trivia>,
}

impl Token {
    /// Creates a new token with no trivia.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
        }
    }

    /// Creates a new token with trivia.
    #[must_use]
    pub fn with_trivia(
        kind: TokenKind,
        span: Span,
        leading_trivia: Vec<Trivia>,
        trailing_trivia: Vec<Trivia>,
    ) -> Self {
        Self {
            kind,
            span,
            leading_trivia,
            trailing_trivia,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token (excluding trivia).
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the trivia that precedes this token.
    #[must_use]
    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.leading_trivia
    }

    /// Returns the trivia that follows this token.
    #[must_use]
    pub fn trailing_trivia(&self) -> &[Trivia] {
        &self.trailing_trivia
    }

    /// Returns `true` if this token has any leading comments.
    #[must_use]
    pub fn has_leading_comment(&self) -> bool {
        self.leading_trivia.iter().any(Trivia::is_comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::Identifier("foo".into()).to_string(), "foo");
        assert_eq!(TokenKind::Keyword("class".into()).to_string(), "class");
        assert_eq!(TokenKind::Integer("42".into()).to_string(), "42");
        assert_eq!(TokenKind::String("hi".into()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::Char("a".into()).to_string(), "'a'");
        assert_eq!(TokenKind::Operator("==".into()).to_string(), "==");
        assert_eq!(TokenKind::Semicolon.to_string(), ";");
        assert_eq!(TokenKind::Ellipsis.to_string(), "...");
        assert_eq!(TokenKind::Eof.to_string(), "<eof>");
        assert_eq!(TokenKind::Error("§".into()).to_string(), "<error: §>");
    }

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::Identifier("x".into()).is_identifier());
        assert!(!TokenKind::Keyword("int".into()).is_identifier());

        assert!(TokenKind::Keyword("class".into()).is_keyword("class"));
        assert!(!TokenKind::Identifier("class".into()).is_keyword("class"));

        assert!(TokenKind::Keyword("public".into()).is_modifier());
        assert!(TokenKind::Keyword("volatile".into()).is_modifier());
        assert!(!TokenKind::Keyword("class".into()).is_modifier());

        assert!(TokenKind::Keyword("int".into()).is_primitive_type());
        assert!(TokenKind::Keyword("void".into()).is_primitive_type());
        assert!(!TokenKind::Keyword("new".into()).is_primitive_type());

        assert!(TokenKind::Operator("=".into()).is_operator("="));
        assert!(!TokenKind::Operator("==".into()).is_operator("="));

        assert!(TokenKind::LeftBrace.is_open_delimiter());
        assert!(TokenKind::RightBracket.is_close_delimiter());
        assert!(!TokenKind::Semicolon.is_open_delimiter());

        assert!(TokenKind::Eof.is_eof());
        assert!(TokenKind::Error("bad".into()).is_error());
    }

    #[test]
    fn token_kind_as_str() {
        assert_eq!(TokenKind::Identifier("foo".into()).as_str(), Some("foo"));
        assert_eq!(TokenKind::Operator("+".into()).as_str(), Some("+"));
        assert_eq!(TokenKind::Comma.as_str(), None);
        assert_eq!(TokenKind::Eof.as_str(), None);
    }

    #[test]
    fn token_creation_and_accessors() {
        let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
        assert!(matches!(token.kind(), TokenKind::Identifier(s) if s == "foo"));
        assert_eq!(token.span().start(), 0);
        assert_eq!(token.span().end(), 3);
        assert!(token.leading_trivia().is_empty());
        assert!(token.trailing_trivia().is_empty());
    }

    #[test]
    fn token_with_trivia() {
        let token = Token::with_trivia(
            TokenKind::Keyword("class".into()),
            Span::new(10, 15),
            vec![Trivia::LineComment("// note".into())],
            vec![Trivia::Whitespace(" ".into())],
        );
        assert!(token.has_leading_comment());
        assert_eq!(token.trailing_trivia().len(), 1);
    }

    #[test]
    fn trivia_predicates() {
        assert!(!Trivia::Whitespace("  ".into()).is_comment());
        assert!(Trivia::LineComment("// x".into()).is_comment());
        assert!(Trivia::BlockComment("/* x */".into()).is_comment());
    }
}
