// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token grouping: collapsing matched bracket pairs into single tree nodes.
//!
//! This stage is purely structural and runs before any parsing logic. Every
//! matched `{}`, `()` or `[]` pair becomes one [`TokenGroup`] containing its
//! interior, so later stages can treat an entire parameter list or method
//! body as a single peekable element instead of an unbounded token run.
//!
//! Angle brackets are deliberately NOT grouped: `<` doubles as the comparison
//! operator inside method bodies, so angle nesting is not decidable here.
//! Generic type arguments are scanned by the type parser at declaration
//! positions instead.
//!
//! Grouping fails with [`GroupError`] on the offending bracket token; no
//! other validation happens at this stage.

use ecow::EcoString;

use super::error::GroupError;
use super::{Span, Token, TokenKind};

/// The bracket kind of a token group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// `{ … }`
    Curly,
    /// `( … )`
    Round,
    /// `[ … ]`
    Square,
}

impl GroupKind {
    /// The group kind opened by the given token, if any.
    #[must_use]
    pub const fn from_open(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::LeftBrace => Some(Self::Curly),
            TokenKind::LeftParen => Some(Self::Round),
            TokenKind::LeftBracket => Some(Self::Square),
            _ => None,
        }
    }

    /// The group kind closed by the given token, if any.
    #[must_use]
    pub const fn from_close(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::RightBrace => Some(Self::Curly),
            TokenKind::RightParen => Some(Self::Round),
            TokenKind::RightBracket => Some(Self::Square),
            _ => None,
        }
    }

    /// The opening bracket text.
    #[must_use]
    pub const fn open_text(self) -> &'static str {
        match self {
            Self::Curly => "{",
            Self::Round => "(",
            Self::Square => "[",
        }
    }

    /// The closing bracket text.
    #[must_use]
    pub const fn close_text(self) -> &'static str {
        match self {
            Self::Curly => "}",
            Self::Round => ")",
            Self::Square => "]",
        }
    }
}

/// A bracket-delimited span collapsed into one structural unit.
///
/// Groups own their children exclusively, are created once by
/// [`group_tokens`], and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGroup {
    kind: GroupKind,
    open: Token,
    close: Token,
    children: Vec<TokenTree>,
}

impl TokenGroup {
    /// Returns the bracket kind.
    #[must_use]
    pub const fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Returns the opening bracket token.
    #[must_use]
    pub fn open(&self) -> &Token {
        &self.open
    }

    /// Returns the closing bracket token.
    #[must_use]
    pub fn close(&self) -> &Token {
        &self.close
    }

    /// Returns the interior elements.
    #[must_use]
    pub fn children(&self) -> &[TokenTree] {
        &self.children
    }

    /// Returns `true` if the group has no interior elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the full span including both brackets.
    #[must_use]
    pub fn span(&self) -> Span {
        self.open.span().merge(self.close.span())
    }

    /// Returns the span strictly between the brackets.
    #[must_use]
    pub fn interior_span(&self) -> Span {
        Span::new(self.open.span().end(), self.close.span().start())
    }
}

/// One element of a grouped token forest: a plain token or a bracket group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenTree {
    /// An atomic token.
    Token(Token),
    /// A collapsed bracket pair.
    Group(TokenGroup),
}

impl TokenTree {
    /// Returns the source span of this element.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Token(token) => token.span(),
            Self::Group(group) => group.span(),
        }
    }

    /// Returns the token if this is an atomic element.
    #[must_use]
    pub const fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Group(_) => None,
        }
    }

    /// Returns the group if this is a collapsed bracket pair.
    #[must_use]
    pub const fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            Self::Token(_) => None,
            Self::Group(group) => Some(group),
        }
    }

    /// Returns the group if it has the given kind.
    #[must_use]
    pub fn as_group_of(&self, kind: GroupKind) -> Option<&TokenGroup> {
        self.as_group().filter(|g| g.kind() == kind)
    }

    /// Display text for diagnostics: the token's text, or the group's
    /// opening bracket.
    #[must_use]
    pub fn describe(&self) -> EcoString {
        match self {
            Self::Token(token) => EcoString::from(token.kind().to_string()),
            Self::Group(group) => EcoString::from(group.kind().open_text()),
        }
    }
}

/// Groups a flat token sequence into a forest of tokens and bracket groups.
///
/// # Errors
///
/// Returns a [`GroupError`] identifying the offending bracket token when
/// brackets do not nest correctly: an unmatched closer, a closer of the
/// wrong kind, or end of input with open brackets pending.
///
/// # Examples
///
/// ```
/// use jport_core::source_analysis::{group_tokens, lex, TokenTree};
///
/// let forest = group_tokens(lex("void m() { }")).unwrap();
/// assert_eq!(forest.len(), 4); // void, m, (), {}
/// assert!(matches!(forest[2], TokenTree::Group(_)));
/// ```
pub fn group_tokens(tokens: Vec<Token>) -> Result<Vec<TokenTree>, GroupError> {
    // Each stack frame is an open bracket and the elements collected so far
    // inside it. The bottom "frame" is the top-level forest itself.
    let mut top_level: Vec<TokenTree> = Vec::new();
    let mut stack: Vec<(Token, GroupKind, Vec<TokenTree>)> = Vec::new();

    for token in tokens {
        if let Some(kind) = GroupKind::from_open(token.kind()) {
            stack.push((token, kind, Vec::new()));
        } else if let Some(kind) = GroupKind::from_close(token.kind()) {
            let Some((open, open_kind, children)) = stack.pop() else {
                return Err(GroupError::UnexpectedClose {
                    found: EcoString::from(kind.close_text()),
                    span: token.span(),
                });
            };
            if kind != open_kind {
                return Err(GroupError::MismatchedClose {
                    expected: EcoString::from(open_kind.close_text()),
                    found: EcoString::from(kind.close_text()),
                    span: token.span(),
                    open_span: open.span(),
                });
            }
            let group = TokenTree::Group(TokenGroup {
                kind,
                open,
                close: token,
                children,
            });
            match stack.last_mut() {
                Some((_, _, parent)) => parent.push(group),
                None => top_level.push(group),
            }
        } else {
            match stack.last_mut() {
                Some((_, _, parent)) => parent.push(TokenTree::Token(token)),
                None => top_level.push(TokenTree::Token(token)),
            }
        }
    }

    if let Some((open, kind, _)) = stack.pop() {
        return Err(GroupError::UnclosedOpen {
            found: EcoString::from(kind.open_text()),
            span: open.span(),
        });
    }

    Ok(top_level)
}

/// Flattens a grouped forest back into the original token sequence,
/// depth-first, reinserting the bracket tokens.
///
/// This is the inverse of [`group_tokens`] for well-bracketed input.
#[must_use]
pub fn flatten(trees: &[TokenTree]) -> Vec<Token> {
    let mut out = Vec::new();
    flatten_into(trees, &mut out);
    out
}

fn flatten_into(trees: &[TokenTree], out: &mut Vec<Token>) {
    for tree in trees {
        match tree {
            TokenTree::Token(token) => out.push(token.clone()),
            TokenTree::Group(group) => {
                out.push(group.open.clone());
                flatten_into(&group.children, out);
                out.push(group.close.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::lex;

    #[test]
    fn group_simple_method() {
        let forest = group_tokens(lex("void m() { return; }")).unwrap();
        assert_eq!(forest.len(), 4);

        let params = forest[2].as_group().unwrap();
        assert_eq!(params.kind(), GroupKind::Round);
        assert!(params.is_empty());

        let body = forest[3].as_group().unwrap();
        assert_eq!(body.kind(), GroupKind::Curly);
        assert_eq!(body.children().len(), 2); // return, ;
    }

    #[test]
    fn group_nested() {
        let forest = group_tokens(lex("{ a ( b [ c ] ) }")).unwrap();
        assert_eq!(forest.len(), 1);
        let outer = forest[0].as_group().unwrap();
        assert_eq!(outer.children().len(), 2); // a, (…)
        let round = outer.children()[1].as_group().unwrap();
        assert_eq!(round.kind(), GroupKind::Round);
        let square = round.children()[1].as_group().unwrap();
        assert_eq!(square.kind(), GroupKind::Square);
    }

    #[test]
    fn group_spans() {
        let source = "f(x)";
        let forest = group_tokens(lex(source)).unwrap();
        let group = forest[1].as_group().unwrap();
        assert_eq!(group.span(), Span::new(1, 4));
        assert_eq!(group.interior_span(), Span::new(2, 3));
    }

    #[test]
    fn unmatched_close_reports_its_position() {
        let source = "a } b";
        let err = group_tokens(lex(source)).unwrap_err();
        match err {
            GroupError::UnexpectedClose { found, span } => {
                assert_eq!(found, "}");
                assert_eq!(span, Span::new(2, 3));
            }
            other => panic!("expected UnexpectedClose, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_open_reports_innermost() {
        // The innermost pending open bracket is the offender
        let source = "{ ( x";
        let err = group_tokens(lex(source)).unwrap_err();
        match err {
            GroupError::UnclosedOpen { found, span } => {
                assert_eq!(found, "(");
                assert_eq!(span, Span::new(2, 3));
            }
            other => panic!("expected UnclosedOpen, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_close_points_both_ways() {
        let source = "( x }";
        let err = group_tokens(lex(source)).unwrap_err();
        match err {
            GroupError::MismatchedClose {
                expected,
                found,
                span,
                open_span,
            } => {
                assert_eq!(expected, ")");
                assert_eq!(found, "}");
                assert_eq!(span, Span::new(4, 5));
                assert_eq!(open_span, Span::new(0, 1));
            }
            other => panic!("expected MismatchedClose, got {other:?}"),
        }
    }

    #[test]
    fn extra_open_brace_is_reported_at_that_brace() {
        // Spec scenario 3: one extra `{`
        let source = "class A { { }";
        let err = group_tokens(lex(source)).unwrap_err();
        assert_eq!(err.span(), Span::new(8, 9));
    }

    #[test]
    fn flatten_round_trips() {
        let tokens = lex("public int f(int a, int b) { return a[0] + b; }");
        let forest = group_tokens(tokens.clone()).unwrap();
        assert_eq!(flatten(&forest), tokens);
    }

    #[test]
    fn describe_elements() {
        let forest = group_tokens(lex("x ( )")).unwrap();
        assert_eq!(forest[0].describe(), "x");
        assert_eq!(forest[1].describe(), "(");
    }
}
