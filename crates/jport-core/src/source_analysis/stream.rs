// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! A cursor over a grouped token forest.
//!
//! [`TokenStream`] is the mechanism that makes speculative recognition free
//! of backtracking cost: it is a `Copy` view (slice + index) over an
//! immutable backing sequence, so [`TokenStream::fork`] hands out a fully
//! independent cursor in O(1). Matchers do all trial recognition on forks;
//! the only observable state change on the committing side is the real
//! stream advancing by exactly one parsed construct.

use ecow::EcoString;

use super::error::ParseError;
use super::grouper::{GroupKind, TokenGroup, TokenTree};
use super::{Span, Token, TokenKind};

/// A lightweight, shareable cursor over a sequence of tokens and groups.
///
/// The stream never owns the backing sequence. Copying it (via [`fork`] or
/// plain assignment) copies only the cursor, never the elements, and
/// advancing a copy never affects the original.
///
/// [`fork`]: TokenStream::fork
///
/// # Examples
///
/// ```
/// use jport_core::source_analysis::{group_tokens, lex, TokenStream};
///
/// let forest = group_tokens(lex("int x ;")).unwrap();
/// let mut stream = TokenStream::new(&forest);
///
/// let mut fork = stream.fork();
/// fork.advance();
/// fork.advance();
/// // The fork moved; the original did not.
/// assert_eq!(fork.position(), 2);
/// assert_eq!(stream.position(), 0);
/// assert!(stream.advance().is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TokenStream<'a> {
    elements: &'a [TokenTree],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream positioned at the first element of the forest.
    #[must_use]
    pub const fn new(elements: &'a [TokenTree]) -> Self {
        Self { elements, pos: 0 }
    }

    /// Returns the element at the cursor without consuming it.
    #[must_use]
    pub fn current(&self) -> Option<&'a TokenTree> {
        self.elements.get(self.pos)
    }

    /// Returns `true` if any elements remain.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pos < self.elements.len()
    }

    /// Returns the element `offset` positions ahead of the cursor.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<&'a TokenTree> {
        self.elements.get(self.pos + offset)
    }

    /// Consumes and returns the element at the cursor.
    pub fn advance(&mut self) -> Option<&'a TokenTree> {
        let element = self.elements.get(self.pos)?;
        self.pos += 1;
        Some(element)
    }

    /// Returns an independent cursor at the same position over the same
    /// backing sequence. Advancing the fork never affects `self`.
    #[must_use]
    pub const fn fork(&self) -> Self {
        *self
    }

    /// Returns the cursor position (element index).
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns a new stream over the interior of the current group, if the
    /// cursor is at a group. O(1): a view, not a copy.
    #[must_use]
    pub fn group_stream(&self) -> Option<TokenStream<'a>> {
        self.current()?.as_group().map(TokenGroup::children).map(Self::new)
    }

    /// Span of the element at the cursor, or an empty span just past the
    /// last element when exhausted.
    #[must_use]
    pub fn current_span(&self) -> Span {
        match self.current() {
            Some(element) => element.span(),
            None => match self.elements.last() {
                Some(last) => Span::at(last.span().end()),
                None => Span::at(0),
            },
        }
    }

    /// Span of the element just before the cursor, if the cursor has moved.
    #[must_use]
    pub fn previous_span(&self) -> Option<Span> {
        let index = self.pos.checked_sub(1)?;
        self.elements.get(index).map(TokenTree::span)
    }

    /// Display text of the element at the cursor, for diagnostics.
    #[must_use]
    pub fn describe_current(&self) -> EcoString {
        match self.current() {
            Some(element) => element.describe(),
            None => EcoString::from("<end of input>"),
        }
    }

    // ========================================================================
    // Token-level helpers
    // ========================================================================

    /// The token at the cursor, if the current element is an atomic token.
    #[must_use]
    pub fn current_token(&self) -> Option<&'a Token> {
        self.current()?.as_token()
    }

    /// The token kind at the cursor, if the current element is a token.
    #[must_use]
    pub fn current_kind(&self) -> Option<&'a TokenKind> {
        self.current_token().map(Token::kind)
    }

    /// The group at the cursor, if the current element is a group of the
    /// given kind.
    #[must_use]
    pub fn current_group(&self, kind: GroupKind) -> Option<&'a TokenGroup> {
        self.current()?.as_group_of(kind)
    }

    /// Returns `true` if the cursor is at the given reserved word.
    #[must_use]
    pub fn at_keyword(&self, word: &str) -> bool {
        self.current_kind().is_some_and(|k| k.is_keyword(word))
    }

    /// Returns `true` if the cursor is at the given operator.
    #[must_use]
    pub fn at_operator(&self, op: &str) -> bool {
        self.current_kind().is_some_and(|k| k.is_operator(op))
    }

    /// Returns `true` if the cursor is at a token of the same kind
    /// (discriminant comparison, payloads ignored).
    #[must_use]
    pub fn at_kind(&self, kind: &TokenKind) -> bool {
        self.current_kind()
            .is_some_and(|k| std::mem::discriminant(k) == std::mem::discriminant(kind))
    }

    /// Returns `true` if the cursor is at a group of the given kind.
    #[must_use]
    pub fn at_group(&self, kind: GroupKind) -> bool {
        self.current_group(kind).is_some()
    }

    /// Consumes the current token if it is the given reserved word.
    pub fn eat_keyword(&mut self, word: &str) -> bool {
        if self.at_keyword(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given operator.
    pub fn eat_operator(&mut self, op: &str) -> bool {
        if self.at_operator(op) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the current token if its kind matches (discriminant
    /// comparison).
    pub fn eat_kind(&mut self, kind: &TokenKind) -> bool {
        if self.at_kind(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the current element if it is a group of the given kind.
    pub fn eat_group(&mut self, kind: GroupKind) -> Option<&'a TokenGroup> {
        let group = self.current_group(kind)?;
        self.pos += 1;
        Some(group)
    }

    /// Consumes an identifier token, or fails with [`ParseError::Expected`].
    pub fn expect_identifier(&mut self, what: &str) -> Result<(EcoString, Span), ParseError> {
        match self.current_kind() {
            Some(TokenKind::Identifier(name)) => {
                let span = self.current_span();
                self.pos += 1;
                Ok((name.clone(), span))
            }
            _ => Err(ParseError::expected(
                what,
                self.describe_current(),
                self.current_span(),
            )),
        }
    }

    /// Consumes a token of the given kind, or fails with
    /// [`ParseError::Expected`].
    pub fn expect_kind(&mut self, kind: &TokenKind, what: &str) -> Result<Span, ParseError> {
        if self.at_kind(kind) {
            let span = self.current_span();
            self.pos += 1;
            Ok(span)
        } else {
            Err(ParseError::expected(
                what,
                self.describe_current(),
                self.current_span(),
            ))
        }
    }

    /// Consumes a group of the given kind, or fails with
    /// [`ParseError::Expected`].
    pub fn expect_group(
        &mut self,
        kind: GroupKind,
        what: &str,
    ) -> Result<&'a TokenGroup, ParseError> {
        self.eat_group(kind).ok_or_else(|| {
            ParseError::expected(what, self.describe_current(), self.current_span())
        })
    }

    /// The backing slice between two cursor positions.
    ///
    /// Used to hand a sub-run of elements (e.g. a field initializer) to the
    /// anonymous-class scanner without copying.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &'a [TokenTree] {
        &self.elements[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{group_tokens, lex};

    fn forest(source: &str) -> Vec<TokenTree> {
        group_tokens(lex(source)).unwrap()
    }

    #[test]
    fn forward_iteration() {
        let trees = forest("a b c");
        let mut stream = TokenStream::new(&trees);
        assert!(stream.has_next());
        assert_eq!(stream.advance().unwrap().describe(), "a");
        assert_eq!(stream.advance().unwrap().describe(), "b");
        assert_eq!(stream.advance().unwrap().describe(), "c");
        assert!(!stream.has_next());
        assert!(stream.advance().is_none());
    }

    #[test]
    fn fork_is_independent() {
        let trees = forest("a b c");
        let mut stream = TokenStream::new(&trees);
        stream.advance();

        let mut fork = stream.fork();
        fork.advance();
        fork.advance();
        assert!(!fork.has_next());

        // Original stream is exactly where it was
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.current().unwrap().describe(), "b");
    }

    #[test]
    fn group_stream_is_scoped_to_interior() {
        let trees = forest("f ( a , b ) g");
        let mut stream = TokenStream::new(&trees);
        stream.advance(); // f

        let mut interior = stream.group_stream().unwrap();
        assert_eq!(interior.position(), 0);
        assert_eq!(interior.advance().unwrap().describe(), "a");
        assert_eq!(interior.advance().unwrap().describe(), ",");
        assert_eq!(interior.advance().unwrap().describe(), "b");
        assert!(!interior.has_next());

        // Outer stream unaffected, still at the group
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn keyword_and_operator_helpers() {
        let trees = forest("static int x = 1 ;");
        let mut stream = TokenStream::new(&trees);
        assert!(stream.at_keyword("static"));
        assert!(stream.eat_keyword("static"));
        assert!(!stream.eat_keyword("final"));
        assert!(stream.eat_keyword("int"));
        let (name, _) = stream.expect_identifier("a field name").unwrap();
        assert_eq!(name, "x");
        assert!(stream.eat_operator("="));
        assert!(stream.eat_kind(&TokenKind::Integer("".into())));
        assert!(stream.eat_kind(&TokenKind::Semicolon));
        assert!(!stream.has_next());
    }

    #[test]
    fn expect_identifier_failure_points_at_cursor() {
        let trees = forest("{ }");
        let mut stream = TokenStream::new(&trees);
        let err = stream.expect_identifier("a class name").unwrap_err();
        assert_eq!(err.to_string(), "expected a class name, found `{`");
    }

    #[test]
    fn current_span_at_end_is_past_last_element() {
        let trees = forest("ab");
        let mut stream = TokenStream::new(&trees);
        stream.advance();
        assert_eq!(stream.current_span(), Span::at(2));
        assert_eq!(stream.describe_current(), "<end of input>");
    }

    #[test]
    fn eat_group_by_kind() {
        let trees = forest("( ) [ ]");
        let mut stream = TokenStream::new(&trees);
        assert!(stream.eat_group(GroupKind::Square).is_none());
        assert!(stream.eat_group(GroupKind::Round).is_some());
        assert!(stream.eat_group(GroupKind::Square).is_some());
    }
}
