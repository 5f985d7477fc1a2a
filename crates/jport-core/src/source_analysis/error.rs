// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the front-to-middle pipeline.
//!
//! Every error carries a [`Span`] pointing at the single token or group
//! responsible, and integrates with [`miette`] for rendered diagnostics.
//! All errors are terminal for the file being processed: the pipeline fails
//! fast and never emits partial output.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A lexical error that aborted processing of a file.
///
/// The lexer itself recovers by emitting error tokens; the pipeline does
/// not — the first error token in the stream becomes a `LexError`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic(code(jport::lex))]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Classifies an error token's raw text into a `LexError`.
    #[must_use]
    pub fn from_error_token(text: &str, span: Span) -> Self {
        let kind = if text.starts_with('"') {
            LexErrorKind::UnterminatedString
        } else if text.starts_with('\'') {
            LexErrorKind::UnterminatedCharacter
        } else {
            LexErrorKind::UnexpectedCharacter(text.chars().next().unwrap_or('\0'))
        };
        Self { kind, span }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// An unexpected character was encountered.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A string literal was not terminated.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A character literal was not terminated.
    #[error("unterminated character literal")]
    UnterminatedCharacter,
}

/// An unbalanced-bracket error from the grouping stage.
///
/// Grouping performs no validation beyond bracket nesting; content
/// correctness is a parser-stage concern.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[diagnostic(code(jport::group))]
pub enum GroupError {
    /// A closing bracket with no matching opener.
    #[error("unmatched closing '{found}'")]
    UnexpectedClose {
        /// The closing bracket's text.
        found: EcoString,
        /// Location of the unmatched closer.
        #[label("this bracket has no matching opener")]
        span: Span,
    },

    /// An opening bracket still pending at end of input.
    #[error("unclosed '{found}'")]
    UnclosedOpen {
        /// The opening bracket's text.
        found: EcoString,
        /// Location of the unclosed opener.
        #[label("this bracket is never closed")]
        span: Span,
    },

    /// A closing bracket of the wrong kind for the innermost open group.
    #[error("mismatched closing '{found}', expected '{expected}'")]
    MismatchedClose {
        /// The closer that would have matched.
        expected: EcoString,
        /// The closer actually found.
        found: EcoString,
        /// Location of the wrong closer.
        #[label("closes nothing")]
        span: Span,
        /// Location of the open bracket it fails to match.
        #[label("opened here")]
        open_span: Span,
    },
}

impl GroupError {
    /// Returns the span of the offending bracket.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedClose { span, .. }
            | Self::UnclosedOpen { span, .. }
            | Self::MismatchedClose { span, .. } => *span,
        }
    }
}

/// A parse error from the construct matchers or the body dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[diagnostic(code(jport::parse))]
pub enum ParseError {
    /// No matcher accepted the element at the cursor.
    #[error("unrecognized class member starting at `{found}`")]
    UnrecognizedMember {
        /// Display text of the token or group at the cursor.
        found: EcoString,
        /// Location of the unrecognized element.
        #[label("no member construct starts like this")]
        span: Span,
    },

    /// A confirmed construct had a malformed interior.
    #[error("expected {expected}, found `{found}`")]
    Expected {
        /// What the parser was looking for.
        expected: EcoString,
        /// Display text of what was there instead.
        found: EcoString,
        /// Location of the offending element.
        #[label("expected {expected} here")]
        span: Span,
    },

    /// `parse` consumed a span other than `is_match` validated.
    ///
    /// This is an internal invariant violation, never expected in correct
    /// operation; it indicates a defect in the named matcher.
    #[error(
        "matcher `{matcher}` parse/is_match boundary mismatch: \
         is_match ended at element {expected_end}, parse at {actual_end}"
    )]
    ConsumptionMismatch {
        /// The matcher that misbehaved.
        matcher: &'static str,
        /// Element index where `is_match` stopped.
        expected_end: usize,
        /// Element index where `parse` stopped.
        actual_end: usize,
        /// Location of the construct being parsed.
        #[label("while parsing this construct")]
        span: Span,
    },
}

impl ParseError {
    /// Creates an [`ParseError::Expected`] error.
    #[must_use]
    pub fn expected(expected: impl Into<EcoString>, found: impl Into<EcoString>, span: Span) -> Self {
        Self::Expected {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// Returns the span of the offending element.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnrecognizedMember { span, .. }
            | Self::Expected { span, .. }
            | Self::ConsumptionMismatch { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_classification() {
        let err = LexError::from_error_token("\"oops", Span::new(0, 5));
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.to_string(), "unterminated string literal");

        let err = LexError::from_error_token("'x", Span::new(0, 2));
        assert_eq!(err.kind, LexErrorKind::UnterminatedCharacter);

        let err = LexError::from_error_token("§", Span::new(0, 2));
        assert_eq!(err.to_string(), "unexpected character '§'");
    }

    #[test]
    fn group_error_display_and_span() {
        let err = GroupError::UnexpectedClose {
            found: "}".into(),
            span: Span::new(10, 11),
        };
        assert_eq!(err.to_string(), "unmatched closing '}'");
        assert_eq!(err.span(), Span::new(10, 11));

        let err = GroupError::MismatchedClose {
            expected: ")".into(),
            found: "}".into(),
            span: Span::new(5, 6),
            open_span: Span::new(0, 1),
        };
        assert_eq!(err.to_string(), "mismatched closing '}', expected ')'");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::UnrecognizedMember {
            found: "return".into(),
            span: Span::new(4, 10),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized class member starting at `return`"
        );

        let err = ParseError::expected("an identifier", "{", Span::new(0, 1));
        assert_eq!(err.to_string(), "expected an identifier, found `{`");
    }
}
