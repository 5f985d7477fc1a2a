// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source analysis: lexing, token grouping, and member-level parsing.
//!
//! The front half of the pipeline, in stage order:
//!
//! 1. [`lex`] turns source text into tokens, with comments and whitespace
//!    attached as trivia rather than emitted as tokens.
//! 2. [`check_lexed`] fails the file on the first error token.
//! 3. [`group_tokens`] collapses matched bracket pairs into [`TokenGroup`]
//!    nodes, producing a forest of [`TokenTree`] elements.
//! 4. [`parse_file`] drives the construct matchers over the forest and
//!    builds the [`crate::ast::FileDecl`].
//!
//! Method and initializer bodies are deliberately left opaque: they are
//! carried as spans and re-emitted byte-exact, with only anonymous-class
//! expressions inside them parsed into AST.

pub(crate) mod anon;
pub mod body;
pub mod error;
pub mod grouper;
pub mod lexer;
pub(crate) mod matcher;
pub mod span;
pub mod stream;
pub mod token;

#[cfg(test)]
mod grouper_property_tests;

pub use body::parse_file;
pub use error::{GroupError, LexError, LexErrorKind, ParseError};
pub use grouper::{flatten, group_tokens, GroupKind, TokenGroup, TokenTree};
pub use lexer::{lex, lex_with_eof, Lexer};
pub use span::Span;
pub use stream::TokenStream;
pub use token::{Token, TokenKind, Trivia};

/// Fails on the first error token in a lexed sequence.
///
/// The lexer recovers internally so that one bad character does not hide
/// later errors from tooling, but the pipeline is all-or-nothing: the
/// first error token aborts the file.
///
/// # Errors
///
/// Returns a [`LexError`] classifying the first error token found.
pub fn check_lexed(tokens: &[Token]) -> Result<(), LexError> {
    for token in tokens {
        if let TokenKind::Error(text) = token.kind() {
            return Err(LexError::from_error_token(text, token.span()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_lexed_accepts_clean_input() {
        assert!(check_lexed(&lex("class A { }")).is_ok());
    }

    #[test]
    fn check_lexed_reports_first_error() {
        let tokens = lex("int x = #1; int § y;");
        let err = check_lexed(&tokens).unwrap_err();
        assert_eq!(err.to_string(), "unexpected character '#'");
    }
}
