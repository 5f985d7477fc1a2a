// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for the Java member-declaration subset.
//!
//! The lexer is hand-written for maximum control over error recovery and
//! trivia handling.
//!
//! # Design Principles
//!
//! - **Error recovery**: never panic on malformed input; emit [`TokenKind::Error`]
//! - **Trivia preservation**: whitespace and comments attach to tokens, so
//!   later stages never see comment-only spans
//! - **Precise spans**: every token carries its exact byte range
//!
//! # Example
//!
//! ```
//! use jport_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("int x = 1;").collect();
//! assert_eq!(tokens.len(), 5); // int, x, =, 1, ; (EOF excluded from iterator)
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{Span, Token, TokenKind, Trivia};

/// A lexer that tokenizes Java source code.
///
/// Produces tokens with source spans and attached trivia. Implements
/// [`Iterator`] for easy consumption; iteration stops before the EOF token
/// (use [`lex_with_eof`] when a terminator is wanted).
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Pending trivia to attach to the next token.
    pending_trivia: Vec<Trivia>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            pending_trivia: Vec::new(),
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[allow(clippy::cast_possible_truncation)] // source files over 4GB are not supported
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace and comments, collecting them as trivia.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    let start = self.current_position();
                    self.advance_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
                    let text = self.text_for(self.span_from(start));
                    self.pending_trivia
                        .push(Trivia::Whitespace(EcoString::from(text)));
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    self.lex_line_comment();
                }
                Some('/') if self.peek_char_n(1) == Some('*') => {
                    self.lex_block_comment();
                }
                _ => break,
            }
        }
    }

    /// Lexes a line comment: `// ...`
    fn lex_line_comment(&mut self) {
        let start = self.current_position();
        self.advance(); // /
        self.advance(); // /
        self.advance_while(|c| c != '\n');
        let text = self.text_for(self.span_from(start));
        self.pending_trivia
            .push(Trivia::LineComment(EcoString::from(text)));
    }

    /// Lexes a block comment: `/* ... */` (Javadoc included).
    fn lex_block_comment(&mut self) {
        let start = self.current_position();
        self.advance(); // /
        self.advance(); // *

        loop {
            match self.peek_char() {
                None => break, // Unterminated - recover gracefully
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance(); // *
                    self.advance(); // /
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        let text = self.text_for(self.span_from(start));
        self.pending_trivia
            .push(Trivia::BlockComment(EcoString::from(text)));
    }

    /// Lexes the next token.
    fn lex_token(&mut self) -> Token {
        self.skip_trivia();
        let leading_trivia = std::mem::take(&mut self.pending_trivia);

        let start = self.current_position();

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => self.lex_token_kind(c, start),
        };

        let span = self.span_from(start);

        // Collect trailing trivia (same-line whitespace and comments)
        self.collect_trailing_trivia();
        let trailing_trivia = std::mem::take(&mut self.pending_trivia);

        Token::with_trivia(kind, span, leading_trivia, trailing_trivia)
    }

    /// Collects trailing trivia (same-line whitespace and a line comment).
    fn collect_trailing_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t') => {
                    let start = self.current_position();
                    self.advance_while(|c| matches!(c, ' ' | '\t'));
                    let text = self.text_for(self.span_from(start));
                    self.pending_trivia
                        .push(Trivia::Whitespace(EcoString::from(text)));
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    self.lex_line_comment();
                    break; // Line comment ends trailing trivia
                }
                _ => break,
            }
        }
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char, start: u32) -> TokenKind {
        match c {
            'a'..='z' | 'A'..='Z' | '_' | '$' => self.lex_identifier_or_keyword(start),
            '0'..='9' => self.lex_number(start),
            '"' => self.lex_string(start),
            '\'' => self.lex_character(start),

            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            '{' => {
                self.advance();
                TokenKind::LeftBrace
            }
            '}' => {
                self.advance();
                TokenKind::RightBrace
            }
            '[' => {
                self.advance();
                TokenKind::LeftBracket
            }
            ']' => {
                self.advance();
                TokenKind::RightBracket
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            '@' => {
                self.advance();
                TokenKind::At
            }
            '.' => self.lex_dot(),

            '=' | '!' | '<' | '>' | '&' | '|' | '+' | '-' | '*' | '/' | '%' | '^' | '~' | '?'
            | ':' => self.lex_operator(c),

            _ => {
                self.advance();
                let text = self.text_for(self.span_from(start));
                TokenKind::Error(EcoString::from(text))
            }
        }
    }

    /// Lexes an identifier or reserved word.
    fn lex_identifier_or_keyword(&mut self, start: u32) -> TokenKind {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        let text = self.text_for(self.span_from(start));
        if super::token::KEYWORDS.contains(&text) {
            TokenKind::Keyword(EcoString::from(text))
        } else {
            TokenKind::Identifier(EcoString::from(text))
        }
    }

    /// Lexes an integer or floating-point literal.
    ///
    /// Handles hex (`0xFF`), binary (`0b1010`), octal (`017`), underscores
    /// (`1_000_000`), exponents (`2.5e10`), and `lLfFdD` suffixes.
    fn lex_number(&mut self, start: u32) -> TokenKind {
        let is_digit = |c: char| c.is_ascii_digit() || c == '_';

        if self.peek_char() == Some('0')
            && matches!(self.peek_char_n(1), Some('x' | 'X' | 'b' | 'B'))
        {
            self.advance(); // 0
            self.advance(); // x / b
            self.advance_while(|c| c.is_ascii_hexdigit() || c == '_');
            if matches!(self.peek_char(), Some('l' | 'L')) {
                self.advance();
            }
            let text = self.text_for(self.span_from(start));
            return TokenKind::Integer(EcoString::from(text));
        }

        self.advance_while(is_digit);

        let mut is_float = false;

        // Fractional part — only if a digit follows the dot, so `1.toString()`
        // style chains and array accesses are not swallowed.
        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.advance(); // .
            self.advance_while(is_digit);
        }

        // Exponent part
        if matches!(self.peek_char(), Some('e' | 'E'))
            && (self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
                || (matches!(self.peek_char_n(1), Some('+' | '-'))
                    && self.peek_char_n(2).is_some_and(|c| c.is_ascii_digit())))
        {
            is_float = true;
            self.advance(); // e
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            self.advance_while(is_digit);
        }

        // Suffix
        match self.peek_char() {
            Some('f' | 'F' | 'd' | 'D') => {
                is_float = true;
                self.advance();
            }
            Some('l' | 'L') => {
                self.advance();
            }
            _ => {}
        }

        let text = self.text_for(self.span_from(start));
        if is_float {
            TokenKind::Float(EcoString::from(text))
        } else {
            TokenKind::Integer(EcoString::from(text))
        }
    }

    /// Lexes a string literal. Unterminated strings become error tokens.
    fn lex_string(&mut self, start: u32) -> TokenKind {
        self.advance(); // opening "
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    // Unterminated
                    let text = self.text_for(self.span_from(start));
                    return TokenKind::Error(EcoString::from(text));
                }
                Some('\\') => {
                    self.advance(); // backslash
                    self.advance(); // escaped char
                }
                Some('"') => {
                    self.advance();
                    let span = self.span_from(start);
                    // Content without the surrounding quotes
                    let inner = Span::new(span.start() + 1, span.end() - 1);
                    return TokenKind::String(EcoString::from(self.text_for(inner)));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Lexes a character literal. Unterminated literals become error tokens.
    fn lex_character(&mut self, start: u32) -> TokenKind {
        self.advance(); // opening '
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    let text = self.text_for(self.span_from(start));
                    return TokenKind::Error(EcoString::from(text));
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('\'') => {
                    self.advance();
                    let span = self.span_from(start);
                    let inner = Span::new(span.start() + 1, span.end() - 1);
                    return TokenKind::Char(EcoString::from(self.text_for(inner)));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Lexes `...` or `.`.
    fn lex_dot(&mut self) -> TokenKind {
        if self.peek_char_n(1) == Some('.') && self.peek_char_n(2) == Some('.') {
            self.advance();
            self.advance();
            self.advance();
            TokenKind::Ellipsis
        } else {
            self.advance();
            TokenKind::Dot
        }
    }

    /// Lexes an operator with maximal munch.
    fn lex_operator(&mut self, first: char) -> TokenKind {
        let second = self.peek_char_n(1);
        let third = self.peek_char_n(2);
        let fourth = self.peek_char_n(3);

        let op: &str = match (first, second, third, fourth) {
            ('>', Some('>'), Some('>'), Some('=')) => ">>>=",
            ('>', Some('>'), Some('>'), _) => ">>>",
            ('>', Some('>'), Some('='), _) => ">>=",
            ('<', Some('<'), Some('='), _) => "<<=",
            ('>', Some('>'), _, _) => ">>",
            ('<', Some('<'), _, _) => "<<",
            ('=', Some('='), _, _) => "==",
            ('!', Some('='), _, _) => "!=",
            ('<', Some('='), _, _) => "<=",
            ('>', Some('='), _, _) => ">=",
            ('&', Some('&'), _, _) => "&&",
            ('|', Some('|'), _, _) => "||",
            ('+', Some('+'), _, _) => "++",
            ('-', Some('-'), _, _) => "--",
            ('-', Some('>'), _, _) => "->",
            (':', Some(':'), _, _) => "::",
            ('+', Some('='), _, _) => "+=",
            ('-', Some('='), _, _) => "-=",
            ('*', Some('='), _, _) => "*=",
            ('/', Some('='), _, _) => "/=",
            ('%', Some('='), _, _) => "%=",
            ('&', Some('='), _, _) => "&=",
            ('|', Some('='), _, _) => "|=",
            ('^', Some('='), _, _) => "^=",
            ('=', _, _, _) => "=",
            ('!', _, _, _) => "!",
            ('<', _, _, _) => "<",
            ('>', _, _, _) => ">",
            ('&', _, _, _) => "&",
            ('|', _, _, _) => "|",
            ('+', _, _, _) => "+",
            ('-', _, _, _) => "-",
            ('*', _, _, _) => "*",
            ('/', _, _, _) => "/",
            ('%', _, _, _) => "%",
            ('^', _, _, _) => "^",
            ('~', _, _, _) => "~",
            ('?', _, _, _) => "?",
            (':', _, _, _) => ":",
            _ => unreachable!("lex_operator called with non-operator start"),
        };

        for _ in 0..op.len() {
            self.advance();
        }
        TokenKind::Operator(EcoString::from(op))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.lex_token();
        if token.kind().is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

/// Lexes source text into tokens, excluding the EOF marker.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lexes source text into tokens, including a final EOF token.
#[must_use]
pub fn lex_with_eof(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex_token();
        let is_eof = token.kind().is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(Token::into_kind).collect()
    }

    #[test]
    fn lex_empty() {
        assert!(lex("").is_empty());
        let with_eof = lex_with_eof("");
        assert_eq!(with_eof.len(), 1);
        assert!(with_eof[0].kind().is_eof());
    }

    #[test]
    fn lex_identifiers_and_keywords() {
        assert_eq!(
            kinds("class Widget extends Base"),
            vec![
                TokenKind::Keyword("class".into()),
                TokenKind::Identifier("Widget".into()),
                TokenKind::Keyword("extends".into()),
                TokenKind::Identifier("Base".into()),
            ]
        );
    }

    #[test]
    fn lex_dollar_identifiers() {
        // Decompiled sources are full of synthetic $-names
        assert_eq!(
            kinds("this$0 access$100"),
            vec![
                TokenKind::Identifier("this$0".into()),
                TokenKind::Identifier("access$100".into()),
            ]
        );
    }

    #[test]
    fn lex_numbers() {
        assert_eq!(
            kinds("42 0xFF 0b1010 1_000L 3.14 2.5e10 1e-3 7f 2d"),
            vec![
                TokenKind::Integer("42".into()),
                TokenKind::Integer("0xFF".into()),
                TokenKind::Integer("0b1010".into()),
                TokenKind::Integer("1_000L".into()),
                TokenKind::Float("3.14".into()),
                TokenKind::Float("2.5e10".into()),
                TokenKind::Float("1e-3".into()),
                TokenKind::Float("7f".into()),
                TokenKind::Float("2d".into()),
            ]
        );
    }

    #[test]
    fn lex_number_then_dot_call() {
        // `1.toString` must not swallow the dot as a fraction
        assert_eq!(
            kinds("x[1].y"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::LeftBracket,
                TokenKind::Integer("1".into()),
                TokenKind::RightBracket,
                TokenKind::Dot,
                TokenKind::Identifier("y".into()),
            ]
        );
    }

    #[test]
    fn lex_strings_and_chars() {
        assert_eq!(
            kinds(r#""hello" "a\"b" 'x' '\n'"#),
            vec![
                TokenKind::String("hello".into()),
                TokenKind::String(r#"a\"b"#.into()),
                TokenKind::Char("x".into()),
                TokenKind::Char(r"\n".into()),
            ]
        );
    }

    #[test]
    fn lex_unterminated_string_is_error() {
        let ks = kinds("\"oops");
        assert_eq!(ks.len(), 1);
        assert!(ks[0].is_error());
    }

    #[test]
    fn lex_operators_maximal_munch() {
        assert_eq!(
            kinds("a >>>= b >>> c >> d >= e > f"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Operator(">>>=".into()),
                TokenKind::Identifier("b".into()),
                TokenKind::Operator(">>>".into()),
                TokenKind::Identifier("c".into()),
                TokenKind::Operator(">>".into()),
                TokenKind::Identifier("d".into()),
                TokenKind::Operator(">=".into()),
                TokenKind::Identifier("e".into()),
                TokenKind::Operator(">".into()),
                TokenKind::Identifier("f".into()),
            ]
        );
    }

    #[test]
    fn lex_arrow_and_method_ref() {
        assert_eq!(
            kinds("x -> y::z"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Operator("->".into()),
                TokenKind::Identifier("y".into()),
                TokenKind::Operator("::".into()),
                TokenKind::Identifier("z".into()),
            ]
        );
    }

    #[test]
    fn lex_ellipsis() {
        assert_eq!(
            kinds("String... args"),
            vec![
                TokenKind::Identifier("String".into()),
                TokenKind::Ellipsis,
                TokenKind::Identifier("args".into()),
            ]
        );
    }

    #[test]
    fn lex_comments_are_trivia() {
        let tokens = lex("// header\nint /* mid */ x; // tail");
        let ks: Vec<_> = tokens.iter().map(|t| t.kind().clone()).collect();
        assert_eq!(
            ks,
            vec![
                TokenKind::Keyword("int".into()),
                TokenKind::Identifier("x".into()),
                TokenKind::Semicolon,
            ]
        );
        assert!(tokens[0].has_leading_comment());
        assert!(tokens[1].has_leading_comment()); // the block comment
        assert!(
            tokens[2]
                .trailing_trivia()
                .iter()
                .any(super::Trivia::is_comment)
        );
    }

    #[test]
    fn lex_spans_are_exact() {
        let tokens = lex("int x");
        assert_eq!(tokens[0].span(), Span::new(0, 3));
        assert_eq!(tokens[1].span(), Span::new(4, 5));
    }

    #[test]
    fn lex_unknown_char_is_error() {
        let ks = kinds("int § x");
        assert_eq!(ks.len(), 3);
        assert!(ks[1].is_error());
    }

    #[test]
    fn lex_annotation_tokens() {
        assert_eq!(
            kinds("@Override void m()"),
            vec![
                TokenKind::At,
                TokenKind::Identifier("Override".into()),
                TokenKind::Keyword("void".into()),
                TokenKind::Identifier("m".into()),
                TokenKind::LeftParen,
                TokenKind::RightParen,
            ]
        );
    }
}
