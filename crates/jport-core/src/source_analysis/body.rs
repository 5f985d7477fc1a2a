// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The body dispatcher: drives the construct matchers over a class body,
//! and parses the file-level grammar around the classes.
//!
//! At each position the dispatcher tries [`MATCHERS`] in priority order on
//! a fork of the stream. The first matcher to accept gets to parse from
//! the real stream, and the dispatcher verifies that `parse` stopped at
//! the exact element index the accepted fork reached. The check converts a
//! silent desynchronization, which would produce a cascade of misleading
//! errors downstream, into one precise internal defect report.

use ecow::EcoString;

use crate::ast::{FileDecl, ImportDecl, Member};
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::TokenTree;
use crate::source_analysis::matcher::{ClassMatcher, MATCHERS};
use crate::source_analysis::stream::TokenStream;
use crate::source_analysis::{Span, TokenKind};

/// Parses one class member at the cursor.
///
/// # Errors
///
/// [`ParseError::UnrecognizedMember`] when no matcher accepts the element
/// at the cursor; whatever the accepting matcher's `parse` reports; or
/// [`ParseError::ConsumptionMismatch`] when `parse` and `is_match`
/// disagree about the construct's extent.
pub(crate) fn parse_member(stream: &mut TokenStream<'_>) -> Result<Member, ParseError> {
    let start_span = stream.current_span();
    for matcher in MATCHERS {
        let mut probe = stream.fork();
        if matcher.is_match(&mut probe) {
            let expected_end = probe.position();
            let member = matcher.parse(stream)?;
            if stream.position() != expected_end {
                return Err(ParseError::ConsumptionMismatch {
                    matcher: matcher.name(),
                    expected_end,
                    actual_end: stream.position(),
                    span: start_span.merge(member.span()),
                });
            }
            return Ok(member);
        }
    }
    Err(ParseError::UnrecognizedMember {
        found: stream.describe_current(),
        span: stream.current_span(),
    })
}

/// Parses class members until the stream is exhausted.
///
/// A lone `;` between members is an empty declaration, common in
/// decompiled output; it is consumed without producing a member.
pub(crate) fn parse_members(stream: &mut TokenStream<'_>) -> Result<Vec<Member>, ParseError> {
    let mut members = Vec::new();
    while stream.has_next() {
        if stream.eat_kind(&TokenKind::Semicolon) {
            continue;
        }
        members.push(parse_member(stream)?);
    }
    Ok(members)
}

/// Parses a whole source file from its grouped token forest:
/// an optional `package` declaration, any number of `import` declarations,
/// then top-level class declarations until end of input.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; nothing after the error
/// position is examined.
pub fn parse_file(trees: &[TokenTree]) -> Result<FileDecl, ParseError> {
    let span = match (trees.first(), trees.last()) {
        (Some(first), Some(last)) => first.span().merge(last.span()),
        _ => Span::at(0),
    };
    let mut stream = TokenStream::new(trees);

    let package = if stream.at_keyword("package") {
        let start = stream.current_span();
        stream.advance();
        let (path, _, path_span) = parse_dotted_path(&mut stream, "a package name")?;
        let end = stream.expect_kind(&TokenKind::Semicolon, "`;` after the package name")?;
        Some((path, start.merge(path_span).merge(end)))
    } else {
        None
    };

    let mut imports = Vec::new();
    while stream.at_keyword("import") {
        let start = stream.current_span();
        stream.advance();
        let is_static = stream.eat_keyword("static");
        let (path, simple, _) = parse_dotted_path(&mut stream, "an import path")?;
        let end = stream.expect_kind(&TokenKind::Semicolon, "`;` after the import path")?;
        imports.push(ImportDecl {
            path,
            simple,
            is_static,
            span: start.merge(end),
        });
    }

    let mut classes = Vec::new();
    while stream.has_next() {
        classes.push(ClassMatcher::parse_class(&mut stream)?);
    }

    Ok(FileDecl {
        package,
        imports,
        classes,
        span,
    })
}

/// Parses `ident (. ident)* (. *)?`. Returns the joined path text, the
/// final simple name (`None` when the path ends in `*`), and the span.
fn parse_dotted_path(
    stream: &mut TokenStream<'_>,
    what: &str,
) -> Result<(EcoString, Option<EcoString>, Span), ParseError> {
    let (first, first_span) = stream.expect_identifier(what)?;
    let mut path = first.clone();
    let mut simple = Some(first);
    let mut span = first_span;
    while stream.eat_kind(&TokenKind::Dot) {
        match stream.current_kind() {
            Some(TokenKind::Identifier(segment)) => {
                path.push('.');
                path.push_str(segment);
                simple = Some(segment.clone());
                span = span.merge(stream.current_span());
                stream.advance();
            }
            Some(TokenKind::Operator(op)) if op == "*" => {
                path.push_str(".*");
                simple = None;
                span = span.merge(stream.current_span());
                stream.advance();
                break;
            }
            _ => {
                return Err(ParseError::expected(
                    "an identifier or `*`",
                    stream.describe_current(),
                    stream.current_span(),
                ));
            }
        }
    }
    Ok((path, simple, span))
}

/// Parses a class body given source text, for tests and tools that work
/// on member fragments rather than whole files.
#[cfg(test)]
pub(crate) fn parse_members_of(trees: &[TokenTree]) -> Result<Vec<Member>, ParseError> {
    parse_members(&mut TokenStream::new(trees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{group_tokens, lex};

    fn forest(source: &str) -> Vec<TokenTree> {
        group_tokens(lex(source)).unwrap()
    }

    #[test]
    fn dispatches_whole_class_body() {
        // One of each construct kind, in one body
        let trees = forest(
            "int x = 1; \
             void run() { } \
             static class Inner { } \
             static { setup(); } \
             { tick(); } \
             Outer(int x) { }",
        );
        let members = parse_members_of(&trees).unwrap();
        assert_eq!(members.len(), 6);
        assert!(matches!(members[0], Member::Field(_)));
        assert!(matches!(members[1], Member::Method(_)));
        assert!(matches!(members[2], Member::NestedClass(_)));
        assert!(matches!(members[3], Member::StaticInitializer(_)));
        assert!(matches!(members[4], Member::InstanceInitializer(_)));
        assert!(matches!(members[5], Member::Constructor(_)));
    }

    #[test]
    fn unrecognized_member_points_at_the_cursor() {
        let source = "int x; return 1; int y;";
        let trees = forest(source);
        let err = parse_members_of(&trees).unwrap_err();
        match err {
            ParseError::UnrecognizedMember { found, span } => {
                assert_eq!(found, "return");
                assert_eq!(&source[span.as_range()], "return");
            }
            other => panic!("expected UnrecognizedMember, got {other:?}"),
        }
    }

    #[test]
    fn file_with_package_and_imports() {
        let trees = forest(
            "package com.example.app; \
             import java.util.List; \
             import static java.lang.Math.max; \
             import java.io.*; \
             public class Main { void run() { } }",
        );
        let file = parse_file(&trees).unwrap();
        assert_eq!(file.package.as_ref().unwrap().0, "com.example.app");
        assert_eq!(file.imports.len(), 3);
        assert_eq!(file.imports[0].path, "java.util.List");
        assert_eq!(file.imports[0].simple.as_deref(), Some("List"));
        assert!(file.imports[1].is_static);
        assert_eq!(file.imports[2].path, "java.io.*");
        assert!(file.imports[2].simple.is_none());
        assert_eq!(file.classes.len(), 1);
        assert_eq!(file.classes[0].name.text, "Main");
    }

    #[test]
    fn file_without_package_or_imports() {
        let trees = forest("class A { } class B { }");
        let file = parse_file(&trees).unwrap();
        assert!(file.package.is_none());
        assert!(file.imports.is_empty());
        assert_eq!(file.classes.len(), 2);
    }

    #[test]
    fn stray_semicolons_between_members_are_skipped() {
        let trees = forest("int x;; void m() { };");
        let members = parse_members_of(&trees).unwrap();
        assert_eq!(members.len(), 2);
        assert!(matches!(members[0], Member::Field(_)));
        assert!(matches!(members[1], Member::Method(_)));
    }

    #[test]
    fn member_order_is_preserved() {
        let trees = forest("int b; int a; int c;");
        let members = parse_members_of(&trees).unwrap();
        let names: Vec<_> = members
            .iter()
            .map(|m| match m {
                Member::Field(f) => f.declarators[0].name.text.as_str(),
                other => panic!("expected field, got {other:?}"),
            })
            .collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn stray_token_after_class_is_an_error() {
        let trees = forest("class A { } ;");
        assert!(parse_file(&trees).is_err());
    }
}
