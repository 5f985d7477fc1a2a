// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The field matcher: `modifiers type name (= init)? (, name (= init)?)* ;`.

use ecow::EcoString;

use crate::ast::{FieldDecl, FieldDeclarator, Initializer, Member, Name};
use crate::source_analysis::anon;
use crate::source_analysis::error::ParseError;
use crate::source_analysis::stream::TokenStream;
use crate::source_analysis::TokenKind;

use super::signature::{parse_modifier_run, parse_type, scan_modifier_run, scan_type};
use super::ConstructMatcher;

pub(crate) struct FieldMatcher;

impl ConstructMatcher for FieldMatcher {
    fn name(&self) -> &'static str {
        "field"
    }

    fn is_match(&self, stream: &mut TokenStream<'_>) -> bool {
        scan_modifier_run(stream);
        if !scan_type(stream) {
            return false;
        }
        loop {
            if !stream.eat_kind(&TokenKind::Identifier(EcoString::new())) {
                return false;
            }
            if stream.eat_operator("=") && !scan_initializer(stream) {
                return false;
            }
            if stream.eat_kind(&TokenKind::Semicolon) {
                return true;
            }
            if !stream.eat_kind(&TokenKind::Comma) {
                return false;
            }
        }
    }

    fn parse(&self, stream: &mut TokenStream<'_>) -> Result<Member, ParseError> {
        let start = stream.current_span();
        let (modifiers, annotations) = parse_modifier_run(stream);
        let ty = parse_type(stream, "a field type")?;
        let mut declarators = Vec::new();
        loop {
            let (name, name_span) = stream.expect_identifier("a field name")?;
            let initializer = if stream.eat_operator("=") {
                Some(parse_initializer(stream)?)
            } else {
                None
            };
            declarators.push(FieldDeclarator {
                name: Name::new(name, name_span),
                initializer,
            });
            if stream.at_kind(&TokenKind::Semicolon) {
                break;
            }
            stream.expect_kind(&TokenKind::Comma, "`,` or `;` after a field declarator")?;
        }
        let end = stream.expect_kind(&TokenKind::Semicolon, "`;` after a field declaration")?;
        Ok(Member::Field(FieldDecl {
            modifiers,
            annotations,
            ty,
            declarators,
            span: start.merge(end),
        }))
    }
}

/// Advances past an initializer expression: any elements up to, but not
/// including, the next top-level `,` or `;`. Bracket groups are single
/// elements, so commas and semicolons inside them never stop the scan.
fn scan_initializer(stream: &mut TokenStream<'_>) -> bool {
    let start = stream.position();
    loop {
        if stream.at_kind(&TokenKind::Semicolon) || stream.at_kind(&TokenKind::Comma) {
            return stream.position() > start;
        }
        if stream.advance().is_none() {
            return false;
        }
    }
}

fn parse_initializer(stream: &mut TokenStream<'_>) -> Result<Initializer, ParseError> {
    let start = stream.position();
    if !scan_initializer(stream) {
        return Err(ParseError::expected(
            "an initializer expression",
            stream.describe_current(),
            stream.current_span(),
        ));
    }
    let elements = stream.slice(start, stream.position());
    let span = elements[0].span().merge(elements[elements.len() - 1].span());
    Ok(Initializer {
        span,
        anonymous_classes: anon::scan_trees(elements)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{group_tokens, lex};
    use crate::source_analysis::grouper::TokenTree;

    fn forest(source: &str) -> Vec<TokenTree> {
        group_tokens(lex(source)).unwrap()
    }

    fn parse_field(source: &str) -> FieldDecl {
        let trees = forest(source);
        let mut probe = TokenStream::new(&trees);
        assert!(FieldMatcher.is_match(&mut probe), "no match: {source}");
        let mut stream = TokenStream::new(&trees);
        match FieldMatcher.parse(&mut stream).unwrap() {
            Member::Field(field) => {
                assert_eq!(stream.position(), probe.position());
                field
            }
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn plain_field() {
        let field = parse_field("private int count;");
        assert!(field.modifiers.has("private"));
        assert_eq!(field.ty.simple, "int");
        assert_eq!(field.declarators.len(), 1);
        assert_eq!(field.declarators[0].name.text, "count");
        assert!(field.declarators[0].initializer.is_none());
    }

    #[test]
    fn initialized_field() {
        let source = "static final String GREETING = \"hi\" + name;";
        let field = parse_field(source);
        let init = field.declarators[0].initializer.as_ref().unwrap();
        assert_eq!(&source[init.span.as_range()], "\"hi\" + name");
    }

    #[test]
    fn multiple_declarators() {
        let field = parse_field("int a, b = 2, c;");
        let names: Vec<_> = field.declarators.iter().map(|d| d.name.text.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(field.declarators[0].initializer.is_none());
        assert!(field.declarators[1].initializer.is_some());
    }

    #[test]
    fn array_initializer_commas_do_not_split_declarators() {
        let field = parse_field("int[] primes = { 2, 3, 5 };");
        assert_eq!(field.declarators.len(), 1);
    }

    #[test]
    fn rejects_method_shapes() {
        for source in ["void run() { }", "int get();", "Foo(int x) { }"] {
            let trees = forest(source);
            let mut probe = TokenStream::new(&trees);
            assert!(!FieldMatcher.is_match(&mut probe), "false match: {source}");
        }
    }

    #[test]
    fn missing_initializer_is_rejected() {
        let trees = forest("int x = ;");
        let mut probe = TokenStream::new(&trees);
        assert!(!FieldMatcher.is_match(&mut probe));
    }
}
