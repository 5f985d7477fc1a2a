// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The method matcher:
//! `modifiers type-params? return-type name(params) throws? ( body | ; )`.

use ecow::EcoString;

use crate::ast::{Member, MethodDecl, Name};
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::GroupKind;
use crate::source_analysis::stream::TokenStream;
use crate::source_analysis::TokenKind;

use super::signature::{
    parse_modifier_run, parse_parameters, parse_throws, parse_type, parse_type_params_span,
    scan_generic_args, scan_modifier_run, scan_parameters, scan_throws, scan_type,
};
use super::{parse_opaque_body, ConstructMatcher};

pub(crate) struct MethodMatcher;

impl ConstructMatcher for MethodMatcher {
    fn name(&self) -> &'static str {
        "method"
    }

    fn is_match(&self, stream: &mut TokenStream<'_>) -> bool {
        scan_modifier_run(stream);
        let mut look = stream.fork();
        if scan_generic_args(&mut look) {
            *stream = look;
        }
        if !scan_type(stream) {
            return false;
        }
        if !stream.eat_kind(&TokenKind::Identifier(EcoString::new())) {
            return false;
        }
        let Some(params) = stream.eat_group(GroupKind::Round) else {
            return false;
        };
        let mut interior = TokenStream::new(params.children());
        if !scan_parameters(&mut interior) || interior.has_next() {
            return false;
        }
        if !scan_throws(stream) {
            return false;
        }
        if stream.eat_kind(&TokenKind::Semicolon) {
            return true;
        }
        stream.eat_group(GroupKind::Curly).is_some()
    }

    fn parse(&self, stream: &mut TokenStream<'_>) -> Result<Member, ParseError> {
        let start = stream.current_span();
        let (modifiers, annotations) = parse_modifier_run(stream);
        let type_params_span = parse_type_params_span(stream);
        let return_type = parse_type(stream, "a return type")?;
        let (name, name_span) = stream.expect_identifier("a method name")?;
        let params = stream.expect_group(GroupKind::Round, "a parameter list")?;
        let mut interior = TokenStream::new(params.children());
        let parameters = parse_parameters(&mut interior)?;
        let throws = parse_throws(stream)?;
        let (body, end) = if stream.at_kind(&TokenKind::Semicolon) {
            let end = stream.current_span();
            stream.advance();
            (None, end)
        } else {
            let group = stream.expect_group(GroupKind::Curly, "a method body or `;`")?;
            (Some(parse_opaque_body(group)?), group.span())
        };
        Ok(Member::Method(MethodDecl {
            modifiers,
            annotations,
            type_params_span,
            return_type,
            name: Name::new(name, name_span),
            parameters,
            throws,
            body,
            span: start.merge(end),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{group_tokens, lex};
    use crate::source_analysis::grouper::TokenTree;

    fn forest(source: &str) -> Vec<TokenTree> {
        group_tokens(lex(source)).unwrap()
    }

    fn parse_method(source: &str) -> MethodDecl {
        let trees = forest(source);
        let mut probe = TokenStream::new(&trees);
        assert!(MethodMatcher.is_match(&mut probe), "no match: {source}");
        let mut stream = TokenStream::new(&trees);
        match MethodMatcher.parse(&mut stream).unwrap() {
            Member::Method(method) => {
                assert_eq!(stream.position(), probe.position());
                method
            }
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn plain_method() {
        let method = parse_method("public void run() { doWork(); }");
        assert!(method.modifiers.has("public"));
        assert_eq!(method.return_type.simple, "void");
        assert_eq!(method.name.text, "run");
        assert!(method.parameters.is_empty());
        assert!(method.body.is_some());
    }

    #[test]
    fn abstract_method_has_no_body() {
        let method = parse_method("protected abstract int size();");
        assert!(method.body.is_none());
    }

    #[test]
    fn throws_clause_and_parameters() {
        let method = parse_method("byte[] read(int n) throws IOException { return buf; }");
        assert_eq!(method.parameters.len(), 1);
        assert_eq!(method.throws.len(), 1);
        assert_eq!(method.throws[0].simple, "IOException");
    }

    #[test]
    fn generic_method() {
        let source = "static <T extends Comparable<T>> T max(T a, T b) { return a; }";
        let method = parse_method(source);
        assert_eq!(method.return_type.simple, "T");
        assert_eq!(method.name.text, "max");
        assert_eq!(method.parameters.len(), 2);
        let span = method.type_params_span.unwrap();
        assert_eq!(&source[span.as_range()], "<T extends Comparable<T>>");
    }

    #[test]
    fn plain_method_has_no_type_params() {
        let method = parse_method("void run() { }");
        assert!(method.type_params_span.is_none());
    }

    #[test]
    fn rejects_constructor_shape() {
        // One identifier then `(` is a constructor, not a method
        let trees = forest("Foo(int x) { }");
        let mut probe = TokenStream::new(&trees);
        assert!(!MethodMatcher.is_match(&mut probe));
    }

    #[test]
    fn rejects_field_shape() {
        let trees = forest("int x = 1;");
        let mut probe = TokenStream::new(&trees);
        assert!(!MethodMatcher.is_match(&mut probe));
    }
}
