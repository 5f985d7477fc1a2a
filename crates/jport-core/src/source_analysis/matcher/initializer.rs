// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Initializer-block matchers: `static { … }` and bare `{ … }`.

use crate::ast::{InitializerDecl, Member};
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::GroupKind;
use crate::source_analysis::stream::TokenStream;

use super::{parse_opaque_body, ConstructMatcher};

pub(crate) struct StaticInitializerMatcher;

impl ConstructMatcher for StaticInitializerMatcher {
    fn name(&self) -> &'static str {
        "static initializer"
    }

    fn is_match(&self, stream: &mut TokenStream<'_>) -> bool {
        stream.eat_keyword("static") && stream.eat_group(GroupKind::Curly).is_some()
    }

    fn parse(&self, stream: &mut TokenStream<'_>) -> Result<Member, ParseError> {
        let start = stream.current_span();
        stream.eat_keyword("static");
        let group = stream.expect_group(GroupKind::Curly, "an initializer block")?;
        Ok(Member::StaticInitializer(InitializerDecl {
            body: parse_opaque_body(group)?,
            span: start.merge(group.span()),
        }))
    }
}

pub(crate) struct InstanceInitializerMatcher;

impl ConstructMatcher for InstanceInitializerMatcher {
    fn name(&self) -> &'static str {
        "instance initializer"
    }

    fn is_match(&self, stream: &mut TokenStream<'_>) -> bool {
        stream.eat_group(GroupKind::Curly).is_some()
    }

    fn parse(&self, stream: &mut TokenStream<'_>) -> Result<Member, ParseError> {
        let group = stream.expect_group(GroupKind::Curly, "an initializer block")?;
        Ok(Member::InstanceInitializer(InitializerDecl {
            body: parse_opaque_body(group)?,
            span: group.span(),
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

    #[test]
    fn static_initializer() {
        let source = "static { cache = load(); }";
        let trees = forest(source);
        let mut probe = TokenStream::new(&trees);
        assert!(StaticInitializerMatcher.is_match(&mut probe));

        let mut stream = TokenStream::new(&trees);
        let Member::StaticInitializer(init) = StaticInitializerMatcher.parse(&mut stream).unwrap()
        else {
            panic!("expected static initializer");
        };
        assert_eq!(stream.position(), probe.position());
        assert_eq!(&source[init.body.interior_span.as_range()], " cache = load(); ");
    }

    #[test]
    fn instance_initializer() {
        let trees = forest("{ counter++; }");
        let mut probe = TokenStream::new(&trees);
        assert!(InstanceInitializerMatcher.is_match(&mut probe));
        let mut stream = TokenStream::new(&trees);
        assert!(matches!(
            InstanceInitializerMatcher.parse(&mut stream).unwrap(),
            Member::InstanceInitializer(_)
        ));
    }

    #[test]
    fn static_without_block_is_not_an_initializer() {
        let trees = forest("static int x;");
        let mut probe = TokenStream::new(&trees);
        assert!(!StaticInitializerMatcher.is_match(&mut probe));
    }
}
