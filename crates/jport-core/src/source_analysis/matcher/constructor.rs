// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The constructor matcher: `modifiers Name(params) throws? body`.
//!
//! Runs last: its `Name(` prefix is a subset of a method's `Type name(`,
//! so everything that can be read as a method already has been.

use ecow::EcoString;

use crate::ast::{ConstructorDecl, Member, Name};
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::GroupKind;
use crate::source_analysis::stream::TokenStream;
use crate::source_analysis::TokenKind;

use super::signature::{
    parse_modifier_run, parse_parameters, parse_throws, scan_modifier_run, scan_parameters,
    scan_throws,
};
use super::{parse_opaque_body, ConstructMatcher};

pub(crate) struct ConstructorMatcher;

impl ConstructMatcher for ConstructorMatcher {
    fn name(&self) -> &'static str {
        "constructor"
    }

    fn is_match(&self, stream: &mut TokenStream<'_>) -> bool {
        scan_modifier_run(stream);
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
        stream.eat_group(GroupKind::Curly).is_some()
    }

    fn parse(&self, stream: &mut TokenStream<'_>) -> Result<Member, ParseError> {
        let start = stream.current_span();
        let (modifiers, annotations) = parse_modifier_run(stream);
        let (name, name_span) = stream.expect_identifier("a constructor name")?;
        let params = stream.expect_group(GroupKind::Round, "a parameter list")?;
        let mut interior = TokenStream::new(params.children());
        let parameters = parse_parameters(&mut interior)?;
        let throws = parse_throws(stream)?;
        let group = stream.expect_group(GroupKind::Curly, "a constructor body")?;
        Ok(Member::Constructor(ConstructorDecl {
            modifiers,
            annotations,
            name: Name::new(name, name_span),
            parameters,
            throws,
            body: parse_opaque_body(group)?,
            span: start.merge(group.span()),
        }))
    }
}
