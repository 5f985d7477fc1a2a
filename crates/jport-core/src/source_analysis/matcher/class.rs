// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The class matcher:
//! `modifiers class Name type-params? extends? implements? { members }`.
//!
//! One grammar serves top-level and nested classes; the dispatcher decides
//! which wrapper ([`Member::NestedClass`] or a top-level declaration) the
//! parsed node becomes.

use ecow::EcoString;

use crate::ast::{ClassDecl, Member, Name};
use crate::source_analysis::body;
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::GroupKind;
use crate::source_analysis::stream::TokenStream;
use crate::source_analysis::TokenKind;

use super::signature::{
    parse_modifier_run, parse_type, parse_type_params_span, scan_generic_args, scan_modifier_run,
    scan_type,
};
use super::ConstructMatcher;

pub(crate) struct ClassMatcher;

impl ClassMatcher {
    /// Parses a full class declaration. Used directly by the file-level
    /// parser for top-level classes.
    pub(crate) fn parse_class(stream: &mut TokenStream<'_>) -> Result<ClassDecl, ParseError> {
        let start = stream.current_span();
        let (modifiers, annotations) = parse_modifier_run(stream);
        if !stream.eat_keyword("class") {
            return Err(ParseError::expected(
                "`class`",
                stream.describe_current(),
                stream.current_span(),
            ));
        }
        let (name, name_span) = stream.expect_identifier("a class name")?;
        let type_params_span = parse_type_params_span(stream);
        let extends = if stream.eat_keyword("extends") {
            Some(parse_type(stream, "a superclass name")?)
        } else {
            None
        };
        let mut implements = Vec::new();
        if stream.eat_keyword("implements") {
            loop {
                implements.push(parse_type(stream, "an interface name")?);
                if !stream.eat_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let group = stream.expect_group(GroupKind::Curly, "a class body")?;
        let mut interior = TokenStream::new(group.children());
        let members = body::parse_members(&mut interior)?;
        Ok(ClassDecl {
            modifiers,
            annotations,
            name: Name::new(name, name_span),
            type_params_span,
            extends,
            implements,
            members,
            span: start.merge(group.span()),
        })
    }
}

impl ConstructMatcher for ClassMatcher {
    fn name(&self) -> &'static str {
        "nested class"
    }

    fn is_match(&self, stream: &mut TokenStream<'_>) -> bool {
        scan_modifier_run(stream);
        if !stream.eat_keyword("class") {
            return false;
        }
        if !stream.eat_kind(&TokenKind::Identifier(EcoString::new())) {
            return false;
        }
        let mut look = stream.fork();
        if scan_generic_args(&mut look) {
            *stream = look;
        }
        if stream.eat_keyword("extends") && !scan_type(stream) {
            return false;
        }
        if stream.eat_keyword("implements") {
            loop {
                if !scan_type(stream) {
                    return false;
                }
                if !stream.eat_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        // The body is one element here; its members are validated by parse
        stream.eat_group(GroupKind::Curly).is_some()
    }

    fn parse(&self, stream: &mut TokenStream<'_>) -> Result<Member, ParseError> {
        Ok(Member::NestedClass(Self::parse_class(stream)?))
    }
}
