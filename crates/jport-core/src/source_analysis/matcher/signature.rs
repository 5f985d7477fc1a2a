// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared signature scanning for the construct matchers.
//!
//! Every helper comes in two flavours with identical consumption behaviour:
//! a `scan_*` predicate used by `is_match` (advances the stream, returns
//! whether the shape was present) and a `parse_*` constructor used by
//! `parse` (advances the stream, builds AST nodes, reports malformed
//! interiors). Keeping the pairs in one file makes consumption drift
//! between them easy to spot in review.
//!
//! All helpers use the fork-and-commit pattern for optional pieces: trial
//! recognition happens on a [`TokenStream::fork`], and the fork is assigned
//! back over the real stream only on success.

use ecow::EcoString;

use crate::ast::{Annotation, Modifiers, Name, Parameter, TypeName};
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::GroupKind;
use crate::source_analysis::stream::TokenStream;
use crate::source_analysis::token::{MODIFIERS, PRIMITIVE_TYPES};
use crate::source_analysis::{Span, TokenKind};

/// Scans the annotation-and-modifier run that may precede any member:
/// `@Name`, `@Name(...)` and modifier keywords, freely interleaved.
///
/// Always succeeds (the run may be empty); malformed annotations stop the
/// run without consuming the `@`.
pub(crate) fn scan_modifier_run(stream: &mut TokenStream<'_>) {
    loop {
        if stream.current_kind().is_some_and(TokenKind::is_modifier) {
            stream.advance();
            continue;
        }
        let mut look = stream.fork();
        if scan_annotation(&mut look) {
            *stream = look;
            continue;
        }
        break;
    }
}

/// Parses the annotation-and-modifier run, preserving source order of the
/// modifier keywords.
pub(crate) fn parse_modifier_run(stream: &mut TokenStream<'_>) -> (Modifiers, Vec<Annotation>) {
    let mut modifiers = Modifiers::default();
    let mut annotations = Vec::new();
    loop {
        match stream.current_kind() {
            Some(TokenKind::Keyword(word)) if MODIFIERS.contains(&word.as_str()) => {
                modifiers.keywords.push(Name::new(word.clone(), stream.current_span()));
                stream.advance();
            }
            Some(TokenKind::At) => {
                let mut look = stream.fork();
                match parse_annotation(&mut look) {
                    Some(annotation) => {
                        annotations.push(annotation);
                        *stream = look;
                    }
                    None => break,
                }
            }
            _ => break,
        }
    }
    (modifiers, annotations)
}

fn scan_annotation(stream: &mut TokenStream<'_>) -> bool {
    if !stream.eat_kind(&TokenKind::At) {
        return false;
    }
    if !stream.eat_kind(&TokenKind::Identifier(EcoString::new())) {
        return false;
    }
    while stream.eat_kind(&TokenKind::Dot) {
        if !stream.eat_kind(&TokenKind::Identifier(EcoString::new())) {
            return false;
        }
    }
    // Optional argument group
    stream.eat_group(GroupKind::Round);
    true
}

fn parse_annotation(stream: &mut TokenStream<'_>) -> Option<Annotation> {
    let at_span = stream.current_span();
    if !stream.eat_kind(&TokenKind::At) {
        return None;
    }
    let (mut text, mut name_span) = match stream.current_kind() {
        Some(TokenKind::Identifier(name)) => {
            let span = stream.current_span();
            stream.advance();
            (name.clone(), span)
        }
        _ => return None,
    };
    while stream.eat_kind(&TokenKind::Dot) {
        match stream.current_kind() {
            Some(TokenKind::Identifier(segment)) => {
                text.push('.');
                text.push_str(segment);
                name_span = name_span.merge(stream.current_span());
                stream.advance();
            }
            _ => return None,
        }
    }
    let args_span = stream.eat_group(GroupKind::Round).map(|g| g.span());
    let end = args_span.unwrap_or(name_span);
    Some(Annotation {
        name: Name::new(text, name_span),
        args_span,
        span: at_span.merge(end),
    })
}

/// Scans a type reference: a primitive keyword or dotted identifier path,
/// optionally followed by generic arguments and array dimensions.
pub(crate) fn scan_type(stream: &mut TokenStream<'_>) -> bool {
    match stream.current_kind() {
        Some(kind) if kind.is_primitive_type() => {
            stream.advance();
        }
        Some(TokenKind::Identifier(_)) => {
            stream.advance();
            loop {
                let mut look = stream.fork();
                if look.eat_kind(&TokenKind::Dot)
                    && look.eat_kind(&TokenKind::Identifier(EcoString::new()))
                {
                    *stream = look;
                } else {
                    break;
                }
            }
        }
        _ => return false,
    }
    let mut look = stream.fork();
    if scan_generic_args(&mut look) {
        *stream = look;
    }
    scan_array_dims(stream);
    true
}

/// Parses a type reference. Consumption identical to [`scan_type`].
pub(crate) fn parse_type(stream: &mut TokenStream<'_>, what: &str) -> Result<TypeName, ParseError> {
    let start = stream.current_span();
    let simple: EcoString;
    let mut end: Span;
    match stream.current_kind() {
        Some(TokenKind::Keyword(word)) if PRIMITIVE_TYPES.contains(&word.as_str()) => {
            simple = word.clone();
            end = start;
            stream.advance();
        }
        Some(TokenKind::Identifier(name)) => {
            let mut last = name.clone();
            end = start;
            stream.advance();
            loop {
                let mut look = stream.fork();
                if look.eat_kind(&TokenKind::Dot) {
                    if let Some(TokenKind::Identifier(segment)) = look.current_kind() {
                        last = segment.clone();
                        end = look.current_span();
                        look.advance();
                        *stream = look;
                        continue;
                    }
                }
                break;
            }
            simple = last;
        }
        _ => {
            return Err(ParseError::expected(
                what,
                stream.describe_current(),
                stream.current_span(),
            ));
        }
    }
    let mut look = stream.fork();
    if scan_generic_args(&mut look) {
        // The closing `>` is the element before the fork's cursor
        end = look.previous_span().unwrap_or(end);
        *stream = look;
    }
    while let Some(dims) = stream.current_group(GroupKind::Square) {
        if !dims.is_empty() {
            break;
        }
        end = dims.span();
        stream.advance();
    }
    Ok(TypeName::new(simple, start.merge(end)))
}

/// Scans a generic argument list starting at `<`, handling the lexer's
/// maximal-munch closers: `>` closes one level, `>>` two, `>>>` three.
///
/// Returns `false` without meaning on a stream that was not at `<`; the
/// caller decides via fork whether to commit. Conservative: any element
/// not plausible inside type arguments aborts the scan, which is how a
/// comparison expression at the same position is rejected.
pub(crate) fn scan_generic_args(stream: &mut TokenStream<'_>) -> bool {
    if !stream.at_operator("<") {
        return false;
    }
    stream.advance();
    let mut depth: u32 = 1;
    while depth > 0 {
        match stream.current_kind() {
            Some(TokenKind::Operator(op)) => match op.as_str() {
                "<" => {
                    depth += 1;
                    stream.advance();
                }
                ">" => {
                    depth -= 1;
                    stream.advance();
                }
                ">>" => {
                    if depth < 2 {
                        return false;
                    }
                    depth -= 2;
                    stream.advance();
                }
                ">>>" => {
                    if depth < 3 {
                        return false;
                    }
                    depth -= 3;
                    stream.advance();
                }
                "?" | "&" => {
                    stream.advance();
                }
                _ => return false,
            },
            Some(TokenKind::Identifier(_)) | Some(TokenKind::Dot) | Some(TokenKind::Comma) => {
                stream.advance();
            }
            Some(TokenKind::Keyword(word)) => {
                let plausible =
                    word == "extends" || word == "super" || PRIMITIVE_TYPES.contains(&word.as_str());
                if !plausible {
                    return false;
                }
                stream.advance();
            }
            _ => {
                if stream.at_group(GroupKind::Square) {
                    stream.advance();
                } else {
                    return false;
                }
            }
        }
    }
    true
}

/// Consumes a `<...>` type-parameter list at the cursor, if present,
/// returning its span from `<` through the closing `>`. Consumption
/// identical to a successful [`scan_generic_args`], nothing otherwise.
pub(crate) fn parse_type_params_span(stream: &mut TokenStream<'_>) -> Option<Span> {
    let start = stream.current_span();
    let mut look = stream.fork();
    if scan_generic_args(&mut look) {
        let end = look.previous_span().unwrap_or(start);
        *stream = look;
        Some(start.merge(end))
    } else {
        None
    }
}

fn scan_array_dims(stream: &mut TokenStream<'_>) {
    while let Some(group) = stream.current_group(GroupKind::Square) {
        if !group.is_empty() {
            break;
        }
        stream.advance();
    }
}

/// Scans a parameter list interior: comma-separated parameters, each an
/// optional `final`, a type, an optional `...`, and a name.
pub(crate) fn scan_parameters(interior: &mut TokenStream<'_>) -> bool {
    if !interior.has_next() {
        return true;
    }
    loop {
        interior.eat_keyword("final");
        if !scan_type(interior) {
            return false;
        }
        interior.eat_kind(&TokenKind::Ellipsis);
        if !interior.eat_kind(&TokenKind::Identifier(EcoString::new())) {
            return false;
        }
        if !interior.has_next() {
            return true;
        }
        if !interior.eat_kind(&TokenKind::Comma) {
            return false;
        }
    }
}

/// Parses a parameter list interior. Consumption identical to
/// [`scan_parameters`].
pub(crate) fn parse_parameters(interior: &mut TokenStream<'_>) -> Result<Vec<Parameter>, ParseError> {
    let mut parameters = Vec::new();
    if !interior.has_next() {
        return Ok(parameters);
    }
    loop {
        let start = interior.current_span();
        let is_final = interior.eat_keyword("final");
        let ty = parse_type(interior, "a parameter type")?;
        let is_varargs = interior.eat_kind(&TokenKind::Ellipsis);
        let (name, name_span) = interior.expect_identifier("a parameter name")?;
        parameters.push(Parameter {
            is_final,
            ty,
            is_varargs,
            name: Name::new(name, name_span),
            span: start.merge(name_span),
        });
        if !interior.has_next() {
            return Ok(parameters);
        }
        interior.expect_kind(&TokenKind::Comma, "`,` between parameters")?;
    }
}

/// Scans an optional `throws Type (, Type)*` clause.
pub(crate) fn scan_throws(stream: &mut TokenStream<'_>) -> bool {
    if !stream.eat_keyword("throws") {
        return true;
    }
    loop {
        if !scan_type(stream) {
            return false;
        }
        if !stream.eat_kind(&TokenKind::Comma) {
            return true;
        }
    }
}

/// Parses an optional `throws` clause. Consumption identical to
/// [`scan_throws`].
pub(crate) fn parse_throws(stream: &mut TokenStream<'_>) -> Result<Vec<TypeName>, ParseError> {
    let mut thrown = Vec::new();
    if !stream.eat_keyword("throws") {
        return Ok(thrown);
    }
    loop {
        thrown.push(parse_type(stream, "an exception type")?);
        if !stream.eat_kind(&TokenKind::Comma) {
            return Ok(thrown);
        }
    }
}
