// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Anonymous-class detection inside opaque token runs.
//!
//! Bodies and initializers are never parsed as statements, but anonymous
//! class expressions inside them must still become AST so the emitter can
//! lower them to named classes. The scanner walks a token run looking for
//! the shape `new Type(args) { members }`, parses the brace interior with
//! the regular member dispatcher, and records everything else untouched.
//!
//! Scope rules:
//! - The scanner recurses into every bracket group it passes, so an
//!   anonymous class buried in a nested expression is still found.
//! - A matched expression's constructor arguments are scanned separately
//!   (they are re-emitted as text and may themselves contain anonymous
//!   classes); its member bodies are not scanned here, because each member
//!   body records its own anonymous classes when the dispatcher parses it.

use crate::ast::AnonymousClassExpr;
use crate::source_analysis::body;
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::{GroupKind, TokenTree};
use crate::source_analysis::matcher::signature::parse_type;
use crate::source_analysis::stream::TokenStream;

/// Finds all anonymous-class expressions in a token run, in source order.
///
/// # Errors
///
/// Returns [`ParseError`] when a detected anonymous class has a body that
/// does not parse as class members. Everything that is not an anonymous
/// class is skipped without validation.
pub(crate) fn scan_trees(trees: &[TokenTree]) -> Result<Vec<AnonymousClassExpr>, ParseError> {
    let mut found = Vec::new();
    let mut stream = TokenStream::new(trees);
    while stream.has_next() {
        if stream.at_keyword("new") {
            let mut look = stream.fork();
            if let Some(expr) = try_parse_anon(&mut look)? {
                found.push(expr);
                stream = look;
                continue;
            }
        }
        if let Some(group) = stream.current().and_then(TokenTree::as_group) {
            found.extend(scan_trees(group.children())?);
        }
        stream.advance();
    }
    Ok(found)
}

/// Attempts to read `new Type(args) { members }` at the cursor.
///
/// Returns `Ok(None)` while the shape is still deniable (an ordinary
/// instantiation, an array creation). Once the brace group after the
/// argument list is seen the expression is committed, and body errors
/// propagate.
fn try_parse_anon(stream: &mut TokenStream<'_>) -> Result<Option<AnonymousClassExpr>, ParseError> {
    let start = stream.current_span();
    if !stream.eat_keyword("new") {
        return Ok(None);
    }
    let Ok(base) = parse_type(stream, "a type") else {
        return Ok(None);
    };
    let Some(args_group) = stream.eat_group(GroupKind::Round) else {
        return Ok(None);
    };
    let Some(body_group) = stream.eat_group(GroupKind::Curly) else {
        return Ok(None);
    };

    let argument_anons = scan_trees(args_group.children())?;
    let mut interior = TokenStream::new(body_group.children());
    let members = body::parse_members(&mut interior)?;
    Ok(Some(AnonymousClassExpr {
        base,
        args_span: args_group.interior_span(),
        argument_anons,
        members,
        span: start.merge(body_group.span()),
    }))
}
