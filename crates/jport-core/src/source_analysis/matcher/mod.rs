// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Construct matchers: one recognizer/parser pair per class-member kind.
//!
//! The body dispatcher consults [`MATCHERS`] in a fixed order at each
//! cursor position. Each matcher exposes two operations with a strict
//! contract between them:
//!
//! - [`ConstructMatcher::is_match`] runs on a fork of the real stream and
//!   scans the construct's full structural skeleton, leaving the fork
//!   positioned just past the construct on success. It fails fast on the
//!   first non-conforming element.
//! - [`ConstructMatcher::parse`] runs on the real stream, consumes the
//!   construct, and builds its AST node. It is only invoked after
//!   `is_match` accepted, and must stop at exactly the element index where
//!   `is_match` stopped.
//!
//! The dispatcher verifies the boundary after every parse and converts any
//! disagreement into [`ParseError::ConsumptionMismatch`]; a mismatch is a
//! matcher defect, not an input error.
//!
//! The match order resolves the grammar's prefix overlaps: a field and a
//! method share `modifiers type name`, and only the element after the name
//! (`(` versus `=`/`,`/`;`) separates them; a constructor's `Name(` prefix
//! is a proper subset of a method's `Type name(`. Field and method run
//! first, the constructor last, so the longer shapes win.

mod class;
mod constructor;
mod field;
mod initializer;
mod method;
pub(crate) mod signature;


pub(crate) use class::ClassMatcher;
pub(crate) use constructor::ConstructorMatcher;
pub(crate) use field::FieldMatcher;
pub(crate) use initializer::{InstanceInitializerMatcher, StaticInitializerMatcher};
pub(crate) use method::MethodMatcher;

use crate::ast::{Member, OpaqueBody};
use crate::source_analysis::anon;
use crate::source_analysis::error::ParseError;
use crate::source_analysis::grouper::TokenGroup;
use crate::source_analysis::stream::TokenStream;

/// A recognizer/parser pair for one class-member construct.
pub(crate) trait ConstructMatcher {
    /// The matcher's name, used in invariant-violation diagnostics.
    fn name(&self) -> &'static str;

    /// Scans the construct's structural skeleton on a fork of the real
    /// stream. On success the fork is left just past the construct; on
    /// failure the fork's position is meaningless and the fork is dropped.
    fn is_match(&self, stream: &mut TokenStream<'_>) -> bool;

    /// Consumes the construct from the real stream and builds its node.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when a confirmed construct has a malformed
    /// interior (e.g. a parameter without a name).
    fn parse(&self, stream: &mut TokenStream<'_>) -> Result<Member, ParseError>;
}

/// All matchers, in match priority order.
pub(crate) static MATCHERS: &[&(dyn ConstructMatcher + Sync)] = &[
    &FieldMatcher,
    &MethodMatcher,
    &ClassMatcher,
    &StaticInitializerMatcher,
    &InstanceInitializerMatcher,
    &ConstructorMatcher,
];

/// Builds an opaque body from a brace group: records the interior span and
/// collects any anonymous-class expressions inside it.
pub(crate) fn parse_opaque_body(group: &TokenGroup) -> Result<OpaqueBody, ParseError> {
    Ok(OpaqueBody {
        interior_span: group.interior_span(),
        anonymous_classes: anon::scan_trees(group.children())?,
    })
}
