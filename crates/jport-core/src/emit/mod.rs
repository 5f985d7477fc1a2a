// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Code emission: AST plus original source text in, C# text out.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use crate::source_analysis::Span;

pub mod csharp;

pub use csharp::emit_file;

/// An error raised during C# emission.
///
/// Emission performs no semantic validation beyond what it needs for
/// lowering; resolving the base type of an anonymous class is the one
/// check it cannot avoid, because the synthesized subclass must name its
/// parent.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[diagnostic(code(jport::emit))]
pub enum EmitError {
    /// An anonymous class extends a type that is neither declared in the
    /// file, imported by name, nor written as a qualified name.
    #[error("cannot resolve base type `{name}` of anonymous class")]
    UnresolvedBase {
        /// The unresolvable simple name.
        name: EcoString,
        /// Location of the base type reference.
        #[label("not declared in this file or imported")]
        span: Span,
    },
}
