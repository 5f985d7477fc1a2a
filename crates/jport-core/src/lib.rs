// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! jport compiler core.
//!
//! Transpiles the Java subset found in decompiled codebases to C#:
//! - Source analysis (lexing, bracket grouping, member-level parsing)
//! - A declaration-level AST with opaque, byte-exact member bodies
//! - C# emission with anonymous-class lowering
//!
//! The transpiler reads declarations structurally and treats statement
//! bodies as opaque token runs, so it stays robust across the full range
//! of expression syntax a decompiler emits.
//!
//! [`transpile`] is the whole pipeline; the stages are public for tools
//! that want to stop part-way (e.g. syntax checking without emission).

pub mod ast;
pub mod emit;
pub mod source_analysis;

use miette::Diagnostic;
use thiserror::Error;

use ast::FileDecl;
use emit::EmitError;
use source_analysis::{GroupError, LexError, ParseError};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{ClassDecl, FileDecl, Member};
    pub use crate::source_analysis::Span;
}

/// Any error from the transpilation pipeline.
///
/// All variants are terminal for the file being processed: no partial
/// output is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    /// A lexical error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    /// An unbalanced-bracket error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Group(#[from] GroupError),

    /// A parse error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// An emission error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),
}

/// Parses a source file to its AST without emitting anything.
///
/// # Errors
///
/// Returns an [`Error`] for lexical, bracket, or parse failures.
pub fn parse(source: &str) -> Result<FileDecl, Error> {
    let tokens = source_analysis::lex(source);
    source_analysis::check_lexed(&tokens)?;
    let forest = source_analysis::group_tokens(tokens)?;
    Ok(source_analysis::parse_file(&forest)?)
}

/// Transpiles a Java source file to C# text.
///
/// # Errors
///
/// Returns an [`Error`] from whichever pipeline stage failed; nothing is
/// emitted on failure.
///
/// # Examples
///
/// ```
/// let out = jport_core::transpile("class A { int x = 1; }").unwrap();
/// assert!(out.contains("internal class A"));
/// assert!(out.contains("internal int x = 1;"));
/// ```
pub fn transpile(source: &str) -> Result<String, Error> {
    let file = parse(source)?;
    Ok(emit::emit_file(source, &file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Member;

    #[test]
    fn nested_class_declarations_parse_recursively() {
        let file = parse("class A { class B { void m() {} } }").unwrap();
        assert_eq!(file.classes.len(), 1);
        let a = &file.classes[0];
        assert_eq!(a.name.text, "A");
        let Member::NestedClass(b) = &a.members[0] else {
            panic!("expected nested class");
        };
        assert_eq!(b.name.text, "B");
        assert!(matches!(b.members[0], Member::Method(_)));
    }

    #[test]
    fn anonymous_field_initializer_round_trip() {
        let source = "class A { B x = new B() { void m() { } }; } class B { void m() {} }";
        let file = parse(source).unwrap();
        let Member::Field(field) = &file.classes[0].members[0] else {
            panic!("expected field");
        };
        let init = field.declarators[0].initializer.as_ref().unwrap();
        assert_eq!(init.anonymous_classes.len(), 1);
        assert_eq!(init.anonymous_classes[0].base.simple, "B");

        let out = transpile(source).unwrap();
        assert!(out.contains("private class BImpl1 : B"));
        assert!(out.contains("new BImpl1()"));
    }

    #[test]
    fn blocks_inside_bodies_never_look_like_members() {
        // The `if` block inside m's body must stay opaque; `int hidden;`
        // inside it is not a member of A
        let source = "class A { void m() { if (x) { int hidden; } } int real; }";
        let file = parse(source).unwrap();
        assert_eq!(file.classes[0].members.len(), 2);
        assert!(matches!(file.classes[0].members[0], Member::Method(_)));
        let Member::Field(field) = &file.classes[0].members[1] else {
            panic!("expected field");
        };
        assert_eq!(field.declarators[0].name.text, "real");
    }

    #[test]
    fn unbalanced_brace_aborts_with_its_position() {
        let source = "class A { { }";
        let err = parse(source).unwrap_err();
        let Error::Group(group) = err else {
            panic!("expected group error");
        };
        assert_eq!(&source[group.span().as_range()], "{");
        assert_eq!(group.span().start(), 8);
    }

    #[test]
    fn lex_errors_abort_before_grouping() {
        assert!(matches!(transpile("class A { int x = `1; }"), Err(Error::Lex(_))));
    }

    #[test]
    fn whole_file_pipeline() {
        let source = "package demo; \
                      import java.util.List; \
                      public class Repo { \
                        private final List items = null; \
                        public Repo(List items) { this.items = items; } \
                        public int size() { return items.size(); } \
                      }";
        let out = transpile(source).unwrap();
        assert!(out.starts_with("namespace demo"));
        assert!(out.contains("public class Repo"));
        assert!(out.contains("private readonly List items = null;"));
        assert!(out.contains("public Repo(List items) { this.items = items; }"));
        assert!(out.contains("public int size() { return items.size(); }"));
    }
}
