// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree definitions for the Java member-declaration subset.
//!
//! The AST is a tagged-variant tree: one enum variant per member construct
//! kind, enabling exhaustive matching in the emitter and compile-time
//! detection of unhandled node kinds.
//!
//! # Invariants
//!
//! - Every node corresponds to exactly one contiguous span of the original
//!   token stream; spans of sibling nodes are disjoint and ordered.
//! - Each node owns its children exclusively; the tree is acyclic.
//! - Nodes are constructed in a single top-down pass by the construct
//!   matchers and never revised after the dispatcher accepts them.
//! - [`AnonymousClassExpr`] carries the *name* of the base class it extends;
//!   resolution happens at emission time, not during parsing.
//!
//! Method and initializer bodies are opaque: an [`OpaqueBody`] records the
//! interior span for byte-exact re-emission plus any anonymous-class
//! expressions discovered inside it. The full statement grammar is out of
//! scope.

use ecow::EcoString;

use crate::source_analysis::Span;

/// An identifier with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// The identifier text.
    pub text: EcoString,
    /// Source location.
    pub span: Span,
}

impl Name {
    /// Creates a new name.
    #[must_use]
    pub fn new(text: impl Into<EcoString>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// A type reference as written in source.
///
/// Only the simple name is extracted during parsing (it is all the lowering
/// needs); the full source text, including qualifiers, generic arguments and
/// array dimensions, is recovered from `span` at emission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// The rightmost plain identifier (or primitive keyword) of the type:
    /// `Entry` for `Map.Entry<K, V>`, `int` for `int[]`.
    pub simple: EcoString,
    /// Span of the whole type as written.
    pub span: Span,
}

impl TypeName {
    /// Creates a new type name.
    #[must_use]
    pub fn new(simple: impl Into<EcoString>, span: Span) -> Self {
        Self {
            simple: simple.into(),
            span,
        }
    }

    /// Returns `true` if the written form is qualified (`a.b.C`).
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        // A qualified type's span covers more than the simple name alone
        // only when dots are involved; the matcher records the simple name
        // of the last segment, so compare lengths conservatively.
        self.span.len() as usize > self.simple.len() && self.simple.chars().all(|c| c != '.')
    }
}

/// The modifier run preceding a member: keywords in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Modifier keywords as written, in order.
    pub keywords: Vec<Name>,
}

impl Modifiers {
    /// Returns `true` if the given modifier keyword is present.
    #[must_use]
    pub fn has(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.text == keyword)
    }

    /// Returns `true` if no modifiers were written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// An annotation: `@Name` optionally followed by an argument group.
///
/// Annotations are consumed so the matchers never stumble over them, and
/// recorded for fidelity, but they are not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// The annotation's type name.
    pub name: Name,
    /// Span of the `(...)` argument group, if present.
    pub args_span: Option<Span>,
    /// Span of the whole annotation.
    pub span: Span,
}

/// A single source file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDecl {
    /// The `package a.b.c;` declaration, if present: dotted path text.
    pub package: Option<(EcoString, Span)>,
    /// All `import` declarations, in order.
    pub imports: Vec<ImportDecl>,
    /// Top-level class declarations, in order.
    pub classes: Vec<ClassDecl>,
    /// Span of the whole file's parsed content.
    pub span: Span,
}

/// An `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// The dotted path as written, without `import`/`;` (e.g. `java.util.List`
    /// or `java.util.*`).
    pub path: EcoString,
    /// The simple name this import introduces, `None` for wildcard imports.
    pub simple: Option<EcoString>,
    /// Whether this is an `import static`.
    pub is_static: bool,
    /// Source location.
    pub span: Span,
}

/// A class declaration (top-level or nested; the grammar is identical).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Modifier run.
    pub modifiers: Modifiers,
    /// Annotations preceding the declaration.
    pub annotations: Vec<Annotation>,
    /// The class name.
    pub name: Name,
    /// Span of the `<...>` type-parameter list, if present.
    pub type_params_span: Option<Span>,
    /// The `extends` clause, if present.
    pub extends: Option<TypeName>,
    /// The `implements` clause types, in order.
    pub implements: Vec<TypeName>,
    /// The class body members, in source order.
    pub members: Vec<Member>,
    /// Span of the whole declaration.
    pub span: Span,
}

/// A class member. One variant per construct matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// A field declaration (possibly multiple declarators).
    Field(FieldDecl),
    /// A method declaration.
    Method(MethodDecl),
    /// A constructor declaration.
    Constructor(ConstructorDecl),
    /// A nested (member) class declaration.
    NestedClass(ClassDecl),
    /// A `static { … }` initializer block.
    StaticInitializer(InitializerDecl),
    /// A bare `{ … }` instance initializer block.
    InstanceInitializer(InitializerDecl),
}

impl Member {
    /// Returns the span of this member.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Field(field) => field.span,
            Self::Method(method) => method.span,
            Self::Constructor(ctor) => ctor.span,
            Self::NestedClass(class) => class.span,
            Self::StaticInitializer(init) | Self::InstanceInitializer(init) => init.span,
        }
    }
}

/// A field declaration: modifiers, type, one or more declarators, `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Modifier run.
    pub modifiers: Modifiers,
    /// Annotations preceding the declaration.
    pub annotations: Vec<Annotation>,
    /// The declared type.
    pub ty: TypeName,
    /// The declarators (`x`, `y = 1`, …), at least one.
    pub declarators: Vec<FieldDeclarator>,
    /// Span of the whole declaration including `;`.
    pub span: Span,
}

/// One `name ( = initializer )?` unit of a field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclarator {
    /// The field name.
    pub name: Name,
    /// The initializer expression, if present.
    pub initializer: Option<Initializer>,
}

/// An opaque initializer expression: a token span, re-emitted byte-exact,
/// plus any anonymous-class expressions found inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Initializer {
    /// Span of the initializer tokens (after `=`, before `,` or `;`).
    pub span: Span,
    /// Anonymous classes appearing anywhere in the initializer.
    pub anonymous_classes: Vec<AnonymousClassExpr>,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Modifier run.
    pub modifiers: Modifiers,
    /// Annotations preceding the declaration.
    pub annotations: Vec<Annotation>,
    /// Span of the `<...>` type-parameter list, if present.
    pub type_params_span: Option<Span>,
    /// The return type (possibly `void`).
    pub return_type: TypeName,
    /// The method name.
    pub name: Name,
    /// The parameter list.
    pub parameters: Vec<Parameter>,
    /// The `throws` clause types, in order.
    pub throws: Vec<TypeName>,
    /// The body, or `None` for abstract/native methods (`;` terminated).
    pub body: Option<OpaqueBody>,
    /// Span of the whole declaration.
    pub span: Span,
}

/// A constructor declaration: like a method, but no return type and the
/// name matches the enclosing class.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    /// Modifier run.
    pub modifiers: Modifiers,
    /// Annotations preceding the declaration.
    pub annotations: Vec<Annotation>,
    /// The constructor name.
    pub name: Name,
    /// The parameter list.
    pub parameters: Vec<Parameter>,
    /// The `throws` clause types, in order.
    pub throws: Vec<TypeName>,
    /// The body.
    pub body: OpaqueBody,
    /// Span of the whole declaration.
    pub span: Span,
}

/// A static or instance initializer block.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializerDecl {
    /// The body.
    pub body: OpaqueBody,
    /// Span of the whole block (including `static` if present).
    pub span: Span,
}

/// A single method/constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Whether `final` was written.
    pub is_final: bool,
    /// The parameter type.
    pub ty: TypeName,
    /// Whether this is a `Type... name` varargs parameter.
    pub is_varargs: bool,
    /// The parameter name.
    pub name: Name,
    /// Span of the whole parameter.
    pub span: Span,
}

/// An opaque body: the interior of a `{ … }` group, never parsed as
/// statements, re-emitted byte-exact at code generation.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueBody {
    /// Span strictly between the braces.
    pub interior_span: Span,
    /// Anonymous classes appearing anywhere inside the body, in source
    /// order, excluding those nested inside another anonymous class's own
    /// members (these belong to that member's body).
    pub anonymous_classes: Vec<AnonymousClassExpr>,
}

/// An anonymous class expression: `new Base(args) { members }`.
///
/// Carries the base type by name; emission resolves the name and lowers the
/// expression to an instantiation of a synthesized named subclass.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousClassExpr {
    /// The base class or interface being extended/implemented.
    pub base: TypeName,
    /// Span of the constructor arguments (interior of the `(...)` group).
    pub args_span: Span,
    /// Anonymous classes appearing inside the constructor arguments
    /// themselves. Lowering rewrites the argument text recursively.
    pub argument_anons: Vec<AnonymousClassExpr>,
    /// The overriding members of the anonymous body.
    pub members: Vec<Member>,
    /// Span of the whole expression, `new` through closing `}`.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_queries() {
        let mods = Modifiers {
            keywords: vec![
                Name::new("public", Span::new(0, 6)),
                Name::new("static", Span::new(7, 13)),
            ],
        };
        assert!(mods.has("public"));
        assert!(mods.has("static"));
        assert!(!mods.has("final"));
        assert!(!mods.is_empty());
        assert!(Modifiers::default().is_empty());
    }

    #[test]
    fn type_name_qualification() {
        // `java.util.List` — span longer than the simple name
        let qualified = TypeName::new("List", Span::new(0, 14));
        assert!(qualified.is_qualified());

        let plain = TypeName::new("List", Span::new(0, 4));
        assert!(!plain.is_qualified());
    }

    #[test]
    fn member_spans() {
        let init = InitializerDecl {
            body: OpaqueBody {
                interior_span: Span::new(8, 10),
                anonymous_classes: Vec::new(),
            },
            span: Span::new(0, 11),
        };
        assert_eq!(Member::StaticInitializer(init.clone()).span(), init.span);
        assert_eq!(Member::InstanceInitializer(init.clone()).span(), init.span);
    }
}
