// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! C# emission.
//!
//! Declarations are regenerated from the AST; bodies and initializers are
//! re-emitted byte-exact from their source spans, with anonymous-class
//! expressions substituted in place. Each anonymous class becomes a
//! synthesized private nested class `<Base>Impl<N>` hoisted onto the
//! enclosing class before its own members, and the original expression
//! becomes an instantiation of the synthesized name; `N` counts
//! occurrences of each base per file, in source order, starting at 1.
//!
//! Translation decisions:
//! - `package` → `namespace` block; imports are not emitted (they feed base
//!   resolution only).
//! - `final` field → `readonly`, `final` class → `sealed`, `final` method
//!   dropped; package-private → `internal`; `volatile` carried;
//!   `native`/`synchronized`/`transient`/`strictfp` dropped; `throws`
//!   clauses dropped; annotations dropped.
//! - `boolean` → `bool`, `byte` → `sbyte`; other types carried verbatim.
//! - Type-parameter lists carry over; `extends` bounds become trailing
//!   `where` clauses, with `&`-joined bounds as a comma list.
//! - Static initializer blocks merge into one static constructor; each
//!   instance initializer becomes a private `__init<N>()` method.

pub mod document;

use std::collections::{HashMap, HashSet};

use ecow::EcoString;

use crate::ast::{
    AnonymousClassExpr, ClassDecl, FileDecl, Member, Modifiers, Name, OpaqueBody, TypeName,
};
use crate::docvec;
use crate::source_analysis::Span;

use self::document::{concat, join, line, nest, Document, INDENT};
use super::EmitError;

/// Emits a parsed file as C# text.
///
/// # Errors
///
/// Returns [`EmitError::UnresolvedBase`] when an anonymous class extends a
/// type that cannot be resolved from the file. Nothing is emitted on error.
pub fn emit_file(source: &str, file: &FileDecl) -> Result<String, EmitError> {
    let mut emitter = Emitter::new(source, file);
    let doc = emitter.file_document(file)?;
    Ok(doc.to_pretty_string())
}

/// Where a class declaration sits, which decides its default visibility.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Placement {
    TopLevel,
    Nested,
    Synthesized,
}

struct Emitter<'a> {
    source: &'a str,
    /// Class names declared anywhere in the file.
    declared: HashSet<EcoString>,
    /// Simple names introduced by non-wildcard imports.
    imported: HashSet<EcoString>,
    /// Synthesized-name counters, per base simple name.
    synth_counts: HashMap<EcoString, usize>,
}

impl<'a> Emitter<'a> {
    fn new(source: &'a str, file: &FileDecl) -> Self {
        let mut declared = HashSet::new();
        for class in &file.classes {
            collect_declared(class, &mut declared);
        }
        let imported = file
            .imports
            .iter()
            .filter_map(|import| import.simple.clone())
            .collect();
        Self {
            source,
            declared,
            imported,
            synth_counts: HashMap::new(),
        }
    }

    fn file_document(&mut self, file: &FileDecl) -> Result<Document<'a>, EmitError> {
        let mut class_docs = Vec::new();
        for class in &file.classes {
            class_docs.push(self.class_document(class, Placement::TopLevel)?);
        }
        let classes = join(class_docs, &concat([line(), line()]));
        let doc = match &file.package {
            Some((path, _)) => docvec![
                "namespace ",
                path.to_string(),
                line(),
                "{",
                nest(INDENT, docvec![line(), classes]),
                line(),
                "}",
                line(),
            ],
            None => docvec![classes, line()],
        };
        Ok(doc)
    }

    fn class_document(
        &mut self,
        class: &ClassDecl,
        placement: Placement,
    ) -> Result<Document<'a>, EmitError> {
        let mut synthesized: Vec<Document<'a>> = Vec::new();
        let mut static_blocks: Vec<String> = Vec::new();
        let mut member_docs: Vec<Document<'a>> = Vec::new();
        let mut init_index = 0usize;

        for member in &class.members {
            match member {
                Member::StaticInitializer(init) => {
                    static_blocks.push(self.lower_span(
                        init.body.interior_span,
                        &init.body.anonymous_classes,
                        &mut synthesized,
                    )?);
                }
                Member::Field(field) => {
                    let mut sig = String::new();
                    sig.push_str(visibility(&field.modifiers));
                    if field.modifiers.has("static") {
                        sig.push_str("static ");
                    }
                    if field.modifiers.has("final") {
                        sig.push_str("readonly ");
                    }
                    if field.modifiers.has("volatile") {
                        sig.push_str("volatile ");
                    }
                    sig.push_str(&map_type_text(self.span_text(field.ty.span)));
                    sig.push(' ');
                    let mut first = true;
                    for declarator in &field.declarators {
                        if !first {
                            sig.push_str(", ");
                        }
                        first = false;
                        sig.push_str(&declarator.name.text);
                        if let Some(init) = &declarator.initializer {
                            sig.push_str(" = ");
                            sig.push_str(&self.lower_span(
                                init.span,
                                &init.anonymous_classes,
                                &mut synthesized,
                            )?);
                        }
                    }
                    sig.push(';');
                    member_docs.push(Document::String(sig));
                }
                Member::Method(method) => {
                    let mut sig = String::new();
                    sig.push_str(visibility(&method.modifiers));
                    if method.modifiers.has("static") {
                        sig.push_str("static ");
                    }
                    if method.modifiers.has("abstract") {
                        sig.push_str("abstract ");
                    }
                    sig.push_str(&map_type_text(self.span_text(method.return_type.span)));
                    sig.push(' ');
                    sig.push_str(&method.name.text);
                    let mut where_clause = String::new();
                    if let Some(span) = method.type_params_span {
                        let (params, wheres) = generic_parameters(self.span_text(span));
                        sig.push_str(&params);
                        where_clause = wheres;
                    }
                    sig.push('(');
                    sig.push_str(&self.parameters_text(&method.parameters));
                    sig.push(')');
                    sig.push_str(&where_clause);
                    member_docs.push(self.with_body(sig, method.body.as_ref(), &mut synthesized)?);
                }
                Member::Constructor(ctor) => {
                    let mut sig = String::new();
                    sig.push_str(visibility(&ctor.modifiers));
                    sig.push_str(&ctor.name.text);
                    sig.push('(');
                    sig.push_str(&self.parameters_text(&ctor.parameters));
                    sig.push(')');
                    member_docs.push(self.with_body(sig, Some(&ctor.body), &mut synthesized)?);
                }
                Member::NestedClass(nested) => {
                    member_docs.push(self.class_document(nested, Placement::Nested)?);
                }
                Member::InstanceInitializer(init) => {
                    let sig = format!("private void __init{init_index}()");
                    init_index += 1;
                    member_docs.push(self.with_body(sig, Some(&init.body), &mut synthesized)?);
                }
            }
        }

        let mut items = synthesized;
        if !static_blocks.is_empty() {
            items.push(Document::String(format!(
                "static {}() {{{}}}",
                class.name.text,
                static_blocks.concat()
            )));
        }
        items.extend(member_docs);

        let header = self.class_header(class, placement);
        let doc = if items.is_empty() {
            docvec![header, line(), "{", line(), "}"]
        } else {
            docvec![
                header,
                line(),
                "{",
                nest(
                    INDENT,
                    docvec![line(), join(items, &concat([line(), line()]))]
                ),
                line(),
                "}",
            ]
        };
        Ok(doc)
    }

    fn class_header(&self, class: &ClassDecl, placement: Placement) -> Document<'a> {
        let mut header = String::new();
        match placement {
            Placement::Synthesized => header.push_str("private "),
            Placement::TopLevel | Placement::Nested => {
                header.push_str(visibility(&class.modifiers));
            }
        }
        if class.modifiers.has("abstract") {
            header.push_str("abstract ");
        }
        if class.modifiers.has("final") {
            header.push_str("sealed ");
        }
        header.push_str("class ");
        header.push_str(&class.name.text);
        let mut where_clause = String::new();
        if let Some(span) = class.type_params_span {
            let (params, wheres) = generic_parameters(self.span_text(span));
            header.push_str(&params);
            where_clause = wheres;
        }
        let mut bases: Vec<&str> = Vec::new();
        if let Some(extends) = &class.extends {
            bases.push(self.span_text(extends.span));
        }
        for implemented in &class.implements {
            bases.push(self.span_text(implemented.span));
        }
        if !bases.is_empty() {
            header.push_str(" : ");
            header.push_str(&bases.join(", "));
        }
        header.push_str(&where_clause);
        Document::String(header)
    }

    /// Appends a verbatim body (or `;` for bodyless declarations) to a
    /// signature.
    fn with_body(
        &mut self,
        signature: String,
        body: Option<&OpaqueBody>,
        synthesized: &mut Vec<Document<'a>>,
    ) -> Result<Document<'a>, EmitError> {
        match body {
            Some(body) => {
                let interior =
                    self.lower_span(body.interior_span, &body.anonymous_classes, synthesized)?;
                Ok(Document::String(format!("{signature} {{{interior}}}")))
            }
            None => Ok(Document::String(format!("{signature};"))),
        }
    }

    fn parameters_text(&self, parameters: &[crate::ast::Parameter]) -> String {
        let mut out = String::new();
        let mut first = true;
        for parameter in parameters {
            if !first {
                out.push_str(", ");
            }
            first = false;
            let ty = map_type_text(self.span_text(parameter.ty.span));
            if parameter.is_varargs {
                out.push_str("params ");
                out.push_str(&ty);
                out.push_str("[] ");
            } else {
                out.push_str(&ty);
                out.push(' ');
            }
            out.push_str(&parameter.name.text);
        }
        out
    }

    /// Re-emits a source span with every anonymous-class expression inside
    /// it replaced by an instantiation of its synthesized class.
    fn lower_span(
        &mut self,
        span: Span,
        anons: &[AnonymousClassExpr],
        synthesized: &mut Vec<Document<'a>>,
    ) -> Result<String, EmitError> {
        if anons.is_empty() {
            return Ok(self.span_text(span).to_string());
        }
        let mut out = String::new();
        let mut cursor = span.start() as usize;
        for anon in anons {
            out.push_str(&self.source[cursor..anon.span.start() as usize]);
            out.push_str(&self.lower_anon(anon, synthesized)?);
            cursor = anon.span.end() as usize;
        }
        out.push_str(&self.source[cursor..span.end() as usize]);
        Ok(out)
    }

    fn lower_anon(
        &mut self,
        anon: &AnonymousClassExpr,
        synthesized: &mut Vec<Document<'a>>,
    ) -> Result<String, EmitError> {
        self.check_base(&anon.base)?;
        let count = self.synth_counts.entry(anon.base.simple.clone()).or_insert(0);
        *count += 1;
        let synth_name = format!("{}Impl{}", anon.base.simple, count);

        // Reserve the slot first so hoisting order follows source order of
        // the `new` expressions even when the arguments contain more anons
        let slot = synthesized.len();
        synthesized.push(document::nil());

        let args = self.lower_span(anon.args_span, &anon.argument_anons, synthesized)?;
        let synth_class = ClassDecl {
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            name: Name::new(synth_name.clone(), anon.base.span),
            type_params_span: None,
            extends: Some(anon.base.clone()),
            implements: Vec::new(),
            members: anon.members.clone(),
            span: anon.span,
        };
        synthesized[slot] = self.class_document(&synth_class, Placement::Synthesized)?;

        Ok(format!("new {synth_name}({args})"))
    }

    /// Base references resolve against classes declared in the file,
    /// names introduced by explicit imports, and qualified names. Wildcard
    /// imports introduce no names.
    fn check_base(&self, base: &TypeName) -> Result<(), EmitError> {
        let written = self.span_text(base.span);
        let path = written.split('<').next().unwrap_or(written);
        if path.contains('.')
            || self.declared.contains(&base.simple)
            || self.imported.contains(&base.simple)
        {
            Ok(())
        } else {
            Err(EmitError::UnresolvedBase {
                name: base.simple.clone(),
                span: base.span,
            })
        }
    }

    fn span_text(&self, span: Span) -> &'a str {
        &self.source[span.as_range()]
    }
}

fn collect_declared(class: &ClassDecl, declared: &mut HashSet<EcoString>) {
    declared.insert(class.name.text.clone());
    for member in &class.members {
        if let Member::NestedClass(nested) = member {
            collect_declared(nested, declared);
        }
    }
}

fn visibility(modifiers: &Modifiers) -> &'static str {
    if modifiers.has("public") {
        "public "
    } else if modifiers.has("protected") {
        "protected "
    } else if modifiers.has("private") {
        "private "
    } else {
        "internal "
    }
}

/// Converts a written `<...>` type-parameter list to its C# spelling:
/// the bare parameter names, and the `extends` bounds collected into a
/// trailing `where` clause string (empty when no parameter has bounds).
fn generic_parameters(text: &str) -> (String, String) {
    let interior = &text[1..text.len() - 1];
    let mut names: Vec<&str> = Vec::new();
    let mut wheres = String::new();
    for segment in split_top_level(interior, ',') {
        match split_on_extends(segment) {
            Some((name, bounds)) => {
                let name = name.trim();
                names.push(name);
                let bounds: Vec<&str> =
                    split_top_level(bounds, '&').into_iter().map(str::trim).collect();
                wheres.push_str(&format!(" where {name} : {}", bounds.join(", ")));
            }
            None => names.push(segment.trim()),
        }
    }
    (format!("<{}>", names.join(", ")), wheres)
}

/// Splits at separator characters outside any nested `<...>`.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Splits one type-parameter segment at its `extends` keyword, if it has
/// one at nesting depth zero (a wildcard's `extends` is always nested).
fn split_on_extends(segment: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in segment.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            'e' if depth == 0 && segment[i..].starts_with("extends") => {
                let before = segment[..i].chars().next_back();
                let after = segment[i + "extends".len()..].chars().next();
                if before.map_or(false, char::is_whitespace)
                    && after.map_or(false, char::is_whitespace)
                {
                    return Some((&segment[..i], &segment[i + "extends".len()..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Maps the leading primitive of a written type to its C# spelling.
fn map_type_text(text: &str) -> String {
    for (java, cs) in [("boolean", "bool"), ("byte", "sbyte")] {
        if let Some(rest) = text.strip_prefix(java) {
            let standalone = rest
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric() && c != '_');
            if standalone {
                return format!("{cs}{rest}");
            }
        }
    }
    text.to_string()
}
