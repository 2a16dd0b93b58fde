//! Canonical signature rendering.
//!
//! Maps the recursive type-expression grammar to flat declaration text.
//! Rendering is total: every variant produces a finite, deterministic
//! string, and `Unknown` degrades to empty text with a diagnostic instead
//! of failing.
//!
//! The exact punctuation rules here are the output format. Parameters are
//! always parenthesized; a single result is appended bare after one space;
//! two or more results are parenthesized and comma-joined. Interface bodies
//! are tab-indented, one method per line, except the empty `interface{}`.

use crate::ast::{FieldId, Signature, SourceUnit, TypeExpr, TypeId};
use crate::error::{Diag, DiagKind};

/// Renders type expressions and fields of one source unit.
///
/// Accumulates a [`Diag`] per `Unknown` shape encountered; rendering never
/// fails.
pub struct Renderer<'u> {
    unit: &'u SourceUnit,
    diags: Vec<Diag>,
}

impl<'u> Renderer<'u> {
    pub fn new(unit: &'u SourceUnit) -> Self {
        Self {
            unit,
            diags: Vec::new(),
        }
    }

    /// Drains the unknown-shape diagnostics collected so far.
    pub fn take_diags(&mut self) -> Vec<Diag> {
        std::mem::take(&mut self.diags)
    }

    /// Renders one type expression to canonical text. Total and pure apart
    /// from the unknown-shape diagnostic side effect.
    pub fn render_type(&mut self, id: TypeId) -> String {
        match &self.unit.arena.get_type(id).node {
            TypeExpr::Named(sym) => self.unit.resolve(*sym).to_string(),
            TypeExpr::Slice(elem) => format!("[]{}", self.render_named(*elem)),
            TypeExpr::Variadic(elem) => format!("...{}", self.render_named(*elem)),
            TypeExpr::Map { key, value } => {
                format!(
                    "map[{}]{}",
                    self.render_named(*key),
                    self.render_named(*value)
                )
            }
            TypeExpr::Pointer(referent) => format!("*{}", self.render_named(*referent)),
            TypeExpr::Chan { dir, elem } => {
                use crate::ast::ChanDir;
                let elem = self.render_named(*elem);
                match dir {
                    ChanDir::Send => format!("chan<- {elem}"),
                    ChanDir::Recv => format!("<-chan {elem}"),
                    ChanDir::Both => format!("chan {elem}"),
                }
            }
            TypeExpr::Func(sig) => {
                let sig = sig.clone();
                self.render_signature(&sig)
            }
            TypeExpr::Interface { methods } => {
                let methods = methods.clone();
                self.render_interface(&methods)
            }
            TypeExpr::Unknown => {
                self.note_unknown(id);
                String::new()
            }
        }
    }

    /// Renders a type restricted to the `Named` shape; anything else is
    /// empty text (map keys/values, pointer referents, channel and slice
    /// elements are not rendered as composites).
    pub fn render_named(&mut self, id: TypeId) -> String {
        match &self.unit.arena.get_type(id).node {
            TypeExpr::Named(sym) => self.unit.resolve(*sym).to_string(),
            TypeExpr::Unknown => {
                self.note_unknown(id);
                String::new()
            }
            _ => String::new(),
        }
    }

    /// Renders `(p1, p2, …)` plus nothing, ` r`, or ` (r1, r2, …)`
    /// depending on result arity. Shared by function types and
    /// function/method declarations.
    pub fn render_signature(&mut self, sig: &Signature) -> String {
        let params: Vec<String> = sig.params.iter().map(|&f| self.render_field(f)).collect();
        let results: Vec<String> = sig.results.iter().map(|&f| self.render_field(f)).collect();

        let mut text = format!("({})", params.join(", "));
        match results.len() {
            0 => {}
            1 => {
                text.push(' ');
                text.push_str(&results[0]);
            }
            _ => {
                text.push_str(&format!(" ({})", results.join(", ")));
            }
        }
        text
    }

    /// Renders a field as `name type`, `type`, or `name`.
    ///
    /// A func-typed field renders as `name(sig)` with no separating space,
    /// matching method and func-valued member syntax.
    pub fn render_field(&mut self, id: FieldId) -> String {
        let field = self.unit.arena.get_field(id).node.clone();
        let name = field
            .name
            .map(|n| self.unit.resolve(n.sym).to_string())
            .unwrap_or_default();

        let typ = match field.typ {
            None => String::new(),
            Some(t) => {
                if let TypeExpr::Func(sig) = &self.unit.arena.get_type(t).node {
                    let sig = sig.clone();
                    return format!("{name}{}", self.render_signature(&sig));
                }
                self.render_type(t)
            }
        };

        if name.is_empty() {
            typ
        } else if typ.is_empty() {
            name
        } else {
            format!("{name} {typ}")
        }
    }

    /// Renders `interface{}` for an empty method set, otherwise a
    /// tab-indented body with one method per line.
    pub fn render_interface(&mut self, methods: &[FieldId]) -> String {
        if methods.is_empty() {
            return "interface{}".to_string();
        }
        let rendered: Vec<String> = methods.iter().map(|&f| self.render_field(f)).collect();
        format!("interface {{\n\t{}\n}}", rendered.join("\n\t"))
    }

    fn note_unknown(&mut self, id: TypeId) {
        let span = self.unit.arena.get_type(id).span;
        log::debug!(
            "unhandled type expression shape at {}",
            self.unit.position(span)
        );
        self.diags.push(Diag::new(
            DiagKind::Render,
            span.range(),
            "unhandled type expression shape",
        ));
    }
}
