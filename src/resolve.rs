//! Symbol resolution over the fixed unit's declarations.
//!
//! Walks top-level declarations in source order, applies the matcher for
//! each declaration kind, and returns the first documentation record
//! produced. Absence of the requested name is a normal outcome, not an
//! error; the only diagnostics come from rendering unknown type shapes.

use crate::ast::{
    Decl, FuncDecl, InitExpr, SourceUnit, TypeExpr, TypeSpec, ValueKind, ValueSpec,
};
use crate::error::Diag;
use crate::render::Renderer;

/// The resolver's output: one resolved built-in symbol.
///
/// Constructed once per successful match and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRecord {
    /// The resolved symbol's identifier.
    pub name: String,
    /// Canonical rendered declaration signature.
    pub decl: String,
    /// Associated doc comment, verbatim paragraph text; empty if none.
    pub doc: String,
    /// Source location as `file:line:column`; empty if unavailable.
    pub pos: String,
    /// Identifier of the compilation unit this record came from.
    pub unit_name: String,
    /// Module the unit belongs to; fixed to the same identifier.
    pub module_name: String,
}

/// Resolves symbol names against one parsed [`SourceUnit`].
///
/// Borrows the unit read-only for the lifetime of one resolution; the unit
/// is never mutated or retained.
pub struct Resolver<'u> {
    unit: &'u SourceUnit,
    renderer: Renderer<'u>,
}

impl<'u> Resolver<'u> {
    pub fn new(unit: &'u SourceUnit) -> Self {
        Self {
            unit,
            renderer: Renderer::new(unit),
        }
    }

    /// Returns the first declaration (in source order) binding `name`, or
    /// `None` when the unit declares no such symbol.
    pub fn resolve(&mut self, name: &str) -> Option<DocRecord> {
        // Decls are iterated off the copied unit reference, not through
        // self, so the matchers can take &mut self for rendering.
        let unit: &'u SourceUnit = self.unit;
        for decl in &unit.decls {
            let record = match decl {
                Decl::Value { kind, doc, specs } => specs
                    .iter()
                    .find_map(|spec| self.match_value_spec(name, *kind, doc.as_deref(), spec)),
                Decl::Type { doc, specs } => specs
                    .iter()
                    .find_map(|spec| self.match_type_spec(name, doc.as_deref(), spec)),
                Decl::Func(func) => self.match_func_decl(name, func),
            };
            if record.is_some() {
                return record;
            }
        }
        None
    }

    /// Drains unknown-shape diagnostics accumulated while rendering.
    pub fn take_diags(&mut self) -> Vec<Diag> {
        self.renderer.take_diags()
    }

    fn record(&self, name: &str, decl: String, doc: Option<&str>, pos: String) -> DocRecord {
        let unit_name = self.unit.resolve(self.unit.package_name).to_string();
        DocRecord {
            name: name.to_string(),
            decl,
            doc: doc.unwrap_or_default().to_string(),
            pos,
            module_name: unit_name.clone(),
            unit_name,
        }
    }

    // =========================================================================
    // Matchers
    // =========================================================================

    /// Constant/variable matcher.
    ///
    /// When a group member binds several names over one shared type and
    /// initializer list, the matched name is rendered against the whole
    /// shared payload, even though the initializers were written
    /// positionally. That inaccuracy is deliberate; see the
    /// `grouped_binding_*` tests.
    fn match_value_spec(
        &mut self,
        name: &str,
        kind: ValueKind,
        group_doc: Option<&str>,
        spec: &ValueSpec,
    ) -> Option<DocRecord> {
        let matched = spec
            .names
            .iter()
            .find(|n| self.unit.resolve(n.sym) == name)?;

        let typ = spec.typ.and_then(|t| match &self.unit.arena.get_type(t).node {
            TypeExpr::Named(sym) => Some(self.unit.resolve(*sym).to_string()),
            _ => None,
        });

        let values: Vec<String> = spec
            .values
            .iter()
            .filter_map(|v| self.render_init(v))
            .collect();

        let mut decl = format!("{} {}", kind.keyword(), name);
        if let Some(typ) = typ {
            decl.push(' ');
            decl.push_str(&typ);
        }
        if !values.is_empty() {
            decl.push_str(" = ");
            decl.push_str(&values.join(", "));
        }

        let doc = spec.doc.as_deref().or(group_doc);
        let pos = self.unit.position(matched.pos);
        Some(self.record(name, decl, doc, pos))
    }

    /// Renders an initializer: literals and literal-headed binary
    /// expressions only; everything else is silently omitted.
    ///
    /// A binary expression renders its left operand on *both* sides of the
    /// operator. Consumers have come to rely on this output; it is pinned
    /// by `binary_initializer_repeats_left_operand`. Do not fix without a
    /// product decision.
    fn render_init(&self, expr: &InitExpr) -> Option<String> {
        match expr {
            InitExpr::Lit(sym) => Some(self.unit.resolve(*sym).to_string()),
            InitExpr::Binary { op, lhs, .. } => match lhs.as_ref() {
                InitExpr::Lit(l) => {
                    let l = self.unit.resolve(*l);
                    let op = self.unit.resolve(*op);
                    Some(format!("{l} {op} {l}"))
                }
                _ => None,
            },
            InitExpr::Ident(_) | InitExpr::Opaque => None,
        }
    }

    /// Type matcher. The underlying type joins the declaration text only
    /// when it is a named type or an interface; other shapes drop out.
    fn match_type_spec(
        &mut self,
        name: &str,
        group_doc: Option<&str>,
        spec: &TypeSpec,
    ) -> Option<DocRecord> {
        if self.unit.resolve(spec.name.sym) != name {
            return None;
        }

        let mut decl = format!("type {name}");
        let underlying = spec.typ.and_then(|t| match &self.unit.arena.get_type(t).node {
            TypeExpr::Named(sym) => Some(self.unit.resolve(*sym).to_string()),
            TypeExpr::Interface { methods } => {
                let methods = methods.clone();
                Some(self.renderer.render_interface(&methods))
            }
            _ => None,
        });
        if let Some(underlying) = underlying {
            decl.push_str(if spec.alias { " = " } else { " " });
            decl.push_str(&underlying);
        }

        let doc = spec.doc.as_deref().or(group_doc);
        let pos = self.unit.position(spec.name.pos);
        Some(self.record(name, decl, doc, pos))
    }

    /// Function/method matcher.
    fn match_func_decl(&mut self, name: &str, func: &FuncDecl) -> Option<DocRecord> {
        if self.unit.resolve(func.name.sym) != name {
            return None;
        }

        let mut decl = String::from("func");
        if !func.recv.is_empty() {
            let recv: Vec<String> = func
                .recv
                .iter()
                .map(|&f| self.renderer.render_field(f))
                .collect();
            decl.push_str(&format!(" ({})", recv.join(", ")));
        }
        decl.push(' ');
        decl.push_str(name);
        decl.push_str(&self.renderer.render_signature(&func.signature));

        let pos = self.unit.position(func.name.pos);
        Some(self.record(name, decl, func.doc.as_deref(), pos))
    }
}
