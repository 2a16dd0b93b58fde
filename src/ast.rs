//! Declaration AST for the fixed builtin unit.
//!
//! This module implements a flattened AST using arena allocation: type
//! expressions and fields live in typed arenas and are referenced via
//! type-safe indices, identifiers are interned as `Symbol`s, and source
//! locations are tracked as byte spans with a line index for
//! `file:line:column` reporting.
//!
//! The type-expression grammar is a closed variant set with an explicit
//! `Unknown` arm: every parsed type node outside the supported shapes is
//! routed there deliberately, never mishandled.

use std::collections::HashMap;

use la_arena::{Arena, Idx};
use smallvec::SmallVec;

// =============================================================================
// Core types, IDs and arena
// =============================================================================

/// Type-safe index into the type-expressions arena.
pub type TypeId = Idx<Spanned<TypeExpr>>;

/// Type-safe index into the fields arena.
pub type FieldId = Idx<Spanned<Field>>;

/// An interned string handle (compact identifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Source code location range (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset in source.
    pub start: u32,
    /// End byte offset in source (exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span from byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Wrapper that associates an AST node with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    /// The actual AST node.
    pub node: T,
    /// Source location of this node.
    pub span: Span,
}

/// Simple string interner (no external deps).
///
/// - `intern(&str) -> Symbol` deduplicates identifiers.
/// - `resolve(Symbol) -> &str` retrieves the original text.
#[derive(Debug, Default)]
pub struct Interner {
    map: HashMap<Box<str>, Symbol>,
    vec: Vec<Box<str>>,
}

impl Interner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let boxed: Box<str> = s.into();
        let sym = Symbol(self.vec.len() as u32);
        self.map.insert(boxed.clone(), sym);
        self.vec.push(boxed);
        sym
    }

    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.vec[sym.0 as usize]
    }
}

/// Identifier occurrence (interned symbol + source position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentName {
    pub sym: Symbol,
    pub pos: Span,
}

/// Central arena that owns all type-expression and field memory.
#[derive(Debug, Default, PartialEq)]
pub struct AstArena {
    /// All type-expression nodes.
    pub types: Arena<Spanned<TypeExpr>>,
    /// All field nodes (parameters, results, receivers, interface methods).
    pub fields: Arena<Spanned<Field>>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_type(&mut self, ty: TypeExpr, span: Span) -> TypeId {
        self.types.alloc(Spanned { node: ty, span })
    }

    pub fn alloc_field(&mut self, field: Field, span: Span) -> FieldId {
        self.fields.alloc(Spanned { node: field, span })
    }

    #[inline]
    pub fn get_type(&self, id: TypeId) -> &Spanned<TypeExpr> {
        &self.types[id]
    }

    #[inline]
    pub fn get_field(&self, id: FieldId) -> &Spanned<Field> {
        &self.fields[id]
    }
}

// =============================================================================
// Type expressions
// =============================================================================

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// Bidirectional channel (`chan T`).
    Both,
    /// Send-only channel (`chan<- T`).
    Send,
    /// Receive-only channel (`<-chan T`).
    Recv,
}

/// Function signature (parameters and results).
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// Input parameter fields, in declared order.
    pub params: Vec<FieldId>,
    /// Result fields, in declared order. Empty for no results.
    pub results: Vec<FieldId>,
}

/// Closed type-expression variant set.
///
/// Anything the parser cannot place in one of the supported shapes becomes
/// `Unknown`, which renders as empty text and surfaces a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Bare identifier (`int`, `Type1`).
    Named(Symbol),
    /// Slice type (`[]T`).
    Slice(TypeId),
    /// Variadic parameter type (`...T`).
    Variadic(TypeId),
    /// Map type (`map[K]V`).
    Map { key: TypeId, value: TypeId },
    /// Pointer type (`*T`).
    Pointer(TypeId),
    /// Channel type (`chan T`, `chan<- T`, `<-chan T`).
    Chan { dir: ChanDir, elem: TypeId },
    /// Function type (`func(...) ...`).
    Func(Signature),
    /// Interface type (`interface{}` or a method set).
    Interface { methods: Vec<FieldId> },
    /// Fallback for every shape outside the set above.
    Unknown,
}

/// An optional name paired with an optional type expression.
///
/// Used for function parameters, results, method receivers, and interface
/// method members. When a Go field list groups several names over one type
/// (`dst, src []Type`), the parser keeps only the last name; see
/// `parser::resolve_field_group`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Option<IdentName>,
    pub typ: Option<TypeId>,
}

// =============================================================================
// Declarations
// =============================================================================

/// Constant-initializer expression, restricted to the shapes the value
/// matcher can render: literals and one two-operand binary expression.
#[derive(Debug, Clone, PartialEq)]
pub enum InitExpr {
    /// Basic literal (int, float, string, rune), verbatim source text.
    Lit(Symbol),
    /// Bare identifier (`iota`, `true`). Not rendered by the value matcher.
    Ident(Symbol),
    /// Two-operand binary expression.
    Binary {
        op: Symbol,
        lhs: Box<InitExpr>,
        rhs: Box<InitExpr>,
    },
    /// Anything else; silently omitted from declaration text.
    Opaque,
}

/// Whether a value group binds constants or variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Const,
    Var,
}

impl ValueKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            ValueKind::Const => "const",
            ValueKind::Var => "var",
        }
    }
}

/// One member of a const/var group: a name list over one shared optional
/// type and one shared initializer list.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    /// Bound names, each with its own source position.
    pub names: SmallVec<[IdentName; 2]>,
    /// Shared optional type annotation.
    pub typ: Option<TypeId>,
    /// Shared initializer expressions.
    pub values: SmallVec<[InitExpr; 2]>,
    /// Normalized doc text attached to this spec, if any.
    pub doc: Option<String>,
}

/// One member of a type group.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: IdentName,
    /// Alias-style binding (`type T = U`) vs definition (`type T U`).
    pub alias: bool,
    pub typ: Option<TypeId>,
    pub doc: Option<String>,
}

/// Function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: IdentName,
    /// Receiver fields; non-empty makes this a method.
    pub recv: Vec<FieldId>,
    pub signature: Signature,
    pub doc: Option<String>,
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `const (...)` or `var (...)` group (or single spec).
    Value {
        kind: ValueKind,
        /// Doc text attached to the group keyword, if any.
        doc: Option<String>,
        specs: Vec<ValueSpec>,
    },
    /// `type (...)` group (or single spec).
    Type {
        doc: Option<String>,
        specs: Vec<TypeSpec>,
    },
    Func(FuncDecl),
}

// =============================================================================
// Source unit
// =============================================================================

/// Parsed representation of one compilation unit.
///
/// Owned by the loader for the lifetime of one resolution; the resolver
/// borrows it read-only.
#[derive(Debug)]
pub struct SourceUnit {
    /// Package identifier from the `package` clause.
    pub package_name: Symbol,
    /// File name used in reported positions.
    pub file_name: String,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
    /// Node storage.
    pub arena: AstArena,
    /// Identifier storage.
    pub interner: Interner,
    /// Line index over the unit's source.
    pub lines: LineIndex,
}

impl SourceUnit {
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Formats a span start as `file:line:column`, 1-based.
    pub fn position(&self, span: Span) -> String {
        let (line, col) = self.lines.line_col(span.start);
        format!("{}:{}:{}", self.file_name, line, col)
    }
}

/// Byte offset → 1-based line/column mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of each line.
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in src.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { line_starts }
    }

    /// Returns the 1-based `(line, column)` of a byte offset. Columns are
    /// byte-based, matching `go/token.Position`.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line as u32 + 1, offset - self.line_starts[line] + 1)
    }

    /// Returns the 1-based line of a byte offset.
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        self.line_col(offset).0
    }
}
