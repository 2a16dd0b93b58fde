//! Parser for the declaration-only subset of Go that `builtin.go` uses.
//!
//! Top-level `const`/`var`/`type` groups and `func` declarations are parsed
//! in source order; function bodies (which the builtin unit never has) are
//! skipped balanced. Doc comments attach to a declaration or group member
//! when the comment group ends on the line immediately above it, mirroring
//! `go/parser`'s lead-comment rule.
//!
//! Type positions outside the supported variant set parse to
//! `TypeExpr::Unknown` with balanced skipping; that is a legal parse, not a
//! syntax error, and only surfaces a diagnostic when rendered.

use smallvec::SmallVec;

use crate::ast::{
    AstArena, ChanDir, Decl, Field, FieldId, FuncDecl, IdentName, InitExpr, Interner, LineIndex,
    Signature, SourceUnit, Span, TypeExpr, TypeId, TypeSpec, ValueKind, ValueSpec,
};
use crate::error::{Diag, DiagKind, LoadError};
use crate::lexer::{Lexer, Tok};

/// Parses one fixed-unit source into a [`SourceUnit`].
///
/// A missing package clause or any syntax error is fatal: the unit is
/// assumed always present and valid, so a failure here means the hosting
/// environment is broken and no partial record should be produced.
pub fn parse_unit(file_name: &str, src: &str) -> Result<SourceUnit, LoadError> {
    let mut lexer = Lexer::new(src);
    let mut toks = Vec::new();
    let mut comments = Vec::new();

    for (start, tok, end) in lexer.by_ref() {
        match tok {
            Tok::LineComment(text) | Tok::BlockComment(text) => comments.push(Comment {
                span: Span::new(start, end),
                text,
            }),
            _ => toks.push((start, tok, end)),
        }
    }

    let mut parser = Parser {
        file_name: file_name.to_string(),
        src,
        toks,
        comments,
        pos: 0,
        arena: AstArena::new(),
        interner: Interner::new(),
        lines: LineIndex::new(src),
        diags: lexer.take_diags(),
    };

    parser.parse()
}

/// One comment token, marker text included.
#[derive(Debug, Clone, Copy)]
struct Comment<'src> {
    span: Span,
    text: &'src str,
}

struct Parser<'src> {
    file_name: String,
    src: &'src str,
    toks: Vec<(usize, Tok<'src>, usize)>,
    comments: Vec<Comment<'src>>,
    pos: usize,
    arena: AstArena,
    interner: Interner,
    lines: LineIndex,
    diags: Vec<Diag>,
}

/// A comma-separated element of a parameter/result list, before name
/// grouping has been resolved.
struct FieldItem {
    names: Vec<IdentName>,
    typ: Option<TypeId>,
    span: Span,
}

impl<'src> Parser<'src> {
    // =========================================================================
    // Cursor helpers
    // =========================================================================

    #[inline]
    fn peek(&self) -> Option<Tok<'src>> {
        self.toks.get(self.pos).map(|&(_, t, _)| t)
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<Tok<'src>> {
        self.toks.get(self.pos + n).map(|&(_, t, _)| t)
    }

    #[inline]
    fn peek_start(&self) -> usize {
        self.toks
            .get(self.pos)
            .map(|&(s, _, _)| s)
            .unwrap_or(self.src.len())
    }

    #[inline]
    fn prev_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.toks[self.pos - 1].2
        }
    }

    #[inline]
    fn bump(&mut self) -> Option<(usize, Tok<'src>, usize)> {
        let tok = self.toks.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    #[inline]
    fn at(&self, tok: Tok<'_>) -> bool {
        self.peek() == Some(tok)
    }

    #[inline]
    fn eat(&mut self, tok: Tok<'_>) -> bool {
        if self.at(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Tok<'_>, what: &str) -> bool {
        if self.eat(tok) {
            return true;
        }
        let start = self.peek_start();
        self.error(start, format!("expected {what}"));
        false
    }

    fn skip_semis(&mut self) {
        while self.eat(Tok::Semi) {}
    }

    fn error(&mut self, at: usize, message: String) {
        self.diags
            .push(Diag::new(DiagKind::Parse, at..at + 1, message));
    }

    fn ident_name(&mut self) -> Option<IdentName> {
        match self.peek() {
            Some(Tok::Ident(text)) => {
                let (start, _, end) = self.bump().unwrap();
                Some(IdentName {
                    sym: self.interner.intern(text),
                    pos: Span::new(start, end),
                })
            }
            _ => None,
        }
    }

    // =========================================================================
    // Doc comment attachment
    // =========================================================================

    /// Collects the comment group ending on the line immediately above
    /// `decl_start`, if any, and returns its normalized text.
    ///
    /// A comment only qualifies when it is the first token on its own line;
    /// trailing same-line comments never become the next declaration's doc.
    fn doc_before(&self, decl_start: usize) -> Option<String> {
        let mut expected_line = self.lines.line(decl_start as u32);
        let mut group: Vec<&Comment<'src>> = Vec::new();

        for comment in self.comments.iter().rev() {
            if comment.span.end as usize > decl_start {
                continue;
            }
            let first_line = self.lines.line(comment.span.start);
            let last_line = self.lines.line(comment.span.end.saturating_sub(1));
            if last_line + 1 != expected_line || !self.own_line(comment.span.start) {
                break;
            }
            group.push(comment);
            expected_line = first_line;
        }

        if group.is_empty() {
            return None;
        }
        group.reverse();
        let text = comment_group_text(&group);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// True when nothing but blanks precedes `offset` on its line.
    fn own_line(&self, offset: u32) -> bool {
        let line_start = offset as usize - (self.lines.line_col(offset).1 as usize - 1);
        self.src[line_start..offset as usize]
            .bytes()
            .all(|b| b == b' ' || b == b'\t')
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse(mut self) -> Result<SourceUnit, LoadError> {
        self.skip_semis();

        let package_name = match (self.peek(), self.peek_nth(1)) {
            (Some(Tok::KwPackage), Some(Tok::Ident(name))) => {
                self.pos += 2;
                let sym = self.interner.intern(name);
                self.expect(Tok::Semi, "newline after package clause");
                sym
            }
            _ => {
                return Err(LoadError::NoPackageClause {
                    file: self.file_name,
                })
            }
        };

        let mut decls = Vec::new();
        loop {
            self.skip_semis();
            let Some(tok) = self.peek() else { break };
            match tok {
                Tok::KwConst => decls.push(self.parse_value_decl(ValueKind::Const)),
                Tok::KwVar => decls.push(self.parse_value_decl(ValueKind::Var)),
                Tok::KwType => decls.push(self.parse_type_decl()),
                Tok::KwFunc => decls.push(self.parse_func_decl()),
                _ => {
                    let start = self.peek_start();
                    self.error(start, format!("unexpected token {tok} at top level"));
                    self.recover_to_semi();
                }
            }
        }

        if !self.diags.is_empty() {
            return Err(LoadError::Syntax {
                file: self.file_name,
                diags: self.diags,
            });
        }

        Ok(SourceUnit {
            package_name,
            file_name: self.file_name,
            decls,
            arena: self.arena,
            interner: self.interner,
            lines: self.lines,
        })
    }

    fn parse_value_decl(&mut self, kind: ValueKind) -> Decl {
        let (kw_start, _, _) = self.bump().unwrap();
        let doc = self.doc_before(kw_start);
        let mut specs = Vec::new();

        if self.eat(Tok::LParen) {
            self.skip_semis();
            while !self.at(Tok::RParen) && self.peek().is_some() {
                specs.push(self.parse_value_spec());
                if !self.eat(Tok::Semi) && !self.at(Tok::RParen) {
                    let start = self.peek_start();
                    self.error(start, "expected newline or ) in value group".into());
                    self.recover_to_semi();
                }
                self.skip_semis();
            }
            self.expect(Tok::RParen, ") closing value group");
        } else {
            specs.push(self.parse_value_spec());
        }

        Decl::Value { kind, doc, specs }
    }

    fn parse_value_spec(&mut self) -> ValueSpec {
        let start = self.peek_start();
        let doc = self.doc_before(start);

        let mut names: SmallVec<[IdentName; 2]> = SmallVec::new();
        loop {
            match self.ident_name() {
                Some(name) => names.push(name),
                None => {
                    let at = self.peek_start();
                    self.error(at, "expected identifier in value spec".into());
                    self.recover_to_semi();
                    break;
                }
            }
            if !self.eat(Tok::Comma) {
                break;
            }
        }

        let typ = if !self.at(Tok::Assign) && self.at_type_start() {
            Some(self.parse_type())
        } else {
            None
        };

        let mut values: SmallVec<[InitExpr; 2]> = SmallVec::new();
        if self.eat(Tok::Assign) {
            loop {
                values.push(self.parse_init_expr());
                if !self.eat(Tok::Comma) {
                    break;
                }
            }
        }

        ValueSpec {
            names,
            typ,
            values,
            doc,
        }
    }

    fn parse_type_decl(&mut self) -> Decl {
        let (kw_start, _, _) = self.bump().unwrap();
        let doc = self.doc_before(kw_start);
        let mut specs = Vec::new();

        if self.eat(Tok::LParen) {
            self.skip_semis();
            while !self.at(Tok::RParen) && self.peek().is_some() {
                if let Some(spec) = self.parse_type_spec() {
                    specs.push(spec);
                }
                if !self.eat(Tok::Semi) && !self.at(Tok::RParen) {
                    let start = self.peek_start();
                    self.error(start, "expected newline or ) in type group".into());
                    self.recover_to_semi();
                }
                self.skip_semis();
            }
            self.expect(Tok::RParen, ") closing type group");
        } else if let Some(spec) = self.parse_type_spec() {
            specs.push(spec);
        }

        Decl::Type { doc, specs }
    }

    fn parse_type_spec(&mut self) -> Option<TypeSpec> {
        let start = self.peek_start();
        let doc = self.doc_before(start);

        let Some(name) = self.ident_name() else {
            self.error(start, "expected type name".into());
            self.recover_to_semi();
            return None;
        };

        let alias = self.eat(Tok::Assign);
        let typ = if self.at_type_start() {
            Some(self.parse_type())
        } else {
            let at = self.peek_start();
            self.error(at, "expected type after type name".into());
            None
        };

        Some(TypeSpec {
            name,
            alias,
            typ,
            doc,
        })
    }

    fn parse_func_decl(&mut self) -> Decl {
        let (kw_start, _, _) = self.bump().unwrap();
        let doc = self.doc_before(kw_start);

        let mut recv = Vec::new();
        if self.eat(Tok::LParen) {
            recv = self.parse_field_list(Tok::RParen);
            self.expect(Tok::RParen, ") closing receiver");
        }

        let name = self.ident_name().unwrap_or_else(|| {
            let at = self.peek_start();
            self.error(at, "expected function name".into());
            IdentName {
                sym: self.interner.intern(""),
                pos: Span::new(at, at),
            }
        });

        // Generic declarations carry a type parameter list after the name;
        // it never appears in the rendered signature.
        if self.at(Tok::LBrack) {
            self.skip_balanced();
        }

        let signature = self.parse_signature();

        // builtin.go declares bodiless functions; tolerate bodies anyway.
        if self.at(Tok::LBrace) {
            self.skip_balanced();
        }

        Decl::Func(FuncDecl {
            name,
            recv,
            signature,
            doc,
        })
    }

    // =========================================================================
    // Signatures and field lists
    // =========================================================================

    fn parse_signature(&mut self) -> Signature {
        self.expect(Tok::LParen, "( opening parameter list");
        let params = self.parse_field_list(Tok::RParen);
        self.expect(Tok::RParen, ") closing parameter list");

        let mut results = Vec::new();
        if self.eat(Tok::LParen) {
            results = self.parse_field_list(Tok::RParen);
            self.expect(Tok::RParen, ") closing result list");
        } else if self.at_type_start() {
            let typ = self.parse_type();
            let span = self.arena.get_type(typ).span;
            results.push(self.arena.alloc_field(
                Field {
                    name: None,
                    typ: Some(typ),
                },
                span,
            ));
        }

        Signature { params, results }
    }

    /// Parses a comma-separated parameter/result list up to `terminator`,
    /// then resolves Go's name grouping.
    fn parse_field_list(&mut self, terminator: Tok<'_>) -> Vec<FieldId> {
        let mut items = Vec::new();

        while !self.at(terminator) && self.peek().is_some() {
            items.push(self.parse_field_item());
            if !self.eat(Tok::Comma) {
                break;
            }
        }

        self.resolve_field_group(items)
    }

    /// One element of a field list: `name type`, `name` (type pending), or
    /// a bare type.
    fn parse_field_item(&mut self) -> FieldItem {
        let start = self.peek_start();

        if let Some(Tok::Ident(_)) = self.peek() {
            let followed_by_type = self
                .peek_nth(1)
                .is_some_and(|t| Self::starts_type(t) || t == Tok::Ellipsis);
            if followed_by_type {
                let name = self.ident_name().unwrap();
                let typ = self.parse_type();
                let end = self.prev_end();
                return FieldItem {
                    names: vec![name],
                    typ: Some(typ),
                    span: Span::new(start, end),
                };
            }
            // Bare ident: a pending name or a bare named type; decided when
            // the group is resolved.
            let name = self.ident_name().unwrap();
            return FieldItem {
                names: vec![name],
                typ: None,
                span: name.pos,
            };
        }

        let typ = self.parse_type();
        let end = self.prev_end();
        FieldItem {
            names: Vec::new(),
            typ: Some(typ),
            span: Span::new(start, end),
        }
    }

    /// Resolves pending names against the next typed element, Go-style:
    /// in `dst, src []Type` both names share one field and one type.
    ///
    /// A grouped field keeps only its **last** name, which is what the
    /// documentation signature for such parameters shows.
    fn resolve_field_group(&mut self, items: Vec<FieldItem>) -> Vec<FieldId> {
        let saw_type = items.iter().any(|i| i.typ.is_some());
        let mut out = Vec::new();
        let mut pending: Vec<IdentName> = Vec::new();
        let mut pending_start: Option<u32> = None;

        for item in items {
            match item.typ {
                Some(typ) if saw_type => {
                    let name = item.names.last().copied().or_else(|| pending.last().copied());
                    pending.clear();
                    let start = pending_start.take().unwrap_or(item.span.start);
                    out.push(self.arena.alloc_field(
                        Field {
                            name,
                            typ: Some(typ),
                        },
                        Span {
                            start,
                            end: item.span.end,
                        },
                    ));
                }
                _ => {
                    if pending.is_empty() {
                        pending_start = Some(item.span.start);
                    }
                    pending.extend(item.names);
                }
            }
        }

        // No typed element at all: every bare ident was a named type.
        for name in pending {
            let typ = self.arena.alloc_type(TypeExpr::Named(name.sym), name.pos);
            out.push(self.arena.alloc_field(
                Field {
                    name: None,
                    typ: Some(typ),
                },
                name.pos,
            ));
        }

        out
    }

    // =========================================================================
    // Type expressions
    // =========================================================================

    const fn starts_type(tok: Tok<'_>) -> bool {
        matches!(
            tok,
            Tok::Ident(_)
                | Tok::LBrack
                | Tok::Star
                | Tok::Ellipsis
                | Tok::KwMap
                | Tok::KwChan
                | Tok::Arrow
                | Tok::KwFunc
                | Tok::KwInterface
                | Tok::KwStruct
        )
    }

    fn at_type_start(&self) -> bool {
        self.peek().is_some_and(Self::starts_type)
    }

    fn parse_type(&mut self) -> TypeId {
        let start = self.peek_start();

        let expr = match self.peek() {
            Some(Tok::Ident(text)) => {
                let sym = self.interner.intern(text);
                self.bump();
                TypeExpr::Named(sym)
            }
            Some(Tok::LBrack) => {
                self.bump();
                if self.eat(Tok::RBrack) {
                    TypeExpr::Slice(self.parse_type())
                } else {
                    // Array type: not in the supported set.
                    self.skip_until(Tok::RBrack);
                    self.eat(Tok::RBrack);
                    if self.at_type_start() {
                        self.parse_type();
                    }
                    TypeExpr::Unknown
                }
            }
            Some(Tok::Ellipsis) => {
                self.bump();
                TypeExpr::Variadic(self.parse_type())
            }
            Some(Tok::Star) => {
                self.bump();
                TypeExpr::Pointer(self.parse_type())
            }
            Some(Tok::KwMap) => {
                self.bump();
                self.expect(Tok::LBrack, "[ after map");
                let key = self.parse_type();
                self.expect(Tok::RBrack, "] after map key");
                let value = self.parse_type();
                TypeExpr::Map { key, value }
            }
            Some(Tok::KwChan) => {
                self.bump();
                let dir = if self.eat(Tok::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                TypeExpr::Chan {
                    dir,
                    elem: self.parse_type(),
                }
            }
            Some(Tok::Arrow) => {
                self.bump();
                self.expect(Tok::KwChan, "chan after <-");
                TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: self.parse_type(),
                }
            }
            Some(Tok::KwFunc) => {
                self.bump();
                TypeExpr::Func(self.parse_signature())
            }
            Some(Tok::KwInterface) => {
                self.bump();
                self.expect(Tok::LBrace, "{ after interface");
                let methods = self.parse_interface_body();
                TypeExpr::Interface { methods }
            }
            _ => {
                // Struct types and anything else outside the variant set.
                self.skip_unknown_type();
                TypeExpr::Unknown
            }
        };

        let end = self.prev_end();
        self.arena.alloc_type(expr, Span::new(start, end))
    }

    fn parse_interface_body(&mut self) -> Vec<FieldId> {
        let mut methods = Vec::new();
        self.skip_semis();

        while !self.at(Tok::RBrace) && self.peek().is_some() {
            let start = self.peek_start();

            let field = match (self.peek(), self.peek_nth(1)) {
                (Some(Tok::Ident(_)), Some(Tok::LParen)) => {
                    let name = self.ident_name().unwrap();
                    let sig = self.parse_signature();
                    let end = self.prev_end();
                    let typ = self
                        .arena
                        .alloc_type(TypeExpr::Func(sig), Span::new(start, end));
                    Field {
                        name: Some(name),
                        typ: Some(typ),
                    }
                }
                _ => {
                    // Embedded interface or other element; keep the type only.
                    let typ = self.parse_type();
                    Field {
                        name: None,
                        typ: Some(typ),
                    }
                }
            };

            let end = self.prev_end();
            methods
                .push(self.arena.alloc_field(field, Span::new(start, end)));

            if !self.eat(Tok::Semi) && !self.at(Tok::RBrace) {
                let at = self.peek_start();
                self.error(at, "expected newline or } in interface body".into());
                break;
            }
            self.skip_semis();
        }

        self.expect(Tok::RBrace, "} closing interface body");
        methods
    }

    // =========================================================================
    // Initializer expressions
    // =========================================================================

    fn parse_init_expr(&mut self) -> InitExpr {
        let lhs = self.parse_init_primary();
        if let Some(op) = self.peek().and_then(|t| t.op_text()) {
            let op_sym = self.interner.intern(op);
            self.bump();
            let rhs = self.parse_init_primary();
            return InitExpr::Binary {
                op: op_sym,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        lhs
    }

    fn parse_init_primary(&mut self) -> InitExpr {
        match self.peek() {
            Some(
                Tok::IntLit(text)
                | Tok::FloatLit(text)
                | Tok::StringLit(text)
                | Tok::RuneLit(text)
                | Tok::RawStringLit(text),
            ) => {
                let sym = self.interner.intern(text);
                self.bump();
                InitExpr::Lit(sym)
            }
            Some(Tok::Ident(text)) => {
                let sym = self.interner.intern(text);
                self.bump();
                InitExpr::Ident(sym)
            }
            Some(Tok::Minus) => {
                self.bump();
                match self.peek() {
                    Some(Tok::IntLit(text) | Tok::FloatLit(text)) => {
                        let sym = self.interner.intern(&format!("-{text}"));
                        self.bump();
                        InitExpr::Lit(sym)
                    }
                    _ => {
                        self.skip_init_tail();
                        InitExpr::Opaque
                    }
                }
            }
            _ => {
                self.skip_init_tail();
                InitExpr::Opaque
            }
        }
    }

    // =========================================================================
    // Recovery / skipping
    // =========================================================================

    /// Skips to the next `;` at nesting depth zero (consuming it).
    fn recover_to_semi(&mut self) {
        let mut depth = 0i32;
        while let Some(tok) = self.peek() {
            match tok {
                Tok::LParen | Tok::LBrack | Tok::LBrace => depth += 1,
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                Tok::Semi if depth == 0 => {
                    self.bump();
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Skips a balanced bracket/brace/paren region starting at the current
    /// opening token.
    fn skip_balanced(&mut self) {
        let mut depth = 0i32;
        while let Some(tok) = self.bump().map(|(_, t, _)| t) {
            match tok {
                Tok::LParen | Tok::LBrack | Tok::LBrace => depth += 1,
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    depth -= 1;
                    if depth <= 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Skips tokens until `stop` at depth zero, without consuming it.
    fn skip_until(&mut self, stop: Tok<'_>) {
        let mut depth = 0i32;
        while let Some(tok) = self.peek() {
            if depth == 0 && tok == stop {
                return;
            }
            match tok {
                Tok::LParen | Tok::LBrack | Tok::LBrace => depth += 1,
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Consumes an unsupported type expression: everything balanced up to a
    /// depth-zero boundary token. Always makes progress.
    fn skip_unknown_type(&mut self) {
        let mut consumed = false;
        let mut depth = 0i32;
        while let Some(tok) = self.peek() {
            match tok {
                Tok::LParen | Tok::LBrack | Tok::LBrace => depth += 1,
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Tok::Comma | Tok::Semi | Tok::Assign if depth == 0 => break,
                _ => {}
            }
            self.bump();
            consumed = true;
        }
        if !consumed {
            let at = self.peek_start();
            self.error(at, "expected type expression".into());
            self.bump();
        }
    }

    /// Skips the remainder of an initializer expression.
    fn skip_init_tail(&mut self) {
        let mut depth = 0i32;
        let mut consumed = false;
        while let Some(tok) = self.peek() {
            match tok {
                Tok::LParen | Tok::LBrack | Tok::LBrace => depth += 1,
                Tok::RParen | Tok::RBrack | Tok::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Tok::Comma | Tok::Semi if depth == 0 => break,
                _ => {}
            }
            self.bump();
            consumed = true;
        }
        if !consumed {
            self.bump();
        }
    }
}

// =============================================================================
// Comment text normalization
// =============================================================================

/// Normalizes a comment group the way `go/ast.CommentGroup.Text` does:
/// comment markers stripped, at most one leading space removed per line,
/// leading/trailing blank lines dropped, and a single trailing newline on
/// non-empty text.
fn comment_group_text(group: &[&Comment<'_>]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for comment in group {
        let text = comment.text;
        if let Some(rest) = text.strip_prefix("//") {
            lines.push(strip_leading_space(rest).trim_end().to_string());
        } else {
            let body = text
                .strip_prefix("/*")
                .map(|t| t.strip_suffix("*/").unwrap_or(t))
                .unwrap_or(text);
            for line in body.split('\n') {
                lines.push(line.trim().to_string());
            }
        }
    }

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

#[inline]
fn strip_leading_space(s: &str) -> &str {
    s.strip_prefix(' ').unwrap_or(s)
}
