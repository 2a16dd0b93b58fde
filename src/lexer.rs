//! Declaration-level Go lexer (Logos).
//!
//! Lexes the subset of Go that declaration-only sources such as
//! `builtin.go` use: keywords, identifiers, literals, the operators that
//! appear in constant initializers, and delimiters. Two deliberate
//! deviations from a statement-level lexer:
//!
//! - Comments are **kept** as tokens (the parser attaches them to
//!   declarations as doc text) instead of being skipped.
//! - Go's semicolon-insertion rule is implemented in the wrapper so the
//!   parser can treat line ends as declaration terminators.

use logos::{Lexer as LogosLexer, Logos};
use std::ops::Range;

use crate::error::{Diag, LexError, LexErrorKind};

#[inline]
const fn first_newline_offset(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if matches!(bytes[i], b'\n' | b'\r') {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Logos callback: scan a `/* ... */` comment to its terminator.
#[inline]
fn lex_block_comment(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    use memchr::memchr;

    let rem = lex.remainder().as_bytes();
    let mut search_start = 0;

    while let Some(star_pos) = memchr(b'*', &rem[search_start..]) {
        let abs_pos = search_start + star_pos;
        if rem.get(abs_pos + 1) == Some(&b'/') {
            lex.bump(abs_pos + 2);
            return Ok(());
        }
        search_start = abs_pos + 1;
    }

    lex.bump(rem.len());
    Err(LexErrorKind::UnterminatedComment)
}

// =============================================================================
// Raw token definition
// =============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t]+")]
#[rustfmt::skip]
enum RawTok {
    #[token("\u{FEFF}")] Bom,

    // Trivia. Comments are real tokens here; the parser needs them.
    #[regex(r"\r\n|\n|\r")] Newline,
    #[regex(r"//[^\n\r]*")] LineComment,
    #[token("/*", lex_block_comment)] BlockComment,

    // Keywords (before Ident)
    #[token("break")] KwBreak,
    #[token("case")] KwCase,
    #[token("chan")] KwChan,
    #[token("const")] KwConst,
    #[token("continue")] KwContinue,
    #[token("default")] KwDefault,
    #[token("defer")] KwDefer,
    #[token("else")] KwElse,
    #[token("fallthrough")] KwFallthrough,
    #[token("for")] KwFor,
    #[token("func")] KwFunc,
    #[token("go")] KwGo,
    #[token("goto")] KwGoto,
    #[token("if")] KwIf,
    #[token("import")] KwImport,
    #[token("interface")] KwInterface,
    #[token("map")] KwMap,
    #[token("package")] KwPackage,
    #[token("range")] KwRange,
    #[token("return")] KwReturn,
    #[token("select")] KwSelect,
    #[token("struct")] KwStruct,
    #[token("switch")] KwSwitch,
    #[token("type")] KwType,
    #[token("var")] KwVar,

    // Identifiers
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")] Ident,

    // Numbers
    #[regex(r"0[xXoObB][0-9a-fA-F_]+|[0-9][0-9_]*")] Int,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?")] Float,
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", priority = 3)] FloatLeadingDot,
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+", priority = 3)] FloatExp,

    // Strings / runes
    #[regex(r"`[^`]*`")] RawString,
    #[regex(r#""([^"\\\n\r]|\\.)*""#)] String,
    #[regex(r"'([^'\\\n\r]|\\.)+'")] Rune,

    // Operators (initializer-expression subset)
    #[token("...")] Ellipsis,
    #[token("<<")] Shl,
    #[token(">>")] Shr,
    #[token("&^")] AndNot,
    #[token("&&")] LAnd,
    #[token("||")] LOr,
    #[token("==")] EqEq,
    #[token("!=")] NotEq,
    #[token("<=")] Le,
    #[token(">=")] Ge,
    #[token("<-")] Arrow,
    #[token("=")] Assign,
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("&")] Amp,
    #[token("|")] Pipe,
    #[token("^")] Caret,
    #[token("~")] Tilde,
    #[token("<")] Lt,
    #[token(">")] Gt,

    // Delimiters
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token(",")] Comma,
    #[token(";")] Semi,
    #[token(":")] Colon,
    #[token(".")] Dot,

    // Catch-all (lowest priority)
    #[regex(r".", priority = 0)] Error,
}

impl RawTok {
    /// Go semicolon-insertion rule: a newline after one of these tokens
    /// terminates the line with an implicit `;`.
    #[inline]
    const fn can_insert_semicolon(self) -> bool {
        matches!(
            self,
            Self::Ident
                | Self::Int
                | Self::Float
                | Self::FloatLeadingDot
                | Self::FloatExp
                | Self::Rune
                | Self::String
                | Self::RawString
                | Self::KwBreak
                | Self::KwContinue
                | Self::KwFallthrough
                | Self::KwReturn
                | Self::RParen
                | Self::RBrack
                | Self::RBrace
        )
    }
}

// =============================================================================
// Public token definition (zero-copy)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tok<'src> {
    Ident(&'src str),
    IntLit(&'src str),
    FloatLit(&'src str),
    RuneLit(&'src str),
    StringLit(&'src str),
    RawStringLit(&'src str),

    /// `// ...` comment, marker included.
    LineComment(&'src str),
    /// `/* ... */` comment, markers included.
    BlockComment(&'src str),

    // Keywords
    KwBreak,
    KwCase,
    KwChan,
    KwConst,
    KwContinue,
    KwDefault,
    KwDefer,
    KwElse,
    KwFallthrough,
    KwFor,
    KwFunc,
    KwGo,
    KwGoto,
    KwIf,
    KwImport,
    KwInterface,
    KwMap,
    KwPackage,
    KwRange,
    KwReturn,
    KwSelect,
    KwStruct,
    KwSwitch,
    KwType,
    KwVar,

    // Operators / Delimiters
    Ellipsis,
    Shl,
    Shr,
    AndNot,
    LAnd,
    LOr,
    EqEq,
    NotEq,
    Le,
    Ge,
    Arrow,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Lt,
    Gt,
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Colon,
    Dot,

    Error,
}

impl<'src> Tok<'src> {
    /// Operator text for the binary operators constant initializers use.
    pub const fn op_text(&self) -> Option<&'static str> {
        Some(match self {
            Tok::Shl => "<<",
            Tok::Shr => ">>",
            Tok::AndNot => "&^",
            Tok::LAnd => "&&",
            Tok::LOr => "||",
            Tok::EqEq => "==",
            Tok::NotEq => "!=",
            Tok::Le => "<=",
            Tok::Ge => ">=",
            Tok::Plus => "+",
            Tok::Minus => "-",
            Tok::Star => "*",
            Tok::Slash => "/",
            Tok::Percent => "%",
            Tok::Amp => "&",
            Tok::Pipe => "|",
            Tok::Caret => "^",
            Tok::Lt => "<",
            Tok::Gt => ">",
            _ => return None,
        })
    }
}

impl std::fmt::Display for Tok<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

// =============================================================================
// Lexer wrapper: semicolon insertion + diags
// =============================================================================

pub struct Lexer<'src> {
    logos: LogosLexer<'src, RawTok>,
    pending: Option<(usize, Tok<'src>, usize)>,
    diags: Vec<Diag>,
    last_can_insert_semi: bool,
    src_len: usize,
    eof_done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            logos: RawTok::lexer(input),
            pending: None,
            diags: Vec::with_capacity(16),
            last_can_insert_semi: false,
            src_len: input.len(),
            eof_done: false,
        }
    }

    pub fn take_diags(&mut self) -> Vec<Diag> {
        std::mem::take(&mut self.diags)
    }

    #[inline]
    fn push_lex_diag(&mut self, kind: LexErrorKind, span: Range<usize>) {
        self.diags.push(LexError { kind, span }.diag());
    }

    #[inline]
    fn emit_semi_at(&mut self, pos: usize) {
        self.pending = Some((pos, Tok::Semi, pos));
    }

    #[inline]
    fn handle_eof(&mut self) {
        self.eof_done = true;
        if self.last_can_insert_semi {
            self.last_can_insert_semi = false;
            self.emit_semi_at(self.src_len);
        }
    }

    #[inline]
    fn handle_lex_error(&mut self, kind: LexErrorKind) -> Option<(usize, Tok<'src>, usize)> {
        let span = self.logos.span();
        self.push_lex_diag(kind, span.clone());
        self.last_can_insert_semi = false;
        Some((span.start, Tok::Error, span.end))
    }

    /// Returns `Some(item)` to emit, `None` to keep scanning.
    #[inline]
    fn handle_raw_token(&mut self, raw: RawTok) -> Option<(usize, Tok<'src>, usize)> {
        let span = self.logos.span();
        let slice = self.logos.slice();

        match raw {
            // BOM is only valid at the very start of the input.
            RawTok::Bom => {
                if span.start == 0 {
                    return None;
                }
                self.push_lex_diag(LexErrorKind::InvalidToken, span.clone());
                self.last_can_insert_semi = false;
                Some((span.start, Tok::Error, span.end))
            }

            RawTok::Newline => {
                if self.last_can_insert_semi {
                    self.last_can_insert_semi = false;
                    self.emit_semi_at(span.start);
                }
                None
            }

            // Comments pass through without disturbing semicolon insertion;
            // only the newline that follows (or is inside, for a block
            // comment) terminates the line.
            RawTok::LineComment => Some((span.start, Tok::LineComment(slice), span.end)),
            RawTok::BlockComment => {
                if self.last_can_insert_semi {
                    if let Some(off) = first_newline_offset(slice) {
                        self.last_can_insert_semi = false;
                        self.emit_semi_at(span.start + off);
                    }
                }
                Some((span.start, Tok::BlockComment(slice), span.end))
            }

            RawTok::Error => {
                self.push_lex_diag(LexErrorKind::InvalidToken, span.clone());
                self.last_can_insert_semi = false;
                Some((span.start, Tok::Error, span.end))
            }

            _ => {
                self.last_can_insert_semi = raw.can_insert_semicolon();
                Some((span.start, to_token(raw, slice), span.end))
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = (usize, Tok<'src>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // 1) Emit pending token (e.g. injected ';')
            if let Some(tok) = self.pending.take() {
                return Some(tok);
            }

            // 2) Hard EOF
            if self.eof_done {
                return None;
            }

            // 3) Next raw token
            match self.logos.next() {
                None => {
                    // Don't return yet; a pending ';' may need to go first.
                    self.handle_eof();
                    continue;
                }
                Some(Err(kind)) => return self.handle_lex_error(kind),
                Some(Ok(raw)) => match self.handle_raw_token(raw) {
                    None => continue,
                    Some(item) => return Some(item),
                },
            }
        }
    }
}

#[inline]
fn to_token<'src>(raw: RawTok, slice: &'src str) -> Tok<'src> {
    macro_rules! simple_tok {
        ($($raw:ident => $tok:ident),* $(,)?) => {
            match raw {
                RawTok::Ident => Tok::Ident(slice),
                RawTok::Int => Tok::IntLit(slice),
                RawTok::Float | RawTok::FloatLeadingDot | RawTok::FloatExp => {
                    Tok::FloatLit(slice)
                }
                RawTok::Rune => Tok::RuneLit(slice),
                RawTok::String => Tok::StringLit(slice),
                RawTok::RawString => Tok::RawStringLit(slice),
                $(RawTok::$raw => Tok::$tok,)*
                // Trivia and errors are handled by the wrapper.
                _ => Tok::Error,
            }
        };
    }

    simple_tok! {
        KwBreak => KwBreak, KwCase => KwCase, KwChan => KwChan, KwConst => KwConst,
        KwContinue => KwContinue, KwDefault => KwDefault, KwDefer => KwDefer, KwElse => KwElse,
        KwFallthrough => KwFallthrough, KwFor => KwFor, KwFunc => KwFunc, KwGo => KwGo,
        KwGoto => KwGoto, KwIf => KwIf, KwImport => KwImport, KwInterface => KwInterface,
        KwMap => KwMap, KwPackage => KwPackage, KwRange => KwRange, KwReturn => KwReturn,
        KwSelect => KwSelect, KwStruct => KwStruct, KwSwitch => KwSwitch, KwType => KwType,
        KwVar => KwVar,

        Ellipsis => Ellipsis, Shl => Shl, Shr => Shr, AndNot => AndNot, LAnd => LAnd,
        LOr => LOr, EqEq => EqEq, NotEq => NotEq, Le => Le, Ge => Ge, Arrow => Arrow,
        Assign => Assign, Plus => Plus, Minus => Minus, Star => Star, Slash => Slash,
        Percent => Percent, Amp => Amp, Pipe => Pipe, Caret => Caret, Tilde => Tilde,
        Lt => Lt, Gt => Gt,

        LParen => LParen, RParen => RParen, LBrack => LBrack, RBrack => RBrack,
        LBrace => LBrace, RBrace => RBrace, Comma => Comma, Semi => Semi, Colon => Colon,
        Dot => Dot, Error => Error,
    }
}
