use std::ops::Range;

use thiserror::Error;

pub type Span = Range<usize>;

/// Tier a diagnostic was produced at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagKind {
    Lex,
    Parse,
    /// An unhandled type-expression shape was rendered as empty text.
    Render,
}

/// Non-fatal diagnostic. Collected, never thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub kind: DiagKind,
    pub span: Span,
    pub message: String,
}

impl Diag {
    pub fn new(kind: DiagKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid escape")]
    InvalidEscape,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {span:?}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn diag(&self) -> Diag {
        Diag {
            kind: DiagKind::Lex,
            span: self.span.clone(),
            message: self.kind.to_string(),
        }
    }
}

/// Fatal failure to obtain the parsed fixed unit.
///
/// The builtin unit is assumed present and syntactically valid in any sane
/// environment; none of these are recoverable by the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("GOROOT is not set and no explicit source path was given")]
    GorootNotSet,

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: missing package clause")]
    NoPackageClause { file: String },

    #[error("{file}: {} syntax error(s)", .diags.len())]
    Syntax { file: String, diags: Vec<Diag> },
}
