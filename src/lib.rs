//! Documentation-on-demand resolver for Go's `builtin` package.
//!
//! Answers one query, "show me what this built-in name is", by parsing
//! the builtin unit's source, scanning its top-level declarations, and
//! rendering the matching one into a canonical textual signature together
//! with its doc comment and source position.
//!
//! - Lexer uses Logos and implements Go semicolon insertion, keeping
//!   comment tokens so doc text can be attached.
//! - Parser covers the declaration-only subset of Go the builtin unit uses.
//! - Rendering maps the closed type-expression variant set to flat text;
//!   unsupported shapes degrade to empty text with a diagnostic.
//!
//! Each lookup re-parses the unit from scratch. Lookups are interactive
//! one-shot queries, so the simplicity is worth more than a cache.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod resolve;

// Re-exports for convenience
pub use error::{Diag, DiagKind, LoadError};
pub use lexer::Lexer;
pub use parser::parse_unit;
pub use render::Renderer;
pub use resolve::{DocRecord, Resolver};

use std::path::{Path, PathBuf};

/// Relative location of the builtin unit inside a Go root.
const BUILTIN_REL_PATH: &str = "src/builtin/builtin.go";

/// Resolves `name` against the builtin unit of the ambient Go installation
/// (located through `GOROOT`).
///
/// `Ok(None)` means the name is not a built-in; that is a normal outcome.
/// Errors are fatal environment problems only.
pub fn lookup(name: &str) -> Result<Option<DocRecord>, LoadError> {
    let path = builtin_source_path()?;
    lookup_in(&path, name)
}

/// Resolves `name` against the builtin unit at an explicit path.
///
/// Performs a fresh parse of the unit's source; nothing is cached across
/// calls.
pub fn lookup_in(path: &Path, name: &str) -> Result<Option<DocRecord>, LoadError> {
    let src = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("builtin.go");
    let unit = parse_unit(file_name, &src)?;

    let mut resolver = Resolver::new(&unit);
    Ok(resolver.resolve(name))
}

fn builtin_source_path() -> Result<PathBuf, LoadError> {
    let goroot = std::env::var_os("GOROOT").ok_or(LoadError::GorootNotSet)?;
    Ok(PathBuf::from(goroot).join(BUILTIN_REL_PATH))
}
