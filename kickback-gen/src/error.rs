use std::path::PathBuf;

use pest::error::{Error as PestError, LineColLocation};

use crate::parse::Rule;

/// Malformed markup. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn at(pos: (usize, usize), message: impl Into<String>) -> Self {
        Self {
            line: pos.0,
            column: pos.1,
            message: message.into(),
        }
    }
}

impl From<PestError<Rule>> for ParseError {
    fn from(e: PestError<Rule>) -> Self {
        let pos = match e.line_col {
            LineColLocation::Pos(p) => p,
            LineColLocation::Span(start, _) => start,
        };
        Self::at(pos, e.variant.message())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NameError {
    #[error("file name of {} is not valid UTF-8", .0.display())]
    NotUtf8(PathBuf),
    #[error("{} does not end in `{suffix}`", path.display())]
    MissingSuffix { path: PathBuf, suffix: &'static str },
    #[error("`{name}` (from {}) is not a valid Rust identifier", path.display())]
    InvalidIdentifier { name: String, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmitError {
    #[error("`{0}` is not a valid Rust identifier")]
    InvalidIdentifier(String),
    /// The assembled unit is not valid Rust. Indicates a bug in the emitter.
    #[error("generated source does not parse: {0}")]
    Invariant(String),
}
