//! Error type shared by every stage of the documentation build.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KodocError>;

#[derive(Debug, Error)]
pub enum KodocError {
    /// The entity's source file exists but declares no class body.
    #[error("entity `{name}` has no class body in {}", .path.display())]
    EmptyEntity { name: String, path: PathBuf },

    /// A comment block without its opening and closing delimiter lines.
    #[error("malformed comment: expected at least 2 lines, found {lines}")]
    MalformedComment { lines: usize },

    /// Source slice requested without a file.
    #[error("no source file given")]
    NoFile,

    #[error("unknown entity `{name}`")]
    UnknownEntity { name: String },

    #[error("unknown format: {format}. Use markdown or json")]
    UnknownFormat { format: String },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KodocError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KodocError::Io {
            path: path.into(),
            source,
        }
    }
}
