use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CookieError>;

#[derive(Debug, Error)]
pub enum CookieError {
    /// Any failure opening or reading the source. Causes are not distinguished.
    #[error("source unavailable: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot strip header from an empty table")]
    EmptyInput,

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("column {index} out of range for row {row} with {len} fields")]
    IndexOutOfRange { row: usize, index: usize, len: usize },

    #[error("no rows matched, nothing to select")]
    NoMatches,
}
