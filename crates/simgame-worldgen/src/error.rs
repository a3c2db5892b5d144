//! World generation and persistence error types.

use std::path::PathBuf;

/// Errors returned by world generation, queries, and persistence.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A caller-supplied value is outside its allowed domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A filesystem operation failed.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        /// Path the failing operation touched.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A save file could not be decoded.
    #[error("malformed world file: {0}")]
    Format(#[from] WorldFormatError),

    /// The requested world does not exist on disk.
    #[error("world not found: {0}")]
    NotFound(String),
}

impl WorldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while decoding a `WSAV` world file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldFormatError {
    /// The data does not start with the expected magic bytes.
    #[error("invalid magic bytes")]
    InvalidMagic,
    /// The format version is not supported by this build.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u8),
    /// The data is shorter than a record requires.
    #[error("data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// A decoded field holds a value the world model cannot accept.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Bytes remain after the last tile record.
    #[error("{0} trailing bytes after tile records")]
    TrailingBytes(usize),
}
