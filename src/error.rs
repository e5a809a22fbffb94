//! Error types for file handling and indexing
//!
//! Transcoding itself never fails; every variant here comes from reading,
//! decoding or writing files around it.

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the library's file-facing operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file or directory could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The index file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input bytes are not valid in the detected charset
    #[error("invalid {charset} input: {detail}")]
    Encoding { charset: String, detail: String },

    /// Declared charset is not known to the decoder
    #[error("unsupported charset '{0}'")]
    UnsupportedCharset(String),

    /// Post index could not be serialized
    #[error("failed to serialize post index: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
