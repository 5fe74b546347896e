//! Error types for snapshot loading
//!
//! Covers every way a snapshot can fail to become a catalog:
//! - File access
//! - Malformed snapshot text
//! - Descriptors outside the closed kind set
//! - Catalog validation (duplicate symbols)

use docindex_symbol::CatalogError;
use std::path::PathBuf;

/// Errors while turning a snapshot into a catalog
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error during file read
    #[error("io error reading {path}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot text is not a well-formed index object
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
        /// Decoder message
        message: String,
    },

    /// No index object found in the snapshot text
    #[error("snapshot does not contain an index object")]
    MissingObject,

    /// Type descriptor with a kind outside `Interface | Class | Functional`
    #[error("type descriptor {index} has unknown kind {value:?}")]
    UnknownKind {
        /// Position in the `types` array
        index: usize,
        /// Offending kind string
        value: String,
    },

    /// Batch rejected by catalog validation
    #[error("catalog rejected snapshot: {0}")]
    Catalog(#[from] CatalogError),
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the snapshot itself is at fault (as opposed to file access)
    #[inline]
    #[must_use]
    pub fn is_content_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
