//! Error types for the output writer.

use thiserror::Error;

/// Errors raised while writing generated files.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Path is empty or absolute.
    #[error("invalid output path: {path}")]
    InvalidPath {
        /// Offending path
        path: String,
    },

    /// Path contains a `..` component.
    #[error("output path escapes the output directory: {path}")]
    InvalidPathComponent {
        /// Offending path
        path: String,
    },

    /// Filesystem operation failed.
    #[error("I/O error on {path}")]
    IoError {
        /// File or directory involved
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }

    /// Returns `true` for I/O failures.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }
}

/// Result alias for the output writer.
pub type Result<T> = std::result::Result<T, FilesError>;
