//! Error types for the typed web client generator.
//!
//! Fatal conditions are modelled here. Recoverable conditions (an SDK method
//! without a response type, an operation without an argument interface) are
//! reported through warnings and only become errors in strict mode, via
//! [`Error::UnresolvedJoin`].
//!
//! # Examples
//!
//! ```
//! use twc_core::{Error, Result};
//!
//! fn require_paths(found: bool) -> Result<()> {
//!     if !found {
//!         return Err(Error::MissingNamespace {
//!             namespace: "Paths".to_string(),
//!             parent: "<root>".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_paths(false).unwrap_err();
//! assert!(err.is_missing_namespace());
//! ```

use thiserror::Error;

/// Main error type for the generator.
///
/// All library crates in the workspace return this type.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote specification document could not be retrieved or parsed.
    #[error("failed to fetch specification from {location}")]
    FetchFailed {
        /// URL or path the document was requested from
        location: String,
        /// Underlying error cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A structural namespace expected in the declaration tree is missing.
    ///
    /// Indicates an incompatible upstream specification shape.
    #[error("required namespace '{namespace}' not found in {parent}")]
    MissingNamespace {
        /// Name of the namespace that was expected
        namespace: String,
        /// Where it was looked up
        parent: String,
    },

    /// Resource not found error.
    ///
    /// Occurs when an input file or a declaration that must exist is absent.
    #[error("resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A declaration file could not be parsed.
    #[error("{file}:{line}:{column}: {message}")]
    ParseError {
        /// File (or logical source name) being parsed
        file: String,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
        /// What went wrong
        message: String,
    },

    /// Supplemental declarations reuse names already produced from the
    /// specification. Only raised in strict mode; otherwise logged.
    #[error("supplemental declarations collide with generated names in {namespace}: {}", names.join(", "))]
    NameCollision {
        /// Top-level namespace the collision happened in
        namespace: String,
        /// Colliding namespace names
        names: Vec<String>,
    },

    /// Strict mode: discovered methods or operations could not be joined.
    #[error(
        "unresolved operations: {} method(s) without response types, {} operation(s) without argument types",
        unmatched_methods.len(),
        unmatched_arguments.len()
    )]
    UnresolvedJoin {
        /// Dotted SDK method paths without a response namespace
        unmatched_methods: Vec<String>,
        /// Operation names without an argument interface
        unmatched_arguments: Vec<String>,
    },

    /// Rendering one of the output artifacts failed.
    #[error("failed to generate {artifact}: {message}")]
    GenerationError {
        /// Artifact being generated
        artifact: String,
        /// Description of the generation failure
        message: String,
    },

    /// Invalid argument error.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O failure on an input file.
    #[error("I/O error on {path}")]
    Io {
        /// File involved
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if the specification could not be fetched.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }

    /// Returns `true` if a required namespace is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use twc_core::Error;
    ///
    /// let err = Error::MissingNamespace {
    ///     namespace: "Responses".to_string(),
    ///     parent: "Paths.ChatPostMessage".to_string(),
    /// };
    /// assert!(err.is_missing_namespace());
    /// ```
    #[must_use]
    pub const fn is_missing_namespace(&self) -> bool {
        matches!(self, Self::MissingNamespace { .. })
    }

    /// Returns `true` if this is a resource not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a declaration parse error.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if supplemental declarations collided with generated ones.
    #[must_use]
    pub const fn is_name_collision(&self) -> bool {
        matches!(self, Self::NameCollision { .. })
    }

    /// Returns `true` if strict mode rejected an incomplete join.
    #[must_use]
    pub const fn is_unresolved_join(&self) -> bool {
        matches!(self, Self::UnresolvedJoin { .. })
    }
}

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_detection() {
        let err = Error::FetchFailed {
            location: "https://example.com/spec.json".to_string(),
            source: "connection refused".into(),
        };
        assert!(err.is_fetch_error());
        assert!(!err.is_missing_namespace());
        assert!(err.to_string().contains("https://example.com/spec.json"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::ParseError {
            file: "methods.d.ts".to_string(),
            line: 3,
            column: 7,
            message: "expected '}'".to_string(),
        };
        assert!(err.is_parse_error());
        assert_eq!(err.to_string(), "methods.d.ts:3:7: expected '}'");
    }

    #[test]
    fn test_name_collision_lists_names() {
        let err = Error::NameCollision {
            namespace: "Paths".to_string(),
            names: vec!["DndInfo".to_string(), "ChatUpdate".to_string()],
        };
        assert!(err.is_name_collision());
        assert!(err.to_string().ends_with("DndInfo, ChatUpdate"));
    }

    #[test]
    fn test_unresolved_join_counts() {
        let err = Error::UnresolvedJoin {
            unmatched_methods: vec!["apps.uninstall".to_string()],
            unmatched_arguments: vec![],
        };
        assert!(err.is_unresolved_join());
        assert!(err.to_string().contains("1 method(s)"));
        assert!(err.to_string().contains("0 operation(s)"));
    }

    #[test]
    fn test_config_error_detection() {
        let err = Error::ConfigError {
            message: "types_file must not be empty".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_not_found());
    }
}
