//! Generation output types.
//!
//! # Examples
//!
//! ```
//! use twc_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "slackTypes.ts".to_string(),
//!     content: "export namespace Paths {}".to_string(),
//! });
//!
//! assert_eq!(code.file_count(), 1);
//! assert!(code.file("slackTypes.ts").is_some());
//! ```

use crate::postprocess::MergeReport;
use serde::{Deserialize, Serialize};

/// All files produced by one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files, relative to the output directory
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates an empty container.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a file.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Number of files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// File with the given relative path.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Iterates over the files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// What one run produced and what it could not match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Operation namespaces in the type artifact
    pub operations: usize,
    /// SDK methods discovered
    pub discovered_methods: usize,
    /// Wrapper method names, in emission order
    pub methods: Vec<String>,
    /// Dotted SDK method paths without a response namespace
    pub unmatched_methods: Vec<String>,
    /// Operations dropped for lack of an argument interface
    pub unmatched_arguments: Vec<String>,
    /// Supplemental merge outcome
    pub merge: MergeReport,
}
