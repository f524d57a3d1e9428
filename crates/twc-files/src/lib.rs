//! Writes generated artifacts to disk.
//!
//! A run produces several files that only make sense together: the client
//! imports the type declarations by relative path. [`OutputWriter`] therefore
//! replaces all of them or none. A failure part way through leaves the
//! previous outputs in place and no `.tmp` files behind.
//!
//! # Examples
//!
//! ```
//! use twc_codegen::{GeneratedCode, GeneratedFile};
//! use twc_files::OutputWriter;
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "slackTypes.ts".to_string(),
//!     content: "export namespace Paths {}".to_string(),
//! });
//!
//! let dir = tempfile::tempdir().unwrap();
//! OutputWriter::from_generated_code(code)
//!     .write_to(dir.path())
//!     .unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod types;
mod writer;

pub use types::{FilesError, Result};
pub use writer::OutputWriter;
