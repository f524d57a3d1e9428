//! Declaration post-processing and typed client synthesis.
//!
//! Takes the declaration tree compiled from the API specification and the
//! introspected SDK surface, and produces the two output artifacts:
//!
//! - the type declarations file, with exported `Paths` / `Definitions`
//!   namespaces, closed `Error` shapes and a `SuccessOrErrorPredicate` class
//!   in every `Responses` namespace ([`postprocess`])
//! - the client wrapper, one typed method per operation that has a response
//!   namespace, an SDK method and an argument interface ([`synthesis`],
//!   rendered with Handlebars)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod client;
pub mod generator;
pub mod postprocess;
pub mod synthesis;
pub mod template_engine;
pub mod types;

pub use generator::{Generation, Generator};
pub use postprocess::{MergeReport, PostProcessOptions, post_process};
pub use synthesis::{ClientMethod, JoinTable, Synthesis, synthesize};
pub use types::{GeneratedCode, GeneratedFile, GenerationReport};
