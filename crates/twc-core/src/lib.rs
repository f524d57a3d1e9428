//! Core types, naming rules, configuration and errors for the typed web
//! client generator.
//!
//! This crate provides the foundational pieces shared by every other crate
//! in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`MethodPath`, `OperationName`, `ArgumentTypeName`)
//! - Name canonicalization used as the join key between the three name spaces
//!   (specification types, SDK surface, SDK argument declarations)
//! - Error hierarchy with contextual information
//! - Generator configuration and CLI-facing types

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod types;

pub mod cli;
pub mod config;
pub mod naming;

pub use config::{GeneratorConfig, NamingConfig, SuccessCheck};
pub use error::{Error, Result};
pub use types::{ArgumentTypeName, MethodPath, OperationName};
