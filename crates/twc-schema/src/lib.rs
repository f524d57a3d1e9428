//! Specification-to-types transform.
//!
//! Turns the chat platform's Swagger 2 document into a declaration tree with
//! two top-level namespaces:
//!
//! - `Definitions`: one declaration per reusable schema
//! - `Paths`: one namespace per operation, each holding a `Responses`
//!   namespace with one declaration per response code
//!
//! Every generated name passes through a [`TypeNameConvertor`], so the naming
//! strategy can be swapped without touching downstream components.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use twc_core::NamingConfig;
//! use twc_dts::Scope;
//! use twc_schema::{SpecDocument, SubstitutingConvertor, to_type_namespaces};
//!
//! let document = SpecDocument::from_value(json!({
//!     "swagger": "2.0",
//!     "paths": {
//!         "/auth.test": {
//!             "get": {
//!                 "operationId": "auth_test",
//!                 "responses": {
//!                     "200": { "schema": { "type": "object", "properties": { "ok": { "type": "boolean" } } } },
//!                     "default": { "schema": { "type": "object" } }
//!                 }
//!             }
//!         }
//!     }
//! })).unwrap();
//!
//! let convertor = SubstitutingConvertor::new(&NamingConfig::default());
//! let file = to_type_namespaces(&document, &convertor).unwrap();
//!
//! let responses = file
//!     .namespace("Paths")
//!     .and_then(|paths| paths.namespace("AuthTest"))
//!     .and_then(|op| op.namespace("Responses"))
//!     .unwrap();
//! assert!(responses.interface("Success").is_some());
//! assert!(responses.interface("Error").is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod compiler;
mod convertor;
mod document;
pub mod source;

pub use compiler::{DEFINITIONS_NAMESPACE, PATHS_NAMESPACE, RESPONSES_NAMESPACE, to_type_namespaces};
pub use convertor::{DefaultConvertor, SubstitutingConvertor, TypeNameConvertor};
pub use document::{Operation, PathItem, Response, SpecDocument};
pub use source::{FileSpecSource, HttpSpecSource, SpecSource, StaticSpecSource};
