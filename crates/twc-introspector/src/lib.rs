//! SDK declaration introspection and client method discovery.
//!
//! Reads the SDK's vendored `methods.d.ts`, finds every callable member of
//! the client object graph and every exported argument interface, and keys
//! the discovered methods by operation name so they can be joined against the
//! `Paths` namespaces produced from the API specification.
//!
//! # Examples
//!
//! ```
//! use twc_core::OperationName;
//! use twc_introspector::Introspector;
//!
//! let source = r"
//!     export interface AuthTestArguments { token?: string; }
//!     export declare abstract class Methods {
//!         readonly auth: { test: Method<AuthTestArguments>; };
//!     }
//! ";
//!
//! let sdk = Introspector::new("Methods").inspect_source("methods.d.ts", source).unwrap();
//! assert_eq!(sdk.registry.len(), 1);
//! assert!(sdk.registry.get(&OperationName::new("AuthTest")).is_some());
//! assert_eq!(sdk.argument_types[0].as_str(), "AuthTestArguments");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod analyzer;
mod registry;
mod surface;

pub use analyzer::{argument_type_names, build_surface};
pub use registry::MethodRegistry;
pub use surface::{ClientSurface, SurfaceNode, SurfaceValue, discover_methods};

use std::path::Path;
use twc_core::{ArgumentTypeName, Error, Result};

/// Everything the generator needs to know about the SDK.
#[derive(Debug, Clone)]
pub struct SdkSurface {
    /// Exported argument interface names, in declaration order
    pub argument_types: Vec<ArgumentTypeName>,
    /// Client object graph
    pub surface: ClientSurface,
    /// Discovered methods keyed by operation name
    pub registry: MethodRegistry,
}

/// Inspects SDK declaration files.
#[derive(Debug, Clone)]
pub struct Introspector {
    client_class: String,
}

impl Introspector {
    /// Creates an introspector looking for the client class `client_class`.
    #[must_use]
    pub fn new(client_class: impl Into<String>) -> Self {
        Self {
            client_class: client_class.into(),
        }
    }

    /// Inspects declaration source text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the source is not valid declaration
    /// syntax and [`Error::ResourceNotFound`] if the client class is missing.
    pub fn inspect_source(&self, file: &str, source: &str) -> Result<SdkSurface> {
        let module = twc_dts::SourceModule::parse(file, source)?;

        let argument_types = argument_type_names(&module);
        let surface = build_surface(&module, &self.client_class)?;
        let registry = MethodRegistry::from_paths(surface.methods());

        tracing::info!(
            "Discovered {} client methods and {} argument types in {}",
            registry.len(),
            argument_types.len(),
            file
        );

        Ok(SdkSurface {
            argument_types,
            surface,
            registry,
        })
    }

    /// Reads and inspects a declaration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise the errors
    /// of [`Introspector::inspect_source`].
    pub fn inspect_file(&self, path: &Path) -> Result<SdkSurface> {
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: display.clone(),
            source,
        })?;
        self.inspect_source(&display, &source)
    }
}
