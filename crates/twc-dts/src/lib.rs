//! TypeScript declaration model, parser and printer.
//!
//! The generator never manipulates TypeScript source text directly. The
//! specification compiler builds a [`DeclarationFile`], the post-processor
//! maps one `DeclarationFile` to another, and the [`printer`] turns the final
//! tree back into source. The [`parser`] reads the two hand-written inputs
//! (vendored SDK declarations and supplemental declarations) with
//! `swc_ecma_parser` and lowers them into the same model; [`SourceModule`]
//! exposes the swc tree itself for callers that need full type structure.
//!
//! Only the declaration subset of TypeScript is modelled: namespaces,
//! interfaces, type aliases and classes. Anything else (imports, enums,
//! functions, variables) is kept as [`Item::Verbatim`] text.
//!
//! # Examples
//!
//! ```
//! use twc_dts::{parse, print, Scope};
//!
//! let file = parse("types.ts", "export namespace Paths { interface Success { ok: true; } }").unwrap();
//! let paths = file.namespace("Paths").unwrap();
//! assert!(paths.interface("Success").is_some());
//!
//! let source = print(&file);
//! assert!(source.contains("export namespace Paths {"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod lower;
mod model;
pub mod parser;
pub mod printer;

pub use model::{
    Accessibility, Body, CallSignature, Class, ClassMember, ClassMethod, ClassProperty,
    Constructor, DeclarationFile, IndexSignature, Interface, Item, Member, MethodSignature,
    Modifiers, Namespace, Parameter, Property, Scope, TypeAlias, TypeExpr,
};
pub use parser::{SourceModule, parse};
pub use printer::{print, print_inline};
