//! Typed web client generator CLI library.
//!
//! Exposes the argument parser, the commands and the output formatters so
//! they can be tested without spawning the binary.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::format_push_string)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use cli::{Cli, Commands, ConfigOverrides};
