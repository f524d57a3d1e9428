//! Command implementations.
//!
//! Each command takes the resolved configuration, does its work and prints
//! its result in the requested output format.

pub mod config;
pub mod generate;
