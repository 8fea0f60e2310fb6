//! Core data types for vsolve.
//!
//! This crate defines the values the solver works on (versions, version
//! constraints and package records) together with the file formats that feed
//! it: the project manifest, the repository index and the global config.
//!
//! This crate is intentionally free of network I/O.

pub mod config;
pub mod constraint;
pub mod index;
pub mod manifest;
pub mod package;
pub mod version;
