//! Dependency resolution engine: picks one version per package such that
//! every direct and transitive constraint (and every compiler range) holds,
//! preferring the newest versions and breaking ties by package name.

pub mod graph;
pub mod repository;
pub mod solver;
