//! Repository index files: the list of every known package record.

use serde::{Deserialize, Serialize};
use std::path::Path;

use vsolve_util::errors::VsolveError;

use crate::package::PackageRecord;

/// The parsed representation of a repository index (`packages.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryIndex {
    #[serde(default)]
    pub package: Vec<PackageRecord>,
}

impl RepositoryIndex {
    /// Load and parse an index file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VsolveError::Index {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let index = Self::parse_toml(&content).map_err(|e| VsolveError::Index {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?;
        tracing::debug!(
            "Loaded {} package records from {}",
            index.package.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
