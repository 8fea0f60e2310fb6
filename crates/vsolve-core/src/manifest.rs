use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use vsolve_util::errors::VsolveError;

use crate::constraint::Constraint;
use crate::package::PackageName;
use crate::version::Version;

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "Vsolve.toml";

/// The parsed representation of a `Vsolve.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    #[serde(default)]
    pub dependencies: BTreeMap<PackageName, Constraint>,

    #[serde(default)]
    pub repository: Option<RepositoryConfig>,
}

/// Project identity from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    /// Compiler version the project is built with.
    pub compiler: Version,
    #[serde(default)]
    pub description: Option<String>,
}

/// Where to find package metadata, from `[repository]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub index: Option<PathBuf>,
}

impl Manifest {
    /// Load and parse a `Vsolve.toml` from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VsolveError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content).map_err(|e| {
            VsolveError::Manifest {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Index path declared in `[repository]`, if any.
    pub fn index_path(&self) -> Option<&Path> {
        self.repository.as_ref()?.index.as_deref()
    }
}
