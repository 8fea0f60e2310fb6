use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use vsolve_util::errors::VsolveError;

/// Global user configuration loaded from `~/.vsolve/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub repository: RepositoryDefaults,
}

/// Search settings from `[solver]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Upper bound on pick steps before a solve gives up.
    #[serde(default, rename = "max-steps")]
    pub max_steps: Option<u64>,
}

/// Fallback repository settings from `[repository]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryDefaults {
    #[serde(default)]
    pub index: Option<PathBuf>,
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| VsolveError::Config {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| {
            VsolveError::Config {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the vsolve data directory (`~/.vsolve/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".vsolve")
}
