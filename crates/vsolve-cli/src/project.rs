//! Loading everything a solve needs: manifest, repository index and config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use vsolve_core::config::{dirs_path, GlobalConfig};
use vsolve_core::constraint::Constraint;
use vsolve_core::index::RepositoryIndex;
use vsolve_core::manifest::{Manifest, MANIFEST_FILE};
use vsolve_core::package::PackageName;
use vsolve_core::version::Version;
use vsolve_resolver::repository::MemoryRepository;
use vsolve_resolver::solver::{self, Selection, SolveOptions};
use vsolve_util::errors::VsolveError;
use vsolve_util::fs::{find_ancestor_with, resolve_relative};
use vsolve_util::progress;

use crate::cli::ProjectArgs;

/// A project ready to be solved.
pub struct Project {
    pub name: String,
    pub compiler: Version,
    pub dependencies: BTreeMap<PackageName, Constraint>,
    pub repo: MemoryRepository,
    pub options: SolveOptions,
}

impl Project {
    /// Load the manifest, its index and the global config.
    ///
    /// Flags win over the manifest, which wins over the global config.
    pub fn load(manifest: Option<&Path>, args: &ProjectArgs) -> miette::Result<Self> {
        let manifest_path = match manifest {
            Some(path) => path.to_path_buf(),
            None => locate_manifest()?,
        };
        let manifest = Manifest::from_path(&manifest_path)?;
        let manifest_dir = manifest_path.parent().unwrap_or(Path::new(""));

        let config = GlobalConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load global config, using defaults: {e}");
            GlobalConfig::default()
        });

        let index_path = args
            .index
            .clone()
            .or_else(|| {
                manifest
                    .index_path()
                    .map(|path| resolve_relative(manifest_dir, path))
            })
            .or_else(|| {
                config
                    .repository
                    .index
                    .map(|path| resolve_relative(&dirs_path(), &path))
            })
            .ok_or_else(|| VsolveError::Index {
                message: format!(
                    "No repository index configured; pass --index or set [repository] index in {MANIFEST_FILE}"
                ),
            })?;
        let index = RepositoryIndex::from_path(&index_path)?;

        let compiler = args.compiler.unwrap_or(manifest.package.compiler);
        let options = SolveOptions {
            max_steps: args.max_steps.or(config.solver.max_steps),
        };

        Ok(Self {
            name: manifest.package.name,
            compiler,
            dependencies: manifest.dependencies,
            repo: MemoryRepository::from_index(index, compiler),
            options,
        })
    }

    /// Run the solver, turning a failed search into a user-facing error.
    ///
    /// The selection borrows the chosen records from `self.repo`.
    pub fn solve(&self) -> miette::Result<Selection<'_>> {
        progress::status(
            "Resolving",
            &format!(
                "{} ({} direct, compiler {})",
                self.name,
                self.dependencies.len(),
                self.compiler
            ),
        );

        match solver::select_with(&self.dependencies, &self.repo, &self.options) {
            Ok(selection) => {
                progress::status("Resolved", &format!("{} packages", selection.len()));
                Ok(selection)
            }
            Err(err) if err.budget_exhausted => Err(VsolveError::Resolution {
                message: format!(
                    "gave up after {} steps; raise --max-steps or [solver] max-steps",
                    err.steps
                ),
            }
            .into()),
            Err(err) => {
                let names: Vec<&str> = self.dependencies.keys().map(String::as_str).collect();
                Err(VsolveError::Resolution {
                    message: format!("{err} (requested: {})", names.join(", ")),
                }
                .into())
            }
        }
    }
}

fn locate_manifest() -> miette::Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(VsolveError::Io)?;
    let root = find_ancestor_with(&cwd, MANIFEST_FILE).ok_or_else(|| VsolveError::Manifest {
        message: format!("Could not find {MANIFEST_FILE} in this directory or any parent"),
    })?;
    Ok(root.join(MANIFEST_FILE))
}
