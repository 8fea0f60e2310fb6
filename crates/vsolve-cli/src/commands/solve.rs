//! Handler for `vsolve solve`.

use std::path::Path;

use miette::Result;
use vsolve_resolver::solver;
use vsolve_util::errors::VsolveError;

use crate::cli::ProjectArgs;
use crate::project::Project;

pub fn exec(manifest: Option<&Path>, args: &ProjectArgs, json: bool) -> Result<()> {
    let project = Project::load(manifest, args)?;
    let solution = solver::versions(&project.solve()?);

    if json {
        let out = serde_json::to_string_pretty(&solution).map_err(|e| VsolveError::Generic {
            message: format!("Failed to serialize solution: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    for (name, version) in &solution {
        println!("{name} {version}");
    }
    Ok(())
}
