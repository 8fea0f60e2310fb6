//! Handler for `vsolve tree`.

use std::path::Path;

use miette::Result;
use vsolve_resolver::graph::ResolvedGraph;

use crate::cli::ProjectArgs;
use crate::project::Project;

pub fn exec(manifest: Option<&Path>, args: &ProjectArgs, depth: Option<u32>) -> Result<()> {
    let project = Project::load(manifest, args)?;
    let selection = project.solve()?;

    let graph = ResolvedGraph::build(&project.name, &project.dependencies, &selection);
    print!("{}", graph.print_tree(depth.map(|d| d as usize)));
    Ok(())
}
