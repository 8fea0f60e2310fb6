//! Handler for `vsolve why`.

use std::path::Path;

use miette::Result;
use vsolve_resolver::graph::ResolvedGraph;
use vsolve_util::progress;

use crate::cli::ProjectArgs;
use crate::project::Project;

pub fn exec(manifest: Option<&Path>, args: &ProjectArgs, package: &str) -> Result<()> {
    let project = Project::load(manifest, args)?;
    let selection = project.solve()?;

    let graph = ResolvedGraph::build(&project.name, &project.dependencies, &selection);

    let (Some(idx), Some(path)) = (graph.find(package), graph.find_path(package)) else {
        progress::status_warn("Missing", &format!("'{package}' is not part of the solution"));
        return Ok(());
    };

    println!("{}", graph.node(idx));
    println!(
        "  path: {}",
        path.iter()
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    println!("  required by:");
    for (dependent, edge) in graph.dependents_of(idx) {
        println!("    {} ({})", graph.node(dependent), edge.constraint);
    }
    Ok(())
}
