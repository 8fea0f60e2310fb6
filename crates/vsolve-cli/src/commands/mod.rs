//! Command dispatch and handler modules.

mod solve;
mod tree;
mod why;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let manifest = cli.manifest.as_deref();
    match cli.command {
        Command::Solve { project, json } => solve::exec(manifest, &project, json),
        Command::Tree { project, depth } => tree::exec(manifest, &project, depth),
        Command::Why { package, project } => why::exec(manifest, &project, &package),
    }
}
