//! CLI argument definitions for vsolve.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vsolve_core::version::Version;

#[derive(Parser, Debug)]
#[command(
    name = "vsolve",
    version,
    about = "Resolve package version ranges to one exact version per package",
    long_about = "vsolve picks the newest version of every package that satisfies all \
                  direct and transitive version ranges and the compiler version, or \
                  reports that no such set of versions exists."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to Vsolve.toml (defaults to the nearest one above the current directory)
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command that runs a solve.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Repository index to resolve against (overrides [repository] index)
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Compiler version to resolve for (overrides package.compiler)
    #[arg(long)]
    pub compiler: Option<Version>,

    /// Give up after this many resolution steps
    #[arg(long)]
    pub max_steps: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve dependencies and print the chosen versions
    Solve {
        #[command(flatten)]
        project: ProjectArgs,
        /// Print the solution as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Display the resolved dependency tree
    Tree {
        #[command(flatten)]
        project: ProjectArgs,
        /// Maximum depth
        #[arg(long)]
        depth: Option<u32>,
    },

    /// Explain why a package is part of the solution
    Why {
        /// Package name
        package: String,
        #[command(flatten)]
        project: ProjectArgs,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
