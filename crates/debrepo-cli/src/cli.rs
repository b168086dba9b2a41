//! CLI argument definitions for debrepo.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "debrepo",
    version,
    about = "Map upstream Maven dependencies onto the system Maven repository",
    long_about = "debrepo applies debian/maven.rules and debian/maven.ignoreRules to Maven \
                  coordinates and resolves the result against the system repository in \
                  /usr/share/maven-repo."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file
    #[arg(long, global = true, default_value = "debrepo.toml")]
    pub config: PathBuf,

    /// Substitution rules file (overrides the configuration)
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Ignore rules file (overrides the configuration)
    #[arg(long, global = true)]
    pub ignore_rules: Option<PathBuf>,

    /// Root of the system Maven repository (overrides the configuration)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Do not append the built-in substitution rules
    #[arg(long, global = true)]
    pub no_default_rules: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show how each coordinate is rewritten
    Resolve {
        /// Coordinates as group:artifact:version[:classifier]
        #[arg(required = true)]
        coordinates: Vec<String>,
    },

    /// Resolve a coordinate and locate its artifact in the system repository
    Fetch {
        /// Coordinate as group:artifact:version[:classifier]
        coordinate: String,
        /// Requested artifact name (defaults to the artifact id)
        #[arg(long)]
        artifact: Option<String>,
        /// Requested artifact type
        #[arg(long = "type", default_value = "jar")]
        kind: String,
        /// Requested artifact extension
        #[arg(long, default_value = "jar")]
        ext: String,
    },

    /// Print the effective rule set
    Rules,
}

pub fn parse() -> Cli {
    Cli::parse()
}
