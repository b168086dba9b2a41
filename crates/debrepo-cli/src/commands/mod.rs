//! Command dispatch and handler modules.

mod fetch;
mod resolve;
mod rules;

use debrepo_core::config::HelperConfig;
use debrepo_maven::repository::SystemRepository;
use debrepo_resolver::adapter::DebianDependencyResolver;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Resolve { coordinates } => resolve::exec(&config, &coordinates),
        Command::Fetch {
            coordinate,
            artifact,
            kind,
            ext,
        } => fetch::exec(&config, &coordinate, artifact.as_deref(), &kind, &ext),
        Command::Rules => rules::exec(&config),
    }
}

/// Load the configuration file and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<HelperConfig> {
    let mut config = HelperConfig::load(&cli.config)?;
    if let Some(rules) = &cli.rules {
        config.rules.rules = rules.clone();
    }
    if let Some(ignore_rules) = &cli.ignore_rules {
        config.rules.ignore_rules = ignore_rules.clone();
    }
    if let Some(repo) = &cli.repo {
        config.repository.root = repo.clone();
    }
    if cli.no_default_rules {
        config.rules.defaults = false;
    }
    Ok(config)
}

/// The rewriting resolver over the configured system repository.
fn build_resolver(config: &HelperConfig) -> Result<DebianDependencyResolver<SystemRepository>> {
    let repository = SystemRepository::new(&config.repository.root);
    DebianDependencyResolver::from_config(repository, &config.rules)
}

fn parse_coordinate(s: &str) -> Result<debrepo_core::dependency::MavenCoordinate> {
    debrepo_core::dependency::MavenCoordinate::parse(s).ok_or_else(|| {
        debrepo_util::errors::DebrepoError::Generic {
            message: format!(
                "Invalid coordinate `{s}`, expected group:artifact:version[:classifier]"
            ),
        }
        .into()
    })
}
