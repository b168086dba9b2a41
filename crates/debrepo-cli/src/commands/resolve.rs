//! Handler for `debrepo resolve`.

use debrepo_core::config::HelperConfig;
use debrepo_resolver::policy::Resolution;
use miette::Result;

pub fn exec(config: &HelperConfig, coordinates: &[String]) -> Result<()> {
    let resolver = super::build_resolver(config)?;

    for coordinate in coordinates {
        let dependency = super::parse_coordinate(coordinate)?.to_dependency();
        match resolver.policy().resolve(&dependency) {
            Resolution::Ignored => println!("{dependency} ignored"),
            Resolution::Unchanged => println!("{dependency} unchanged"),
            Resolution::Rewritten(resolved) => println!("{dependency} -> {resolved}"),
        }
    }
    Ok(())
}
