//! Handler for `debrepo rules`.

use debrepo_core::config::HelperConfig;
use miette::Result;

pub fn exec(config: &HelperConfig) -> Result<()> {
    let resolver = super::build_resolver(config)?;
    print!("{}", resolver.policy().rules());
    Ok(())
}
