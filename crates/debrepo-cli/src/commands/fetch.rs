//! Handler for `debrepo fetch`.

use debrepo_core::artifact::{ArtifactRef, DownloadStatus};
use debrepo_core::config::HelperConfig;
use debrepo_core::module::{
    DependencyRequest, ModuleResolver, ModuleRevisionId, CLASSIFIER_ATTRIBUTE,
};
use debrepo_util::errors::DebrepoError;
use miette::Result;

pub fn exec(
    config: &HelperConfig,
    coordinate: &str,
    artifact: Option<&str>,
    kind: &str,
    ext: &str,
) -> Result<()> {
    let coord = super::parse_coordinate(coordinate)?;
    let resolver = super::build_resolver(config)?;

    let mut id = ModuleRevisionId::new(&coord.group_id, &coord.artifact_id, &coord.version);
    if let Some(classifier) = &coord.classifier {
        id = id.with_attribute(CLASSIFIER_ATTRIBUTE, classifier);
    }
    let request = DependencyRequest::new(None, id);

    let Some(module) = resolver.get_dependency(&request)? else {
        return Err(DebrepoError::Resolution {
            message: format!(
                "{coord} not found in {}",
                config.repository.root.display()
            ),
        }
        .into());
    };
    println!("{coord} => {}", module.id);

    let name = artifact.unwrap_or(coord.artifact_id.as_str());
    let requested = ArtifactRef::new(module.id, name, kind, ext);
    let report = resolver.download(&[requested])?;

    let mut missing = 0;
    for r in &report.reports {
        match (&r.status, &r.local_file) {
            (DownloadStatus::Successful, Some(file)) => {
                println!("{} {} {} ({} bytes)", r.artifact, r.status, file.display(), r.size)
            }
            _ => {
                missing += 1;
                println!("{} {} {}", r.artifact, r.status, r.details);
            }
        }
    }

    if missing > 0 {
        return Err(DebrepoError::Resolution {
            message: format!("{missing} artifact(s) of {coord} could not be located"),
        }
        .into());
    }
    Ok(())
}
