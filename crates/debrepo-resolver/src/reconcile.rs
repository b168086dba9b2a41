//! Artifact identity reconciliation for rewritten modules.
//!
//! A dependency may ask for an artifact whose name differs from its module,
//! e.g. module `org.eclipse.jetty.orbit:javax.servlet` with artifact `servlet`.
//! Once the module is rewritten to `javax.servlet:servlet-api`, the system
//! repository only holds `servlet-api-3.0.jar`, yet the host would look for
//! `servlet-3.0.jar`. Artifacts are therefore fetched under their module's
//! name and reported back under the name the caller used.

use std::collections::{HashMap, VecDeque};

use debrepo_core::artifact::{ArtifactDownloadReport, ArtifactOrigin, ArtifactRef, DownloadReport};
use debrepo_core::module::ModuleResolver;
use debrepo_util::errors::DebrepoError;

/// Pairing between the artifacts sent to the host and the ones requested,
/// valid for a single download call.
///
/// Several requested artifacts can collapse onto the same module-named
/// artifact; their originals are handed back in request order.
#[derive(Debug, Default)]
struct ArtifactPairing {
    originals: HashMap<ArtifactRef, VecDeque<ArtifactRef>>,
}

impl ArtifactPairing {
    /// Rename every artifact after its module, returning the pairing and the
    /// renamed artifacts in request order.
    fn build(artifacts: &[ArtifactRef]) -> (Self, Vec<ArtifactRef>) {
        let mut pairing = Self::default();
        let substitutes = artifacts
            .iter()
            .map(|original| {
                let substitute = original.with_name(&original.module.name);
                pairing
                    .originals
                    .entry(substitute.clone())
                    .or_default()
                    .push_back(original.clone());
                substitute
            })
            .collect();
        (pairing, substitutes)
    }

    /// Re-key `report` by the original artifact.
    ///
    /// Location, local file and size are copied only when the fetch resolved
    /// a location; status, details and timing always are.
    fn restore(
        &mut self,
        report: ArtifactDownloadReport,
    ) -> miette::Result<ArtifactDownloadReport> {
        let original = self
            .originals
            .get_mut(&report.artifact)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| DebrepoError::Reconciliation {
                message: format!(
                    "downloaded artifact {} does not correspond to any requested artifact",
                    report.artifact
                ),
            })?;

        let mut restored = ArtifactDownloadReport::new(original);
        if let Some(origin) = report.origin {
            restored.origin = Some(ArtifactOrigin {
                is_local: false,
                location: origin.location,
            });
            restored.local_file = report.local_file;
            restored.size = report.size;
        }
        restored.status = report.status;
        restored.details = report.details;
        restored.download_time = report.download_time;
        Ok(restored)
    }

    fn unclaimed(&self) -> usize {
        self.originals.values().map(VecDeque::len).sum()
    }
}

/// Download `artifacts` from `host` under their module names.
///
/// Reports follow the host's ordering, each keyed by one of the requested
/// artifacts. An empty request returns an empty report without calling the
/// host. A host report that matches no requested artifact is a
/// [`DebrepoError::Reconciliation`].
pub fn download_with_module_names<R: ModuleResolver + ?Sized>(
    host: &R,
    artifacts: &[ArtifactRef],
) -> miette::Result<DownloadReport> {
    if artifacts.is_empty() {
        return Ok(DownloadReport::new());
    }

    let (mut pairing, substitutes) = ArtifactPairing::build(artifacts);
    let report = host.download(&substitutes)?;

    let mut restored = DownloadReport::new();
    for artifact_report in report.reports {
        restored.add(pairing.restore(artifact_report)?);
    }

    let unclaimed = pairing.unclaimed();
    if unclaimed > 0 {
        tracing::warn!("Repository returned no report for {unclaimed} requested artifact(s)");
    }
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    use debrepo_core::artifact::DownloadStatus;
    use debrepo_core::module::{
        DependencyRequest, ModuleRevisionId, ResolvedModule, CLASSIFIER_ATTRIBUTE,
    };

    /// Serves artifacts named in `present`, reporting in reverse order.
    #[derive(Default)]
    struct FakeRepository {
        present: Vec<String>,
        calls: Mutex<Vec<Vec<ArtifactRef>>>,
    }

    impl FakeRepository {
        fn with(present: &[&str]) -> Self {
            Self {
                present: present.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::default(),
            }
        }
    }

    impl ModuleResolver for FakeRepository {
        fn get_dependency(
            &self,
            _request: &DependencyRequest,
        ) -> miette::Result<Option<ResolvedModule>> {
            Ok(None)
        }

        fn download(&self, artifacts: &[ArtifactRef]) -> miette::Result<DownloadReport> {
            self.calls.lock().unwrap().push(artifacts.to_vec());
            let mut report = DownloadReport::new();
            for artifact in artifacts.iter().rev() {
                let mut r = ArtifactDownloadReport::new(artifact.clone());
                r.download_time = Duration::from_millis(3);
                if self.present.contains(&artifact.file_name()) {
                    r.origin = Some(ArtifactOrigin {
                        is_local: true,
                        location: format!("/repo/{}", artifact.file_name()),
                    });
                    r.local_file = Some(PathBuf::from(format!("/repo/{}", artifact.file_name())));
                    r.size = 1234;
                    r.status = DownloadStatus::Successful;
                } else {
                    r.status = DownloadStatus::NoFile;
                    r.details = "missing".to_string();
                }
                report.add(r);
            }
            Ok(report)
        }
    }

    fn servlet_module() -> ModuleRevisionId {
        ModuleRevisionId::new("javax.servlet", "servlet-api", "3.0")
    }

    #[test]
    fn fetches_module_name_and_reports_requested_name() {
        let repo = FakeRepository::with(&["servlet-api-3.0.jar"]);
        let requested = ArtifactRef::new(servlet_module(), "servlet", "orbit", "jar");

        let report = download_with_module_names(&repo, &[requested.clone()]).unwrap();

        let calls = repo.calls.lock().unwrap();
        assert_eq!(calls[0][0].name, "servlet-api");
        assert_eq!(report.len(), 1);
        let r = &report.reports[0];
        assert_eq!(r.artifact, requested);
        assert_eq!(r.status, DownloadStatus::Successful);
        assert_eq!(r.size, 1234);
        assert_eq!(r.local_file, Some(PathBuf::from("/repo/servlet-api-3.0.jar")));
        assert_eq!(r.location(), Some("/repo/servlet-api-3.0.jar"));
        assert!(!r.origin.as_ref().unwrap().is_local);
    }

    #[test]
    fn classifier_survives_renaming() {
        let repo = FakeRepository::with(&["servlet-api-3.0.jar", "servlet-api-3.0-sources.jar"]);
        let requested = ArtifactRef::new(servlet_module(), "servlet", "source", "jar")
            .with_attribute(CLASSIFIER_ATTRIBUTE, "sources");

        let report = download_with_module_names(&repo, &[requested.clone()]).unwrap();

        let calls = repo.calls.lock().unwrap();
        assert_eq!(calls[0][0].file_name(), "servlet-api-3.0-sources.jar");
        let r = &report.reports[0];
        assert_eq!(r.artifact, requested);
        assert_eq!(r.artifact.classifier(), Some("sources"));
        assert_eq!(r.location(), Some("/repo/servlet-api-3.0-sources.jar"));
    }

    #[test]
    fn failure_keeps_status_details_and_time_only() {
        let repo = FakeRepository::with(&[]);
        let requested = ArtifactRef::new(servlet_module(), "servlet", "orbit", "jar");
        let report = download_with_module_names(&repo, &[requested.clone()]).unwrap();
        let r = &report.reports[0];
        assert_eq!(r.artifact, requested);
        assert_eq!(r.status, DownloadStatus::NoFile);
        assert_eq!(r.details, "missing");
        assert_eq!(r.download_time, Duration::from_millis(3));
        assert!(r.origin.is_none());
        assert!(r.local_file.is_none());
        assert_eq!(r.size, 0);
    }

    #[test]
    fn every_requested_artifact_reported_exactly_once() {
        let repo = FakeRepository::with(&["servlet-api-3.0.jar"]);
        let requested = vec![
            ArtifactRef::new(servlet_module(), "servlet", "orbit", "jar"),
            ArtifactRef::new(servlet_module(), "servlet-api", "jar", "jar"),
            ArtifactRef::new(servlet_module(), "javax.servlet", "jar", "jar"),
            ArtifactRef::main_jar(ModuleRevisionId::new("asm", "asm", "4.x")),
        ];

        let report = download_with_module_names(&repo, &requested).unwrap();

        assert_eq!(report.len(), requested.len());
        for original in &requested {
            let hits = report
                .reports
                .iter()
                .filter(|r| &r.artifact == original)
                .count();
            assert_eq!(hits, 1, "{original} reported {hits} times");
        }
    }

    #[test]
    fn follows_repository_report_order() {
        let repo = FakeRepository::with(&[]);
        let first = ArtifactRef::main_jar(ModuleRevisionId::new("a", "a", "1"));
        let second = ArtifactRef::main_jar(ModuleRevisionId::new("b", "b", "1"));
        let report = download_with_module_names(&repo, &[first.clone(), second.clone()]).unwrap();
        assert_eq!(report.reports[0].artifact, second);
        assert_eq!(report.reports[1].artifact, first);
    }

    #[test]
    fn empty_request_skips_repository() {
        let repo = FakeRepository::with(&[]);
        let report = download_with_module_names(&repo, &[]).unwrap();
        assert!(report.is_empty());
        assert!(repo.calls.lock().unwrap().is_empty());
    }

    /// Reports an artifact nobody asked for.
    struct StrayRepository;

    impl ModuleResolver for StrayRepository {
        fn get_dependency(
            &self,
            _request: &DependencyRequest,
        ) -> miette::Result<Option<ResolvedModule>> {
            Ok(None)
        }

        fn download(&self, _artifacts: &[ArtifactRef]) -> miette::Result<DownloadReport> {
            let mut report = DownloadReport::new();
            report.add(ArtifactDownloadReport::new(ArtifactRef::main_jar(
                ModuleRevisionId::new("stray", "stray", "1"),
            )));
            Ok(report)
        }
    }

    #[test]
    fn unknown_report_is_reconciliation_error() {
        let requested = ArtifactRef::main_jar(servlet_module());
        let err = download_with_module_names(&StrayRepository, &[requested]).unwrap_err();
        assert!(
            err.to_string().contains("Artifact reconciliation failed"),
            "got: {err}"
        );
    }
}
