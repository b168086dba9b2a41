//! A Maven-2 layout repository on the local filesystem, such as
//! `/usr/share/maven-repo`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use debrepo_core::artifact::{
    ArtifactDownloadReport, ArtifactOrigin, ArtifactRef, DownloadReport, DownloadStatus,
};
use debrepo_core::module::{DependencyRequest, ModuleResolver, ModuleRevisionId, ResolvedModule};
use debrepo_core::DEFAULT_REPOSITORY_ROOT;
use debrepo_util::errors::DebrepoError;

/// A read-only repository of packaged libraries.
#[derive(Debug, Clone)]
pub struct SystemRepository {
    root: PathBuf,
}

impl SystemRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository under [`DEFAULT_REPOSITORY_ROOT`].
    pub fn system() -> Self {
        Self::new(DEFAULT_REPOSITORY_ROOT)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `javax.servlet:servlet-api:3.0` becomes `javax/servlet/servlet-api/3.0`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Directory holding the files of one module revision.
    pub fn module_dir(&self, id: &ModuleRevisionId) -> PathBuf {
        self.root
            .join(Self::coordinate_path(&id.organisation, &id.name, &id.revision))
    }

    /// Path to the module's POM.
    pub fn pom_path(&self, id: &ModuleRevisionId) -> PathBuf {
        self.module_dir(id)
            .join(format!("{}-{}.pom", id.name, id.revision))
    }

    /// Path to a specific artifact file.
    pub fn artifact_path(&self, artifact: &ArtifactRef) -> PathBuf {
        self.module_dir(&artifact.module).join(artifact.file_name())
    }

    fn fetch(&self, artifact: &ArtifactRef) -> ArtifactDownloadReport {
        let started = Instant::now();
        let path = self.artifact_path(artifact);
        let mut report = ArtifactDownloadReport::new(artifact.clone());

        match debrepo_util::fs::file_size(&path) {
            Ok(Some(size)) => {
                report.origin = Some(ArtifactOrigin {
                    is_local: true,
                    location: path.display().to_string(),
                });
                report.local_file = Some(path);
                report.size = size;
                report.status = DownloadStatus::Successful;
            }
            Ok(None) => {
                tracing::debug!("{artifact} not found at {}", path.display());
                report.status = DownloadStatus::NoFile;
                report.details = format!("missing artifact {}", path.display());
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", path.display());
                report.status = DownloadStatus::Failed;
                report.details = e.to_string();
            }
        }

        report.download_time = started.elapsed();
        report
    }
}

impl Default for SystemRepository {
    fn default() -> Self {
        Self::system()
    }
}

impl ModuleResolver for SystemRepository {
    /// Found when the module's POM or main jar is present.
    fn get_dependency(
        &self,
        request: &DependencyRequest,
    ) -> miette::Result<Option<ResolvedModule>> {
        let candidates = [
            self.pom_path(&request.id),
            self.artifact_path(&ArtifactRef::main_jar(request.id.clone())),
        ];
        for path in candidates {
            let found = debrepo_util::fs::file_size(&path).map_err(|e| {
                DebrepoError::Resolution {
                    message: format!("Failed to read {}: {e}", path.display()),
                }
            })?;
            if found.is_some() {
                return Ok(Some(ResolvedModule {
                    id: request.id.clone(),
                    location: path.display().to_string(),
                }));
            }
        }
        tracing::debug!("{} not found in {}", request.id, self.root.display());
        Ok(None)
    }

    fn download(&self, artifacts: &[ArtifactRef]) -> miette::Result<DownloadReport> {
        let mut report = DownloadReport::new();
        for artifact in artifacts {
            report.add(self.fetch(artifact));
        }
        Ok(report)
    }
}
