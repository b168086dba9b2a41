//! Artifact references and download reports.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::module::{ModuleRevisionId, CLASSIFIER_ATTRIBUTE};

/// A file-level artifact requested for a module.
///
/// `name` is usually the module name but may differ, e.g. the
/// `javax.servlet` module asking for an artifact named `servlet`.
/// `extra_attributes` holds the artifact's own attributes, such as the
/// `sources` classifier of a source jar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    pub module: ModuleRevisionId,
    pub name: String,
    pub kind: String,
    pub ext: String,
    pub extra_attributes: BTreeMap<String, String>,
}

impl ArtifactRef {
    pub fn new(
        module: ModuleRevisionId,
        name: impl Into<String>,
        kind: impl Into<String>,
        ext: impl Into<String>,
    ) -> Self {
        Self {
            module,
            name: name.into(),
            kind: kind.into(),
            ext: ext.into(),
            extra_attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attributes.insert(key.into(), value.into());
        self
    }

    /// The classifier of this artifact, falling back to its module's.
    pub fn classifier(&self) -> Option<&str> {
        self.extra_attributes
            .get(CLASSIFIER_ATTRIBUTE)
            .map(String::as_str)
            .or_else(|| self.module.attribute(CLASSIFIER_ATTRIBUTE))
            .filter(|c| !c.is_empty())
    }

    /// The module's main `jar` artifact.
    pub fn main_jar(module: ModuleRevisionId) -> Self {
        let name = module.name.clone();
        Self::new(module, name, "jar", "jar")
    }

    /// A copy of this reference with another artifact name. Attributes are kept.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// File name in a Maven layout: `name-revision[-classifier].ext`.
    pub fn file_name(&self) -> String {
        match self.classifier() {
            Some(c) => format!("{}-{}-{c}.{}", self.name, self.module.revision, self.ext),
            None => format!("{}-{}.{}", self.name, self.module.revision, self.ext),
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.module, self.name)?;
        if let Some(c) = self.extra_attributes.get(CLASSIFIER_ATTRIBUTE) {
            write!(f, "-{c}")?;
        }
        write!(f, ".{}({})", self.ext, self.kind)
    }
}

/// Where a downloaded artifact came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOrigin {
    pub is_local: bool,
    pub location: String,
}

/// Outcome of fetching one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Successful,
    Failed,
    /// The repository has no such file.
    NoFile,
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Successful => f.write_str("successful"),
            Self::Failed => f.write_str("failed"),
            Self::NoFile => f.write_str("no file"),
        }
    }
}

/// Result of fetching one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDownloadReport {
    pub artifact: ArtifactRef,
    pub origin: Option<ArtifactOrigin>,
    pub local_file: Option<PathBuf>,
    pub size: u64,
    pub status: DownloadStatus,
    pub details: String,
    pub download_time: Duration,
}

impl ArtifactDownloadReport {
    /// An empty report for `artifact`, marked as failed until filled in.
    pub fn new(artifact: ArtifactRef) -> Self {
        Self {
            artifact,
            origin: None,
            local_file: None,
            size: 0,
            status: DownloadStatus::Failed,
            details: String::new(),
            download_time: Duration::ZERO,
        }
    }

    /// The resolved origin location, if the fetch found the artifact anywhere.
    pub fn location(&self) -> Option<&str> {
        self.origin.as_ref().map(|o| o.location.as_str())
    }
}

/// Per-artifact results of one download call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub reports: Vec<ArtifactDownloadReport>,
}

impl DownloadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, report: ArtifactDownloadReport) {
        self.reports.push(report);
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// The report for `artifact`, if any.
    pub fn find(&self, artifact: &ArtifactRef) -> Option<&ArtifactDownloadReport> {
        self.reports.iter().find(|r| &r.artifact == artifact)
    }
}
