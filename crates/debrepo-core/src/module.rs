//! Module-level types exchanged with the host repository.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::artifact::{ArtifactRef, DownloadReport};

/// Extra attribute carrying a module's classifier.
pub const CLASSIFIER_ATTRIBUTE: &str = "classifier";

/// Coordinates of one revision of a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleRevisionId {
    pub organisation: String,
    pub name: String,
    pub branch: Option<String>,
    pub revision: String,
    pub extra_attributes: BTreeMap<String, String>,
}

impl ModuleRevisionId {
    pub fn new(
        organisation: impl Into<String>,
        name: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            organisation: organisation.into(),
            name: name.into(),
            branch: None,
            revision: revision.into(),
            extra_attributes: BTreeMap::new(),
        }
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an extra attribute, e.g. [`CLASSIFIER_ATTRIBUTE`].
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.extra_attributes.get(key).map(String::as_str)
    }
}

impl fmt::Display for ModuleRevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.organisation, self.name)?;
        if let Some(branch) = &self.branch {
            write!(f, "#{branch}")?;
        }
        write!(f, ";{}", self.revision)
    }
}

/// The descriptor of the module that declares a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub id: ModuleRevisionId,
}

/// A request to resolve one dependency edge.
///
/// `parent` is the owning module's descriptor, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRequest {
    pub parent: Option<Arc<ModuleDescriptor>>,
    pub id: ModuleRevisionId,
    pub force: bool,
    pub changing: bool,
    pub transitive: bool,
}

impl DependencyRequest {
    /// A transitive, non-forced, non-changing request.
    pub fn new(parent: Option<Arc<ModuleDescriptor>>, id: ModuleRevisionId) -> Self {
        Self {
            parent,
            id,
            force: false,
            changing: false,
            transitive: true,
        }
    }
}

/// A module found by the host repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub id: ModuleRevisionId,
    /// Where the module descriptor or main artifact was found.
    pub location: String,
}

/// The host repository's extension points: module lookup and artifact download.
///
/// Implementations must be usable from several threads at once when the host
/// resolves in parallel; the lookups themselves are synchronous.
pub trait ModuleResolver {
    /// Resolve a dependency edge. `Ok(None)` means the module was not found.
    fn get_dependency(&self, request: &DependencyRequest)
        -> miette::Result<Option<ResolvedModule>>;

    /// Fetch artifacts, reporting one result per artifact in the repository's own order.
    fn download(&self, artifacts: &[ArtifactRef]) -> miette::Result<DownloadReport>;
}
