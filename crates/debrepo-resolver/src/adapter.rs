//! Module resolver that rewrites dependency requests before handing them to
//! the host repository.

use std::borrow::Cow;
use std::sync::Arc;

use debrepo_core::artifact::{ArtifactRef, DownloadReport};
use debrepo_core::config::RulesConfig;
use debrepo_core::dependency::{Dependency, DEFAULT_TYPE};
use debrepo_core::module::{
    DependencyRequest, ModuleResolver, ModuleRevisionId, ResolvedModule, CLASSIFIER_ATTRIBUTE,
};
use debrepo_core::ruleset::RuleSet;

use crate::policy::{Resolution, ResolutionPolicy};
use crate::reconcile;

/// Organisation of the placeholder module requested for ignored dependencies.
pub const IGNORED_ORGANISATION: &str = "org.debian.maven";

/// Name of the placeholder module requested for ignored dependencies.
pub const IGNORED_NAME: &str = "debrepo-ignored-dependency";

/// Revision of the placeholder module requested for ignored dependencies.
pub const IGNORED_REVISION: &str = "1.0";

/// The request forwarded in place of an ignored dependency.
///
/// No repository ships this module, so the host reports it as not found and
/// the build goes on without the edge.
pub fn ignored_placeholder() -> DependencyRequest {
    DependencyRequest {
        parent: None,
        id: ModuleRevisionId::new(IGNORED_ORGANISATION, IGNORED_NAME, IGNORED_REVISION),
        force: false,
        changing: false,
        transitive: false,
    }
}

/// The rule engine's view of a request: always a `jar` in `compile` scope.
///
/// The branch and any extra attribute other than the classifier are not seen
/// by the rules.
pub fn to_dependency(request: &DependencyRequest) -> Dependency {
    Dependency::new(
        &request.id.organisation,
        &request.id.name,
        DEFAULT_TYPE,
        &request.id.revision,
    )
    .with_classifier(request.id.attribute(CLASSIFIER_ATTRIBUTE).map(str::to_string))
}

/// Build the request for a rewritten dependency.
///
/// Group, artifact, version and classifier come from `resolved`; the parent
/// descriptor, branch and force/changing/transitive flags from `original`.
fn rewritten_request(original: &DependencyRequest, resolved: &Dependency) -> DependencyRequest {
    let mut id = ModuleRevisionId::new(
        &resolved.group_id,
        &resolved.artifact_id,
        &resolved.version,
    )
    .with_branch(original.id.branch.clone());
    if let Some(classifier) = resolved.classifier.as_deref().filter(|c| !c.is_empty()) {
        id = id.with_attribute(CLASSIFIER_ATTRIBUTE, classifier);
    }

    DependencyRequest {
        parent: original.parent.clone(),
        id,
        force: original.force,
        changing: original.changing,
        transitive: original.transitive,
    }
}

/// Wraps a host [`ModuleResolver`], resolving dependencies against the
/// packaged equivalents named by the substitution rules.
#[derive(Debug, Clone)]
pub struct DebianDependencyResolver<R> {
    inner: R,
    policy: ResolutionPolicy,
}

impl<R: ModuleResolver> DebianDependencyResolver<R> {
    pub fn new(inner: R, rules: Arc<RuleSet>) -> Self {
        Self {
            inner,
            policy: ResolutionPolicy::new(rules),
        }
    }

    /// Load the rule files named in `config` and wrap `inner`.
    pub fn from_config(inner: R, config: &RulesConfig) -> miette::Result<Self> {
        tracing::info!("Loading the Maven rules...");
        let rules = RuleSet::load(config)?;
        Ok(Self::new(inner, Arc::new(rules)))
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// The request to forward for `request`.
    ///
    /// Borrowed when nothing changes so the host sees the caller's own request.
    pub fn effective_request<'a>(
        &self,
        request: &'a DependencyRequest,
    ) -> Cow<'a, DependencyRequest> {
        let dependency = to_dependency(request);
        match self.policy.resolve(&dependency) {
            Resolution::Ignored => {
                tracing::info!("Ignoring {dependency}");
                Cow::Owned(ignored_placeholder())
            }
            Resolution::Unchanged => {
                tracing::info!("Passing through {dependency}");
                Cow::Borrowed(request)
            }
            Resolution::Rewritten(resolved) => {
                tracing::info!("Replacing {dependency}  ->  {resolved}");
                Cow::Owned(rewritten_request(request, &resolved))
            }
        }
    }
}

impl<R: ModuleResolver> ModuleResolver for DebianDependencyResolver<R> {
    fn get_dependency(
        &self,
        request: &DependencyRequest,
    ) -> miette::Result<Option<ResolvedModule>> {
        let effective = self.effective_request(request);
        self.inner.get_dependency(&effective)
    }

    /// Fetch each artifact under its module's name, reporting it under the
    /// name that was asked for.
    fn download(&self, artifacts: &[ArtifactRef]) -> miette::Result<DownloadReport> {
        reconcile::download_with_module_names(&self.inner, artifacts)
    }
}
