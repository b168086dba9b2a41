//! Ignore, pass-through and first-match substitution policy.

use std::sync::Arc;

use debrepo_core::dependency::Dependency;
use debrepo_core::ruleset::{RuleSet, RulesType};

/// Version assigned to packaged libraries by the default rules.
pub const DEBIAN_VERSION: &str = "debian";

/// Verdict for one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An ignore rule matched; the dependency must be dropped.
    Ignored,
    /// No substitution applies; use the dependency as it is.
    Unchanged,
    /// A substitution rule matched and produced this dependency.
    Rewritten(Dependency),
}

impl Resolution {
    /// `None` when ignored, otherwise the dependency to use.
    pub fn into_dependency(self, original: Dependency) -> Option<Dependency> {
        match self {
            Self::Ignored => None,
            Self::Unchanged => Some(original),
            Self::Rewritten(dependency) => Some(dependency),
        }
    }
}

/// Whether `version` was already normalized: a `4.x` style range or `debian`.
///
/// Transitive dependencies reach the resolver with concrete versions just like
/// direct ones, so a generic version is the only sign that a dependency was
/// already rewritten and must keep its version.
pub fn is_generic_version(version: &str) -> bool {
    version.ends_with(".x") || version == DEBIAN_VERSION
}

/// Applies a shared, read-only [`RuleSet`] to dependencies.
#[derive(Debug, Clone)]
pub struct ResolutionPolicy {
    rules: Arc<RuleSet>,
}

impl ResolutionPolicy {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Decide what to do with `dependency`.
    ///
    /// Ignore rules win over everything, including the generic version check.
    /// Otherwise the first matching substitution rule in declaration order
    /// applies, unless the version is generic.
    pub fn resolve(&self, dependency: &Dependency) -> Resolution {
        if self
            .rules
            .get(RulesType::Ignore)
            .iter()
            .any(|rule| rule.matches(dependency))
        {
            return Resolution::Ignored;
        }

        if is_generic_version(&dependency.version) {
            return Resolution::Unchanged;
        }

        self.rules
            .get(RulesType::Rules)
            .iter()
            .find(|rule| rule.matches(dependency))
            .map(|rule| Resolution::Rewritten(rule.apply(dependency)))
            .unwrap_or(Resolution::Unchanged)
    }
}
