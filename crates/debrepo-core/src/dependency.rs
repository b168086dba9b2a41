use std::fmt;

use serde::{Deserialize, Serialize};

/// Default dependency type assumed for every module request.
pub const DEFAULT_TYPE: &str = "jar";

/// Default dependency scope assumed for every module request.
pub const DEFAULT_SCOPE: &str = "compile";

/// The identity of a library reference, as seen by the substitution rules.
///
/// Rewriting never mutates a `Dependency`; rules always build a new value.
/// Equality covers the coordinates, scope and classifier but ignores
/// `optional` and `exclusions`, which are only carried along.
#[derive(Debug, Clone)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub kind: String,
    pub version: String,
    pub scope: String,
    pub optional: bool,
    pub classifier: Option<String>,
    pub exclusions: Vec<Exclusion>,
}

/// A transitive dependency to exclude. Opaque to the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub group: String,
    #[serde(default)]
    pub artifact: Option<String>,
}

impl Dependency {
    /// A non-optional `compile` dependency without classifier or exclusions.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        kind: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            kind: kind.into(),
            version: version.into(),
            scope: DEFAULT_SCOPE.to_string(),
            optional: false,
            classifier: None,
            exclusions: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Set the classifier; an empty classifier is stored as `None`.
    pub fn with_classifier(mut self, classifier: Option<String>) -> Self {
        self.classifier = classifier.filter(|c| !c.trim().is_empty());
        self
    }

    /// The classifier, or `""` when there is none.
    pub fn classifier_or_empty(&self) -> &str {
        self.classifier.as_deref().unwrap_or("")
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.kind == other.kind
            && self.version == other.version
            && self.scope == other.scope
            && self.classifier_or_empty() == other.classifier_or_empty()
    }
}

impl Eq for Dependency {}

/// Compact form `group:artifact:type:version[:classifier]`.
impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.kind, self.version
        )?;
        match self.classifier.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => write!(f, ":{c}"),
            _ => Ok(()),
        }
    }
}

/// Maven coordinates parsed from a shorthand string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl MavenCoordinate {
    /// Parse `"group:artifact:version"` or `"group:artifact:version:classifier"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        match parts.as_slice() {
            [group, artifact, version] => Some(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                version: version.to_string(),
                classifier: None,
            }),
            [group, artifact, version, classifier] => Some(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                version: version.to_string(),
                classifier: Some(classifier.to_string()),
            }),
            _ => None,
        }
    }

    /// The `jar`/`compile` dependency these coordinates denote.
    pub fn to_dependency(&self) -> Dependency {
        Dependency::new(
            &self.group_id,
            &self.artifact_id,
            DEFAULT_TYPE,
            &self.version,
        )
        .with_classifier(self.classifier.clone())
    }
}

impl fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(c) = &self.classifier {
            write!(f, ":{c}")?;
        }
        Ok(())
    }
}
