//! Substitution rules: parsing, matching and applying a single rule.
//!
//! A rule has one slot per dependency field, in the order
//! `group artifact type version scope classifier`. Each slot is `*`, a
//! literal, a glob such as `org.apache.*`, or a sed-like substitution
//! `s/regex/replacement/`. The same slot both tests its field and computes
//! the rewritten value.

use std::fmt;
use std::str::FromStr;

use debrepo_util::errors::DebrepoError;
use regex::Regex;

use crate::dependency::Dependency;

/// Number of slots in a fully written rule.
pub const SLOT_COUNT: usize = 6;

/// One position of a rule.
#[derive(Debug, Clone)]
pub enum Slot {
    /// `*`: matches anything, keeps the original value.
    Wildcard,
    /// Matches the exact value.
    Literal(String),
    /// Text with `*` placeholders: matches like a shell glob, keeps the original value.
    Glob { source: String, pattern: Regex },
    /// `s/regex/replacement/`: matches when the whole value matches `regex`,
    /// rewrites it with `replacement`.
    Substitute {
        source: String,
        pattern: Regex,
        replacement: String,
    },
}

impl Slot {
    pub fn parse(token: &str) -> miette::Result<Self> {
        if token == "*" {
            return Ok(Self::Wildcard);
        }

        if let Some(body) = token.strip_prefix("s/") {
            let Some((pattern, rest)) = body.split_once('/') else {
                return Err(config_error(format!(
                    "substitution `{token}` must have the form s/regex/replacement/"
                )));
            };
            if pattern.is_empty() {
                return Err(config_error(format!(
                    "substitution `{token}` has an empty regex"
                )));
            }
            let replacement = rest.strip_suffix('/').unwrap_or(rest);
            return Ok(Self::Substitute {
                source: token.to_string(),
                pattern: anchored(pattern, token)?,
                replacement: normalize_replacement(replacement),
            });
        }

        if token.contains('*') {
            let glob = token
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            return Ok(Self::Glob {
                source: token.to_string(),
                pattern: anchored(&glob, token)?,
            });
        }

        Ok(Self::Literal(token.to_string()))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Literal(literal) => literal == value,
            Self::Glob { pattern, .. } | Self::Substitute { pattern, .. } => {
                pattern.is_match(value)
            }
        }
    }

    /// Rewrite `value`. Only meaningful when [`Slot::matches`] holds.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Wildcard | Self::Glob { .. } => value.to_string(),
            Self::Literal(literal) => literal.clone(),
            Self::Substitute {
                pattern,
                replacement,
                ..
            } => pattern.replace(value, replacement.as_str()).into_owned(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Literal(literal) => f.write_str(literal),
            Self::Glob { source, .. } | Self::Substitute { source, .. } => f.write_str(source),
        }
    }
}

/// A parsed rule, e.g. `s/org.eclipse.jetty.orbit/javax.servlet/ s/javax.servlet/servlet-api/`.
#[derive(Debug, Clone)]
pub struct DependencyRule {
    pub group: Slot,
    pub artifact: Slot,
    pub kind: Slot,
    pub version: Slot,
    pub scope: Slot,
    pub classifier: Slot,
}

impl DependencyRule {
    /// Parse a rule definition. Missing trailing slots default to `*`.
    pub fn parse(definition: &str) -> miette::Result<Self> {
        let tokens: Vec<&str> = definition.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(config_error("empty rule".to_string()));
        }
        if tokens.len() > SLOT_COUNT {
            return Err(config_error(format!(
                "rule `{}` has {} slots, at most {SLOT_COUNT} are allowed",
                definition.trim(),
                tokens.len()
            )));
        }

        let mut slots = tokens
            .into_iter()
            .map(Slot::parse)
            .collect::<miette::Result<Vec<_>>>()?
            .into_iter();
        let mut next = || slots.next().unwrap_or(Slot::Wildcard);

        Ok(Self {
            group: next(),
            artifact: next(),
            kind: next(),
            version: next(),
            scope: next(),
            classifier: next(),
        })
    }

    /// True iff every slot matches its field. An absent classifier matches as `""`.
    pub fn matches(&self, dependency: &Dependency) -> bool {
        self.group.matches(&dependency.group_id)
            && self.artifact.matches(&dependency.artifact_id)
            && self.kind.matches(&dependency.kind)
            && self.version.matches(&dependency.version)
            && self.scope.matches(&dependency.scope)
            && self.classifier.matches(dependency.classifier_or_empty())
    }

    /// Build the rewritten dependency. `optional` and `exclusions` are carried over.
    pub fn apply(&self, dependency: &Dependency) -> Dependency {
        let classifier = self.classifier.apply(dependency.classifier_or_empty());
        Dependency {
            group_id: self.group.apply(&dependency.group_id),
            artifact_id: self.artifact.apply(&dependency.artifact_id),
            kind: self.kind.apply(&dependency.kind),
            version: self.version.apply(&dependency.version),
            scope: self.scope.apply(&dependency.scope),
            optional: dependency.optional,
            classifier: None,
            exclusions: dependency.exclusions.clone(),
        }
        .with_classifier(Some(classifier))
    }
}

impl FromStr for DependencyRule {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DependencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.group, self.artifact, self.kind, self.version, self.scope, self.classifier
        )
    }
}

fn config_error(message: String) -> miette::Report {
    DebrepoError::Configuration { message }.into()
}

/// Compile `pattern` so that it must match the whole value.
fn anchored(pattern: &str, token: &str) -> miette::Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| config_error(format!("invalid regex in `{token}`: {e}")))
}

/// Rewrite `\1`, `$1` and `${1}` group references to the `${1}` form the
/// regex crate expands. Every other `$`, and `\$`, stays a literal dollar.
fn normalize_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' | '\\' if chars.peek().is_some_and(char::is_ascii_digit) => {
                let group = take_digits(&mut chars);
                out.push_str(&format!("${{{group}}}"));
            }
            '$' if chars.peek() == Some(&'{') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                let group = take_digits(&mut lookahead);
                if !group.is_empty() && lookahead.next() == Some('}') {
                    out.push_str(&format!("${{{group}}}"));
                    chars = lookahead;
                } else {
                    out.push_str("$$");
                }
            }
            '\\' if chars.peek() == Some(&'$') => {
                chars.next();
                out.push_str("$$");
            }
            '$' => out.push_str("$$"),
            _ => out.push(c),
        }
    }
    out
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&d) = chars.peek() {
        if !d.is_ascii_digit() {
            break;
        }
        digits.push(d);
        chars.next();
    }
    digits
}
