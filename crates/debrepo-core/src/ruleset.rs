//! Ordered rule sets loaded from `debian/maven.rules` style files.

use std::fmt;
use std::path::Path;

use debrepo_util::errors::DebrepoError;

use crate::config::RulesConfig;
use crate::rule::DependencyRule;

/// Keeps the version of Maven plugins untouched.
pub const KEEP_PLUGIN_VERSION_RULE: &str = "org.apache.maven.plugins * maven-plugin * * *";

/// Maps every remaining version to the generic `debian` version.
pub const TO_DEBIAN_VERSION_RULE: &str = "* * * s/.*/debian/ * *";

/// The two kinds of rules a [`RuleSet`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RulesType {
    /// Substitution rules: the first matching rule rewrites the dependency.
    Rules,
    /// Ignore rules: any matching rule suppresses the dependency.
    Ignore,
}

impl fmt::Display for RulesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules => f.write_str("rules"),
            Self::Ignore => f.write_str("ignore-rules"),
        }
    }
}

/// Substitution and ignore rules, each kept in declaration order.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<DependencyRule>,
    ignore_rules: Vec<DependencyRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the rule files named in `config`, then append the default rules
    /// when enabled.
    pub fn load(config: &RulesConfig) -> miette::Result<Self> {
        let mut set = Self::new();
        set.add_rules_from_file(RulesType::Rules, &config.rules)?;
        set.add_rules_from_file(RulesType::Ignore, &config.ignore_rules)?;
        if config.defaults {
            set.add_default_rules()?;
        }
        tracing::debug!(
            "Loaded {} substitution rules and {} ignore rules",
            set.rules.len(),
            set.ignore_rules.len()
        );
        Ok(set)
    }

    /// The rules of one kind, in declaration order.
    pub fn get(&self, kind: RulesType) -> &[DependencyRule] {
        match kind {
            RulesType::Rules => &self.rules,
            RulesType::Ignore => &self.ignore_rules,
        }
    }

    pub fn add(&mut self, kind: RulesType, rule: DependencyRule) {
        match kind {
            RulesType::Rules => self.rules.push(rule),
            RulesType::Ignore => self.ignore_rules.push(rule),
        }
    }

    /// Parse rules from text, one per line. A `#` at the start of a line or
    /// after whitespace starts a comment; inside a token it is kept.
    ///
    /// `origin` names the source in error messages. Returns the number of rules added.
    pub fn add_rules_from_str(
        &mut self,
        kind: RulesType,
        origin: &str,
        text: &str,
    ) -> miette::Result<usize> {
        let mut parsed = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }
            let rule = DependencyRule::parse(line)
                .map_err(|e| e.wrap_err(format!("{origin}:{}: invalid rule `{line}`", idx + 1)))?;
            parsed.push(rule);
        }

        let count = parsed.len();
        for rule in parsed {
            self.add(kind, rule);
        }
        Ok(count)
    }

    /// Parse a rule file. A missing file adds no rules.
    pub fn add_rules_from_file(&mut self, kind: RulesType, path: &Path) -> miette::Result<usize> {
        let Some(text) = debrepo_util::fs::read_optional(path).map_err(DebrepoError::Io)? else {
            return Ok(0);
        };
        let count = self.add_rules_from_str(kind, &path.display().to_string(), &text)?;
        tracing::debug!("Read {count} {kind} from {}", path.display());
        Ok(count)
    }

    /// Append the built-in substitution rules after any loaded ones.
    pub fn add_default_rules(&mut self) -> miette::Result<()> {
        for definition in [KEEP_PLUGIN_VERSION_RULE, TO_DEBIAN_VERSION_RULE] {
            self.add(RulesType::Rules, DependencyRule::parse(definition)?);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.ignore_rules.is_empty()
    }
}

fn strip_comment(line: &str) -> &str {
    let mut prev = None;
    for (idx, c) in line.char_indices() {
        if c == '#' && prev.map_or(true, char::is_whitespace) {
            return &line[..idx];
        }
        prev = Some(c);
    }
    line
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in [RulesType::Rules, RulesType::Ignore] {
            writeln!(f, "{kind}:")?;
            for rule in self.get(kind) {
                writeln!(f, "  {rule}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let mut set = RuleSet::new();
        let added = set
            .add_rules_from_str(
                RulesType::Rules,
                "maven.rules",
                "junit junit * s/4\\..*/4.x/\n# comment\n\nasm asm * s/.*/4.x/ # trailing\n",
            )
            .unwrap();
        assert_eq!(added, 2);
        let rules = set.get(RulesType::Rules);
        assert_eq!(rules[0].to_string(), "junit junit * s/4\\..*/4.x/ * *");
        assert_eq!(rules[1].to_string(), "asm asm * s/.*/4.x/ * *");
        assert!(set.get(RulesType::Ignore).is_empty());
    }

    #[test]
    fn hash_inside_a_token_is_not_a_comment() {
        let mut set = RuleSet::new();
        let added = set
            .add_rules_from_str(
                RulesType::Rules,
                "maven.rules",
                "#junit junit\ncom.example lib * s/1#(.*)/$1/ # build tag\n",
            )
            .unwrap();
        assert_eq!(added, 1);
        let rule = &set.get(RulesType::Rules)[0];
        assert_eq!(rule.to_string(), "com.example lib * s/1#(.*)/$1/ * *");
    }

    #[test]
    fn error_names_origin_and_line() {
        let mut set = RuleSet::new();
        let err = set
            .add_rules_from_str(RulesType::Ignore, "maven.ignoreRules", "junit\ns/(/x/\n")
            .unwrap_err();
        assert!(err.to_string().contains("maven.ignoreRules:2"), "got: {err}");
        assert!(set.is_empty(), "no partial rule set is kept");
    }

    #[test]
    fn defaults_are_appended_last() {
        let mut set = RuleSet::new();
        set.add_rules_from_str(RulesType::Rules, "inline", "junit junit").unwrap();
        set.add_default_rules().unwrap();
        let rules: Vec<String> = set
            .get(RulesType::Rules)
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(
            rules,
            vec![
                "junit junit * * * *".to_string(),
                KEEP_PLUGIN_VERSION_RULE.to_string(),
                TO_DEBIAN_VERSION_RULE.to_string(),
            ]
        );
    }

    #[test]
    fn display_lists_both_kinds() {
        let mut set = RuleSet::new();
        set.add_rules_from_str(RulesType::Ignore, "inline", "org.jacoco").unwrap();
        let text = set.to_string();
        assert_eq!(text, "rules:\nignore-rules:\n  org.jacoco * * * * *\n");
    }
}
