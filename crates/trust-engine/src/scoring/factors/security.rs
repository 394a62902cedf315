//! Security practices inferred from repository metadata.
//!
//! The score starts from a base and each rule in an ordered [`SecurityRuleSet`]
//! may add points. Rules only see repository metadata, so the result is a
//! heuristic signal rather than an audit.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{FactorBuilder, FactorKind, TrustFactor};
use crate::scoring::domain::{count_recent, Repository};

pub const SECURITY_BASE_SCORE: f64 = 50.0;

/// Points and explanation produced by a rule that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFinding {
    pub points: f64,
    pub evidence: String,
}

/// Predicate over repository metadata contributing to the security factor.
pub trait SecurityRule: Send + Sync {
    fn name(&self) -> &str;

    /// Returns a finding when the rule matches, `None` otherwise.
    fn evaluate(&self, repositories: &[Repository], as_of: DateTime<Utc>) -> Option<RuleFinding>;

    /// Suggestion surfaced when the rule does not match.
    fn improvement(&self) -> Option<&str> {
        None
    }
}

/// Matches repositories whose name or description mentions a keyword.
pub struct SecurityKeywordRule {
    keywords: Vec<String>,
    points: f64,
}

impl SecurityKeywordRule {
    pub fn new<I, S>(keywords: I, points: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.into().to_ascii_lowercase())
                .collect(),
            points,
        }
    }

    pub fn standard() -> Self {
        Self::new(["security", "audit", "test", "ci", "cd"], 30.0)
    }

    fn matches(&self, repository: &Repository) -> Option<&str> {
        let name = repository.name.to_ascii_lowercase();
        let description = repository
            .description
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase();

        self.keywords
            .iter()
            .find(|keyword| name.contains(keyword.as_str()) || description.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

impl SecurityRule for SecurityKeywordRule {
    fn name(&self) -> &str {
        "security-keywords"
    }

    fn evaluate(&self, repositories: &[Repository], _as_of: DateTime<Utc>) -> Option<RuleFinding> {
        repositories.iter().find_map(|repository| {
            self.matches(repository).map(|keyword| RuleFinding {
                points: self.points,
                evidence: format!(
                    "Repository '{}' references '{keyword}' practices",
                    repository.name
                ),
            })
        })
    }

    fn improvement(&self) -> Option<&str> {
        Some("Add tests, CI pipelines and security audits to your projects")
    }
}

/// Matches when strictly more than half of the repositories were updated recently.
pub struct MaintenanceRule {
    window_days: i64,
    points: f64,
}

impl MaintenanceRule {
    pub fn new(window_days: i64, points: f64) -> Self {
        Self {
            window_days,
            points,
        }
    }

    pub fn standard() -> Self {
        Self::new(60, 20.0)
    }
}

impl SecurityRule for MaintenanceRule {
    fn name(&self) -> &str {
        "active-maintenance"
    }

    fn evaluate(&self, repositories: &[Repository], as_of: DateTime<Utc>) -> Option<RuleFinding> {
        let recent = count_recent(
            repositories,
            |repository| repository.updated_at,
            as_of,
            self.window_days,
        );

        (recent * 2 > repositories.len()).then(|| RuleFinding {
            points: self.points,
            evidence: format!(
                "{recent} of {} repositories updated in the last {} days",
                repositories.len(),
                self.window_days
            ),
        })
    }

    fn improvement(&self) -> Option<&str> {
        Some("Keep dependencies and repositories patched with regular updates")
    }
}

/// Ordered list of rules evaluated on top of the base score.
#[derive(Clone)]
pub struct SecurityRuleSet {
    rules: Vec<Arc<dyn SecurityRule>>,
}

impl Default for SecurityRuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for SecurityRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

impl SecurityRuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn standard() -> Self {
        Self::empty()
            .with_rule(SecurityKeywordRule::standard())
            .with_rule(MaintenanceRule::standard())
    }

    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: SecurityRule + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn score(&self, repositories: &[Repository], as_of: DateTime<Utc>) -> TrustFactor {
        let mut factor = FactorBuilder::new(FactorKind::SecurityPractices);
        factor.add(
            SECURITY_BASE_SCORE,
            "Security practices are inferred heuristically from repository metadata".to_string(),
        );

        for rule in &self.rules {
            match rule.evaluate(repositories, as_of) {
                Some(finding) => factor.add(finding.points, finding.evidence),
                None => {
                    if let Some(improvement) = rule.improvement() {
                        factor.suggest(improvement);
                    }
                }
            }
        }

        factor.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn repository(name: &str, updated_days_ago: Option<i64>) -> Repository {
        Repository {
            name: name.to_string(),
            updated_at: updated_days_ago.map(|days| as_of() - Duration::days(days)),
            ..Repository::default()
        }
    }

    #[test]
    fn empty_history_keeps_base_score() {
        let factor = SecurityRuleSet::standard().score(&[], as_of());

        assert_eq!(factor.score, SECURITY_BASE_SCORE);
        assert!(factor.evidence[0].contains("heuristically"));
        assert_eq!(factor.improvements.len(), 2);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let mut repo = repository("vault", None);
        repo.description = Some("Formal AUDIT notes".to_string());

        let factor = SecurityRuleSet::standard().score(&[repo], as_of());
        assert_eq!(factor.score, 80.0);
    }

    #[test]
    fn maintenance_requires_a_strict_majority() {
        let rule = MaintenanceRule::standard();
        let half = vec![repository("alpha", Some(5)), repository("beta", Some(120))];
        let majority = vec![
            repository("alpha", Some(5)),
            repository("beta", Some(59)),
            repository("gamma", None),
        ];

        assert!(rule.evaluate(&half, as_of()).is_none());
        assert!(rule.evaluate(&majority, as_of()).is_some());
    }

    #[test]
    fn custom_rules_extend_the_standard_set() {
        struct LicenseRule;

        impl SecurityRule for LicenseRule {
            fn name(&self) -> &str {
                "license"
            }

            fn evaluate(&self, _: &[Repository], _: DateTime<Utc>) -> Option<RuleFinding> {
                Some(RuleFinding {
                    points: 5.0,
                    evidence: "licensed".to_string(),
                })
            }
        }

        let rules = SecurityRuleSet::standard().with_rule(LicenseRule);
        let factor = rules.score(&[], as_of());

        assert_eq!(rules.rule_names(), vec!["security-keywords", "active-maintenance", "license"]);
        assert_eq!(factor.score, 55.0);
    }
}
