//! Independent factor scorers.
//!
//! Each scorer reads one slice of the evidence bundle and returns a
//! [`TrustFactor`] bounded to `0..=100`. Scorers never fail: absent evidence
//! yields the documented floor.

mod activity;
mod community;
mod complexity;
mod consistency;
mod on_chain;
mod quality;
pub mod security;
mod verification;

pub use activity::score_github_activity;
pub use community::score_community_engagement;
pub use complexity::score_project_complexity;
pub use consistency::score_consistency;
pub use on_chain::score_on_chain_history;
pub use quality::score_code_quality;
pub use security::{
    MaintenanceRule, RuleFinding, SecurityKeywordRule, SecurityRule, SecurityRuleSet,
};
pub use verification::score_verification;
pub(crate) use verification::VERIFY_IDENTITY;

use serde::{Deserialize, Serialize};

pub const MAX_FACTOR_SCORE: f64 = 100.0;

/// Score at or above which a factor no longer carries improvement suggestions.
pub const IMPROVEMENT_THRESHOLD: f64 = 80.0;

/// The eight evidence dimensions combined by the comprehensive scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    GithubActivity,
    CodeQuality,
    CommunityEngagement,
    ProjectComplexity,
    Consistency,
    SecurityPractices,
    OnChainHistory,
    Verification,
}

impl FactorKind {
    pub const ALL: [FactorKind; 8] = [
        FactorKind::GithubActivity,
        FactorKind::CodeQuality,
        FactorKind::CommunityEngagement,
        FactorKind::ProjectComplexity,
        FactorKind::Consistency,
        FactorKind::SecurityPractices,
        FactorKind::OnChainHistory,
        FactorKind::Verification,
    ];

    /// Fixed aggregation weight; the eight weights sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            FactorKind::GithubActivity => 0.20,
            FactorKind::CodeQuality => 0.18,
            FactorKind::CommunityEngagement => 0.15,
            FactorKind::ProjectComplexity => 0.12,
            FactorKind::Consistency => 0.10,
            FactorKind::SecurityPractices => 0.10,
            FactorKind::OnChainHistory => 0.10,
            FactorKind::Verification => 0.05,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FactorKind::GithubActivity => "GitHub activity",
            FactorKind::CodeQuality => "Code quality",
            FactorKind::CommunityEngagement => "Community engagement",
            FactorKind::ProjectComplexity => "Project complexity",
            FactorKind::Consistency => "Consistency",
            FactorKind::SecurityPractices => "Security practices",
            FactorKind::OnChainHistory => "On-chain history",
            FactorKind::Verification => "Verification",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FactorKind::GithubActivity => {
                "Account age, repository count, recent activity and stars received"
            }
            FactorKind::CodeQuality => {
                "Language diversity, documented well-received projects and maintenance"
            }
            FactorKind::CommunityEngagement => "Followers, follow ratio and profile completeness",
            FactorKind::ProjectComplexity => "Project size, technical breadth and forks",
            FactorKind::Consistency => "Repayment record and steady development activity",
            FactorKind::SecurityPractices => {
                "Security and testing signals inferred from repository metadata"
            }
            FactorKind::OnChainHistory => "Verified identity and on-chain loan performance",
            FactorKind::Verification => "Proof that the applicant controls the linked account",
        }
    }
}

/// Output of a single factor scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustFactor {
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub description: String,
    pub evidence: Vec<String>,
    pub improvements: Vec<String>,
}

impl TrustFactor {
    /// Weighted share this factor adds to the composite score.
    pub fn contribution(&self) -> f64 {
        self.score * self.weight
    }
}

/// Accumulates evidence and suggestions, then bounds the score on `finish`.
pub(crate) struct FactorBuilder {
    kind: FactorKind,
    score: f64,
    evidence: Vec<String>,
    improvements: Vec<String>,
}

impl FactorBuilder {
    pub(crate) fn new(kind: FactorKind) -> Self {
        Self {
            kind,
            score: 0.0,
            evidence: Vec::new(),
            improvements: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, points: f64, evidence: String) {
        self.score += points;
        self.evidence.push(evidence);
    }

    pub(crate) fn note(&mut self, evidence: impl Into<String>) {
        self.evidence.push(evidence.into());
    }

    pub(crate) fn suggest(&mut self, improvement: impl Into<String>) {
        self.improvements.push(improvement.into());
    }

    pub(crate) fn score(&self) -> f64 {
        self.score.clamp(0.0, MAX_FACTOR_SCORE)
    }

    pub(crate) fn finish(self) -> TrustFactor {
        let score = self.score();
        let improvements = if score >= IMPROVEMENT_THRESHOLD {
            Vec::new()
        } else {
            self.improvements
        };

        TrustFactor {
            score,
            max_score: MAX_FACTOR_SCORE,
            weight: self.kind.weight(),
            description: self.kind.description().to_string(),
            evidence: self.evidence,
            improvements,
        }
    }
}

/// Step bucket shared by several scorers: top tier, middle tier, else a floor
/// that grows with the raw value.
pub(crate) fn tiered(value: f64, high: f64, mid: f64, top: f64, middle: f64, floor: f64) -> f64 {
    if value >= high {
        top
    } else if value >= mid {
        middle
    } else {
        value.max(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = FactorKind::ALL.iter().map(FactorKind::weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn finish_drops_suggestions_for_strong_factors() {
        let mut builder = FactorBuilder::new(FactorKind::CodeQuality);
        builder.add(120.0, "lots".to_string());
        builder.suggest("never shown");

        let factor = builder.finish();
        assert_eq!(factor.score, 100.0);
        assert!(factor.improvements.is_empty());
        assert_eq!(factor.weight, 0.18);
    }
}
