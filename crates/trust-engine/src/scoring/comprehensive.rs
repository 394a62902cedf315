use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::EvidenceBundle;
use super::factors::{
    score_code_quality, score_community_engagement, score_consistency, score_github_activity,
    score_on_chain_history, score_project_complexity, score_verification, FactorKind,
    SecurityRuleSet, TrustFactor,
};
use super::recommendations::recommend;
use super::risk::{classify, RiskCategory};
use super::strategy::{ScoreDetail, ScoreResult, ScoreScale, ScoringStrategy};

/// Final output of the comprehensive scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveTrustScore {
    pub total_score: u32,
    pub factors: BTreeMap<FactorKind, TrustFactor>,
    pub risk_category: RiskCategory,
    pub recommendations: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Weighted eight-factor scorer on the 0 to 100 scale.
#[derive(Debug, Clone, Default)]
pub struct ComprehensiveScorer {
    security_rules: SecurityRuleSet,
}

impl ComprehensiveScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_security_rules(security_rules: SecurityRuleSet) -> Self {
        Self { security_rules }
    }

    /// Run every factor scorer over the bundle.
    pub fn factors(&self, evidence: &EvidenceBundle) -> BTreeMap<FactorKind, TrustFactor> {
        FactorKind::ALL
            .into_iter()
            .map(|kind| (kind, self.score_factor(kind, evidence)))
            .collect()
    }

    fn score_factor(&self, kind: FactorKind, evidence: &EvidenceBundle) -> TrustFactor {
        match kind {
            FactorKind::GithubActivity => score_github_activity(evidence),
            FactorKind::CodeQuality => score_code_quality(evidence),
            FactorKind::CommunityEngagement => score_community_engagement(&evidence.profile),
            FactorKind::ProjectComplexity => score_project_complexity(&evidence.repositories),
            FactorKind::Consistency => score_consistency(evidence),
            FactorKind::SecurityPractices => self
                .security_rules
                .score(&evidence.repositories, evidence.assessed_at),
            FactorKind::OnChainHistory => {
                score_on_chain_history(&evidence.identity, &evidence.loan_history)
            }
            FactorKind::Verification => score_verification(&evidence.identity),
        }
    }

    pub fn evaluate(&self, evidence: &EvidenceBundle) -> ComprehensiveTrustScore {
        let factors = self.factors(evidence);
        let total_score = weighted_total(&factors);
        let risk_category = classify(ScoreScale::Comprehensive, total_score);
        let recommendations = recommend(&factors, total_score);

        ComprehensiveTrustScore {
            total_score,
            factors,
            risk_category,
            recommendations,
            last_updated: evidence.assessed_at,
        }
    }
}

/// `round(sum(score * weight))`, bounded to the scale.
pub fn weighted_total(factors: &BTreeMap<FactorKind, TrustFactor>) -> u32 {
    let total: f64 = factors.values().map(TrustFactor::contribution).sum();
    total.round().clamp(0.0, 100.0) as u32
}

impl ScoringStrategy for ComprehensiveScorer {
    fn scale(&self) -> ScoreScale {
        ScoreScale::Comprehensive
    }

    fn score(&self, evidence: &EvidenceBundle) -> ScoreResult {
        let trust_score = self.evaluate(evidence);

        ScoreResult {
            scale: ScoreScale::Comprehensive,
            score: trust_score.total_score,
            risk_category: trust_score.risk_category,
            assessed_at: evidence.assessed_at,
            detail: ScoreDetail::Comprehensive(trust_score),
        }
    }
}
