use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::comprehensive::ComprehensiveScorer;
use super::domain::{ApplicantHandle, EvidenceBundle};
use super::eligibility::{EligibilityDecision, EligibilityError, EligibilityPolicy};
use super::legacy::LegacyScorer;
use super::provider::{EvidenceProvider, ProviderError};
use super::rates::InterestRateAdvice;
use super::strategy::{ScoreDetail, ScoreResult, ScoreScale, ScoringStrategy};
use crate::config::ScoringConfig;

/// Assessment returned to callers: the score plus advisory rate and gating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustAssessment {
    pub applicant: ApplicantHandle,
    pub result: ScoreResult,
    pub interest: InterestRateAdvice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<EligibilityDecision>,
}

/// Service composing the evidence provider with both scoring strategies.
pub struct TrustScoringService<P> {
    provider: Arc<P>,
    comprehensive: Arc<ComprehensiveScorer>,
    legacy: Arc<LegacyScorer>,
    config: ScoringConfig,
}

impl<P> TrustScoringService<P>
where
    P: EvidenceProvider + 'static,
{
    pub fn new(provider: Arc<P>, config: ScoringConfig) -> Self {
        Self::with_scorer(provider, ComprehensiveScorer::new(), config)
    }

    pub fn with_scorer(
        provider: Arc<P>,
        comprehensive: ComprehensiveScorer,
        config: ScoringConfig,
    ) -> Self {
        Self {
            provider,
            comprehensive: Arc::new(comprehensive),
            legacy: Arc::new(LegacyScorer::new()),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn strategy(&self, scale: ScoreScale) -> &dyn ScoringStrategy {
        match scale {
            ScoreScale::Comprehensive => self.comprehensive.as_ref(),
            ScoreScale::Legacy => self.legacy.as_ref(),
        }
    }

    /// Score a caller-assembled bundle; `None` picks the configured scale.
    pub fn score_bundle(
        &self,
        evidence: &EvidenceBundle,
        scale: Option<ScoreScale>,
    ) -> ScoreResult {
        let scale = scale.unwrap_or(self.config.default_scale);
        let result = self.strategy(scale).score(evidence);

        if let ScoreDetail::Comprehensive(trust_score) = &result.detail {
            for (kind, factor) in &trust_score.factors {
                debug!(factor = kind.label(), score = factor.score, "factor scored");
            }
        }

        result
    }

    /// Fetch evidence for an applicant and produce a full assessment.
    pub fn assess(
        &self,
        handle: &ApplicantHandle,
        scale: Option<ScoreScale>,
    ) -> Result<TrustAssessment, TrustServiceError> {
        let evidence = self.provider.fetch(handle)?;
        let result = self.score_bundle(&evidence, scale);
        let interest = self.advise_rate(result.scale, result.score, None);
        let eligibility = self.eligibility(&result).ok();

        info!(
            applicant = handle.as_str(),
            scale = %result.scale,
            score = result.score,
            risk = %result.risk_category,
            "trust assessment completed"
        );

        Ok(TrustAssessment {
            applicant: handle.clone(),
            result,
            interest,
            eligibility,
        })
    }

    /// Advisory rate for a score; `None` uses the configured market base rate.
    pub fn advise_rate(
        &self,
        scale: ScoreScale,
        trust_score: u32,
        base_rate: Option<f64>,
    ) -> InterestRateAdvice {
        let base_rate = base_rate.unwrap_or(self.config.base_interest_rate);
        InterestRateAdvice::new(scale, trust_score, base_rate)
    }

    /// Gate a result against the configured threshold.
    pub fn eligibility(
        &self,
        result: &ScoreResult,
    ) -> Result<EligibilityDecision, EligibilityError> {
        EligibilityPolicy::new(self.config.default_scale, self.config.minimum_score)
            .evaluate(result)
    }

    /// Score an applicant and gate the result. Asking for a scale other than
    /// the one the threshold is configured on is rejected.
    pub fn check_eligibility(
        &self,
        handle: &ApplicantHandle,
        scale: Option<ScoreScale>,
    ) -> Result<EligibilityDecision, TrustServiceError> {
        let evidence = self.provider.fetch(handle)?;
        let result = self.score_bundle(&evidence, scale);
        let decision = self.eligibility(&result)?;

        info!(
            applicant = handle.as_str(),
            eligible = decision.eligible,
            shortfall = decision.shortfall,
            "eligibility checked"
        );

        Ok(decision)
    }
}

/// Error raised by the trust scoring service.
#[derive(Debug, thiserror::Error)]
pub enum TrustServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}
