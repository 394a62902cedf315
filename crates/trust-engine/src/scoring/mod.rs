//! Creditworthiness scoring for loan applicants.
//!
//! Factor scorers, the weighted aggregator, risk classification and
//! recommendations are pure functions over an [`EvidenceBundle`]. Evidence
//! acquisition stays behind [`EvidenceProvider`], which callers inject.

pub mod comprehensive;
pub mod domain;
pub mod eligibility;
pub mod factors;
pub mod intake;
pub mod legacy;
pub mod provider;
pub mod rates;
pub mod recommendations;
pub mod risk;
pub mod router;
pub mod service;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use comprehensive::{weighted_total, ComprehensiveScorer, ComprehensiveTrustScore};
pub use domain::{
    ActivityEvent, ApplicantHandle, CodeHostingProfile, EvidenceBundle, IdentityEvidence,
    LoanHistory, Repository, VerificationMethod,
};
pub use eligibility::{EligibilityDecision, EligibilityError, EligibilityPolicy};
pub use factors::{FactorKind, SecurityRule, SecurityRuleSet, TrustFactor};
pub use intake::bundle_from_payload;
pub use legacy::{LegacyBreakdown, LegacyScorer};
pub use provider::{EvidenceProvider, ProviderError};
pub use rates::{
    rate_table_score, recommended_interest_rate, recommended_rate_bps, risk_multiplier,
    InterestRateAdvice,
};
pub use recommendations::recommend;
pub use risk::{classify, RiskCategory, RiskDistribution};
pub use router::trust_router;
pub use service::{TrustAssessment, TrustScoringService, TrustServiceError};
pub use strategy::{ScoreDetail, ScoreResult, ScoreScale, ScoringStrategy, UnknownScale};
