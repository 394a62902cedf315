use std::sync::Arc;

use super::common::*;
use crate::config::ScoringConfig;
use crate::scoring::domain::ApplicantHandle;
use crate::scoring::eligibility::EligibilityError;
use crate::scoring::provider::ProviderError;
use crate::scoring::risk::{RiskCategory, RiskDistribution};
use crate::scoring::service::{TrustScoringService, TrustServiceError};
use crate::scoring::strategy::ScoreScale;

#[test]
fn assess_fetches_scores_and_advises() {
    let service = build_service();

    let assessment = service
        .assess(&ApplicantHandle::new("Octo"), None)
        .expect("assessment succeeds");

    assert_eq!(assessment.applicant.as_str(), "octo");
    assert_eq!(assessment.result.scale, ScoreScale::Comprehensive);
    assert_eq!(assessment.result.risk_category, RiskCategory::Low);
    assert_eq!(assessment.interest.multiplier, 1.00);
    assert_eq!(assessment.interest.base_rate, 8.0);
    let eligibility = assessment.eligibility.expect("same scale as policy");
    assert!(eligibility.eligible);
    assert_eq!(eligibility.shortfall, 0);
}

#[test]
fn legacy_assessment_skips_comprehensive_gate() {
    let service = build_service();

    let assessment = service
        .assess(&ApplicantHandle::new("octo"), Some(ScoreScale::Legacy))
        .expect("assessment succeeds");

    assert_eq!(assessment.result.scale, ScoreScale::Legacy);
    assert_eq!(assessment.result.score, 396);
    assert_eq!(assessment.interest.multiplier, 2.00);
    assert!(assessment.eligibility.is_none());
}

#[test]
fn eligibility_rejects_mismatched_scale() {
    let service = build_service();

    let error = service
        .check_eligibility(&ApplicantHandle::new("octo"), Some(ScoreScale::Legacy))
        .expect_err("scales differ");

    assert!(matches!(
        error,
        TrustServiceError::Eligibility(EligibilityError::ScaleMismatch {
            expected: ScoreScale::Comprehensive,
            actual: ScoreScale::Legacy,
        })
    ));
}

#[test]
fn newcomer_falls_short_of_threshold() {
    let service = build_service();

    let decision = service
        .check_eligibility(&ApplicantHandle::new("newcomer"), None)
        .expect("eligibility computed");

    assert!(!decision.eligible);
    assert_eq!(decision.minimum_score, 60);
    assert_eq!(decision.shortfall, 60 - decision.score);
}

#[test]
fn unknown_applicant_surfaces_provider_error() {
    let service = build_service();

    match service.assess(&ApplicantHandle::new("ghost"), None) {
        Err(TrustServiceError::Provider(ProviderError::NotFound(handle))) => {
            assert_eq!(handle, "ghost")
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn configured_base_rate_is_used_unless_overridden() {
    let config = ScoringConfig {
        base_interest_rate: 6.0,
        ..ScoringConfig::default()
    };
    let service = TrustScoringService::new(Arc::new(memory_provider()), config);

    let configured = service.advise_rate(ScoreScale::Legacy, 650, None);
    let overridden = service.advise_rate(ScoreScale::Legacy, 650, Some(8.0));

    assert!((configured.recommended_rate - 7.5).abs() < 1e-9);
    assert!((overridden.recommended_rate - 10.0).abs() < 1e-9);
}

#[test]
fn portfolio_distribution_over_assessments() {
    let service = build_service();
    let categories = ["octo", "newcomer"].into_iter().map(|handle| {
        service
            .assess(&ApplicantHandle::new(handle), None)
            .expect("assessment succeeds")
            .result
            .risk_category
    });

    let distribution = RiskDistribution::tally(categories);

    assert_eq!(distribution.low, 1);
    assert_eq!(distribution.critical, 1);
    assert_eq!(distribution.share(RiskCategory::Low), 0.5);
}
