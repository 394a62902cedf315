use crate::infra::{parse_scale, InMemoryEvidenceProvider};
use chrono::Utc;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use trust_engine::config::{AppConfig, ScoringConfig};
use trust_engine::error::AppError;
use trust_engine::scoring::{
    bundle_from_payload, rate_table_score, recommended_rate_bps, ApplicantHandle,
    EligibilityDecision, InterestRateAdvice, RiskCategory, RiskDistribution, ScoreDetail,
    ScoreResult, ScoreScale, TrustScoringService,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the evidence payload (profile, repositories, events, loan history)
    #[arg(long)]
    pub(crate) evidence: PathBuf,
    /// Scale to score on (comprehensive or legacy). Defaults to TRUST_DEFAULT_SCALE.
    #[arg(long, value_parser = parse_scale)]
    pub(crate) scale: Option<ScoreScale>,
    /// Print the raw result as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RateArgs {
    /// Trust score to price
    #[arg(long)]
    pub(crate) score: u32,
    /// Scale the score was produced on. Defaults to TRUST_DEFAULT_SCALE.
    #[arg(long, value_parser = parse_scale)]
    pub(crate) scale: Option<ScoreScale>,
    /// Market base rate in percent. Defaults to TRUST_BASE_RATE.
    #[arg(long)]
    pub(crate) base_rate: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Scale to score the demo applicants on
    #[arg(long, value_parser = parse_scale)]
    pub(crate) scale: Option<ScoreScale>,
    /// Only score this demo applicant
    #[arg(long)]
    pub(crate) applicant: Option<String>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        evidence,
        scale,
        json,
    } = args;

    let config = AppConfig::load()?;
    let raw = fs::read_to_string(&evidence)?;
    let payload: Value = serde_json::from_str(&raw)?;
    if !payload.is_object() {
        return Err(AppError::InvalidInput(format!(
            "{} must contain a JSON object",
            evidence.display()
        )));
    }

    let bundle = bundle_from_payload(&payload, Utc::now());
    let service = TrustScoringService::new(
        Arc::new(InMemoryEvidenceProvider::default()),
        config.scoring,
    );
    let result = service.score_bundle(&bundle, scale);

    if json {
        let rendered = serde_json::to_string_pretty(&result)?;
        println!("{rendered}");
        return Ok(());
    }

    let advice = service.advise_rate(result.scale, result.score, None);
    let eligibility = service.eligibility(&result).ok();
    println!("Trust score for {}", evidence.display());
    render_result(&result, &advice, eligibility.as_ref());
    Ok(())
}

pub(crate) fn run_rate(args: RateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let advice = rate_advice(&args, &config.scoring)?;

    let base_bps = (advice.base_rate * 100.0).round() as u32;
    let table_score = rate_table_score(advice.scale, advice.trust_score);
    println!(
        "Score {} on the {} scale (table score {})",
        advice.trust_score, advice.scale, table_score
    );
    println!(
        "- Risk multiplier {:.2}x | base {:.2}% | recommended {:.2}% ({} bps)",
        advice.multiplier,
        advice.base_rate,
        advice.recommended_rate,
        recommended_rate_bps(table_score, base_bps)
    );
    Ok(())
}

fn rate_advice(args: &RateArgs, scoring: &ScoringConfig) -> Result<InterestRateAdvice, AppError> {
    let scale = args.scale.unwrap_or(scoring.default_scale);
    if !scale.contains(args.score) {
        let (low, high) = scale.range();
        return Err(AppError::InvalidInput(format!(
            "score {} is outside {low}..={high} on the {scale} scale",
            args.score
        )));
    }

    let base_rate = args.base_rate.unwrap_or(scoring.base_interest_rate);
    if !base_rate.is_finite() || base_rate < 0.0 {
        return Err(AppError::InvalidInput(
            "base rate must be a non-negative number".to_string(),
        ));
    }

    Ok(InterestRateAdvice::new(scale, args.score, base_rate))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { scale, applicant } = args;

    let config = AppConfig::load()?;
    let provider = Arc::new(InMemoryEvidenceProvider::with_demo_applicants(Utc::now()));
    let handles = match applicant {
        Some(handle) => vec![ApplicantHandle::new(handle)],
        None => provider.handles(),
    };
    let service = TrustScoringService::new(provider, config.scoring);

    println!("Trust scoring demo");
    let mut distribution = RiskDistribution::default();
    for handle in &handles {
        println!("\nApplicant {}", handle.as_str());
        match service.assess(handle, scale) {
            Ok(assessment) => {
                distribution.record(assessment.result.risk_category);
                render_result(
                    &assessment.result,
                    &assessment.interest,
                    assessment.eligibility.as_ref(),
                );
            }
            Err(err) => println!("  Assessment unavailable: {}", err),
        }
    }

    println!("\nPortfolio risk ({} scored)", distribution.total());
    for category in RiskCategory::ALL {
        println!(
            "- {}: {} ({:.0}%)",
            category.label(),
            distribution.count(category),
            distribution.share(category) * 100.0
        );
    }
    Ok(())
}

pub(crate) fn render_result(
    result: &ScoreResult,
    advice: &InterestRateAdvice,
    eligibility: Option<&EligibilityDecision>,
) {
    let (low, high) = result.scale.range();
    println!(
        "- Score {} on the {} scale ({}..={}) | risk: {}",
        result.score, result.scale, low, high, result.risk_category
    );

    match &result.detail {
        ScoreDetail::Comprehensive(score) => {
            println!("  Factors:");
            for (kind, factor) in &score.factors {
                println!(
                    "  - {:<22} {:>5.1} x {:.2} = {:>5.2}",
                    kind.label(),
                    factor.score,
                    factor.weight,
                    factor.contribution()
                );
            }
        }
        ScoreDetail::Legacy(breakdown) => {
            println!(
                "  Components: github {:.0} | loans {:.0} | projects {:.0} | tenure {:.0} | verification {:.0}",
                breakdown.github,
                breakdown.loan_history,
                breakdown.project_history,
                breakdown.time_factor,
                breakdown.verification_bonus
            );
        }
    }

    let recommendations = result.recommendations();
    if !recommendations.is_empty() {
        println!("  Recommendations:");
        for recommendation in recommendations {
            println!("  - {}", recommendation);
        }
    }

    println!(
        "  Advisory rate: {:.2}% ({:.2}x on a {:.2}% base)",
        advice.recommended_rate, advice.multiplier, advice.base_rate
    );

    match eligibility {
        Some(decision) if decision.eligible => {
            println!("  Eligible (minimum {})", decision.minimum_score)
        }
        Some(decision) => println!(
            "  Not eligible: {} points below the minimum of {}",
            decision.shortfall, decision.minimum_score
        ),
        None => println!("  Eligibility not evaluated on this scale"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_args(score: u32, scale: Option<ScoreScale>, base_rate: Option<f64>) -> RateArgs {
        RateArgs {
            score,
            scale,
            base_rate,
        }
    }

    #[test]
    fn rate_advice_uses_configured_defaults() {
        let scoring = ScoringConfig::default();

        let advice = rate_advice(&rate_args(92, None, None), &scoring).expect("valid score");

        assert_eq!(advice.scale, ScoreScale::Comprehensive);
        assert_eq!(advice.multiplier, 1.00);
        assert_eq!(advice.base_rate, scoring.base_interest_rate);
    }

    #[test]
    fn rate_advice_rejects_scores_off_the_scale() {
        let scoring = ScoringConfig::default();

        let error = rate_advice(&rate_args(650, None, None), &scoring).expect_err("out of range");
        assert!(error.to_string().contains("0..=100"));

        let legacy = rate_advice(&rate_args(650, Some(ScoreScale::Legacy), Some(8.0)), &scoring)
            .expect("legacy range");
        assert!((legacy.recommended_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rate_advice_rejects_negative_base() {
        let scoring = ScoringConfig::default();

        let result = rate_advice(&rate_args(70, None, Some(-2.0)), &scoring);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
