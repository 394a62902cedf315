//! Older composite scale kept so records scored before the eight-factor model
//! stay comparable. Scores land between 50 and 1000.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::domain::EvidenceBundle;
use super::risk::classify;
use super::strategy::{ScoreDetail, ScoreResult, ScoreScale, ScoringStrategy};

const BASE_SCORE: f64 = 100.0;
const MIN_SCORE: f64 = 50.0;
const MAX_SCORE: f64 = 1000.0;
const VERIFICATION_BONUS: f64 = 100.0;

const GITHUB_WEIGHT: f64 = 0.30;
const LOAN_HISTORY_WEIGHT: f64 = 0.40;
const PROJECT_HISTORY_WEIGHT: f64 = 0.20;
const TIME_FACTOR_WEIGHT: f64 = 0.10;

/// Sub-scores behind a legacy score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyBreakdown {
    pub github: f64,
    pub loan_history: f64,
    pub project_history: f64,
    pub time_factor: f64,
    pub verification_bonus: f64,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyScorer;

impl LegacyScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn breakdown(&self, evidence: &EvidenceBundle) -> LegacyBreakdown {
        let github = github_score(evidence);
        let loan_history = loan_history_score(evidence);
        let project_history = project_history_score(evidence);
        let time_factor = (evidence.account_age_years() * 20.0).min(100.0);
        let verification_bonus = if evidence.identity.is_verified {
            VERIFICATION_BONUS
        } else {
            0.0
        };

        let raw = BASE_SCORE
            + GITHUB_WEIGHT * github
            + LOAN_HISTORY_WEIGHT * loan_history
            + PROJECT_HISTORY_WEIGHT * project_history
            + TIME_FACTOR_WEIGHT * time_factor
            + verification_bonus;
        let total = raw.clamp(MIN_SCORE, MAX_SCORE).round() as u32;
        trace!(github, loan_history, project_history, time_factor, total, "legacy breakdown");

        LegacyBreakdown {
            github,
            loan_history,
            project_history,
            time_factor,
            verification_bonus,
            total,
        }
    }
}

fn github_score(evidence: &EvidenceBundle) -> f64 {
    let profile = &evidence.profile;
    let repositories = (f64::from(profile.public_repos) * 2.0).min(50.0);
    let stars = (evidence.total_stars() as f64 * 0.1).min(100.0);
    let followers = (f64::from(profile.followers) * 0.2).min(50.0);
    let contributions = (f64::from(profile.contributions) * 0.1).min(100.0);

    (repositories + stars + followers + contributions).min(200.0)
}

fn loan_history_score(evidence: &EvidenceBundle) -> f64 {
    let history = &evidence.loan_history;
    let raw = history.success_rate() * 200.0
        + (f64::from(history.successful_loans) * 10.0).min(100.0)
        - f64::from(history.defaulted_loans) * 20.0;

    raw.clamp(0.0, 300.0)
}

fn project_history_score(evidence: &EvidenceBundle) -> f64 {
    let history = &evidence.loan_history;
    let completed = f64::from(history.completed_projects);
    let mut score = (completed * 15.0).min(150.0);

    if history.successful_loans > 0 {
        let per_loan = completed / f64::from(history.successful_loans);
        score += (per_loan * 25.0).min(50.0);
    }

    score.min(200.0)
}

impl ScoringStrategy for LegacyScorer {
    fn scale(&self) -> ScoreScale {
        ScoreScale::Legacy
    }

    fn score(&self, evidence: &EvidenceBundle) -> ScoreResult {
        let breakdown = self.breakdown(evidence);

        ScoreResult {
            scale: ScoreScale::Legacy,
            score: breakdown.total,
            risk_category: classify(ScoreScale::Legacy, breakdown.total),
            assessed_at: evidence.assessed_at,
            detail: ScoreDetail::Legacy(breakdown),
        }
    }
}
