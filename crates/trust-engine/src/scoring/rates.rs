//! Advisory interest-rate multipliers.
//!
//! The multiplier table is defined on the 0 to 1000 scale. Comprehensive scores
//! are projected onto it by a factor of ten; legacy scores are used as-is.

use serde::{Deserialize, Serialize};

use super::strategy::ScoreScale;

/// `(minimum score, multiplier)` bands, best first.
const MULTIPLIER_BANDS: [(u32, f64); 5] = [
    (800, 1.00),
    (700, 1.10),
    (600, 1.25),
    (500, 1.50),
    (400, 1.75),
];
const FLOOR_MULTIPLIER: f64 = 2.00;

/// Risk multiplier for a score already expressed on the 0 to 1000 table.
pub fn risk_multiplier(trust_score: u32) -> f64 {
    MULTIPLIER_BANDS
        .iter()
        .find(|(minimum, _)| trust_score >= *minimum)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(FLOOR_MULTIPLIER)
}

/// Project a score onto the 0 to 1000 multiplier table.
pub fn rate_table_score(scale: ScoreScale, score: u32) -> u32 {
    match scale {
        ScoreScale::Comprehensive => score.saturating_mul(10),
        ScoreScale::Legacy => score,
    }
}

/// `base_rate * multiplier` for a score on the 0 to 1000 table.
pub fn recommended_interest_rate(trust_score: u32, base_rate: f64) -> f64 {
    base_rate * risk_multiplier(trust_score)
}

/// Same as [`recommended_interest_rate`] with rates in basis points.
pub fn recommended_rate_bps(trust_score: u32, base_bps: u32) -> u32 {
    (f64::from(base_bps) * risk_multiplier(trust_score)).round() as u32
}

/// Suggested, non-binding rate for a scored applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateAdvice {
    pub scale: ScoreScale,
    pub trust_score: u32,
    pub multiplier: f64,
    pub base_rate: f64,
    pub recommended_rate: f64,
}

impl InterestRateAdvice {
    pub fn new(scale: ScoreScale, trust_score: u32, base_rate: f64) -> Self {
        let multiplier = risk_multiplier(rate_table_score(scale, trust_score));

        Self {
            scale,
            trust_score,
            multiplier,
            base_rate,
            recommended_rate: base_rate * multiplier,
        }
    }
}
