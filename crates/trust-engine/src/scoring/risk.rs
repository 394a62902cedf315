use std::fmt;

use serde::{Deserialize, Serialize};

use super::strategy::ScoreScale;

/// Ordered risk classification, from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Low,
        RiskCategory::Medium,
        RiskCategory::High,
        RiskCategory::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
            RiskCategory::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a score on its own scale. Thresholds are inclusive lower bounds.
pub fn classify(scale: ScoreScale, score: u32) -> RiskCategory {
    match scale {
        ScoreScale::Comprehensive => match score {
            80.. => RiskCategory::Low,
            65..=79 => RiskCategory::Medium,
            40..=64 => RiskCategory::High,
            _ => RiskCategory::Critical,
        },
        ScoreScale::Legacy => match score {
            750.. => RiskCategory::Low,
            500..=749 => RiskCategory::Medium,
            _ => RiskCategory::High,
        },
    }
}

/// Tally of risk categories across a portfolio of scored applicants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl RiskDistribution {
    pub fn tally<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = RiskCategory>,
    {
        let mut distribution = Self::default();
        for category in categories {
            distribution.record(category);
        }
        distribution
    }

    pub fn record(&mut self, category: RiskCategory) {
        match category {
            RiskCategory::Low => self.low += 1,
            RiskCategory::Medium => self.medium += 1,
            RiskCategory::High => self.high += 1,
            RiskCategory::Critical => self.critical += 1,
        }
    }

    pub fn count(&self, category: RiskCategory) -> usize {
        match category {
            RiskCategory::Low => self.low,
            RiskCategory::Medium => self.medium,
            RiskCategory::High => self.high,
            RiskCategory::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }

    /// Fraction of the portfolio in `category`, zero for an empty portfolio.
    pub fn share(&self, category: RiskCategory) -> f64 {
        self.count(category) as f64 / self.total().max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comprehensive_boundaries_are_inclusive() {
        let cases = [
            (80, RiskCategory::Low),
            (79, RiskCategory::Medium),
            (65, RiskCategory::Medium),
            (64, RiskCategory::High),
            (40, RiskCategory::High),
            (39, RiskCategory::Critical),
            (0, RiskCategory::Critical),
            (100, RiskCategory::Low),
        ];

        for (score, expected) in cases {
            assert_eq!(classify(ScoreScale::Comprehensive, score), expected, "score {score}");
        }
    }

    #[test]
    fn legacy_scale_has_no_critical_band() {
        assert_eq!(classify(ScoreScale::Legacy, 750), RiskCategory::Low);
        assert_eq!(classify(ScoreScale::Legacy, 749), RiskCategory::Medium);
        assert_eq!(classify(ScoreScale::Legacy, 500), RiskCategory::Medium);
        assert_eq!(classify(ScoreScale::Legacy, 499), RiskCategory::High);
        assert_eq!(classify(ScoreScale::Legacy, 50), RiskCategory::High);
    }

    #[test]
    fn category_never_worsens_as_score_rises() {
        for scale in [ScoreScale::Comprehensive, ScoreScale::Legacy] {
            let (low, high) = scale.range();
            let mut previous = classify(scale, low);
            for score in low..=high {
                let current = classify(scale, score);
                assert!(current <= previous, "{scale:?} regressed at {score}");
                previous = current;
            }
        }
    }

    #[test]
    fn distribution_counts_and_shares() {
        let distribution = RiskDistribution::tally([
            RiskCategory::Low,
            RiskCategory::Low,
            RiskCategory::Critical,
            RiskCategory::Medium,
        ]);

        assert_eq!(distribution.total(), 4);
        assert_eq!(distribution.count(RiskCategory::Low), 2);
        assert_eq!(distribution.share(RiskCategory::Critical), 0.25);
        assert_eq!(RiskDistribution::default().share(RiskCategory::High), 0.0);
    }
}
