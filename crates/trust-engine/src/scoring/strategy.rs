use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comprehensive::ComprehensiveTrustScore;
use super::domain::EvidenceBundle;
use super::legacy::LegacyBreakdown;
use super::risk::RiskCategory;

/// Numeric scale a score was produced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// Eight weighted factors, 0 to 100.
    Comprehensive,
    /// Older composite kept for existing records, 50 to 1000.
    Legacy,
}

impl ScoreScale {
    /// Inclusive bounds of scores on this scale.
    pub fn range(&self) -> (u32, u32) {
        match self {
            ScoreScale::Comprehensive => (0, 100),
            ScoreScale::Legacy => (50, 1000),
        }
    }

    pub fn contains(&self, score: u32) -> bool {
        let (low, high) = self.range();
        (low..=high).contains(&score)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreScale::Comprehensive => "comprehensive",
            ScoreScale::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ScoreScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown score scale '{0}'")]
pub struct UnknownScale(pub String);

impl FromStr for ScoreScale {
    type Err = UnknownScale;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "comprehensive" | "v2" => Ok(Self::Comprehensive),
            "legacy" | "v1" => Ok(Self::Legacy),
            _ => Err(UnknownScale(raw.to_string())),
        }
    }
}

/// Scale-specific details behind a [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreDetail {
    Comprehensive(ComprehensiveTrustScore),
    Legacy(LegacyBreakdown),
}

/// Scale-tagged output shared by every scoring strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub scale: ScoreScale,
    pub score: u32,
    pub risk_category: RiskCategory,
    pub assessed_at: DateTime<Utc>,
    pub detail: ScoreDetail,
}

impl ScoreResult {
    pub fn recommendations(&self) -> &[String] {
        match &self.detail {
            ScoreDetail::Comprehensive(score) => &score.recommendations,
            ScoreDetail::Legacy(_) => &[],
        }
    }
}

/// Pure scoring algorithm over an evidence bundle.
pub trait ScoringStrategy: Send + Sync {
    fn scale(&self) -> ScoreScale;

    fn score(&self, evidence: &EvidenceBundle) -> ScoreResult;
}
