use serde::{Deserialize, Serialize};

use super::strategy::{ScoreResult, ScoreScale};

/// Minimum-score gate used by loan markets.
///
/// A policy only judges results on its own scale; the two scales are never
/// converted into each other here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub scale: ScoreScale,
    pub minimum_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub eligible: bool,
    pub score: u32,
    pub minimum_score: u32,
    pub shortfall: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("policy expects a {expected} score but received a {actual} score")]
    ScaleMismatch {
        expected: ScoreScale,
        actual: ScoreScale,
    },
}

impl EligibilityPolicy {
    pub fn new(scale: ScoreScale, minimum_score: u32) -> Self {
        Self {
            scale,
            minimum_score,
        }
    }

    pub fn evaluate(&self, result: &ScoreResult) -> Result<EligibilityDecision, EligibilityError> {
        if result.scale != self.scale {
            return Err(EligibilityError::ScaleMismatch {
                expected: self.scale,
                actual: result.scale,
            });
        }

        Ok(EligibilityDecision {
            eligible: result.score >= self.minimum_score,
            score: result.score,
            minimum_score: self.minimum_score,
            shortfall: self.minimum_score.saturating_sub(result.score),
        })
    }
}
