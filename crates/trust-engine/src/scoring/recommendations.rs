use std::collections::{BTreeMap, HashSet};

use super::factors::{FactorKind, TrustFactor, VERIFY_IDENTITY};

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Number of weakest-contributing factors whose suggestions are surfaced.
const WEAKEST_FACTORS: usize = 3;

/// Composite score below which the verification nudge and loan-size caution apply.
const CAUTION_THRESHOLD: u32 = 60;

pub(crate) const START_SMALL: &str =
    "Start with smaller loan amounts to build a repayment track record";

/// Surface the suggestions of the factors contributing least to the total.
///
/// Factors are ranked by `score * weight`, ties keep factor order. The list is
/// deduplicated in first-seen order and capped at five entries.
pub fn recommend(factors: &BTreeMap<FactorKind, TrustFactor>, total_score: u32) -> Vec<String> {
    let mut ranked: Vec<&TrustFactor> = factors.values().collect();
    ranked.sort_by(|a, b| a.contribution().total_cmp(&b.contribution()));

    let mut candidates: Vec<&str> = Vec::new();
    if total_score < CAUTION_THRESHOLD {
        candidates.push(VERIFY_IDENTITY);
    }
    candidates.extend(
        ranked
            .iter()
            .take(WEAKEST_FACTORS)
            .flat_map(|factor| factor.improvements.iter().map(String::as_str)),
    );
    if total_score < CAUTION_THRESHOLD {
        candidates.push(START_SMALL);
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(*candidate))
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}
