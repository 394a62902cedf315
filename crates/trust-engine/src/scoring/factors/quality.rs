use std::collections::BTreeSet;

use super::{FactorBuilder, FactorKind, TrustFactor};
use crate::scoring::domain::EvidenceBundle;

const MAINTENANCE_WINDOW_DAYS: i64 = 90;

pub(crate) fn is_quality_repository(stars: u32, description_len: usize) -> bool {
    stars > 5 && description_len > 20
}

pub fn score_code_quality(evidence: &EvidenceBundle) -> TrustFactor {
    let mut factor = FactorBuilder::new(FactorKind::CodeQuality);

    let languages: BTreeSet<&str> = evidence
        .repositories
        .iter()
        .filter_map(|repository| repository.language.as_deref())
        .map(str::trim)
        .filter(|language| !language.is_empty())
        .collect();
    let language_points = (languages.len() as f64 * 5.0).min(30.0);
    factor.add(
        language_points,
        format!("Programming languages used: {}", languages.len()),
    );

    let quality_repos = evidence
        .repositories
        .iter()
        .filter(|repository| is_quality_repository(repository.stars, repository.description_len()))
        .count();
    factor.add(
        (quality_repos as f64 * 8.0).min(40.0),
        format!("Documented repositories with community interest: {quality_repos}"),
    );

    let maintained = evidence.fraction_updated_within(MAINTENANCE_WINDOW_DAYS);
    factor.add(
        maintained * 30.0,
        format!(
            "Repositories updated in the last {MAINTENANCE_WINDOW_DAYS} days: {:.0}%",
            maintained * 100.0
        ),
    );

    if languages.len() < 6 {
        factor.suggest("Diversify your programming language experience");
    }
    if quality_repos < 5 {
        factor.suggest("Write clear descriptions and documentation for your repositories");
    }
    if maintained < 0.5 {
        factor.suggest("Keep existing projects maintained with regular updates");
    }

    factor.finish()
}
