use std::collections::BTreeSet;

use super::{FactorBuilder, FactorKind, TrustFactor};
use crate::scoring::domain::Repository;

/// Language groups that earn the technical-stack bonus, with their points.
const STACK_GROUPS: [(&str, &[&str], f64); 3] = [
    (
        "web",
        &["javascript", "typescript", "html", "css", "vue", "svelte"],
        8.0,
    ),
    (
        "ledger/systems",
        &["rust", "solidity", "move", "cairo", "vyper", "c", "c++"],
        12.0,
    ),
    (
        "backend",
        &["python", "go", "java", "kotlin", "ruby", "php", "elixir", "scala", "c#"],
        5.0,
    ),
];

pub fn score_project_complexity(repositories: &[Repository]) -> TrustFactor {
    let mut factor = FactorBuilder::new(FactorKind::ProjectComplexity);

    let total_size: f64 = repositories
        .iter()
        .map(|repository| repository.size_kb as f64)
        .sum();
    let average_size_kb = total_size / repositories.len().max(1) as f64;
    factor.add(
        (average_size_kb / 1000.0).min(50.0),
        format!("Average repository size: {average_size_kb:.0} KB"),
    );

    let languages: BTreeSet<String> = repositories
        .iter()
        .filter_map(|repository| repository.language.as_deref())
        .map(|language| language.trim().to_ascii_lowercase())
        .collect();
    let mut stack_points = 0.0;
    let mut covered = Vec::new();
    for (group, members, points) in STACK_GROUPS {
        if members.iter().any(|member| languages.contains(*member)) {
            stack_points += points;
            covered.push(group);
        }
    }
    let stack_note = if covered.is_empty() {
        "Technical stack groups: none".to_string()
    } else {
        format!("Technical stack groups: {}", covered.join(", "))
    };
    factor.add(stack_points, stack_note);

    let total_forks: u64 = repositories
        .iter()
        .map(|repository| u64::from(repository.forks))
        .sum();
    factor.add(
        (total_forks as f64 / 10.0).min(25.0),
        format!("Total forks: {total_forks}"),
    );

    if average_size_kb < 10_000.0 {
        factor.suggest("Take on larger, more substantial projects");
    }
    if covered.len() < STACK_GROUPS.len() {
        factor.suggest("Broaden your stack across web, systems/ledger and backend languages");
    }
    if total_forks < 100 {
        factor.suggest("Build reusable projects that others fork and extend");
    }

    factor.finish()
}
