use super::{tiered, FactorBuilder, FactorKind, TrustFactor, IMPROVEMENT_THRESHOLD};
use crate::scoring::domain::EvidenceBundle;

const RECENT_ACTIVITY_DAYS: i64 = 30;

/// Four buckets of up to 25 points: account age, public repositories, events
/// in the last 30 days and average stars per repository.
pub fn score_github_activity(evidence: &EvidenceBundle) -> TrustFactor {
    let mut factor = FactorBuilder::new(FactorKind::GithubActivity);

    let age_years = evidence.account_age_years();
    let age_points = if age_years >= 3.0 {
        25.0
    } else if age_years >= 1.0 {
        15.0
    } else {
        5.0
    };
    factor.add(age_points, format!("Account age: {age_years:.1} years"));

    let repo_count = evidence.profile.public_repos;
    let repo_points = tiered(f64::from(repo_count), 20.0, 10.0, 25.0, 15.0, 5.0);
    factor.add(repo_points, format!("Public repositories: {repo_count}"));

    let recent_events = evidence.events_within(RECENT_ACTIVITY_DAYS);
    let activity_points = tiered(recent_events as f64, 20.0, 10.0, 25.0, 15.0, 5.0);
    factor.add(
        activity_points,
        format!("Recent activity: {recent_events} events in the last {RECENT_ACTIVITY_DAYS} days"),
    );

    let average_stars = evidence.total_stars() as f64 / evidence.repositories.len().max(1) as f64;
    let star_points = tiered(average_stars, 50.0, 10.0, 25.0, 15.0, 5.0);
    factor.add(
        star_points,
        format!("Average stars per repository: {average_stars:.1}"),
    );

    if factor.score() < IMPROVEMENT_THRESHOLD {
        if repo_count < 20 {
            factor.suggest("Publish more public repositories that showcase your work");
        }
        if recent_events < 20 {
            factor.suggest("Commit and contribute regularly to keep recent activity visible");
        }
        if average_stars < 50.0 {
            factor.suggest("Build and promote projects that earn community stars");
        }
        if age_years < 1.0 {
            factor.suggest("Keep your code-hosting account active; account age adds trust over time");
        }
    }

    factor.finish()
}
