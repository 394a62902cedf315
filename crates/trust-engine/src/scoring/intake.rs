//! Normalisation of loosely typed evidence payloads.
//!
//! Code-hosting APIs and ledger indexers hand back arbitrary JSON. Everything
//! is validated here so the scorers only ever see an [`EvidenceBundle`]; a
//! missing or malformed field becomes its floor (zero, `false`, empty or
//! `None`) instead of an error.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use super::domain::{
    ActivityEvent, CodeHostingProfile, EvidenceBundle, IdentityEvidence, LoanHistory,
    Repository, VerificationMethod,
};

/// Build a bundle from a raw payload. An `assessed_at` inside the payload
/// takes precedence over the caller supplied instant.
pub fn bundle_from_payload(payload: &Value, assessed_at: DateTime<Utc>) -> EvidenceBundle {
    let assessed_at = timestamp(payload, &["assessed_at", "assessedAt"]).unwrap_or(assessed_at);
    let empty = Value::Null;

    EvidenceBundle {
        assessed_at,
        identity: identity(lookup(payload, &["identity"]).unwrap_or(&empty)),
        profile: profile(
            lookup(payload, &["profile", "github_profile", "githubProfile"]).unwrap_or(&empty),
        ),
        repositories: list(payload, &["repositories", "repos"])
            .iter()
            .filter(|entry| entry.is_object())
            .map(repository)
            .collect(),
        activity_events: list(payload, &["events", "activity_events", "activityEvents"])
            .iter()
            .filter_map(activity_event)
            .collect(),
        loan_history: loan_history(
            lookup(payload, &["loan_history", "loanHistory"]).unwrap_or(&empty),
        ),
    }
}

fn identity(value: &Value) -> IdentityEvidence {
    IdentityEvidence {
        address: text(value, &["address", "wallet"]).unwrap_or_default(),
        handle: text(value, &["handle", "github_username", "githubUsername"]),
        is_verified: flag(value, &["is_verified", "isVerified", "verified"]),
        method: text(value, &["method", "verification_method"])
            .and_then(|raw| VerificationMethod::parse(&raw)),
        evidence: text(value, &["evidence"]),
    }
}

fn profile(value: &Value) -> CodeHostingProfile {
    CodeHostingProfile {
        login: text(value, &["login", "username"]),
        created_at: timestamp(value, &["created_at", "createdAt"]),
        public_repos: count(value, &["public_repos", "publicRepos"]),
        followers: count(value, &["followers"]),
        following: count(value, &["following"]),
        contributions: count(value, &["contributions", "total_contributions"]),
        has_bio: present(value, &["bio"], "has_bio"),
        has_website: present(value, &["blog", "website"], "has_website"),
        has_location: present(value, &["location"], "has_location"),
        has_company: present(value, &["company"], "has_company"),
    }
}

fn repository(value: &Value) -> Repository {
    Repository {
        name: text(value, &["name", "full_name"]).unwrap_or_default(),
        description: text(value, &["description"]),
        stars: count(value, &["stargazers_count", "stars"]),
        forks: count(value, &["forks_count", "forks"]),
        language: text(value, &["language"]),
        size_kb: u64::from(count(value, &["size", "size_kb"])),
        created_at: timestamp(value, &["created_at", "createdAt"]),
        updated_at: timestamp(value, &["updated_at", "updatedAt"]),
        pushed_at: timestamp(value, &["pushed_at", "pushedAt"]),
    }
}

/// Events without a usable timestamp say nothing about recency and are dropped.
fn activity_event(value: &Value) -> Option<ActivityEvent> {
    let occurred_at = timestamp(value, &["created_at", "createdAt", "occurred_at"])?;

    Some(ActivityEvent {
        kind: text(value, &["type", "kind"]).unwrap_or_else(|| "UnknownEvent".to_string()),
        occurred_at,
        repository: lookup(value, &["repo"])
            .and_then(|repo| text(repo, &["name"]))
            .or_else(|| text(value, &["repository"])),
    })
}

fn loan_history(value: &Value) -> LoanHistory {
    LoanHistory {
        successful_loans: count(value, &["successful_loans", "successfulLoans"]),
        defaulted_loans: count(value, &["defaulted_loans", "defaultedLoans"]),
        total_borrowed: amount(value, &["total_borrowed", "totalBorrowed"]),
        total_repaid: amount(value, &["total_repaid", "totalRepaid"]),
        completed_projects: count(value, &["completed_projects", "completedProjects"]),
    }
}

fn lookup<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|found| !found.is_null())
}

fn list<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    match lookup(value, keys) {
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            debug!(field = keys[0], "expected a list, treating as empty");
            &[]
        }
        None => &[],
    }
}

fn text(value: &Value, keys: &[&str]) -> Option<String> {
    match lookup(value, keys)? {
        Value::String(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        Value::String(_) => None,
        Value::Number(number) => Some(number.to_string()),
        _ => {
            debug!(field = keys[0], "expected text, ignoring field");
            None
        }
    }
}

/// Non-negative whole count; fractions truncate, negatives and junk become 0.
fn count(value: &Value, keys: &[&str]) -> u32 {
    let Some(found) = lookup(value, keys) else {
        return 0;
    };

    let parsed = match found {
        Value::Number(number) => number
            .as_u64()
            .map(|whole| whole.min(u64::from(u32::MAX)) as u32)
            .or_else(|| number.as_f64().map(clamp_count)),
        Value::String(raw) => raw.trim().parse::<f64>().ok().map(clamp_count),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        debug!(field = keys[0], "malformed count replaced by 0");
        0
    })
}

fn clamp_count(raw: f64) -> u32 {
    if raw.is_finite() && raw > 0.0 {
        raw.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn amount(value: &Value, keys: &[&str]) -> f64 {
    let parsed = match lookup(value, keys) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        Some(_) => None,
        None => return 0.0,
    };

    match parsed {
        Some(raw) if raw.is_finite() && raw > 0.0 => raw,
        Some(_) => 0.0,
        None => {
            debug!(field = keys[0], "malformed amount replaced by 0");
            0.0
        }
    }
}

fn flag(value: &Value, keys: &[&str]) -> bool {
    match lookup(value, keys) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(raw)) => {
            matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        }
        Some(Value::Number(number)) => number.as_u64() == Some(1),
        _ => false,
    }
}

/// A profile field counts as present when it holds non-empty text, or when an
/// explicit `has_*` flag says so.
fn present(value: &Value, keys: &[&str], flag_key: &str) -> bool {
    text(value, keys).is_some() || flag(value, &[flag_key])
}

/// Latest accepted instant, 9999-12-31T23:59:59Z, in epoch seconds.
const LATEST_EPOCH_SECONDS: i64 = 253_402_300_799;

/// Instants before the Unix epoch or past year 9999 are treated as malformed.
fn timestamp(value: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    let parsed = match lookup(value, keys)? {
        Value::String(raw) => parse_timestamp(raw),
        Value::Number(number) => number.as_i64().and_then(from_epoch),
        _ => None,
    }
    .filter(|at| (0..=LATEST_EPOCH_SECONDS).contains(&at.timestamp()));

    if parsed.is_none() {
        debug!(field = keys[0], "unparseable timestamp ignored");
    }
    parsed
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Epoch values above 10^11 are read as milliseconds, anything else as seconds.
fn from_epoch(raw: i64) -> Option<DateTime<Utc>> {
    if raw.abs() > 100_000_000_000 {
        Utc.timestamp_millis_opt(raw).single()
    } else {
        Utc.timestamp_opt(raw, 0).single()
    }
}
