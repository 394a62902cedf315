use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Handle used to look an applicant up through an evidence provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantHandle(pub String);

impl ApplicantHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Complete set of inputs for one scoring pass.
///
/// Recency windows and account age are measured from `assessed_at`, so the
/// same bundle always produces the same score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub assessed_at: DateTime<Utc>,
    pub identity: IdentityEvidence,
    pub profile: CodeHostingProfile,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub activity_events: Vec<ActivityEvent>,
    #[serde(default)]
    pub loan_history: LoanHistory,
}

impl EvidenceBundle {
    /// Bundle with no evidence at all, useful as a floor.
    pub fn empty(address: impl Into<String>, assessed_at: DateTime<Utc>) -> Self {
        Self {
            assessed_at,
            identity: IdentityEvidence {
                address: address.into(),
                ..IdentityEvidence::default()
            },
            profile: CodeHostingProfile::default(),
            repositories: Vec::new(),
            activity_events: Vec::new(),
            loan_history: LoanHistory::default(),
        }
    }

    pub fn account_age_years(&self) -> f64 {
        match self.profile.created_at {
            Some(created) if created < self.assessed_at => {
                (self.assessed_at - created).num_seconds() as f64 / SECONDS_PER_YEAR
            }
            _ => 0.0,
        }
    }

    pub fn total_stars(&self) -> u64 {
        self.repositories
            .iter()
            .map(|repository| u64::from(repository.stars))
            .sum()
    }

    /// Events that occurred within `days` of the assessment instant.
    pub fn events_within(&self, days: i64) -> usize {
        let cutoff = window_start(self.assessed_at, days);
        self.activity_events
            .iter()
            .filter(|event| (cutoff..=self.assessed_at).contains(&event.occurred_at))
            .count()
    }

    /// Share of repositories updated within `days`, zero without repositories.
    pub fn fraction_updated_within(&self, days: i64) -> f64 {
        self.fraction_where(|repository| repository.updated_at, days)
    }

    /// Share of repositories pushed to within `days`, zero without repositories.
    pub fn fraction_pushed_within(&self, days: i64) -> f64 {
        self.fraction_where(|repository| repository.pushed_at, days)
    }

    fn fraction_where<F>(&self, timestamp: F, days: i64) -> f64
    where
        F: Fn(&Repository) -> Option<DateTime<Utc>>,
    {
        let matching = count_recent(&self.repositories, timestamp, self.assessed_at, days);
        matching as f64 / self.repositories.len().max(1) as f64
    }
}

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Start of a trailing window; clamps to the earliest representable instant.
pub(crate) fn window_start(as_of: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|window| as_of.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Timestamps inside `[as_of - days, as_of]`; anything after `as_of` is ignored.
pub(crate) fn count_recent<F>(
    repositories: &[Repository],
    timestamp: F,
    as_of: DateTime<Utc>,
    days: i64,
) -> usize
where
    F: Fn(&Repository) -> Option<DateTime<Utc>>,
{
    let cutoff = window_start(as_of, days);
    repositories
        .iter()
        .filter_map(|repository| timestamp(repository))
        .filter(|at| (cutoff..=as_of).contains(at))
        .count()
}

/// Outcome of the external address-ownership check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEvidence {
    pub address: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub method: Option<VerificationMethod>,
    #[serde(default)]
    pub evidence: Option<String>,
}

/// Where the applicant placed the ownership proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    Gist,
    Repository,
    ProfileBio,
}

impl VerificationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            VerificationMethod::Gist => "public gist",
            VerificationMethod::Repository => "repository readme",
            VerificationMethod::ProfileBio => "profile bio",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gist" | "paste" => Some(Self::Gist),
            "repository" | "repo" | "readme" => Some(Self::Repository),
            "bio" | "profile_bio" | "profile" => Some(Self::ProfileBio),
            _ => None,
        }
    }
}

/// Account-level facts from the code-hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeHostingProfile {
    pub login: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    /// Contributions over the trailing year, only read by the legacy scale.
    pub contributions: u32,
    pub has_bio: bool,
    pub has_website: bool,
    pub has_location: bool,
    pub has_company: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
    pub size_kb: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
}

impl Repository {
    pub fn description_len(&self) -> usize {
        self.description
            .as_deref()
            .map(|text| text.chars().count())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub repository: Option<String>,
}

/// Prior loan performance read from the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanHistory {
    pub successful_loans: u32,
    pub defaulted_loans: u32,
    pub total_borrowed: f64,
    pub total_repaid: f64,
    pub completed_projects: u32,
}

impl LoanHistory {
    /// Repayment success rate, zero without history.
    pub fn success_rate(&self) -> f64 {
        let total = u64::from(self.successful_loans) + u64::from(self.defaulted_loans);
        if total == 0 {
            return 0.0;
        }
        f64::from(self.successful_loans) / total as f64
    }

    pub fn has_history(&self) -> bool {
        self.successful_loans > 0 || self.defaulted_loans > 0
    }

    pub fn repayment_ratio(&self) -> f64 {
        self.total_repaid / self.total_borrowed.max(1.0)
    }
}
