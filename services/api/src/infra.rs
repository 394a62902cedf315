use chrono::{DateTime, Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use trust_engine::scoring::{
    ActivityEvent, ApplicantHandle, CodeHostingProfile, EvidenceBundle, EvidenceProvider,
    IdentityEvidence, LoanHistory, ProviderError, Repository, ScoreScale, VerificationMethod,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Evidence held in memory, keyed by applicant handle.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEvidenceProvider {
    bundles: Arc<Mutex<HashMap<ApplicantHandle, EvidenceBundle>>>,
}

impl InMemoryEvidenceProvider {
    pub(crate) fn with_demo_applicants(as_of: DateTime<Utc>) -> Self {
        let provider = Self::default();
        for (handle, bundle) in demo_applicants(as_of) {
            provider.insert(ApplicantHandle::new(handle), bundle);
        }
        provider
    }

    pub(crate) fn insert(&self, handle: ApplicantHandle, bundle: EvidenceBundle) {
        let mut guard = self.bundles.lock().expect("evidence mutex poisoned");
        guard.insert(handle, bundle);
    }

    pub(crate) fn handles(&self) -> Vec<ApplicantHandle> {
        let guard = self.bundles.lock().expect("evidence mutex poisoned");
        let mut handles: Vec<_> = guard.keys().cloned().collect();
        handles.sort();
        handles
    }

    pub(crate) fn len(&self) -> usize {
        self.bundles.lock().expect("evidence mutex poisoned").len()
    }
}

impl EvidenceProvider for InMemoryEvidenceProvider {
    fn fetch(&self, handle: &ApplicantHandle) -> Result<EvidenceBundle, ProviderError> {
        let guard = self.bundles.lock().expect("evidence mutex poisoned");
        guard
            .get(handle)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(handle.as_str().to_string()))
    }
}

pub(crate) fn parse_scale(raw: &str) -> Result<ScoreScale, String> {
    raw.parse::<ScoreScale>()
        .map_err(|err| format!("{err}; expected 'comprehensive' or 'legacy'"))
}

/// Sample applicants spanning the risk categories, anchored to `as_of`.
pub(crate) fn demo_applicants(as_of: DateTime<Utc>) -> Vec<(&'static str, EvidenceBundle)> {
    vec![
        ("veteran-dev", veteran(as_of)),
        ("steady-builder", steady_builder(as_of)),
        ("fresh-wallet", EvidenceBundle::empty("0x7e11", as_of)),
    ]
}

fn veteran(as_of: DateTime<Utc>) -> EvidenceBundle {
    let languages = ["Rust", "TypeScript", "Solidity", "Go", "Python"];
    let repositories = (0..36)
        .map(|index| Repository {
            name: match index {
                0 => "escrow-audit".to_string(),
                1 => "ledger-tests".to_string(),
                _ => format!("protocol-crate-{index}"),
            },
            description: Some(format!("Maintained lending protocol component number {index}")),
            stars: if index < 20 { 55 } else { 3 },
            forks: 12,
            language: Some(languages[index % languages.len()].to_string()),
            size_kb: 18_000,
            created_at: Some(as_of - Duration::days(1_400)),
            updated_at: Some(as_of - Duration::days((index % 15) as i64)),
            pushed_at: Some(as_of - Duration::days((index % 20) as i64)),
        })
        .collect();

    EvidenceBundle {
        assessed_at: as_of,
        identity: verified_identity("0x9f2c", "veteran-dev"),
        profile: CodeHostingProfile {
            login: Some("veteran-dev".to_string()),
            created_at: Some(as_of - Duration::days(2_200)),
            public_repos: 36,
            followers: 620,
            following: 80,
            contributions: 1_900,
            has_bio: true,
            has_website: true,
            has_location: true,
            has_company: true,
        },
        repositories,
        activity_events: push_events(as_of, 24, "veteran-dev/protocol-crate-2"),
        loan_history: LoanHistory {
            successful_loans: 5,
            defaulted_loans: 0,
            total_borrowed: 42_000.0,
            total_repaid: 42_000.0,
            completed_projects: 9,
        },
    }
}

fn steady_builder(as_of: DateTime<Utc>) -> EvidenceBundle {
    let repositories = (0..9)
        .map(|index| Repository {
            name: format!("tooling-{index}"),
            description: Some("Command line helpers for wallet operators".to_string()),
            stars: 8,
            forks: 2,
            language: Some(if index % 2 == 0 { "Rust" } else { "Python" }.to_string()),
            size_kb: 6_500,
            created_at: Some(as_of - Duration::days(600)),
            updated_at: Some(as_of - Duration::days(20 + index as i64 * 15)),
            pushed_at: Some(as_of - Duration::days(10 + index as i64 * 12)),
        })
        .collect();

    EvidenceBundle {
        assessed_at: as_of,
        identity: verified_identity("0x44d0", "steady-builder"),
        profile: CodeHostingProfile {
            login: Some("steady-builder".to_string()),
            created_at: Some(as_of - Duration::days(900)),
            public_repos: 9,
            followers: 75,
            following: 40,
            contributions: 420,
            has_bio: true,
            has_website: false,
            has_location: true,
            has_company: false,
        },
        repositories,
        activity_events: push_events(as_of, 8, "steady-builder/tooling-0"),
        loan_history: LoanHistory {
            successful_loans: 1,
            defaulted_loans: 1,
            total_borrowed: 3_000.0,
            total_repaid: 1_800.0,
            completed_projects: 2,
        },
    }
}

fn verified_identity(address: &str, handle: &str) -> IdentityEvidence {
    IdentityEvidence {
        address: address.to_string(),
        handle: Some(handle.to_string()),
        is_verified: true,
        method: Some(VerificationMethod::Gist),
        evidence: Some(format!("gist:{handle}/{address}")),
    }
}

fn push_events(as_of: DateTime<Utc>, count: i64, repository: &str) -> Vec<ActivityEvent> {
    (0..count)
        .map(|day| ActivityEvent {
            kind: "PushEvent".to_string(),
            occurred_at: as_of - Duration::days(day),
            repository: Some(repository.to_string()),
        })
        .collect()
}
