use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::scoring::domain::{
    ActivityEvent, ApplicantHandle, CodeHostingProfile, EvidenceBundle, IdentityEvidence,
    LoanHistory, Repository, VerificationMethod,
};
use crate::scoring::provider::{EvidenceProvider, ProviderError};
use crate::scoring::service::TrustScoringService;

const LANGUAGES: [&str; 6] = ["Rust", "TypeScript", "Solidity", "Python", "Go", "JavaScript"];

pub(super) fn assessed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Applicant with no evidence at all.
pub(super) fn empty_bundle() -> EvidenceBundle {
    EvidenceBundle::empty("0xnew", assessed_at())
}

/// Established developer: 5.2 year old account, 42 repositories with 1230
/// stars, 450 followers, three repaid loans and a verified identity.
pub(super) fn strong_bundle() -> EvidenceBundle {
    let as_of = assessed_at();

    let repositories = (0..42)
        .map(|index| Repository {
            name: match index {
                0 => "audit-toolkit".to_string(),
                1 => "contract-tests".to_string(),
                _ => format!("lending-module-{index}"),
            },
            description: Some(format!(
                "Production-grade component {index} for the lending protocol"
            )),
            stars: if index < 30 { 41 } else { 0 },
            forks: 10,
            language: Some(LANGUAGES[index % LANGUAGES.len()].to_string()),
            size_kb: 20_000,
            created_at: Some(as_of - Duration::days(1_500)),
            updated_at: Some(as_of - Duration::days((index % 20) as i64)),
            pushed_at: Some(as_of - Duration::days((index % 25) as i64)),
        })
        .collect();

    let activity_events = (0..25)
        .map(|day| ActivityEvent {
            kind: "PushEvent".to_string(),
            occurred_at: as_of - Duration::days(day),
            repository: Some("octo/lending-module-2".to_string()),
        })
        .collect();

    EvidenceBundle {
        assessed_at: as_of,
        identity: IdentityEvidence {
            address: "0x9f2c".to_string(),
            handle: Some("octo".to_string()),
            is_verified: true,
            method: Some(VerificationMethod::Gist),
            evidence: Some("gist.example/octo/0x9f2c".to_string()),
        },
        profile: CodeHostingProfile {
            login: Some("octo".to_string()),
            created_at: Some(as_of - Duration::days(1_898)),
            public_repos: 42,
            followers: 450,
            following: 60,
            contributions: 1_400,
            has_bio: true,
            has_website: true,
            has_location: true,
            has_company: true,
        },
        repositories,
        activity_events,
        loan_history: LoanHistory {
            successful_loans: 3,
            defaulted_loans: 0,
            total_borrowed: 15_000.0,
            total_repaid: 15_000.0,
            completed_projects: 8,
        },
    }
}

#[derive(Default)]
pub(super) struct MemoryProvider {
    bundles: BTreeMap<ApplicantHandle, EvidenceBundle>,
}

impl MemoryProvider {
    pub(super) fn with(mut self, handle: &str, bundle: EvidenceBundle) -> Self {
        self.bundles.insert(ApplicantHandle::new(handle), bundle);
        self
    }
}

impl EvidenceProvider for MemoryProvider {
    fn fetch(&self, handle: &ApplicantHandle) -> Result<EvidenceBundle, ProviderError> {
        self.bundles
            .get(handle)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(handle.as_str().to_string()))
    }
}

pub(super) struct OfflineProvider;

impl EvidenceProvider for OfflineProvider {
    fn fetch(&self, _handle: &ApplicantHandle) -> Result<EvidenceBundle, ProviderError> {
        Err(ProviderError::Unavailable("ledger indexer timeout".to_string()))
    }
}

pub(super) fn memory_provider() -> MemoryProvider {
    MemoryProvider::default()
        .with("octo", strong_bundle())
        .with("newcomer", empty_bundle())
}

pub(super) fn build_service() -> TrustScoringService<MemoryProvider> {
    TrustScoringService::new(Arc::new(memory_provider()), ScoringConfig::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
