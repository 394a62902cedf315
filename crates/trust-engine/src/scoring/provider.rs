use super::domain::{ApplicantHandle, EvidenceBundle};

/// Source of evidence bundles, supplied by the caller.
///
/// Fetching, caching and retrying live behind this trait so the scoring
/// engine itself never performs I/O.
pub trait EvidenceProvider: Send + Sync {
    fn fetch(&self, handle: &ApplicantHandle) -> Result<EvidenceBundle, ProviderError>;
}

/// Error enumeration for evidence provider failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no evidence found for applicant '{0}'")]
    NotFound(String),
    #[error("evidence provider unavailable: {0}")]
    Unavailable(String),
}
