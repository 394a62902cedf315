use super::{FactorBuilder, FactorKind, TrustFactor};
use crate::scoring::domain::IdentityEvidence;

/// All-or-nothing: a verified identity scores 100, anything else 0.
pub fn score_verification(identity: &IdentityEvidence) -> TrustFactor {
    let mut factor = FactorBuilder::new(FactorKind::Verification);

    if identity.is_verified {
        let method = identity
            .method
            .map(|method| method.label())
            .unwrap_or("unspecified method");
        factor.add(100.0, format!("Verified via {method}"));
        if let Some(proof) = identity.evidence.as_deref() {
            factor.note(format!("Verification evidence: {proof}"));
        }
    } else {
        factor.note("Code-hosting account not verified");
        factor.suggest(VERIFY_IDENTITY);
    }

    factor.finish()
}

pub(crate) const VERIFY_IDENTITY: &str =
    "Complete identity verification to link your code-hosting account to your wallet";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::VerificationMethod;

    #[test]
    fn verified_identity_records_method_and_proof() {
        let identity = IdentityEvidence {
            address: "0xabc".to_string(),
            is_verified: true,
            method: Some(VerificationMethod::Gist),
            evidence: Some("gist.example/0xabc".to_string()),
            ..IdentityEvidence::default()
        };

        let factor = score_verification(&identity);
        assert_eq!(factor.score, 100.0);
        assert_eq!(factor.evidence[0], "Verified via public gist");
        assert!(factor.evidence[1].contains("gist.example/0xabc"));
    }

    #[test]
    fn unverified_identity_gets_no_partial_credit() {
        let identity = IdentityEvidence {
            method: Some(VerificationMethod::ProfileBio),
            evidence: Some("pending".to_string()),
            ..IdentityEvidence::default()
        };

        let factor = score_verification(&identity);
        assert_eq!(factor.score, 0.0);
        assert_eq!(factor.improvements, vec![VERIFY_IDENTITY.to_string()]);
    }
}
