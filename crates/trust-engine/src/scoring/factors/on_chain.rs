use super::{FactorBuilder, FactorKind, TrustFactor};
use crate::scoring::domain::{IdentityEvidence, LoanHistory};

pub fn score_on_chain_history(identity: &IdentityEvidence, history: &LoanHistory) -> TrustFactor {
    let mut factor = FactorBuilder::new(FactorKind::OnChainHistory);

    if identity.is_verified {
        factor.add(40.0, "Identity verified on-chain".to_string());
    } else {
        factor.note("Identity not verified");
        factor.suggest("Verify your identity to link your wallet and code-hosting account");
    }

    let loan_points = (f64::from(history.successful_loans) * 10.0).min(40.0);
    factor.add(
        loan_points,
        format!("Successful loans: {}", history.successful_loans),
    );

    let repayment_ratio = history.repayment_ratio().max(0.0);
    factor.add(
        (repayment_ratio * 20.0).min(20.0),
        format!("Repaid {:.0}% of total borrowed", repayment_ratio * 100.0),
    );

    if history.successful_loans < 4 {
        factor.suggest("Complete more loans successfully to strengthen your on-chain record");
    }

    factor.finish()
}
