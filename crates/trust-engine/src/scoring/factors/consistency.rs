use super::{FactorBuilder, FactorKind, TrustFactor};
use crate::scoring::domain::EvidenceBundle;

const PUSH_WINDOW_DAYS: i64 = 30;

pub fn score_consistency(evidence: &EvidenceBundle) -> TrustFactor {
    let mut factor = FactorBuilder::new(FactorKind::Consistency);
    let history = &evidence.loan_history;

    let success_rate = history.success_rate();
    factor.add(
        success_rate * 60.0,
        format!(
            "Loan repayment success rate: {:.0}% ({} repaid, {} defaulted)",
            success_rate * 100.0,
            history.successful_loans,
            history.defaulted_loans
        ),
    );

    let pushed = evidence.fraction_pushed_within(PUSH_WINDOW_DAYS);
    factor.add(
        pushed * 40.0,
        format!(
            "Repositories pushed to in the last {PUSH_WINDOW_DAYS} days: {:.0}%",
            pushed * 100.0
        ),
    );

    if !history.has_history() {
        factor.suggest("Build a repayment record by completing a first loan");
    } else if success_rate < 1.0 {
        factor.suggest("Repay outstanding loans on schedule to restore your repayment record");
    }
    if pushed < 0.5 {
        factor.suggest("Push to your repositories consistently");
    }

    factor.finish()
}
