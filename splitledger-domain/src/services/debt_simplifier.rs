use crate::{
    model::{MemberBalances, Money, Transfer},
    services::settlement_tolerance::is_settled,
};

/// Turns a balance table into a short list of debtor-to-creditor payments.
pub struct DebtSimplifier;

struct OpenPosition<'a> {
    name: &'a str,
    remaining: Money,
}

impl DebtSimplifier {
    /// Greedy largest-first matching of debtors against creditors
    ///
    /// Balances within the settlement tolerance are ignored. Exact ties keep
    /// the iteration order of `balances`, so the output is deterministic.
    /// Transfer amounts are rounded to cents; the matching itself works on
    /// unrounded amounts.
    ///
    /// If the balances do not sum to zero, matching stops once either side
    /// runs out and the residual is left out of the plan.
    pub fn simplify<'a>(&self, balances: &MemberBalances<'a>) -> Vec<Transfer<'a>> {
        let mut creditors = Vec::new();
        let mut debtors = Vec::new();
        for (&name, &balance) in balances {
            if is_settled(balance) {
                continue;
            }
            if balance.is_positive() {
                creditors.push(OpenPosition {
                    name,
                    remaining: balance,
                });
            } else {
                debtors.push(OpenPosition {
                    name,
                    remaining: -balance,
                });
            }
        }

        let imbalance: Money = balances.values().sum();
        if !is_settled(imbalance) {
            tracing::warn!(
                member_count = balances.len(),
                imbalance = %imbalance,
                "Balances do not sum to zero; residual will not be settled"
            );
        }

        // `sort_by` is stable: equal amounts stay in first-observed order.
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let mut transfers = Vec::with_capacity(creditors.len() + debtors.len());
        let (mut i, mut j) = (0, 0);
        while let (Some(debtor), Some(creditor)) = (debtors.get_mut(i), creditors.get_mut(j)) {
            let pay = debtor.remaining.min(creditor.remaining);
            let amount = pay.round_cents();
            if !amount.is_zero() {
                transfers.push(Transfer {
                    from: debtor.name,
                    to: creditor.name,
                    amount,
                });
            }

            debtor.remaining -= pay;
            creditor.remaining -= pay;

            if debtor.remaining.is_zero() {
                i += 1;
            }
            if creditor.remaining.is_zero() {
                j += 1;
            }
        }

        tracing::debug!(
            creditor_count = creditors.len(),
            debtor_count = debtors.len(),
            transfer_count = transfers.len(),
            "Simplified debts"
        );

        transfers
    }
}
