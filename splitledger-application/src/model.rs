use serde::{Deserialize, Serialize};
use splitledger_domain::{Expense, Money, PersonBalance, Transfer};

/// Serializable state of a ledger: the roster and every recorded expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Everything a balance view shows, derived from one consistent ledger state.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary<'a> {
    /// Roster members in roster order, then participants only referenced by
    /// expenses.
    pub balances: Vec<PersonBalance<'a>>,
    pub total_spending: Money,
    pub transfers: Vec<Transfer<'a>>,
    pub fully_settled: bool,
}

impl LedgerSummary<'_> {
    pub fn is_fully_settled(&self) -> bool {
        self.fully_settled
    }
}
