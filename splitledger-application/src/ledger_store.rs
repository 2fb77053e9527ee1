use crate::{
    error::LedgerError,
    model::{LedgerSnapshot, LedgerSummary},
};
use fxhash::FxHashSet;
use splitledger_domain::{
    BalanceCalculator, DebtSimplifier, Expense, ExpenseDraft, ExpenseId, ExpenseValidator,
    MAX_EXPENSE_AMOUNT, MemberBalances, Money, PersonBalance, Roster, SplitPolicy, Transfer,
    is_fully_settled,
};

/// Owns the roster and the expense list.
///
/// Commands validate and mutate; queries recompute balances and transfers
/// from the current state on every call, so derived values never go stale.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    roster: Roster,
    expenses: Vec<Expense>,
    /// `None` once every id up to `u64::MAX` has been handed out.
    next_id: Option<u64>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            roster: Roster::new(),
            expenses: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Restores a store from a snapshot.
    ///
    /// Expenses are taken as recorded: they may name people that have since
    /// left the roster, so only ids and amount ranges are checked. The id
    /// counter resumes after the largest id.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        let roster = Roster::from_iter(&snapshot.people);

        let mut seen = FxHashSet::default();
        for expense in &snapshot.expenses {
            if !seen.insert(expense.id) {
                return Err(LedgerError::DuplicateExpenseId(expense.id));
            }
            if !amounts_in_range(expense) {
                return Err(LedgerError::AmountOutOfRange { id: expense.id });
            }
        }
        let next_id = match snapshot.expenses.iter().map(|expense| expense.id.0).max() {
            Some(last) => last.checked_add(1),
            None => Some(1),
        };

        tracing::debug!(
            member_count = roster.len(),
            expense_count = snapshot.expenses.len(),
            next_id = ?next_id,
            "Restored ledger"
        );

        Ok(Self {
            roster,
            expenses: snapshot.expenses,
            next_id,
        })
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            people: self.roster.iter().map(str::to_owned).collect(),
            expenses: self.expenses.clone(),
        }
    }

    /// Adds a participant. Blank or duplicate names are ignored.
    pub fn add_person(&mut self, name: &str) -> bool {
        let added = self.roster.add(name);
        if added {
            tracing::debug!(name = name.trim(), "Added person");
        }
        added
    }

    /// Removes a participant. Their recorded shares stay in the ledger.
    pub fn remove_person(&mut self, name: &str) -> bool {
        let removed = self.roster.remove(name);
        if removed {
            tracing::debug!(name, "Removed person");
        }
        removed
    }

    pub fn add_expense(&mut self, mut draft: ExpenseDraft) -> Result<ExpenseId, LedgerError> {
        if let Err(err) = ExpenseValidator.validate(&draft, &self.roster) {
            tracing::warn!(
                description = %draft.description,
                error = %err,
                "Rejected expense"
            );
            return Err(err.into());
        }

        let Some(next) = self.next_id else {
            tracing::warn!("Rejected expense: no ids left");
            return Err(LedgerError::ExpenseIdsExhausted);
        };

        draft.description = draft.description.trim().to_owned();
        let id = ExpenseId(next);
        self.next_id = next.checked_add(1);
        self.expenses.push(draft.into_expense(id));

        tracing::debug!(expense_id = id.0, "Added expense");
        Ok(id)
    }

    /// Deletes an expense. Unknown ids are ignored; ids are never reused.
    pub fn remove_expense(&mut self, id: ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            tracing::debug!(expense_id = id.0, "Removed expense");
        }
        removed
    }

    pub fn people(&self) -> &Roster {
        &self.roster
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn balances(&self) -> MemberBalances<'_> {
        BalanceCalculator.calculate(self.roster.iter(), &self.expenses)
    }

    pub fn total_spending(&self) -> Money {
        BalanceCalculator.total_spending(&self.expenses)
    }

    pub fn transfers(&self) -> Vec<Transfer<'_>> {
        DebtSimplifier.simplify(&self.balances())
    }

    pub fn summary(&self) -> LedgerSummary<'_> {
        let balances = self.balances();
        let transfers = DebtSimplifier.simplify(&balances);
        let fully_settled = is_fully_settled(&balances);

        LedgerSummary {
            balances: balances
                .into_iter()
                .map(|(name, balance)| PersonBalance { name, balance })
                .collect(),
            total_spending: self.total_spending(),
            transfers,
            fully_settled,
        }
    }
}

fn amounts_in_range(expense: &Expense) -> bool {
    let in_range = |amount: Money| amount.abs() <= MAX_EXPENSE_AMOUNT;
    in_range(expense.amount)
        && match &expense.split {
            SplitPolicy::Equal => true,
            SplitPolicy::Custom { custom_amounts } => custom_amounts.values().copied().all(in_range),
        }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}
