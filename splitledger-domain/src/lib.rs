#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    BalanceAccumulator, Expense, ExpenseDraft, ExpenseId, MemberBalances, Money, PersonBalance,
    Roster, SplitPolicy, Transfer,
};
pub use services::{
    BalanceCalculator, DebtSimplifier, ExpenseValidationError, ExpenseValidator, MAX_EXPENSE_AMOUNT,
    SETTLEMENT_TOLERANCE, is_fully_settled, is_settled, is_within_tolerance,
};

/// Net balance per participant. See [`BalanceCalculator::calculate`].
pub fn compute_balances<'a, I>(roster: I, expenses: &'a [Expense]) -> MemberBalances<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    BalanceCalculator.calculate(roster, expenses)
}

/// Sum of all expense amounts; zero for an empty list.
pub fn compute_total_spending(expenses: &[Expense]) -> Money {
    BalanceCalculator.total_spending(expenses)
}

/// Settlement transfers for a balance table. See [`DebtSimplifier::simplify`].
pub fn simplify_debts<'a>(balances: &MemberBalances<'a>) -> Vec<Transfer<'a>> {
    DebtSimplifier.simplify(balances)
}
