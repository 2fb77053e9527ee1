use splitledger_domain::{ExpenseId, ExpenseValidationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    InvalidExpense(#[from] ExpenseValidationError),
    #[error("Expense {0} appears more than once in the snapshot")]
    DuplicateExpenseId(ExpenseId),
    #[error("Expense {id} has an amount or share outside the supported range")]
    AmountOutOfRange { id: ExpenseId },
    #[error("No expense ids are left to assign")]
    ExpenseIdsExhausted,
}
