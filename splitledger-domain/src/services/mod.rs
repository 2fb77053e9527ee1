pub mod balance_calculator;
pub mod debt_simplifier;
pub mod expense_validator;
pub mod settlement_tolerance;

pub use balance_calculator::BalanceCalculator;
pub use debt_simplifier::DebtSimplifier;
pub use expense_validator::{ExpenseValidationError, ExpenseValidator, MAX_EXPENSE_AMOUNT};
pub use settlement_tolerance::{
    SETTLEMENT_TOLERANCE, is_fully_settled, is_settled, is_within_tolerance,
};
