use crate::{
    model::{ExpenseDraft, Money, Roster, SplitPolicy},
    services::settlement_tolerance::is_within_tolerance,
};
use fxhash::FxHashSet;
use rust_decimal::Decimal;
use thiserror::Error;

/// Largest accepted expense amount or share (10^15). Far enough below the
/// decimal range that sums over any realistic ledger cannot overflow.
pub const MAX_EXPENSE_AMOUNT: Money =
    Money::from_decimal(Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseValidationError {
    #[error("Expense description must not be empty")]
    EmptyDescription,
    #[error("Expense amount must be positive (found {amount})")]
    NonPositiveAmount { amount: Money },
    #[error("Expense amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge { amount: Money, max: Money },
    #[error("Payer '{name}' is not in the roster")]
    UnknownPayer { name: String },
    #[error("Expense must be split between at least one person")]
    EmptySplit,
    #[error("Participant '{name}' is not in the roster")]
    UnknownParticipant { name: String },
    #[error("Participant '{name}' appears more than once in the split")]
    DuplicateParticipant { name: String },
    #[error("Share for '{name}' must not be negative (found {share})")]
    NegativeShare { name: String, share: Money },
    #[error("Custom amounts must total the expense amount (expected {expected}, found {actual})")]
    CustomAmountsMismatch { expected: Money, actual: Money },
}

/// Entry-time checks for a new expense.
///
/// The balance calculator trusts these to have passed and never repeats them.
pub struct ExpenseValidator;

impl ExpenseValidator {
    pub fn validate(
        &self,
        draft: &ExpenseDraft,
        roster: &Roster,
    ) -> Result<(), ExpenseValidationError> {
        if draft.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if !draft.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount {
                amount: draft.amount,
            });
        }
        if draft.amount > MAX_EXPENSE_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge {
                amount: draft.amount,
                max: MAX_EXPENSE_AMOUNT,
            });
        }
        if !roster.contains(&draft.paid_by) {
            return Err(ExpenseValidationError::UnknownPayer {
                name: draft.paid_by.clone(),
            });
        }
        if draft.split_between.is_empty() {
            return Err(ExpenseValidationError::EmptySplit);
        }

        let mut seen = FxHashSet::default();
        for name in &draft.split_between {
            if !roster.contains(name) {
                return Err(ExpenseValidationError::UnknownParticipant { name: name.clone() });
            }
            if !seen.insert(name.as_str()) {
                return Err(ExpenseValidationError::DuplicateParticipant { name: name.clone() });
            }
        }

        if let SplitPolicy::Custom { custom_amounts } = &draft.split {
            let mut actual = Money::ZERO;
            for name in &draft.split_between {
                let share = custom_amounts
                    .get(name.as_str())
                    .copied()
                    .unwrap_or(Money::ZERO);
                if share.is_negative() {
                    return Err(ExpenseValidationError::NegativeShare {
                        name: name.clone(),
                        share,
                    });
                }
                actual = actual.saturating_add(share);
            }
            if !is_within_tolerance(actual, draft.amount) {
                return Err(ExpenseValidationError::CustomAmountsMismatch {
                    expected: draft.amount,
                    actual,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn roster() -> Roster {
        Roster::from_iter(["Alice", "Bob", "Carol"])
    }

    fn money(value: i64) -> Money {
        Money::from_i64(value)
    }

    fn lunch() -> ExpenseDraft {
        ExpenseDraft::equal("Lunch", money(30), "Alice", ["Alice", "Bob", "Carol"])
    }

    #[rstest]
    #[case::equal_split(lunch())]
    #[case::custom_exact(ExpenseDraft::custom(
        "Dinner",
        money(30),
        "Carol",
        [("Alice", money(10)), ("Bob", money(20))],
    ))]
    #[case::custom_within_a_cent(ExpenseDraft::custom(
        "Dinner",
        money(10),
        "Carol",
        [("Alice", Money::new(333, 2)), ("Bob", Money::new(333, 2)), ("Carol", Money::new(333, 2))],
    ))]
    fn accepts_valid_drafts(roster: Roster, #[case] draft: ExpenseDraft) {
        assert_eq!(ExpenseValidator.validate(&draft, &roster), Ok(()));
    }

    #[rstest]
    #[case::blank_description(
        ExpenseDraft { description: "   ".to_owned(), ..lunch() },
        ExpenseValidationError::EmptyDescription
    )]
    #[case::zero_amount(
        ExpenseDraft { amount: Money::ZERO, ..lunch() },
        ExpenseValidationError::NonPositiveAmount { amount: Money::ZERO }
    )]
    #[case::amount_above_ceiling(
        ExpenseDraft { amount: MAX_EXPENSE_AMOUNT + Money::new(1, 2), ..lunch() },
        ExpenseValidationError::AmountTooLarge {
            amount: MAX_EXPENSE_AMOUNT + Money::new(1, 2),
            max: MAX_EXPENSE_AMOUNT,
        }
    )]
    #[case::unknown_payer(
        ExpenseDraft { paid_by: "Eve".to_owned(), ..lunch() },
        ExpenseValidationError::UnknownPayer { name: "Eve".to_owned() }
    )]
    #[case::empty_split(
        ExpenseDraft { split_between: Vec::new(), ..lunch() },
        ExpenseValidationError::EmptySplit
    )]
    #[case::unknown_participant(
        ExpenseDraft::equal("Lunch", money(30), "Alice", ["Alice", "Eve"]),
        ExpenseValidationError::UnknownParticipant { name: "Eve".to_owned() }
    )]
    #[case::duplicate_participant(
        ExpenseDraft::equal("Lunch", money(30), "Alice", ["Bob", "Bob"]),
        ExpenseValidationError::DuplicateParticipant { name: "Bob".to_owned() }
    )]
    #[case::negative_share(
        ExpenseDraft::custom("Refund", money(10), "Alice", [("Alice", money(15)), ("Bob", money(-5))]),
        ExpenseValidationError::NegativeShare { name: "Bob".to_owned(), share: money(-5) }
    )]
    #[case::custom_total_short(
        ExpenseDraft::custom("Dinner", money(30), "Carol", [("Alice", money(10)), ("Bob", money(15))]),
        ExpenseValidationError::CustomAmountsMismatch { expected: money(30), actual: money(25) }
    )]
    fn rejects_invalid_drafts(
        roster: Roster,
        #[case] draft: ExpenseDraft,
        #[case] expected: ExpenseValidationError,
    ) {
        assert_eq!(ExpenseValidator.validate(&draft, &roster), Err(expected));
    }

    #[rstest]
    fn shares_outside_the_split_are_ignored(roster: Roster) {
        let mut draft = ExpenseDraft::custom(
            "Dinner",
            money(30),
            "Carol",
            [("Alice", money(10)), ("Bob", money(20)), ("Carol", money(5))],
        );
        draft.split_between.retain(|name| name != "Carol");

        assert_eq!(ExpenseValidator.validate(&draft, &roster), Ok(()));
    }

    #[test]
    fn ceiling_is_one_quadrillion() {
        assert_eq!(MAX_EXPENSE_AMOUNT, Money::new(1_000_000_000_000_000, 0));
    }

    #[rstest]
    fn oversized_shares_report_a_mismatch(roster: Roster) {
        let huge = Money::from_decimal(Decimal::MAX);
        let draft = ExpenseDraft::custom("Dinner", money(30), "Carol", [("Alice", huge), ("Bob", huge)]);

        assert_eq!(
            ExpenseValidator.validate(&draft, &roster),
            Err(ExpenseValidationError::CustomAmountsMismatch {
                expected: money(30),
                actual: huge,
            })
        );
    }
}
