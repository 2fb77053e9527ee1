use crate::model::{BalanceAccumulator, Expense, MemberBalances, Money};

/// Folds an expense list into per-person net balances.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Calculate balances for a roster snapshot and an expense list
    ///
    /// Every roster member gets an entry, even without expenses. Names that
    /// only appear in expenses (e.g. removed participants) are added on first
    /// reference. Shares are kept at full decimal precision.
    ///
    /// # Returns
    /// Balance per name; positive means the group owes that person
    pub fn calculate<'a, I>(&self, roster: I, expenses: &'a [Expense]) -> MemberBalances<'a>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut accumulator = BalanceAccumulator::new(roster);
        for expense in expenses {
            accumulator.apply(expense);
        }
        let balances = accumulator.into_balances();
        tracing::trace!(
            member_count = balances.len(),
            expense_count = expenses.len(),
            "Calculated balances"
        );
        balances
    }

    pub fn total_spending(&self, expenses: &[Expense]) -> Money {
        expenses.iter().map(|expense| expense.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseDraft, ExpenseId, SplitPolicy};
    use rstest::{fixture, rstest};

    #[fixture]
    fn calculator() -> BalanceCalculator {
        BalanceCalculator
    }

    fn money(value: i64) -> Money {
        Money::from_i64(value)
    }

    fn recorded(drafts: Vec<ExpenseDraft>) -> Vec<Expense> {
        drafts
            .into_iter()
            .enumerate()
            .map(|(idx, draft)| draft.into_expense(ExpenseId(idx as u64 + 1)))
            .collect()
    }

    #[rstest]
    #[case::payer_in_split(
        &["Alice", "Bob"],
        vec![ExpenseDraft::equal("Lunch", money(20), "Alice", ["Alice", "Bob"])],
        vec![("Alice", money(10)), ("Bob", money(-10))]
    )]
    #[case::payer_outside_split(
        &["Alice", "Bob", "Carol"],
        vec![ExpenseDraft::equal("Tickets", money(30), "Carol", ["Alice", "Bob"])],
        vec![("Alice", money(-15)), ("Bob", money(-15)), ("Carol", money(30))]
    )]
    #[case::custom_split(
        &["Alice", "Bob", "Carol"],
        vec![ExpenseDraft::custom(
            "Dinner",
            money(30),
            "Carol",
            [("Alice", money(10)), ("Bob", money(20))],
        )],
        vec![("Alice", money(-10)), ("Bob", money(-20)), ("Carol", money(30))]
    )]
    #[case::roster_member_without_expenses(
        &["Alice", "Bob", "Dave"],
        vec![ExpenseDraft::equal("Coffee", money(8), "Bob", ["Alice", "Bob"])],
        vec![("Alice", money(-4)), ("Bob", money(4)), ("Dave", money(0))]
    )]
    #[case::removed_participant_keeps_share(
        &["Alice"],
        vec![ExpenseDraft::equal("Groceries", money(40), "Alice", ["Alice", "Eve"])],
        vec![("Alice", money(20)), ("Eve", money(-20))]
    )]
    #[case::expenses_offset(
        &["Alice", "Bob"],
        vec![
            ExpenseDraft::equal("Lunch", money(20), "Alice", ["Alice", "Bob"]),
            ExpenseDraft::equal("Dinner", money(20), "Bob", ["Alice", "Bob"]),
        ],
        vec![("Alice", money(0)), ("Bob", money(0))]
    )]
    fn calculate_cases(
        calculator: BalanceCalculator,
        #[case] roster: &[&str],
        #[case] drafts: Vec<ExpenseDraft>,
        #[case] expected: Vec<(&str, Money)>,
    ) {
        let expenses = recorded(drafts);
        let balances = calculator.calculate(roster.iter().copied(), &expenses);

        let actual: Vec<(&str, Money)> = balances.iter().map(|(&name, &b)| (name, b)).collect();
        assert_eq!(actual, expected);
    }

    #[rstest]
    fn missing_custom_share_counts_as_zero(calculator: BalanceCalculator) {
        let mut draft = ExpenseDraft::custom("Snacks", money(10), "Alice", [("Alice", money(10))]);
        draft.split_between.push("Bob".to_owned());
        let expenses = recorded(vec![draft]);

        let balances = calculator.calculate(["Alice", "Bob"], &expenses);

        assert_eq!(balances.get("Alice"), Some(&money(0)));
        assert_eq!(balances.get("Bob"), Some(&money(0)));
    }

    #[rstest]
    fn expense_without_participants_is_skipped(calculator: BalanceCalculator) {
        let expenses = recorded(vec![ExpenseDraft {
            split: SplitPolicy::Equal,
            split_between: Vec::new(),
            ..ExpenseDraft::equal("Ghost", money(10), "Alice", ["Alice"])
        }]);

        let balances = calculator.calculate(["Alice"], &expenses);

        assert_eq!(balances.get("Alice"), Some(&money(0)));
    }

    #[rstest]
    fn equal_thirds_keep_full_precision(calculator: BalanceCalculator) {
        let expenses = recorded(vec![ExpenseDraft::equal(
            "Pizza",
            money(10),
            "Alice",
            ["Alice", "Bob", "Carol"],
        )]);

        let balances = calculator.calculate(["Alice", "Bob", "Carol"], &expenses);

        let bob = balances["Bob"];
        assert_ne!(bob, bob.round_cents());
        assert_eq!(bob.round_cents(), Money::new(-333, 2));
        let total: Money = balances.values().sum();
        assert!(total.abs() < Money::new(1, 20));
    }

    #[rstest]
    fn empty_inputs_yield_empty_balances(calculator: BalanceCalculator) {
        let balances = calculator.calculate(std::iter::empty(), &[]);

        assert!(balances.is_empty());
        assert_eq!(calculator.total_spending(&[]), Money::ZERO);
    }

    #[rstest]
    fn total_spending_sums_amounts(calculator: BalanceCalculator) {
        let expenses = recorded(vec![
            ExpenseDraft::equal("Lunch", Money::new(2050, 2), "Alice", ["Alice", "Bob"]),
            ExpenseDraft::equal("Taxi", Money::new(1225, 2), "Bob", ["Bob"]),
        ]);

        assert_eq!(calculator.total_spending(&expenses), Money::new(3275, 2));
    }
}
