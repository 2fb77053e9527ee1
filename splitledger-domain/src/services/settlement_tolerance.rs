//! The single threshold below which an amount counts as settled.
//!
//! Shared by the debt simplifier, the fully-settled check and custom split
//! validation so the three never disagree.

use crate::model::{MemberBalances, Money};
use rust_decimal::Decimal;

/// One cent.
pub const SETTLEMENT_TOLERANCE: Money = Money::from_decimal(Decimal::from_parts(1, 0, 0, false, 2));

/// Whether `amount` is indistinguishable from zero at cent precision.
pub fn is_settled(amount: Money) -> bool {
    amount.abs() < SETTLEMENT_TOLERANCE
}

/// Whether two amounts differ by no more than the tolerance.
pub fn is_within_tolerance(lhs: Money, rhs: Money) -> bool {
    (lhs - rhs).abs() <= SETTLEMENT_TOLERANCE
}

/// True when every balance is settled. An empty ledger is fully settled.
pub fn is_fully_settled(balances: &MemberBalances<'_>) -> bool {
    balances.values().copied().all(is_settled)
}
