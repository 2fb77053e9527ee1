use chrono::NaiveDate;
use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{
    fmt,
    iter::Sum,
    str::FromStr,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Net balance per participant, in first-observed order.
///
/// Roster members come first, followed by names that only appear in
/// historical expenses. Iteration order is the tie-break order used by
/// [`crate::DebtSimplifier`].
pub type MemberBalances<'a> = IndexMap<&'a str, Money, FxBuildHasher>;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub const fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub const fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Rounds to whole cents, half away from zero.
    pub fn round_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Divides into `parts` equal shares without rounding.
    ///
    /// Returns `None` for zero parts or when the division cannot be represented.
    pub fn split_evenly(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(parts)).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Saturates at the edge of the decimal range instead of overflowing.
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an expense's amount is divided among `split_between`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "splitType", rename_all = "lowercase")]
pub enum SplitPolicy {
    Equal,
    Custom {
        #[serde(rename = "customAmounts", default)]
        custom_amounts: IndexMap<String, Money>,
    },
}

impl SplitPolicy {
    pub fn custom<I, S>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (S, Money)>,
        S: Into<String>,
    {
        Self::Custom {
            custom_amounts: amounts
                .into_iter()
                .map(|(name, share)| (name.into(), share))
                .collect(),
        }
    }
}

/// Accepts a missing, `null` or blank date as no date.
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::from_str(raw).map(Some).map_err(de::Error::custom)
}

/// An expense as entered, before the store assigns it an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Money,
    pub paid_by: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub split: SplitPolicy,
    pub split_between: Vec<String>,
}

impl ExpenseDraft {
    pub fn equal<I, S>(
        description: impl Into<String>,
        amount: Money,
        paid_by: impl Into<String>,
        split_between: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            date: None,
            split: SplitPolicy::Equal,
            split_between: split_between.into_iter().map(Into::into).collect(),
        }
    }

    /// Custom split over exactly the names that have a share.
    pub fn custom<I, S>(
        description: impl Into<String>,
        amount: Money,
        paid_by: impl Into<String>,
        shares: I,
    ) -> Self
    where
        I: IntoIterator<Item = (S, Money)>,
        S: Into<String>,
    {
        let split = SplitPolicy::custom(shares);
        let split_between = match &split {
            SplitPolicy::Custom { custom_amounts } => custom_amounts.keys().cloned().collect(),
            SplitPolicy::Equal => Vec::new(),
        };
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            date: None,
            split,
            split_between,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            paid_by: self.paid_by,
            date: self.date,
            split: self.split,
            split_between: self.split_between,
        }
    }
}

/// A recorded expense. Never mutated once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub paid_by: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub split: SplitPolicy,
    pub split_between: Vec<String>,
}

/// Ordered set of unique participant names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    names: IndexSet<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the name is blank or already present.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_owned())
    }

    /// Returns `false` when the name is not present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.shift_remove(name.trim())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut roster = Self::new();
        for name in iter {
            roster.add(name.as_ref());
        }
        roster
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonBalance<'a> {
    pub name: &'a str,
    pub balance: Money,
}

/// A suggested payment from a debtor to a creditor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

pub struct BalanceAccumulator<'a> {
    balances: MemberBalances<'a>,
}

impl<'a> BalanceAccumulator<'a> {
    pub fn new<I>(roster: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut balances = MemberBalances::default();
        for member in roster {
            balances.entry(member).or_insert(Money::ZERO);
        }
        Self { balances }
    }

    /// Applies one expense, or nothing at all if any adjustment would leave
    /// the decimal range.
    pub fn apply(&mut self, expense: &'a Expense) {
        if expense.split_between.is_empty() {
            tracing::warn!(
                expense_id = expense.id.0,
                paid_by = %expense.paid_by,
                "Skipping expense without participants"
            );
            return;
        }

        let Some(updates) = self.updated_balances(expense) else {
            tracing::warn!(
                expense_id = expense.id.0,
                amount = %expense.amount,
                "Skipping expense whose shares are not representable"
            );
            return;
        };
        for (member, balance) in updates {
            self.balances.insert(member, balance);
        }
    }

    fn updated_balances(&self, expense: &'a Expense) -> Option<Vec<(&'a str, Money)>> {
        let mut deltas = MemberBalances::default();
        let equal_share = expense.amount.split_evenly(expense.split_between.len());
        for member in &expense.split_between {
            let share = match &expense.split {
                SplitPolicy::Equal => equal_share?,
                SplitPolicy::Custom { custom_amounts } => custom_amounts
                    .get(member.as_str())
                    .copied()
                    .unwrap_or(Money::ZERO),
            };
            let delta = deltas.entry(member.as_str()).or_insert(Money::ZERO);
            *delta = delta.checked_sub(share)?;
        }
        let delta = deltas.entry(expense.paid_by.as_str()).or_insert(Money::ZERO);
        *delta = delta.checked_add(expense.amount)?;

        deltas
            .into_iter()
            .map(|(member, delta)| {
                let current = self.balances.get(member).copied().unwrap_or(Money::ZERO);
                Some((member, current.checked_add(delta)?))
            })
            .collect()
    }

    pub fn into_balances(self) -> MemberBalances<'a> {
        self.balances
    }
}
