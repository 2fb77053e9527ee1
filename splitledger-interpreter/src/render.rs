use splitledger_application::LedgerSummary;
use splitledger_domain::{Money, is_settled};
use std::fmt::Write;

pub const TOTAL_SPENDING: &str = "Total Group Spending";
pub const OWED: &str = "Owed";
pub const OWES: &str = "Owes";
pub const SETTLED_UP: &str = "Settled up";
pub const PAYS: &str = "pays";
pub const ALL_SETTLED: &str = "All balances are settled!";

/// Plain-text balance view for a ledger summary.
pub struct SummaryRenderer<'c> {
    currency_symbol: &'c str,
}

impl<'c> SummaryRenderer<'c> {
    pub fn new(currency_symbol: &'c str) -> Self {
        Self { currency_symbol }
    }

    pub fn render(&self, summary: &LedgerSummary<'_>) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{TOTAL_SPENDING}: {}",
            self.format_money(summary.total_spending)
        );

        for person in &summary.balances {
            let status = if is_settled(person.balance) {
                SETTLED_UP.to_owned()
            } else if person.balance.is_positive() {
                format!("{OWED} {}", self.format_money(person.balance))
            } else {
                format!("{OWES} {}", self.format_money(person.balance.abs()))
            };
            let _ = writeln!(out, "{}: {status}", person.name);
        }

        if summary.is_fully_settled() {
            let _ = writeln!(out, "{ALL_SETTLED}");
        } else {
            for transfer in &summary.transfers {
                let _ = writeln!(
                    out,
                    "{} {PAYS} {} {}",
                    transfer.from,
                    transfer.to,
                    self.format_money(transfer.amount)
                );
            }
        }

        out
    }

    fn format_money(&self, amount: Money) -> String {
        format!("{}{:.2}", self.currency_symbol, amount.round_cents().as_decimal())
    }
}
