#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger_store;
pub mod model;

pub use error::LedgerError;
pub use ledger_store::LedgerStore;
pub use model::{LedgerSnapshot, LedgerSummary};
