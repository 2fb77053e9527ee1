#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod render;

use bootstrap::{AppConfig, ConfigError, init_logging};
use render::SummaryRenderer;
use splitledger_application::{LedgerError, LedgerSnapshot, LedgerStore};
use std::{env, fs, io, process};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("Usage: splitledger-interpreter <ledger.json>")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Invalid ledger: {0}")]
    Ledger(#[from] LedgerError),
}

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let Some(path) = env::args().nth(1) else {
        return Err(CliError::Usage);
    };
    let config = AppConfig::from_env()?;

    let source = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let snapshot: LedgerSnapshot =
        serde_json::from_str(&source).map_err(|source| CliError::Parse {
            path: path.clone(),
            source,
        })?;

    let store = LedgerStore::from_snapshot(snapshot)?;
    tracing::info!(
        path = %path,
        member_count = store.people().len(),
        expense_count = store.expenses().len(),
        "Loaded ledger"
    );

    let renderer = SummaryRenderer::new(&config.currency_symbol);
    print!("{}", renderer.render(&store.summary()));
    Ok(())
}
