use std::env;
use thiserror::Error;

const CURRENCY_SYMBOL_VAR: &str = "SPLITLEDGER_CURRENCY_SYMBOL";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SPLITLEDGER_CURRENCY_SYMBOL is not valid unicode")]
    NonUnicodeCurrencySymbol,
    #[error("Failed to read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

/// Interpreter settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub currency_symbol: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let currency_symbol = match lookup(CURRENCY_SYMBOL_VAR) {
            Ok(symbol) => symbol,
            Err(env::VarError::NotPresent) => DEFAULT_CURRENCY_SYMBOL.to_owned(),
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeCurrencySymbol),
        };
        Ok(Self { currency_symbol })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
        }
    }
}

/// Initialize logging and tracing
pub fn init_logging() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
}
