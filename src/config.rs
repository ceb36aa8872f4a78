//! Application configuration management.
//!
//! Configuration is loaded from environment variables with the `envy` crate,
//! after an optional `.env` file has been read by `dotenvy`.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `MIN_OPENING_BALANCE` (optional): smallest balance an account may be opened with, defaults to 100
/// - `MAX_DEPOSIT_AMOUNT` (optional): largest single deposit, defaults to 10000
/// - `MAX_WITHDRAWAL_PERCENT` (optional): largest share of the balance a single withdrawal may take, defaults to 90
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_min_opening_balance")]
    pub min_opening_balance: Decimal,

    #[serde(default = "default_max_deposit_amount")]
    pub max_deposit_amount: Decimal,

    #[serde(default = "default_max_withdrawal_percent")]
    pub max_withdrawal_percent: Decimal,
}

fn default_port() -> u16 {
    3000
}

fn default_min_opening_balance() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn default_max_deposit_amount() -> Decimal {
    Decimal::from(10_000)
}

fn default_max_withdrawal_percent() -> Decimal {
    Decimal::from(90)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed into
    /// its expected type (e.g. `SERVER_PORT=abc`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Business rule limits handed to the HTTP layer.
    pub fn limits(&self) -> Limits {
        Limits {
            min_opening_balance: self.min_opening_balance,
            max_deposit_amount: self.max_deposit_amount,
            max_withdrawal_percent: self.max_withdrawal_percent,
        }
    }
}

/// Validation thresholds applied by the account handlers.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub min_opening_balance: Decimal,
    pub max_deposit_amount: Decimal,
    pub max_withdrawal_percent: Decimal,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_opening_balance: default_min_opening_balance(),
            max_deposit_amount: default_max_deposit_amount(),
            max_withdrawal_percent: default_max_withdrawal_percent(),
        }
    }
}
