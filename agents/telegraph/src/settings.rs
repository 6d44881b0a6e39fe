//! Configuration

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

fn default_workers() -> usize {
    5
}

fn default_gas_buffer() -> f64 {
    1.05
}

fn default_receipt_poll_seconds() -> u64 {
    2
}

fn default_accounts_file() -> String {
    "accounts.txt".to_string()
}

/// Agent settings, read from `settings.{yaml,toml,json}` in the working
/// directory with `TELEGRAPH_`-prefixed environment overrides on top.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// JSON-RPC endpoint for the home chain.
    pub rpc_url: String,
    /// Path to the newline-delimited accounts file.
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,
    /// Worker pool width.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Multiplier applied to gas estimates when the caller supplies no
    /// (or too little) gas.
    #[serde(default = "default_gas_buffer")]
    pub gas_buffer: f64,
    /// Seconds to sleep between mint-receipt polls.
    #[serde(default = "default_receipt_poll_seconds")]
    pub receipt_poll_seconds: u64,
    /// Upper bound on mint-receipt polls. `None` keeps polling forever.
    #[serde(default)]
    pub receipt_poll_max_attempts: Option<u64>,
}

impl Settings {
    /// Load settings from disk and environment.
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("settings").required(true))
            .add_source(Environment::with_prefix("telegraph"))
            .build()?
            .try_deserialize()
    }
}
