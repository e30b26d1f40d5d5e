//! Application configuration loading from config.toml
//!
//! The TOML file lists budgets to create on startup and a flag for loading demo data.
//! Budgets listed here are only created when their category has no budget yet, so caps
//! edited at runtime survive a restart.

use crate::errors::{Error, Result};
use crate::models::BudgetInput;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "BUDGET_LEDGER_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Budgets to create when missing
    #[serde(default)]
    pub budgets: Vec<BudgetConfig>,
    /// Record the sample transactions when the store has none
    #[serde(default)]
    pub demo_data: bool,
}

/// Configuration for a single budget
#[derive(Debug, Deserialize, Clone)]
pub struct BudgetConfig {
    /// Category the budget caps
    pub category: String,
    /// Monthly cap
    pub budget: f64,
}

impl BudgetConfig {
    /// The same data as a caller-supplied budget input, so it passes the same validation.
    #[must_use]
    pub fn to_input(&self) -> BudgetInput {
        BudgetInput {
            category: self.category.clone(),
            budget: self.budget,
        }
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `$BUDGET_LEDGER_CONFIG`, or ./config.toml.
///
/// A missing file is not an error: the empty default configuration is returned.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&path).exists() {
        warn!("Config file {} not found, using defaults", path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from {}", path);
    load_config(path)
}
