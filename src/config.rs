//! Storefront configuration

use std::{fs, path::Path, time::Duration};

use rusty_money::{Findable, Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{FEATURED_COUNT, RELATED_COUNT, source::whole_units},
    pagination::PAGE_SIZE,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Price ceiling does not fit the currency's minor units
    #[error("Invalid price ceiling: {0}")]
    InvalidPriceCeiling(u64),
}

/// Storefront settings. Every field has a default, so an empty document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// ISO 4217 code prices are quoted in
    pub currency: String,

    /// Upper bound of the default price filter, in whole units
    pub price_ceiling: u64,

    /// Vehicles per listing page
    pub page_size: usize,

    /// Size of the featured row
    pub featured_count: usize,

    /// Size of the related-vehicles row
    pub related_count: usize,

    /// Artificial catalog fetch delay in milliseconds
    pub fetch_latency_ms: u64,

    /// Artificial login/registration delay in milliseconds
    pub auth_latency_ms: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: "KES".to_string(),
            price_ceiling: 5_000_000,
            page_size: PAGE_SIZE,
            featured_count: FEATURED_COUNT,
            related_count: RELATED_COUNT,
            fetch_latency_ms: 500,
            auth_latency_ms: 1000,
        }
    }
}

impl StorefrontConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or names an unknown currency.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_norway::from_str(yaml)?;

        config.currency()?;

        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code isn't an ISO 4217 currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        Currency::find(&self.currency).ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// Upper bound of the default price filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown or the ceiling overflows.
    pub fn price_ceiling(&self) -> Result<Money<'static, Currency>, ConfigError> {
        whole_units(self.price_ceiling, self.currency()?)
            .ok_or(ConfigError::InvalidPriceCeiling(self.price_ceiling))
    }

    /// Catalog fetch delay
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    /// Login/registration delay
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }
}
