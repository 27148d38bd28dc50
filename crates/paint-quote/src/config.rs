//! Engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cart::CartPolicy;
use crate::checkout::CheckoutPolicy;
use crate::error::QuoteError;
use crate::rates::RateTable;

/// Everything the engine reads from a config file. Every section falls back
/// to its defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub rates: RateTable,
    pub cart: CartPolicy,
    pub checkout: CheckoutPolicy,
    pub session: SessionConfig,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            cart: CartPolicy::default(),
            checkout: CheckoutPolicy::default(),
            session: SessionConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl QuoteConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, QuoteError> {
        let config: QuoteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, QuoteError> {
        let config: QuoteConfig = serde_json::from_str(content)
            .map_err(|e| QuoteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuoteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuoteError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path.extension().map(|ext| ext == "json").unwrap_or(false);
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn to_toml_string(&self) -> Result<String, QuoteError> {
        toml::to_string_pretty(self).map_err(|e| QuoteError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), QuoteError> {
        self.rates.validate()?;
        self.cart.validate()?;
        self.checkout.validate()?;
        self.session.validate()
    }
}

/// Persistence settings for cart sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a booking cart survives between visits.
    pub booking_freshness_hours: u32,
    /// How long a single-service cart survives between visits.
    pub single_service_freshness_hours: u32,
    /// Directory for the file-backed store. Relative paths resolve against
    /// the config file's directory in the CLI.
    pub store_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            booking_freshness_hours: 7 * 24,
            single_service_freshness_hours: 24,
            store_dir: PathBuf::from(".paintquote"),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), QuoteError> {
        for (name, hours) in [
            ("session.booking_freshness_hours", self.booking_freshness_hours),
            (
                "session.single_service_freshness_hours",
                self.single_service_freshness_hours,
            ),
        ] {
            if hours == 0 {
                return Err(QuoteError::InvalidPolicy {
                    name: name.to_string(),
                    value: 0.0,
                });
            }
        }
        Ok(())
    }
}
