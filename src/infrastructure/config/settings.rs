//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; an empty file yields the defaults.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [matcher.keyword]
//! threshold = 60
//! denominator = "min"
//!
//! [matcher.fuzzy]
//! enabled = true
//! method = "token_set_ratio"
//!
//! [evaluator]
//! min_spread = "0.01"
//!
//! [scan]
//! source_timeout_ms = 5000
//! ```
//!
//! # Example
//!
//! ```no_run
//! use oddsbridge::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_with_env("oddsbridge.toml")?;
//!     config.init_logging();
//!     let scanner = config.scanner();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::{
    ArbitrageEvaluator, CrossPlatformMatcher, EvaluatorConfig, MatcherConfig, ScanConfig, Scanner,
};
use crate::error::{ConfigError, Result};

/// Overrides `logging.level` in [`Config::load_with_env`].
pub const LOG_LEVEL_ENV: &str = "ODDSBRIDGE_LOG_LEVEL";

/// Overrides `logging.format` in [`Config::load_with_env`].
pub const LOG_FORMAT_ENV: &str = "ODDSBRIDGE_LOG_FORMAT";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Keyword and fuzzy matching passes.
    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration from a TOML file after reading `.env`.
    ///
    /// [`LOG_LEVEL_ENV`] and [`LOG_FORMAT_ENV`] take precedence over the
    /// file. A missing `.env` is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::load(path)?;
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
            config.logging.format = format;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] or [`ConfigError::InvalidValue`]
    /// naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }

        let keyword = &self.matcher.keyword;
        check_threshold("matcher.keyword.threshold", keyword.threshold)?;
        if keyword.min_keywords == 0 {
            return Err(at_least_one("matcher.keyword.min_keywords"));
        }
        if keyword.min_overlap == 0 {
            return Err(at_least_one("matcher.keyword.min_overlap"));
        }

        let fuzzy = &self.matcher.fuzzy;
        check_threshold("matcher.fuzzy.threshold", fuzzy.threshold)?;
        if fuzzy.min_tokens == 0 {
            return Err(at_least_one("matcher.fuzzy.min_tokens"));
        }

        let min_spread = self.evaluator.min_spread;
        if min_spread < Decimal::ZERO || min_spread >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "evaluator.min_spread",
                reason: "must be at least 0 and below 1".to_string(),
            }
            .into());
        }
        if self.evaluator.excerpt_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "evaluator.excerpt_chars",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.scan.source_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scan.source_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[must_use]
    pub fn matcher(&self) -> CrossPlatformMatcher {
        CrossPlatformMatcher::new(self.matcher.clone())
    }

    #[must_use]
    pub fn evaluator(&self) -> ArbitrageEvaluator {
        ArbitrageEvaluator::new(self.evaluator.clone())
    }

    /// Scanner with no sources registered yet.
    #[must_use]
    pub fn scanner(&self) -> Scanner {
        Scanner::new(self.matcher(), self.evaluator(), self.scan.clone())
    }
}

fn check_threshold(field: &'static str, value: u8) -> Result<()> {
    if value > 100 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be between 0 and 100".to_string(),
        }
        .into());
    }
    Ok(())
}

fn at_least_one(field: &'static str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: "must be at least 1".to_string(),
    }
    .into()
}
