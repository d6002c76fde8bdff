//! # Settings
//!
//! Layered configuration loaded with the `config` crate.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml`, or an explicit file path
//! 3. Environment variables prefixed `QUOTE_ENGINE__`, with `__` between
//!    nested keys (`QUOTE_ENGINE__ENGINE__REGULATOR=BaFin`)
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [engine]
//! currency = "CHF"
//! regulator = "FINMA"
//!
//! [providers.smile]
//! name = "Smile Direct"
//! rating = "B+"
//! market_share = 0.02
//! ```
//!
//! An empty `providers` table selects [`ProviderDirectory::swiss_default`].

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::{ComparisonConfig, DEFAULT_CURRENCY, DEFAULT_REGULATOR};
use crate::domain::entities::{ProviderDirectory, ProviderInfo};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "QUOTE_ENGINE";

/// Separator between prefix and nested keys.
pub const ENV_SEPARATOR: &str = "__";

/// Default configuration file, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    #[default]
    Compact,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Include target and thread ids.
    pub structured: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            structured: false,
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Currency label for premiums.
    pub currency: String,
    /// Regulator label for compliance reports.
    pub regulator: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            regulator: DEFAULT_REGULATOR.to_string(),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Engine settings.
    pub engine: EngineSettings,
    /// Provider table keyed by provider name.
    pub providers: BTreeMap<String, ProviderInfo>,
}

impl Settings {
    /// Loads settings from `path` (or `config/default.toml` when `None`)
    /// and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if an explicit file is
    /// missing or any source fails to parse.
    pub fn load(path: Option<&Path>) -> ApplicationResult<Self> {
        let builder = match path {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => {
                Config::builder().add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            }
        };
        Self::assemble(builder.add_source(environment()))
    }

    /// Parses settings from a TOML document without consulting the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the document is invalid.
    pub fn from_toml_str(document: &str) -> ApplicationResult<Self> {
        Self::assemble(Config::builder().add_source(File::from_str(document, FileFormat::Toml)))
    }

    fn assemble(builder: ConfigBuilder<DefaultState>) -> ApplicationResult<Self> {
        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| ApplicationError::configuration(e.to_string()))
    }

    /// Builds the provider directory.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if a configured entry is invalid.
    pub fn to_provider_directory(&self) -> ApplicationResult<ProviderDirectory> {
        if self.providers.is_empty() {
            return Ok(ProviderDirectory::swiss_default());
        }
        Ok(ProviderDirectory::from_entries(
            self.providers
                .iter()
                .map(|(name, info)| (name.clone(), info.clone())),
        )?)
    }

    /// Returns the comparison configuration.
    #[must_use]
    pub fn comparison_config(&self) -> ComparisonConfig {
        ComparisonConfig::default()
            .with_currency(self.engine.currency.clone())
            .with_regulator(self.engine.regulator.clone())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
