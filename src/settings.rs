//! # Settings
//!
//! Process configuration, loaded once at startup and immutable afterwards.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults (the `Default` impls below)
//! 2. Legacy variables `ENVIA_TEST_TOKEN` and `ORIGIN_*`
//! 3. A configuration file (`ship-rates.toml` in the working directory, or
//!    an explicit path)
//! 4. Variables prefixed with `SHIP_RATES_`, using `__` between nested
//!    keys, e.g. `SHIP_RATES_AGGREGATION__TOP_K=3` or
//!    `SHIP_RATES_ENVIA__TOKEN=...`
//!
//! There is no default origin: loading fails unless `origin.state` names a
//! known region.
//!
//! # Examples
//!
//! ```toml
//! [server]
//! port = 3001
//!
//! [aggregation]
//! carriers = ["fedex", "dhl", "estafeta"]
//! top_k = 4
//! deadline_ms = 8000
//!
//! [envia]
//! base_url = "https://api-test.envia.com"
//!
//! [origin]
//! name = "Warehouse"
//! city = "Monterrey"
//! state = "NL"
//! postal_code = "64000"
//! ```

use crate::application::services::{AggregationConfig, RankingKind};
use crate::domain::entities::{Address, Dimensions, Package};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::RegionTable;
use crate::infrastructure::carriers::EnviaConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Map};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// File stem searched for when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "ship-rates";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "SHIP_RATES";

const LEGACY_ENV: [(&str, &str); 12] = [
    ("ENVIA_TEST_TOKEN", "envia.token"),
    ("ORIGIN_NAME", "origin.name"),
    ("ORIGIN_COMPANY", "origin.company"),
    ("ORIGIN_EMAIL", "origin.email"),
    ("ORIGIN_PHONE", "origin.phone"),
    ("ORIGIN_STREET", "origin.street"),
    ("ORIGIN_NUMBER", "origin.number"),
    ("ORIGIN_DISTRICT", "origin.district"),
    ("ORIGIN_CITY", "origin.city"),
    ("ORIGIN_STATE", "origin.state"),
    ("ORIGIN_COUNTRY", "origin.country"),
    ("ORIGIN_POSTAL_CODE", "origin.postal_code"),
];

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range or inconsistent.
    #[error("invalid configuration `{field}`: {reason}")]
    Invalid {
        /// Dotted key of the offending value.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The custom region table contains a malformed code.
    #[error("invalid region table: {0}")]
    Regions(#[from] DomainError),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl ServerConfig {
    /// Returns `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// Complete process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Carrier set, K and deadline.
    pub aggregation: AggregationConfig,
    /// Quote ordering.
    pub ranking: RankingKind,
    /// Envia endpoint and credential.
    pub envia: EnviaConfig,
    /// Address every shipment leaves from.
    pub origin: Address,
    /// Package used when a request names none.
    pub default_package: Package,
    /// Region name to code overrides; empty means the Mexican states.
    pub regions: BTreeMap<String, String>,
    /// Logging.
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            aggregation: AggregationConfig::default(),
            ranking: RankingKind::default(),
            envia: EnviaConfig::default(),
            origin: Address::default(),
            default_package: Package::new(
                Decimal::new(6, 1),
                Dimensions::new(Decimal::new(40, 0), Decimal::new(10, 0), Decimal::new(50, 0)),
            )
            .with_content("Pantalones"),
            regions: BTreeMap::new(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from every source.
    ///
    /// With `path = None`, `ship-rates.toml` (or any format `config`
    /// recognizes with that stem) is used if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source is unreadable or has the wrong
    /// shape, and `ConfigError::Invalid` if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Self::layered(
            Config::builder().add_source(file),
            None,
            |var| std::env::var(var).ok(),
        )
    }

    /// Parses TOML text on top of the defaults, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::layered(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
            Some(Map::new()),
            |_| None,
        )
    }

    fn layered(
        builder: ConfigBuilder<DefaultState>,
        env_vars: Option<Map<String, String>>,
        legacy: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = builder;
        for (var, key) in LEGACY_ENV {
            if let Some(value) = legacy(var) {
                builder = builder.set_default(key, value)?;
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(env_vars);

        let config: Self = builder.add_source(environment).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the region table, defaulting to the Mexican states.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Regions` if a configured code is malformed.
    pub fn region_table(&self) -> Result<RegionTable, ConfigError> {
        if self.regions.is_empty() {
            Ok(RegionTable::mexico())
        } else {
            Ok(RegionTable::from_pairs(&self.regions)?)
        }
    }

    /// Checks values the type system cannot.
    ///
    /// A missing Envia token is not an error so that a local run against a
    /// mock server needs no credential; see [`warnings`](Self::warnings).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad value, or
    /// `ConfigError::Regions` for a malformed region table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aggregation.carriers.is_empty() {
            return Err(ConfigError::invalid(
                "aggregation.carriers",
                "at least one carrier is required",
            ));
        }
        if self
            .aggregation
            .carriers
            .iter()
            .any(|c| c.as_str().trim().is_empty())
        {
            return Err(ConfigError::invalid(
                "aggregation.carriers",
                "carrier ids must not be blank",
            ));
        }
        if self.aggregation.top_k == 0 {
            return Err(ConfigError::invalid("aggregation.top_k", "must be at least 1"));
        }
        if self.aggregation.deadline_ms == 0 {
            return Err(ConfigError::invalid(
                "aggregation.deadline_ms",
                "must be greater than zero",
            ));
        }

        let base_url = self.envia.base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "envia.base_url",
                format!("not an http(s) URL: {}", base_url),
            ));
        }

        let regions = self.region_table()?;
        if self.origin.state.trim().is_empty() {
            return Err(ConfigError::invalid(
                "origin.state",
                "required; set it in the config file or ORIGIN_STATE",
            ));
        }
        if regions.lookup(&self.origin.state).is_none() {
            return Err(ConfigError::invalid(
                "origin.state",
                format!("unknown region: {}", self.origin.state),
            ));
        }

        self.default_package
            .validate(0)
            .map_err(|e| ConfigError::invalid("default_package", e.to_string()))?;
        Ok(())
    }

    /// Problems worth logging at startup that do not stop the server.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.envia.token().is_empty() {
            warnings.push(
                "envia.token is empty; carrier calls will be unauthenticated".to_string(),
            );
        }
        warnings
    }
}
