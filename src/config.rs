use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{ConfidenceThresholds, MatchLimits, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub notifier: NotifierSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierSettings {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_digest_top")]
    pub digest_top: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            candidate_pool: default_candidate_pool(),
            max_results: default_max_results(),
            digest_top: default_digest_top(),
        }
    }
}

fn default_candidate_pool() -> usize { 50 }
fn default_max_results() -> usize { 10 }
fn default_digest_top() -> usize { 3 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

/// Factor weights; must be reproduced exactly for a stable ranking order
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_section_weight")]
    pub section: f64,
    #[serde(default = "default_quantity_weight")]
    pub quantity: f64,
    #[serde(default = "default_timing_weight")]
    pub timing: f64,
    #[serde(default = "default_seller_trust_weight")]
    pub seller_trust: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            price: default_price_weight(),
            section: default_section_weight(),
            quantity: default_quantity_weight(),
            timing: default_timing_weight(),
            seller_trust: default_seller_trust_weight(),
        }
    }
}

fn default_price_weight() -> f64 { 0.35 }
fn default_section_weight() -> f64 { 0.25 }
fn default_quantity_weight() -> f64 { 0.20 }
fn default_timing_weight() -> f64 { 0.10 }
fn default_seller_trust_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_high_threshold")]
    pub high: f64,
    #[serde(default = "default_medium_threshold")]
    pub medium: f64,
    #[serde(default = "default_low_threshold")]
    pub low: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            high: default_high_threshold(),
            medium: default_medium_threshold(),
            low: default_low_threshold(),
        }
    }
}

fn default_high_threshold() -> f64 { 0.85 }
fn default_medium_threshold() -> f64 { 0.65 }
fn default_low_threshold() -> f64 { 0.45 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ENCORE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. ENCORE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ENCORE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ENCORE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            price: self.scoring.weights.price,
            section: self.scoring.weights.section,
            quantity: self.scoring.weights.quantity,
            timing: self.scoring.weights.timing,
            seller_trust: self.scoring.weights.seller_trust,
        }
    }

    pub fn thresholds(&self) -> ConfidenceThresholds {
        ConfidenceThresholds {
            high: self.scoring.thresholds.high,
            medium: self.scoring.thresholds.medium,
            low: self.scoring.thresholds.low,
        }
    }

    pub fn limits(&self) -> MatchLimits {
        MatchLimits {
            candidate_pool: self.matching.candidate_pool,
            max_results: self.matching.max_results,
            digest_top: self.matching.digest_top,
        }
    }
}

/// Apply well-known environment overrides
///
/// DATABASE_URL is checked first for platform compatibility, then the
/// prefixed ENCORE_DATABASE__URL form.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("ENCORE_DATABASE__URL"))
        .ok();

    let notifier_endpoint = env::var("ENCORE_NOTIFIER__ENDPOINT").ok();
    let notifier_api_key = env::var("ENCORE_NOTIFIER__API_KEY").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = database_url {
        builder = builder.set_override("database.url", url)?;
    }
    if let Some(endpoint) = notifier_endpoint {
        builder = builder.set_override("notifier.endpoint", endpoint)?;
    }
    if let Some(api_key) = notifier_api_key {
        builder = builder.set_override("notifier.api_key", api_key)?;
    }

    builder.build()
}
