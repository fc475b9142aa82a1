//! Configuration for the browser client
//!
//! Layered the same way everywhere it is loaded:
//! 1. Default values in code
//! 2. An optional JSON document supplied by the host page
//! 3. Environment variable overrides with the ENVANTER prefix

use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::types::TimestampMillis;

/// Default matching window for pending partners (10 minutes)
pub const WINDOW_MS: TimestampMillis = 10 * 60 * 1000;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Counterparty cache configuration
    #[serde(default)]
    pub partner_cache: PartnerCacheConfig,

    /// Placeholder labels for unknown counterparties
    #[serde(default)]
    pub labels: CounterpartyLabels,

    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Log filter directive, e.g. `shared=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PartnerCacheConfig {
    /// Storage key of the pending-entry list
    pub pending_key: String,

    /// Storage key of the movement-id to partner map
    pub resolved_key: String,

    /// How long a pending entry may wait to be matched
    pub window_ms: TimestampMillis,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CounterpartyLabels {
    /// Marker word identifying placeholder counterparties (case-insensitive)
    pub unknown_marker: String,

    /// Default for sales
    pub unknown_customer: String,

    /// Default for purchases
    pub unknown_supplier: String,

    /// Default for any other movement type
    pub unknown_party: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL requests are sent to
    pub base_url: String,

    /// Storage key holding the credential echoed in `Authorization`
    pub credential_key: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PartnerCacheConfig {
    fn default() -> Self {
        Self {
            pending_key: "envanter_pending_partners".to_string(),
            resolved_key: "envanter_movement_partners".to_string(),
            window_ms: WINDOW_MS,
        }
    }
}

impl Default for CounterpartyLabels {
    fn default() -> Self {
        Self {
            unknown_marker: "bilinmeyen".to_string(),
            unknown_customer: "Bilinmeyen Müşteri".to_string(),
            unknown_supplier: "Bilinmeyen Tedarikçi".to_string(),
            unknown_party: "Bilinmeyen Taraf".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "/api".to_string(),
            credential_key: "auth_basic".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration, layering a JSON document over the defaults
    pub fn from_json(overrides: &str) -> Result<Self, ConfigError> {
        Self::load_with(Some(overrides))
    }

    fn load_with(overrides: Option<&str>) -> Result<Self, ConfigError> {
        let cache = PartnerCacheConfig::default();
        let labels = CounterpartyLabels::default();
        let api = ApiConfig::default();

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("partner_cache.pending_key", cache.pending_key)?
            .set_default("partner_cache.resolved_key", cache.resolved_key)?
            .set_default("partner_cache.window_ms", cache.window_ms)?
            .set_default("labels.unknown_marker", labels.unknown_marker)?
            .set_default("labels.unknown_customer", labels.unknown_customer)?
            .set_default("labels.unknown_supplier", labels.unknown_supplier)?
            .set_default("labels.unknown_party", labels.unknown_party)?
            .set_default("api.base_url", api.base_url)?
            .set_default("api.credential_key", api.credential_key)?
            .set_default("log_level", default_log_level())?;

        if let Some(json) = overrides {
            builder = builder.add_source(File::from_str(json, FileFormat::Json));
        }

        let config = builder
            // Override with environment variables (ENVANTER__ prefix)
            .add_source(
                Environment::with_prefix("ENVANTER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        if loaded.partner_cache.window_ms <= 0 {
            return Err(ConfigError::Message(
                "partner_cache.window_ms must be positive".to_string(),
            ));
        }
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config.partner_cache, PartnerCacheConfig::default());
        assert_eq!(config.partner_cache.window_ms, 600_000);
        assert_eq!(config.labels, CounterpartyLabels::default());
        assert_eq!(config.api.credential_key, "auth_basic");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_json_overrides() {
        let config = ClientConfig::from_json(
            r#"{"partner_cache": {"window_ms": 60000}, "labels": {"unknown_party": "?"}}"#,
        )
        .unwrap();
        assert_eq!(config.partner_cache.window_ms, 60_000);
        assert_eq!(config.partner_cache.pending_key, "envanter_pending_partners");
        assert_eq!(config.labels.unknown_party, "?");
        assert_eq!(config.labels.unknown_customer, "Bilinmeyen Müşteri");
    }

    #[test]
    fn test_rejects_non_positive_window() {
        assert!(ClientConfig::from_json(r#"{"partner_cache": {"window_ms": 0}}"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(ClientConfig::from_json("{not json").is_err());
    }
}
