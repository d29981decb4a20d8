//! Configuration types

use crate::{ConfigError, ScoutError, ScoutResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Feature flags for the intelligence pipeline.
///
/// These gate functionality, not correctness: a disabled feature yields a
/// school without the corresponding starters, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Master switch for conversation-starter generation
    pub conversation_starters: bool,
    /// Ofsted inspection-report analysis
    pub ofsted_analysis: bool,
    /// SEND analysis
    pub send_analysis: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            conversation_starters: true,
            ofsted_analysis: true,
            send_analysis: true,
        }
    }
}

/// Master configuration for the SCOUT pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Whether the starter cache is consulted and written at all
    pub cache_enabled: bool,
    /// Maximum age of a cache entry before it is treated as missing
    pub cache_ttl_hours: u64,
    /// Directory holding one JSON file per cached entry
    pub cache_dir: PathBuf,
    pub features: FeatureFlags,
    /// Starter count used when the caller does not specify one
    pub default_starter_count: usize,
    /// Upper bound on requested starter counts
    pub max_starter_count: usize,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl_hours: 24,
            cache_dir: PathBuf::from("cache"),
            features: FeatureFlags::default(),
            default_starter_count: 5,
            max_starter_count: 10,
        }
    }
}

impl ScoutConfig {
    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `SCOUT_CACHE_ENABLED`: consult/write the starter cache (default: true)
    /// - `SCOUT_CACHE_TTL_HOURS`: cache entry lifetime (default: 24)
    /// - `SCOUT_CACHE_DIR`: cache directory (default: "cache")
    /// - `SCOUT_FEATURE_STARTERS`: master starter switch (default: true)
    /// - `SCOUT_FEATURE_OFSTED`: Ofsted analysis (default: true)
    /// - `SCOUT_FEATURE_SEND`: SEND analysis (default: true)
    /// - `SCOUT_DEFAULT_STARTERS`: default starter count (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        fn env_bool(name: &str, fallback: bool) -> bool {
            std::env::var(name)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(fallback)
        }

        Self {
            cache_enabled: env_bool("SCOUT_CACHE_ENABLED", defaults.cache_enabled),
            cache_ttl_hours: std::env::var("SCOUT_CACHE_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cache_ttl_hours),
            cache_dir: std::env::var("SCOUT_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            features: FeatureFlags {
                conversation_starters: env_bool(
                    "SCOUT_FEATURE_STARTERS",
                    defaults.features.conversation_starters,
                ),
                ofsted_analysis: env_bool(
                    "SCOUT_FEATURE_OFSTED",
                    defaults.features.ofsted_analysis,
                ),
                send_analysis: env_bool("SCOUT_FEATURE_SEND", defaults.features.send_analysis),
            },
            default_starter_count: std::env::var("SCOUT_DEFAULT_STARTERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_starter_count),
            max_starter_count: defaults.max_starter_count,
        }
    }

    /// Validate the configuration.
    /// Returns Ok(()) if valid, Err(ScoutError::Config) if invalid.
    pub fn validate(&self) -> ScoutResult<()> {
        if self.cache_ttl_hours == 0 {
            return Err(ScoutError::Config(ConfigError::InvalidValue {
                field: "cache_ttl_hours".to_string(),
                value: "0".to_string(),
                reason: "cache_ttl_hours must be positive".to_string(),
            }));
        }

        if self.default_starter_count == 0 {
            return Err(ScoutError::Config(ConfigError::InvalidValue {
                field: "default_starter_count".to_string(),
                value: "0".to_string(),
                reason: "default_starter_count must be positive".to_string(),
            }));
        }

        if self.default_starter_count > self.max_starter_count {
            return Err(ScoutError::Config(ConfigError::InvalidValue {
                field: "default_starter_count".to_string(),
                value: self.default_starter_count.to_string(),
                reason: format!(
                    "default_starter_count must not exceed max_starter_count ({})",
                    self.max_starter_count
                ),
            }));
        }

        if self.cache_dir.as_os_str().is_empty() {
            return Err(ScoutError::Config(ConfigError::MissingRequired {
                field: "cache_dir".to_string(),
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = ScoutConfig {
            cache_ttl_hours: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScoutError::Config(ConfigError::InvalidValue { field, .. })) if field == "cache_ttl_hours"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_starter_count() {
        let config = ScoutConfig {
            default_starter_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_default() {
        let config = ScoutConfig {
            default_starter_count: 11,
            max_starter_count: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_cache_dir() {
        let config = ScoutConfig {
            cache_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScoutError::Config(ConfigError::MissingRequired { field })) if field == "cache_dir"
        ));
    }
}
