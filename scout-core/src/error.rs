//! Error types for SCOUT operations

use thiserror::Error;

/// Cache layer errors.
///
/// These are always recoverable: the orchestrator treats any cache failure
/// as a miss (reads) or a no-op (writes).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache disabled by configuration")]
    Disabled,

    #[error("I/O failure on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Corrupt cache entry for key {key}: {reason}")]
    CorruptEntry { key: String, reason: String },

    #[error("Serialization failed for key {key}: {reason}")]
    SerializeFailed { key: String, reason: String },
}

/// Generation-source errors.
///
/// A generator that fails yields zero starters from that source; the
/// request as a whole continues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No chat provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed: {message}")]
    ProviderFailed { provider: String, message: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("School {urn} has no {data_kind} data to analyze")]
    NoData { urn: String, data_kind: String },
}

/// Directory (reference-data) errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Directory reload failed: {reason}")]
    RefreshFailed { reason: String },

    #[error("Directory unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all SCOUT errors.
#[derive(Debug, Clone, Error)]
pub enum ScoutError {
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for SCOUT operations.
pub type ScoutResult<T> = Result<T, ScoutError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_display_io() {
        let err = CacheError::Io {
            path: "/tmp/cache/abc.json".to_string(),
            reason: "permission denied".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("/tmp/cache/abc.json"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_cache_error_display_corrupt_entry() {
        let err = CacheError::CorruptEntry {
            key: "deadbeef".to_string(),
            reason: "unexpected end of input".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Corrupt cache entry"));
        assert!(msg.contains("deadbeef"));
    }

    #[test]
    fn test_generation_error_display_provider_failed() {
        let err = GenerationError::ProviderFailed {
            provider: "anthropic".to_string(),
            message: "status 529".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("anthropic"));
        assert!(msg.contains("529"));
    }

    #[test]
    fn test_generation_error_display_no_data() {
        let err = GenerationError::NoData {
            urn: "100001".to_string(),
            data_kind: "SEND".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("100001"));
        assert!(msg.contains("SEND"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "cache_ttl_hours".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("cache_ttl_hours"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_scout_error_from_variants() {
        let cache = ScoutError::from(CacheError::Disabled);
        assert!(matches!(cache, ScoutError::Cache(_)));

        let generation = ScoutError::from(GenerationError::ProviderNotConfigured);
        assert!(matches!(generation, ScoutError::Generation(_)));

        let directory = ScoutError::from(DirectoryError::Unavailable {
            reason: "offline".to_string(),
        });
        assert!(matches!(directory, ScoutError::Directory(_)));

        let config = ScoutError::from(ConfigError::MissingRequired {
            field: "cache_dir".to_string(),
        });
        assert!(matches!(config, ScoutError::Config(_)));
    }
}
