//! Filesystem-backed starter cache.
//!
//! One JSON file per entry, named by the key digest, in a shared cache
//! directory. Writes go through a temp file and rename so concurrent
//! writers race whole entries (last write wins), never torn ones.

use chrono::{Duration, Utc};
use scout_core::{ConversationStarter, ScoutConfig};
use std::fs;
use std::path::{Path, PathBuf};

use super::key::CacheKey;
use super::traits::{CacheEntry, StarterCache};

/// Durable starter cache shared between processes.
#[derive(Debug)]
pub struct FsStarterCache {
    dir: PathBuf,
    ttl: Duration,
    enabled: bool,
}

impl FsStarterCache {
    /// Create a cache over `dir` with the given TTL in hours.
    ///
    /// The directory is created lazily on first write, so constructing a
    /// cache never fails.
    pub fn new(dir: impl Into<PathBuf>, ttl_hours: u64, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            ttl: Duration::hours(ttl_hours as i64),
            enabled,
        }
    }

    /// Create a cache from the shared configuration.
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(&config.cache_dir, config.cache_ttl_hours, config.cache_enabled)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_hex()))
    }
}

impl StarterCache for FsStarterCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<ConversationStarter>> {
        if !self.enabled {
            return None;
        }

        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(key = %key, "starter cache miss");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "starter cache read failed, treating as miss");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "corrupt starter cache entry, treating as miss");
                return None;
            }
        };

        if !entry.is_fresh(self.ttl, Utc::now()) {
            tracing::debug!(key = %key, cached_at = %entry.cached_at, "starter cache entry expired");
            return None;
        }

        tracing::debug!(key = %key, count = entry.starters.len(), "starter cache hit");
        Some(entry.starters)
    }

    fn put(&self, key: &CacheKey, starters: &[ConversationStarter]) -> bool {
        if !self.enabled {
            return false;
        }

        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "starter cache dir creation failed");
            return false;
        }

        let entry = CacheEntry::now(key, starters.to_vec());
        let serialized = match serde_json::to_string_pretty(&entry) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "starter cache serialization failed");
                return false;
            }
        };

        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, serialized) {
            tracing::warn!(key = %key, error = %e, "starter cache write failed");
            return false;
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            tracing::warn!(key = %key, error = %e, "starter cache rename failed");
            let _ = fs::remove_file(&tmp);
            return false;
        }

        tracing::debug!(key = %key, count = entry.starters.len(), "starter cache entry written");
        true
    }

    fn clear(&self, key: Option<&CacheKey>) -> usize {
        match key {
            Some(key) => match fs::remove_file(self.entry_path(key)) {
                Ok(()) => 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "starter cache clear failed");
                    0
                }
            },
            None => {
                let entries = match fs::read_dir(&self.dir) {
                    Ok(entries) => entries,
                    Err(_) => return 0,
                };
                let mut removed = 0;
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "json")
                        && fs::remove_file(&path).is_ok()
                    {
                        removed += 1;
                    }
                }
                removed
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
