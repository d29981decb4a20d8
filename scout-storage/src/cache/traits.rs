//! Cache entry format and the backend trait.

use chrono::{DateTime, Duration, Utc};
use scout_core::ConversationStarter;
use serde::{Deserialize, Serialize};

use super::key::CacheKey;

/// One persisted cache record.
///
/// `cached_at` is set by the store at write time, never by the caller.
/// Entries are immutable once written; a refresh overwrites the whole entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Hex digest the entry was stored under
    pub entity_key: String,
    /// Write-time wall clock, recorded by the store
    pub cached_at: DateTime<Utc>,
    pub starters: Vec<ConversationStarter>,
}

impl CacheEntry {
    /// Build an entry stamped with the current wall clock.
    pub fn now(key: &CacheKey, starters: Vec<ConversationStarter>) -> Self {
        Self {
            entity_key: key.as_hex().to_string(),
            cached_at: Utc::now(),
            starters,
        }
    }

    /// An entry is fresh iff `now - cached_at <= ttl`.
    ///
    /// A clock that reads before `cached_at` (skew between writer and
    /// reader) counts as fresh.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.cached_at) <= ttl
    }
}

/// Backend trait for starter caches.
///
/// Caching is an optimization, never a correctness dependency: every method
/// absorbs persistence failures and reports them as miss / `false` / zero
/// removals rather than propagating errors.
pub trait StarterCache: Send + Sync {
    /// Look up a school's cached starters.
    ///
    /// Returns `None` when the cache is disabled, no entry exists, the entry
    /// is unreadable, or it is older than the configured TTL. Expired
    /// entries are left in place; the next `put` overwrites them.
    fn get(&self, key: &CacheKey) -> Option<Vec<ConversationStarter>>;

    /// Store starters under the key, unconditionally overwriting.
    ///
    /// The store records the current wall clock as `cached_at`. Returns
    /// `false` on any persistence failure; the caller proceeds as if
    /// nothing was cached.
    fn put(&self, key: &CacheKey, starters: &[ConversationStarter]) -> bool;

    /// Remove one entry, or every entry when `key` is `None`.
    /// Returns the number of entries removed.
    fn clear(&self, key: Option<&CacheKey>) -> usize;
}
