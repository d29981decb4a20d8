//! In-memory starter cache.
//!
//! Same TTL contract as the filesystem store but process-local, for tests
//! and single-shot invocations where writing a cache directory is not worth
//! the churn.

use chrono::{Duration, Utc};
use scout_core::ConversationStarter;
use std::collections::HashMap;
use std::sync::RwLock;

use super::key::CacheKey;
use super::traits::{CacheEntry, StarterCache};

/// Process-local starter cache.
#[derive(Debug)]
pub struct MemoryStarterCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    enabled: bool,
}

impl MemoryStarterCache {
    pub fn new(ttl_hours: u64, enabled: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::hours(ttl_hours as i64),
            enabled,
        }
    }

    /// Number of entries held, fresh or expired.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StarterCache for MemoryStarterCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<ConversationStarter>> {
        if !self.enabled {
            return None;
        }
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => {
                tracing::warn!("starter cache lock poisoned, treating as miss");
                return None;
            }
        };
        let entry = entries.get(key)?;
        if !entry.is_fresh(self.ttl, Utc::now()) {
            tracing::debug!(key = %key, cached_at = %entry.cached_at, "starter cache entry expired");
            return None;
        }
        Some(entry.starters.clone())
    }

    fn put(&self, key: &CacheKey, starters: &[ConversationStarter]) -> bool {
        if !self.enabled {
            return false;
        }
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.clone(), CacheEntry::now(key, starters.to_vec()));
                true
            }
            Err(_) => {
                tracing::warn!("starter cache lock poisoned, write dropped");
                false
            }
        }
    }

    fn clear(&self, key: Option<&CacheKey>) -> usize {
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(_) => return 0,
        };
        match key {
            Some(key) => usize::from(entries.remove(key).is_some()),
            None => {
                let removed = entries.len();
                entries.clear();
                removed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::StarterSource;

    fn starter(topic: &str) -> ConversationStarter {
        ConversationStarter::new(topic, "detail", StarterSource::Financial, 0.8)
    }

    #[test]
    fn test_round_trip() {
        let cache = MemoryStarterCache::new(24, true);
        let key = CacheKey::for_school("100001");
        assert!(cache.put(&key, &[starter("Budget")]));
        assert_eq!(cache.get(&key), Some(vec![starter("Budget")]));
    }

    #[test]
    fn test_disabled_is_inert() {
        let cache = MemoryStarterCache::new(24, false);
        let key = CacheKey::for_school("100001");
        assert!(!cache.put(&key, &[starter("Budget")]));
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let cache = MemoryStarterCache::new(24, true);
        let key = CacheKey::for_school("100001");
        cache.put(&key, &[starter("First")]);
        cache.put(&key, &[starter("Second")]);
        assert_eq!(cache.get(&key), Some(vec![starter("Second")]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_counts() {
        let cache = MemoryStarterCache::new(24, true);
        let one = CacheKey::for_school("100001");
        let two = CacheKey::for_school("100002");
        cache.put(&one, &[starter("A")]);
        cache.put(&two, &[starter("B")]);

        assert_eq!(cache.clear(Some(&one)), 1);
        assert_eq!(cache.clear(Some(&one)), 0);
        assert_eq!(cache.clear(None), 1);
        assert!(cache.is_empty());
    }
}
