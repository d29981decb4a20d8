//! SCOUT Storage - Starter Cache
//!
//! Persistence layer for generated conversation starters: key derivation,
//! the TTL entry format, and filesystem / in-memory backends behind one
//! trait.

pub mod cache;

pub use cache::{CacheEntry, CacheKey, FsStarterCache, MemoryStarterCache, StarterCache};
