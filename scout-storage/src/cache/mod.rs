//! Conversation-starter caching.
//!
//! Generating starters is the expensive step in every lookup, so results are
//! cached per school under a digest key and served until they age past the
//! configured TTL. The cache is strictly an optimization: a broken or
//! disabled backend degrades every operation to regeneration, never to an
//! error.

mod fs_store;
mod key;
mod memory;
mod traits;

pub use fs_store::FsStarterCache;
pub use key::CacheKey;
pub use memory::MemoryStarterCache;
pub use traits::{CacheEntry, StarterCache};
