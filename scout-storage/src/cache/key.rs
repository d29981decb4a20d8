//! Cache key derivation.
//!
//! Keys are a one-way digest of a fixed template combining a namespace tag
//! and the school's stable URN. The private field means a key can only be
//! built through [`CacheKey::for_school`], so every cache operation is keyed
//! by URN by construction - never by display name, which may be ambiguous.

use sha2::{Digest, Sha256};
use std::fmt;

/// Namespace tag folded into every key digest.
const KEY_NAMESPACE: &str = "scout:starters";

/// A cache key for one school's starter entry.
///
/// Same URN always produces the same key; distinct URNs collide only with
/// SHA-256 probability. The hex form doubles as the entry's file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hex: String,
}

impl CacheKey {
    /// Derive the key for a school's stable identifier.
    pub fn for_school(urn: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(KEY_NAMESPACE.as_bytes());
        hasher.update(b":");
        hasher.update(urn.as_bytes());
        Self {
            hex: hex::encode(hasher.finalize()),
        }
    }

    /// Hex digest, used as the storage file stem.
    pub fn as_hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}
