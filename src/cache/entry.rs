//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with absolute expiry.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// Represents a single cache entry: an opaque value plus its expiry instant.
///
/// The key is not stored here; it lives in the engine's index map. Liveness
/// is a predicate evaluated against a caller-supplied clock reading, never a
/// stored flag: an entry still resident after its expiry simply has not been
/// swept or lazily removed yet.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value, uninterpreted by the engine
    pub value: String,
    /// Absolute expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_secs` seconds after `now`.
    pub fn new(value: String, ttl_secs: u64, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: now + Duration::seconds(ttl_secs as i64),
        }
    }

    // == Is Live ==
    /// Checks whether the entry is still live at `now`.
    ///
    /// Boundary condition: an entry is dead as soon as `now` reaches its
    /// expiry instant, so `expires_at == now` already counts as expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
