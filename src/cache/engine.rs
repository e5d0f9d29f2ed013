//! Cache Engine Module
//!
//! The cache aggregate: a key-indexed map paired with a recency list, giving
//! bounded capacity with LRU eviction and per-entry TTL expiration.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheEntry, RecencyList, MAX_TTL_SECS};
use crate::error::{CacheError, Result};

// == Snapshot Entry ==
/// One live entry as exported by [`CacheEngine::snapshot`].
///
/// `expires_at` serializes as an RFC 3339 timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEntry {
    /// The entry's key
    pub key: String,
    /// The stored value
    pub value: String,
    /// Absolute expiration timestamp
    pub expires_at: DateTime<Utc>,
}

// == Cache Engine ==
/// In-memory cache with LRU eviction and TTL expiration.
///
/// The engine owns all cache state. `index` and `recency` are kept in
/// bijection: every resident key appears in both, exactly once. Callers get
/// copies of stored values, never references into the engine.
///
/// The engine itself is not synchronized; share it behind a lock (the server
/// wraps it in `Arc<RwLock<CacheEngine>>` so every operation runs as one
/// critical section over both structures).
#[derive(Debug)]
pub struct CacheEngine {
    /// Maximum number of resident entries, fixed at construction
    capacity: usize,
    /// Key-to-entry storage
    index: HashMap<String, CacheEntry>,
    /// Use order, most recent first
    recency: RecencyList,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates a new engine holding at most `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            capacity,
            index: HashMap::new(),
            recency: RecencyList::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair with the given TTL, upserting on an existing
    /// key.
    ///
    /// An existing key is updated in place: new value, fresh expiry, promoted
    /// to most recently used. Resident count is unchanged, so an update never
    /// evicts. A new key is inserted as most recently used; if that pushes
    /// the resident count past capacity, the current least-recently-used
    /// entry is evicted — expired or not, eviction is purely a capacity
    /// decision.
    ///
    /// # Errors
    /// [`CacheError::InvalidArgument`] when `key` is empty or `ttl_secs` is
    /// zero or above [`MAX_TTL_SECS`]; state is untouched in that case.
    pub fn set(&mut self, key: String, value: String, ttl_secs: u64) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument(
                "key must not be empty".to_string(),
            ));
        }
        if ttl_secs == 0 {
            return Err(CacheError::InvalidArgument(
                "ttl must be positive".to_string(),
            ));
        }
        // An unbounded TTL would push the expiry arithmetic outside the
        // range chrono timestamps can hold
        if ttl_secs > MAX_TTL_SECS {
            return Err(CacheError::InvalidArgument(format!(
                "ttl must not exceed {} seconds",
                MAX_TTL_SECS
            )));
        }

        let entry = CacheEntry::new(value, ttl_secs, Utc::now());
        let existed = self.index.insert(key.clone(), entry).is_some();
        self.recency.touch(&key);

        // Capacity overflow: drop the LRU tail, which can only happen on a
        // fresh insert, never on an update
        if !existed && self.index.len() > self.capacity {
            if let Some(victim) = self.recency.pop_oldest() {
                self.index.remove(&victim);
            }
        }

        Ok(())
    }

    // == Get ==
    /// Looks up a key, returning its value and expiry when live.
    ///
    /// An expired entry is removed on the spot (lazy expiration) and reported
    /// exactly like an absent one. A live hit promotes the key to most
    /// recently used.
    pub fn get(&mut self, key: &str) -> Option<(String, DateTime<Utc>)> {
        let entry = self.index.get(key)?;

        if !entry.is_live(Utc::now()) {
            self.index.remove(key);
            self.recency.remove(key);
            return None;
        }

        let found = (entry.value.clone(), entry.expires_at);
        self.recency.touch(key);
        Some(found)
    }

    // == Delete ==
    /// Removes a key if present. Idempotent: deleting an absent key is a
    /// no-op and reports nothing.
    pub fn delete(&mut self, key: &str) {
        if self.index.remove(key).is_some() {
            self.recency.remove(key);
        }
    }

    // == Snapshot ==
    /// Exports all live entries, most recently used first.
    ///
    /// Liveness is judged against a single clock reading, so the result is
    /// consistent at one logical instant. Read-only: entries found expired
    /// here are excluded from the result but left for `get` or `sweep` to
    /// reclaim.
    pub fn snapshot(&self) -> Vec<SnapshotEntry> {
        let now = Utc::now();
        self.recency
            .iter()
            .filter_map(|key| {
                let entry = self.index.get(key)?;
                entry.is_live(now).then(|| SnapshotEntry {
                    key: key.clone(),
                    value: entry.value.clone(),
                    expires_at: entry.expires_at,
                })
            })
            .collect()
    }

    // == Sweep ==
    /// Removes every entry expired as of one clock reading at scan start.
    ///
    /// Returns the number of entries removed. This is the only path that
    /// reclaims expired entries nobody reads.
    pub fn sweep(&mut self) -> usize {
        let now = Utc::now();
        let dead: Vec<String> = self
            .index
            .iter()
            .filter(|(_, entry)| !entry.is_live(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &dead {
            self.index.remove(key);
            self.recency.remove(key);
        }

        dead.len()
    }

    // == Length ==
    /// Returns the current number of resident entries, live or not yet
    /// reclaimed.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Capacity ==
    /// Returns the fixed capacity this engine was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks the capacity bound and the index/recency bijection.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(
            self.index.len() <= self.capacity,
            "resident count {} exceeds capacity {}",
            self.index.len(),
            self.capacity
        );
        assert_eq!(
            self.index.len(),
            self.recency.len(),
            "index and recency list disagree on size"
        );
        for key in self.index.keys() {
            assert!(
                self.recency.contains(key),
                "key {:?} resident but not tracked for recency",
                key
            );
        }
    }
}
