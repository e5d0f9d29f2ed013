//! Cache Module
//!
//! The cache engine: bounded in-memory storage with LRU eviction and
//! TTL expiration.

mod engine;
mod entry;
mod recency;


// Re-export public types
pub use engine::{CacheEngine, SnapshotEntry};
pub use entry::CacheEntry;
pub use recency::RecencyList;

// == Public Constants ==
/// Maximum accepted TTL in seconds (ten years). Keeps expiry arithmetic far
/// away from the timestamp range chrono can represent.
pub const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;
