//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::MAX_TTL_SECS;

/// Request body for item creation (POST /cache)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store, opaque to the server
/// - `ttl`: Time-to-live in seconds, must be positive
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// TTL in seconds
    pub ttl: u64,
}

impl CreateItemRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid. The
    /// engine re-checks key and ttl, but rejecting here gives the caller a
    /// message per field.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.value.is_empty() {
            return Some("Value cannot be empty".to_string());
        }
        if self.ttl == 0 {
            return Some("TTL must be a positive number of seconds".to_string());
        }
        if self.ttl > MAX_TTL_SECS {
            return Some(format!("TTL must not exceed {} seconds", MAX_TTL_SECS));
        }
        None
    }
}
