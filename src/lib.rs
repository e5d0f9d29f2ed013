//! Memocache - An in-memory LRU cache server
//!
//! Bounded key-value cache with TTL expiration, LRU eviction, and a
//! WebSocket feed of periodic cache snapshots.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_broadcast_task, spawn_sweep_task};
