//! Expiration Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Lazy expiration on get only reclaims entries that are actually read; the
//! sweep is what reclaims everything else. Its interval is a liveness knob,
//! not a correctness one: a slow sweep delays reclamation but never changes
//! a get result.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheEngine;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task loops for the lifetime of the engine, sleeping for the given
/// interval between sweeps and taking the write lock for each one.
///
/// # Arguments
/// * `engine` - Shared reference to the cache engine
/// * `interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
pub fn spawn_sweep_task(engine: Arc<RwLock<CacheEngine>>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiration sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut engine = engine.write().await;
                engine.sweep()
            };

            if removed > 0 {
                info!("Sweep removed {} expired entries", removed);
            } else {
                debug!("Sweep found no expired entries");
            }
        }
    })
}
