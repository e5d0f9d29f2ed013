//! Snapshot Broadcast Task
//!
//! Background task that periodically snapshots the cache and publishes the
//! result for WebSocket subscribers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheEngine;

/// Spawns a background task that periodically broadcasts cache snapshots.
///
/// Each tick takes a read lock just long enough to snapshot, serializes the
/// live entries to JSON outside the lock, and publishes on the broadcast
/// channel. Sending with no subscribers is not an error; the payload is
/// simply dropped.
///
/// # Arguments
/// * `engine` - Shared reference to the cache engine
/// * `snapshots` - Channel the WebSocket handlers subscribe to
/// * `interval_secs` - Interval in seconds between broadcasts
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
pub fn spawn_broadcast_task(
    engine: Arc<RwLock<CacheEngine>>,
    snapshots: broadcast::Sender<String>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting snapshot broadcast task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let entries = {
                let engine = engine.read().await;
                engine.snapshot()
            };

            match serde_json::to_string(&entries) {
                Ok(payload) => {
                    let subscribers = snapshots.send(payload).unwrap_or(0);
                    debug!(
                        "Broadcast {} live entries to {} subscribers",
                        entries.len(),
                        subscribers
                    );
                }
                Err(err) => warn!("Failed to serialize cache snapshot: {}", err),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_broadcast_task_publishes_snapshots() {
        let engine = Arc::new(RwLock::new(CacheEngine::new(100)));
        let (tx, mut rx) = broadcast::channel(16);

        {
            let mut engine = engine.write().await;
            engine
                .set("key1".to_string(), "value1".to_string(), 60)
                .unwrap();
        }

        let handle = spawn_broadcast_task(engine, tx, 1);

        let payload = tokio::time::timeout(Duration::from_millis(2500), rx.recv())
            .await
            .expect("broadcast should arrive within two intervals")
            .unwrap();

        let parsed: Value = serde_json::from_str(&payload).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["key"], "key1");
        assert_eq!(entries[0]["value"], "value1");
        assert!(entries[0]["expires_at"].is_string());

        handle.abort();
    }

    #[tokio::test]
    async fn test_broadcast_task_excludes_expired_entries() {
        let engine = Arc::new(RwLock::new(CacheEngine::new(100)));
        let (tx, mut rx) = broadcast::channel(16);

        {
            let mut engine = engine.write().await;
            engine
                .set("dead".to_string(), "value".to_string(), 1)
                .unwrap();
        }

        let handle = spawn_broadcast_task(engine, tx, 1);

        // Let the TTL elapse, discard anything broadcast before that, then
        // take the next fresh payload
        tokio::time::sleep(Duration::from_millis(1500)).await;
        while !rx.is_empty() {
            let _ = rx.recv().await;
        }
        let payload = tokio::time::timeout(Duration::from_millis(2500), rx.recv())
            .await
            .expect("broadcast should keep arriving")
            .unwrap();

        let parsed: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_broadcast_task_survives_no_subscribers() {
        let engine = Arc::new(RwLock::new(CacheEngine::new(100)));
        let (tx, rx) = broadcast::channel(16);
        drop(rx);

        let handle = spawn_broadcast_task(engine, tx, 1);

        // Two intervals with nobody listening; the task must keep running
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(!handle.is_finished());

        handle.abort();
    }
}
