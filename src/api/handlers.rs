//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::CacheEngine;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CreateItemRequest, CreateResponse, DeleteResponse, HealthResponse, ItemResponse,
};

/// Buffered snapshot payloads per WebSocket subscriber before it starts
/// lagging.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

/// Application state shared across all handlers.
///
/// The engine is wrapped in `Arc<RwLock<>>`: every operation runs as one
/// critical section over the engine's paired structures, and the handlers,
/// sweep task, and broadcast task all serialize through it.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache engine
    pub engine: Arc<RwLock<CacheEngine>>,
    /// Snapshot feed; WebSocket handlers subscribe, the broadcast task sends
    pub snapshots: broadcast::Sender<String>,
}

impl AppState {
    /// Creates a new AppState owning the given engine.
    pub fn new(engine: CacheEngine) -> Self {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            engine: Arc::new(RwLock::new(engine)),
            snapshots,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheEngine::new(config.capacity))
    }
}

/// Handler for POST /cache
///
/// Creates an item with create-only semantics: the engine's set is an
/// upsert, so the duplicate-key rejection lives here, not in the engine.
/// The existence probe and the set run under the same write lock, so a
/// concurrent create cannot slip between them.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<CreateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidArgument(error_msg));
    }

    let mut engine = state.engine.write().await;
    if engine.get(&req.key).is_some() {
        return Err(CacheError::Conflict(req.key));
    }
    engine.set(req.key.clone(), req.value, req.ttl)?;

    Ok(Json(CreateResponse::new(req.key)))
}

/// Handler for GET /cache/:key
///
/// Retrieves an item; a missing or expired key is a 404. The write lock is
/// needed because a hit promotes recency and an expired hit is reclaimed.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ItemResponse>> {
    let mut engine = state.engine.write().await;
    match engine.get(&key) {
        Some((value, expires_at)) => Ok(Json(ItemResponse::new(key, value, expires_at))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
///
/// Deletes a key. The engine's delete is idempotent; the lookup here exists
/// only so the response can distinguish a 404 from a successful delete.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut engine = state.engine.write().await;
    if engine.get(&key).is_none() {
        return Err(CacheError::NotFound(key));
    }
    engine.delete(&key);

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(CacheEngine::new(100))
    }

    fn create_req(key: &str, value: &str, ttl: u64) -> CreateItemRequest {
        CreateItemRequest {
            key: key.to_string(),
            value: value.to_string(),
            ttl,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = test_state();

        let result =
            create_handler(State(state.clone()), Json(create_req("test_key", "test_value", 60)))
                .await;
        assert!(result.is_ok());

        let result = get_handler(State(state), Path("test_key".to_string())).await;
        let response = result.unwrap();
        assert_eq!(response.value, "test_value");
        assert_eq!(response.key, "test_key");
    }

    #[tokio::test]
    async fn test_create_duplicate_key_conflicts() {
        let state = test_state();

        create_handler(State(state.clone()), Json(create_req("dup", "v1", 60)))
            .await
            .unwrap();

        let result = create_handler(State(state.clone()), Json(create_req("dup", "v2", 60))).await;
        assert!(matches!(result, Err(CacheError::Conflict(_))));

        // First value survives the rejected create
        let response = get_handler(State(state), Path("dup".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "v1");
    }

    #[tokio::test]
    async fn test_create_invalid_request() {
        let state = test_state();

        let result = create_handler(State(state.clone()), Json(create_req("", "value", 60))).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));

        let result = create_handler(State(state.clone()), Json(create_req("key", "", 60))).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));

        let result = create_handler(State(state), Json(create_req("key", "value", 0))).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();

        create_handler(State(state.clone()), Json(create_req("to_delete", "value", 60)))
            .await
            .unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_absent_key_not_found() {
        let state = test_state();

        let result = delete_handler(State(state), Path("missing".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
