//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /cache` - Create an item (rejects an existing key)
//! - `GET /cache/:key` - Retrieve an item by key
//! - `DELETE /cache/:key` - Delete a key
//! - `GET /ws` - WebSocket feed of periodic cache snapshots
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;
pub mod ws;

pub use handlers::*;
pub use routes::create_router;
