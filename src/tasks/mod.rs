//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiration sweep: removes expired cache entries at a configured interval
//! - Snapshot broadcast: publishes the live cache state to WebSocket
//!   subscribers at a configured interval

mod broadcast;
mod sweep;

pub use broadcast::spawn_broadcast_task;
pub use sweep::spawn_sweep_task;
