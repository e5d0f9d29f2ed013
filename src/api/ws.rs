//! WebSocket Feed
//!
//! Upgrades clients onto the periodic snapshot broadcast. Each connection
//! holds its own receiver on the snapshot channel; a failed send drops that
//! one client and nothing else.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use tokio::sync::broadcast;
use tracing::debug;

use super::handlers::AppState;

/// Handler for GET /ws
///
/// Subscribes the client to the snapshot feed before upgrading, so no
/// broadcast published during the handshake is missed.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let feed = state.snapshots.subscribe();
    ws.on_upgrade(move |socket| serve_subscriber(socket, feed))
}

/// Forwards snapshot payloads to one client until it goes away.
///
/// Incoming frames are drained only to detect disconnects; their content is
/// ignored. A lagged receiver skips to the freshest snapshot rather than
/// disconnecting, since every broadcast supersedes the previous one.
async fn serve_subscriber(mut socket: WebSocket, mut feed: broadcast::Receiver<String>) {
    debug!("WebSocket subscriber connected");

    loop {
        tokio::select! {
            payload = feed.recv() => {
                match payload {
                    Ok(payload) => {
                        if socket.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("WebSocket subscriber lagged, skipped {} snapshots", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(_)) => {}
                    _ => break,
                }
            }
        }
    }

    debug!("WebSocket subscriber disconnected");
}
