//! WebSocket upgrade handler for relay connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket (any path)
//! 2. Open the connection in the relay hub as a display
//! 3. Forward text frames to the hub; drain hub output to the socket
//! 4. Report the close to the hub

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use futures::{SinkExt, StreamExt};

use crate::application::relay::RelayHandle;

use super::channel_sink::ChannelSink;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Entry point into the relay hub.
    pub relay: RelayHandle,
}

impl WebSocketState {
    /// Create a new WebSocket state.
    pub fn new(relay: RelayHandle) -> Self {
        Self { relay }
    }
}

/// Upgrade any request to a relay WebSocket.
///
/// Requests that are not valid upgrades get `400 WebSocket upgrade failed`.
pub async fn ws_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<WebSocketState>,
) -> Response {
    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| handle_socket(socket, state)),
        Err(rejection) => {
            tracing::debug!("Rejected non-upgrade request: {}", rejection);
            (StatusCode::BAD_REQUEST, "WebSocket upgrade failed").into_response()
        }
    }
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. Either half finishing ends
/// the other, and the hub is told about the close only after the reader
/// has stopped, so no frame from this socket can follow the close.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();
    let (sink, mut outbound) = ChannelSink::pair();

    let connection_id = match state.relay.open(Box::new(sink)).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Dropping WebSocket, relay unavailable: {}", e);
            return;
        }
    };

    // Drain frames queued by the hub into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.as_str().to_owned())).await {
                tracing::debug!(
                    connection_id = %connection_id,
                    "Send error, closing connection: {}",
                    e
                );
                break;
            }
        }
    });

    // Forward client frames to the hub
    let relay = state.relay.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    if relay.inbound(connection_id, text).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Binary(bytes)) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        bytes = bytes.len(),
                        "Ignoring binary message"
                    );
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Handled automatically by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_id, "Client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    if let Err(e) = state.relay.close(connection_id).await {
        tracing::debug!(connection_id = %connection_id, "Close not delivered: {}", e);
    }
}

/// Create the WebSocket router.
///
/// Every path upgrades; there is nothing else on this listener.
pub fn websocket_router(state: WebSocketState) -> Router {
    Router::new().fallback(ws_handler).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::relay::RelayHub;
    use crate::domain::scene::SceneKey;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn state() -> WebSocketState {
        let (handle, _task) = RelayHub::spawn(SceneKey::Space, 8);
        WebSocketState::new(handle)
    }

    #[tokio::test]
    async fn plain_request_is_rejected_with_fixed_status() {
        let app = websocket_router(state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"WebSocket upgrade failed");
    }

    #[tokio::test]
    async fn any_path_routes_to_upgrade_handler() {
        let app = websocket_router(state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/some/other/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
