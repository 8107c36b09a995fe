//! Server bootstrap - binds both listeners and spawns the relay hub.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::adapters::http::http_router;
use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::application::relay::{RelayHandle, RelayHub};
use crate::config::{AppConfig, ValidationError};

/// Errors raised while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("Listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a running relay server.
///
/// Dropping the handle leaves the server running; call [`ServerHandle::shutdown`]
/// to stop it.
pub struct ServerHandle {
    http_addr: SocketAddr,
    ws_addr: SocketAddr,
    relay: RelayHandle,
    shutdown: watch::Sender<bool>,
    http_task: JoinHandle<()>,
    ws_task: JoinHandle<()>,
    hub_task: JoinHandle<()>,
}

impl ServerHandle {
    /// Bound address of the HTTP listener.
    pub fn http_addr(&self) -> SocketAddr {
        self.http_addr
    }

    /// Bound address of the WebSocket listener.
    pub fn ws_addr(&self) -> SocketAddr {
        self.ws_addr
    }

    /// Handle into the running relay hub.
    pub fn relay(&self) -> &RelayHandle {
        &self.relay
    }

    /// Stop accepting connections and wait for both listeners to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.http_task.await;
        let _ = self.ws_task.await;
        // Open sockets keep their relay handles; the hub is stopped outright.
        self.hub_task.abort();
        let _ = self.hub_task.await;
        tracing::info!("Scene relay stopped");
    }
}

/// Start the relay server described by `config`.
///
/// Binds the HTTP and WebSocket listeners, spawns the relay hub, and returns
/// once both listeners are accepting. Port 0 binds an ephemeral port; the
/// actual addresses are on the returned handle.
pub async fn start(config: &AppConfig) -> Result<ServerHandle, ServerError> {
    config.validate()?;

    let allowed_origins = config.server.allowed_origins()?;
    let http_listener = TcpListener::bind(config.server.http_addr()?).await?;
    let ws_listener = TcpListener::bind(config.server.ws_addr()?).await?;
    let http_addr = http_listener.local_addr()?;
    let ws_addr = ws_listener.local_addr()?;

    let (relay, hub_task) = RelayHub::spawn(
        config.relay.initial_scene,
        config.relay.event_queue_capacity,
    );

    let (shutdown, signal) = watch::channel(false);

    let http_app = http_router(allowed_origins);
    let http_task = tokio::spawn(serve(http_listener, http_app, signal.clone(), "http"));

    let ws_app = websocket_router(WebSocketState::new(relay.clone()));
    let ws_task = tokio::spawn(serve(ws_listener, ws_app, signal, "websocket"));

    tracing::info!(%http_addr, "HTTP listener started");
    tracing::info!(%ws_addr, initial_scene = %config.relay.initial_scene, "Relay listener started");

    Ok(ServerHandle {
        http_addr,
        ws_addr,
        relay,
        shutdown,
        http_task,
        ws_task,
        hub_task,
    })
}

async fn serve(
    listener: TcpListener,
    router: axum::Router,
    mut signal: watch::Receiver<bool>,
    name: &'static str,
) {
    let shutdown = async move {
        let _ = signal.wait_for(|stopped| *stopped).await;
    };

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!(listener = name, error = %e, "Listener failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RelayConfig, ServerConfig};

    fn ephemeral_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                http_port: 0,
                ws_port: 0,
                ..Default::default()
            },
            relay: RelayConfig::default(),
        }
    }

    #[tokio::test]
    async fn start_binds_distinct_ephemeral_ports() {
        let handle = start(&ephemeral_config()).await.unwrap();

        assert_ne!(handle.http_addr().port(), 0);
        assert_ne!(handle.ws_addr().port(), 0);
        assert_ne!(handle.http_addr(), handle.ws_addr());

        let snapshot = handle.relay().snapshot().await.unwrap();
        assert_eq!(snapshot.counts.total(), 0);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn start_rejects_invalid_config() {
        let mut config = ephemeral_config();
        config.relay.event_queue_capacity = 0;

        let result = start(&config).await;
        assert!(matches!(
            result,
            Err(ServerError::Config(ValidationError::InvalidQueueCapacity))
        ));
    }
}
