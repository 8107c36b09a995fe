//! Relay hub - the single owner of relay state.
//!
//! Connection tasks never touch the registry or session state. They send
//! `RelayEvent`s through a `RelayHandle`, and one task applies them in
//! arrival order:
//!
//! ```text
//!  conn task A ──┐
//!  conn task B ──┼──▶ mpsc queue ──▶ RelayHub::run ──▶ sinks (fire-and-forget)
//!  conn task C ──┘                   (owns RelayState)
//! ```
//!
//! A connection task sends `Opened`, then its `Inbound` frames, then
//! `Closed`, all through the same queue, so the hub always sees them in
//! that order.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::foundation::ConnectionId;
use crate::domain::scene::SceneKey;
use crate::ports::MessageSink;

use super::state::{RelaySnapshot, RelayState};

/// Errors returned by a `RelayHandle`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("Relay hub has stopped")]
    Stopped,
}

/// Work items processed by the hub.
pub enum RelayEvent {
    Opened {
        id: ConnectionId,
        sink: Box<dyn MessageSink>,
    },
    Inbound {
        id: ConnectionId,
        text: String,
    },
    Closed {
        id: ConnectionId,
    },
    Snapshot {
        reply: oneshot::Sender<RelaySnapshot>,
    },
}

/// Task-owned relay state plus the queue feeding it.
pub struct RelayHub {
    state: RelayState,
    events: mpsc::Receiver<RelayEvent>,
}

impl RelayHub {
    /// Create a hub and the handle used to feed it.
    ///
    /// # Arguments
    ///
    /// * `initial_scene` - Scene selected before any control connects
    /// * `capacity` - Depth of the event queue; senders wait when it is full
    pub fn new(initial_scene: SceneKey, capacity: usize) -> (Self, RelayHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let hub = Self {
            state: RelayState::new(initial_scene),
            events: rx,
        };
        (hub, RelayHandle { tx })
    }

    /// Create a hub and run it on its own task.
    pub fn spawn(initial_scene: SceneKey, capacity: usize) -> (RelayHandle, JoinHandle<()>) {
        let (hub, handle) = Self::new(initial_scene, capacity);
        (handle, tokio::spawn(hub.run()))
    }

    /// Apply events until every handle has been dropped.
    pub async fn run(mut self) {
        tracing::info!(
            scene = %self.state.session().current_scene(),
            "Relay hub started"
        );

        while let Some(event) = self.events.recv().await {
            self.apply(event);
        }

        tracing::info!(
            connections = self.state.registry().len(),
            "Relay hub stopped"
        );
    }

    fn apply(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Opened { id, sink } => {
                if let Err(e) = self.state.on_open(id, sink) {
                    tracing::warn!(connection_id = %id, "Open rejected: {}", e);
                }
            }
            RelayEvent::Inbound { id, text } => {
                let outcome = self.state.handle_inbound(id, &text);
                tracing::trace!(connection_id = %id, ?outcome, "Dispatched message");
            }
            RelayEvent::Closed { id } => {
                if self.state.on_close(id).is_none() {
                    tracing::trace!(connection_id = %id, "Close for unknown connection");
                }
            }
            RelayEvent::Snapshot { reply } => {
                let _ = reply.send(self.state.snapshot());
            }
        }
    }
}

/// Cloneable entry point into the hub.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::Sender<RelayEvent>,
}

impl RelayHandle {
    /// Register a new transport and return its freshly minted identity.
    pub async fn open(&self, sink: Box<dyn MessageSink>) -> Result<ConnectionId, HubError> {
        let id = ConnectionId::new();
        self.send(RelayEvent::Opened { id, sink }).await?;
        Ok(id)
    }

    /// Queue one text frame received from `id`.
    pub async fn inbound(&self, id: ConnectionId, text: String) -> Result<(), HubError> {
        self.send(RelayEvent::Inbound { id, text }).await
    }

    /// Report that the transport for `id` has closed.
    pub async fn close(&self, id: ConnectionId) -> Result<(), HubError> {
        self.send(RelayEvent::Closed { id }).await
    }

    /// Current scene and role counts, after every previously queued event.
    pub async fn snapshot(&self) -> Result<RelaySnapshot, HubError> {
        let (reply, rx) = oneshot::channel();
        self.send(RelayEvent::Snapshot { reply }).await?;
        rx.await.map_err(|_| HubError::Stopped)
    }

    async fn send(&self, event: RelayEvent) -> Result<(), HubError> {
        self.tx.send(event).await.map_err(|_| HubError::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::ChannelSink;
    use crate::domain::relay::{RoleCounts, SceneMessage};
    use crate::domain::scene::ClientRole;

    #[tokio::test]
    async fn events_are_applied_in_order() {
        let (handle, _task) = RelayHub::spawn(SceneKey::Space, 16);
        let (sink, mut rx) = ChannelSink::pair();

        let id = handle.open(Box::new(sink)).await.unwrap();
        handle
            .inbound(id, r#"{"type":"SCENE_CHANGE","scene":"garden"}"#.to_string())
            .await
            .unwrap();
        handle
            .inbound(id, r#"{"type":"SCENE_STATUS"}"#.to_string())
            .await
            .unwrap();

        let forwarded = rx.recv().await.unwrap();
        assert!(forwarded.as_str().contains("SCENE_CHANGE"));
        let reply: SceneMessage = serde_json::from_str(rx.recv().await.unwrap().as_str()).unwrap();
        assert_eq!(reply, SceneMessage::status_reply(SceneKey::Garden));
    }

    #[tokio::test]
    async fn snapshot_sees_prior_events() {
        let (handle, _task) = RelayHub::spawn(SceneKey::FlowField, 16);
        let (sink, _rx) = ChannelSink::pair();
        let id = handle.open(Box::new(sink)).await.unwrap();
        let registration = serde_json::to_string(&SceneMessage::registration(ClientRole::Control)).unwrap();
        handle.inbound(id, registration).await.unwrap();

        let snapshot = handle.snapshot().await.unwrap();

        assert_eq!(snapshot.scene, SceneKey::FlowField);
        assert_eq!(
            snapshot.counts,
            RoleCounts {
                displays: 0,
                controls: 1
            }
        );

        handle.close(id).await.unwrap();
        assert_eq!(handle.snapshot().await.unwrap().counts.total(), 0);
    }

    #[tokio::test]
    async fn hub_stops_when_handles_drop() {
        let (handle, task) = RelayHub::spawn(SceneKey::Space, 4);
        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn handle_reports_stopped_hub() {
        let (hub, handle) = RelayHub::new(SceneKey::Space, 4);
        drop(hub);

        let (sink, _rx) = ChannelSink::pair();
        assert_eq!(handle.open(Box::new(sink)).await, Err(HubError::Stopped));
        assert_eq!(handle.snapshot().await, Err(HubError::Stopped));
    }
}
