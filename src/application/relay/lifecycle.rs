//! Lifecycle manager - connection open and close.
//!
//! ```text
//! OPEN(display) ──register──▶ OPEN(control|display) ──close──▶ CLOSED
//!      │                                                   ▲
//!      └───────────────────────close───────────────────────┘
//! ```
//!
//! Opening never notifies anyone. Closing pushes fresh role counts to the
//! remaining control connections.

use crate::domain::foundation::ConnectionId;
use crate::domain::scene::ClientRole;
use crate::ports::MessageSink;

use super::broadcast::{self, BroadcastReport};
use super::registry::RegistryError;
use super::state::RelayState;

/// What a close removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedConnection {
    pub role: ClientRole,
    pub duration_ms: i64,
    pub status_push: BroadcastReport,
}

impl RelayState {
    /// Register a newly opened transport as a display.
    ///
    /// # Errors
    ///
    /// - `AlreadyRegistered` if the identity is live already
    pub fn on_open(
        &mut self,
        id: ConnectionId,
        sink: Box<dyn MessageSink>,
    ) -> Result<(), RegistryError> {
        self.registry.register(id, sink)?;
        tracing::info!(
            connection_id = %id,
            connections = self.registry.len(),
            "Client connected"
        );
        Ok(())
    }

    /// Forget a closed transport and notify control connections.
    ///
    /// Unknown identities are a no-op and return `None`.
    pub fn on_close(&mut self, id: ConnectionId) -> Option<ClosedConnection> {
        let connection = self.registry.remove(id)?;
        let status_push = broadcast::push_status(&self.registry, self.session.current_scene());
        let duration_ms = connection.connected_at().elapsed_millis();

        tracing::info!(
            connection_id = %id,
            role = %connection.role(),
            duration_ms,
            connections = self.registry.len(),
            "Client disconnected"
        );

        Some(ClosedConnection {
            role: connection.role(),
            duration_ms,
            status_push,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::ChannelSink;
    use crate::domain::relay::{RoleCounts, SceneMessage};

    #[test]
    fn open_registers_display_without_broadcast() {
        let mut state = RelayState::default();
        let (control_sink, mut control_rx) = ChannelSink::pair();
        let control = ConnectionId::new();
        state.on_open(control, Box::new(control_sink)).unwrap();
        state.registry.set_role(control, ClientRole::Control).unwrap();

        let (sink, _rx) = ChannelSink::pair();
        state.on_open(ConnectionId::new(), Box::new(sink)).unwrap();

        assert_eq!(state.snapshot().counts.displays, 1);
        assert!(control_rx.try_recv().is_err());
    }

    #[test]
    fn open_rejects_duplicate_identity() {
        let mut state = RelayState::default();
        let id = ConnectionId::new();
        let (a, _rx_a) = ChannelSink::pair();
        let (b, _rx_b) = ChannelSink::pair();
        state.on_open(id, Box::new(a)).unwrap();

        assert_eq!(
            state.on_open(id, Box::new(b)),
            Err(RegistryError::AlreadyRegistered(id))
        );
    }

    #[test]
    fn close_removes_and_pushes_status() {
        let mut state = RelayState::default();
        let (control_sink, mut control_rx) = ChannelSink::pair();
        let control = ConnectionId::new();
        state.on_open(control, Box::new(control_sink)).unwrap();
        state.registry.set_role(control, ClientRole::Control).unwrap();

        let display = ConnectionId::new();
        let (display_sink, _display_rx) = ChannelSink::pair();
        state.on_open(display, Box::new(display_sink)).unwrap();

        let closed = state.on_close(display).unwrap();

        assert_eq!(closed.role, ClientRole::Display);
        assert_eq!(closed.status_push.delivered, 1);
        let frame = control_rx.try_recv().unwrap();
        let msg: SceneMessage = serde_json::from_str(frame.as_str()).unwrap();
        assert_eq!(
            msg.role_counts(),
            Some(RoleCounts {
                displays: 0,
                controls: 1
            })
        );
    }

    #[test]
    fn close_of_unknown_connection_is_noop() {
        let mut state = RelayState::default();
        let (control_sink, mut control_rx) = ChannelSink::pair();
        let control = ConnectionId::new();
        state.on_open(control, Box::new(control_sink)).unwrap();
        state.registry.set_role(control, ClientRole::Control).unwrap();

        assert!(state.on_close(ConnectionId::new()).is_none());
        assert!(control_rx.try_recv().is_err());
    }

    #[test]
    fn second_close_is_noop() {
        let mut state = RelayState::default();
        let id = ConnectionId::new();
        let (sink, _rx) = ChannelSink::pair();
        state.on_open(id, Box::new(sink)).unwrap();

        assert!(state.on_close(id).is_some());
        assert!(state.on_close(id).is_none());
    }
}
