//! Connection registry - who is connected and what they can receive.
//!
//! A plain in-memory map owned by the relay hub task. It never broadcasts
//! on its own; callers follow every role change and removal with a status
//! push.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::domain::foundation::{ConnectionId, Timestamp};
use crate::domain::relay::{Frame, RoleCounts};
use crate::domain::scene::ClientRole;
use crate::ports::{DeliveryError, MessageSink};

/// Errors that can occur in registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Connection {0} is not registered")]
    NotFound(ConnectionId),

    #[error("Connection {0} is already registered")]
    AlreadyRegistered(ConnectionId),
}

/// One live transport session.
pub struct Connection {
    id: ConnectionId,
    role: ClientRole,
    sink: Box<dyn MessageSink>,
    connected_at: Timestamp,
}

impl Connection {
    fn new(id: ConnectionId, sink: Box<dyn MessageSink>) -> Self {
        Self {
            id,
            role: ClientRole::default(),
            sink,
            connected_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn role(&self) -> ClientRole {
        self.role
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Hand a frame to this connection's transport.
    pub fn deliver(&self, frame: Frame) -> Result<(), DeliveryError> {
        self.sink.deliver(frame)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}

/// In-memory mapping of connection identity to role and transport.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly opened connection with the default role.
    ///
    /// # Errors
    ///
    /// - `AlreadyRegistered` if the identity is live already
    pub fn register(
        &mut self,
        id: ConnectionId,
        sink: Box<dyn MessageSink>,
    ) -> Result<&Connection, RegistryError> {
        if self.connections.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        Ok(self
            .connections
            .entry(id)
            .or_insert_with(|| Connection::new(id, sink)))
    }

    /// Change a connection's role in place, returning the previous role.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the identity is not registered
    pub fn set_role(
        &mut self,
        id: ConnectionId,
        role: ClientRole,
    ) -> Result<ClientRole, RegistryError> {
        let connection = self
            .connections
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;
        Ok(std::mem::replace(&mut connection.role, role))
    }

    /// Remove a connection. Returns `None` if it was already gone.
    pub fn remove(&mut self, id: ConnectionId) -> Option<Connection> {
        self.connections.remove(&id)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    /// Every live connection currently holding `role`.
    pub fn all_of_role(&self, role: ClientRole) -> impl Iterator<Item = &Connection> + '_ {
        self.connections
            .values()
            .filter(move |connection| connection.role == role)
    }

    /// Live connection counts per role.
    pub fn counts(&self) -> RoleCounts {
        self.connections
            .values()
            .fold(RoleCounts::default(), |mut counts, connection| {
                match connection.role {
                    ClientRole::Control => counts.controls += 1,
                    ClientRole::Display => counts.displays += 1,
                }
                counts
            })
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::ChannelSink;

    fn sink() -> Box<dyn MessageSink> {
        let (sink, _rx) = ChannelSink::pair();
        Box::new(sink)
    }

    #[test]
    fn register_defaults_to_display() {
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new();

        let connection = registry.register(id, sink()).unwrap();

        assert_eq!(connection.id(), id);
        assert_eq!(connection.role(), ClientRole::Display);
        assert_eq!(
            registry.counts(),
            RoleCounts {
                displays: 1,
                controls: 0
            }
        );
    }

    #[test]
    fn register_rejects_live_duplicate() {
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        registry.register(id, sink()).unwrap();

        let err = registry.register(id, sink()).unwrap_err();

        assert_eq!(err, RegistryError::AlreadyRegistered(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn set_role_mutates_in_place() {
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let connected_at = registry.register(id, sink()).unwrap().connected_at();

        let previous = registry.set_role(id, ClientRole::Control).unwrap();

        assert_eq!(previous, ClientRole::Display);
        let connection = registry.get(id).unwrap();
        assert_eq!(connection.role(), ClientRole::Control);
        assert_eq!(connection.connected_at(), connected_at);
    }

    #[test]
    fn set_role_on_unknown_connection_fails() {
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        assert_eq!(
            registry.set_role(id, ClientRole::Control),
            Err(RegistryError::NotFound(id))
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        registry.register(id, sink()).unwrap();

        assert!(registry.remove(id).is_some());
        assert!(registry.remove(id).is_none());
        assert!(registry.is_empty());
        assert!(!registry.contains(id));
    }

    #[test]
    fn all_of_role_filters_by_role() {
        let mut registry = ConnectionRegistry::new();
        let control = ConnectionId::new();
        let display_a = ConnectionId::new();
        let display_b = ConnectionId::new();
        for id in [control, display_a, display_b] {
            registry.register(id, sink()).unwrap();
        }
        registry.set_role(control, ClientRole::Control).unwrap();

        let controls: Vec<_> = registry
            .all_of_role(ClientRole::Control)
            .map(Connection::id)
            .collect();
        let mut displays: Vec<_> = registry
            .all_of_role(ClientRole::Display)
            .map(Connection::id)
            .collect();
        displays.sort_by_key(|id| *id.as_uuid());
        let mut expected = vec![display_a, display_b];
        expected.sort_by_key(|id| *id.as_uuid());

        assert_eq!(controls, vec![control]);
        assert_eq!(displays, expected);
        assert_eq!(
            registry.counts(),
            RoleCounts {
                displays: 2,
                controls: 1
            }
        );
    }

    #[test]
    fn connection_debug_omits_transport() {
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let connection = registry.register(id, sink()).unwrap();
        let debug = format!("{connection:?}");
        assert!(debug.contains("Display"));
        assert!(!debug.contains("sink"));
    }
}
