//! Relay state - everything the hub owns, in one value.

use crate::domain::relay::RoleCounts;
use crate::domain::scene::SceneKey;
use crate::domain::session::SessionState;

use super::registry::ConnectionRegistry;

/// Registry plus session state.
///
/// Only the relay hub holds one of these, so no field needs a lock.
/// Lifecycle events live in `lifecycle.rs`, message routing in
/// `dispatcher.rs`.
#[derive(Debug)]
pub struct RelayState {
    pub(super) registry: ConnectionRegistry,
    pub(super) session: SessionState,
}

/// Point-in-time view of the relay, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySnapshot {
    pub scene: SceneKey,
    pub counts: RoleCounts,
}

impl RelayState {
    pub fn new(initial_scene: SceneKey) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            session: SessionState::new(initial_scene),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn snapshot(&self) -> RelaySnapshot {
        RelaySnapshot {
            scene: self.session.current_scene(),
            counts: self.registry.counts(),
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new(SceneKey::default())
    }
}
