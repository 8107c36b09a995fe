//! Broadcast engine - fan-out of frames to registry members.
//!
//! Delivery is fire-and-forget: one failing recipient is logged and
//! skipped, and the loop carries on with the rest.

use thiserror::Error;

use crate::domain::foundation::ConnectionId;
use crate::domain::relay::{Frame, SceneMessage};
use crate::domain::scene::{ClientRole, SceneKey};
use crate::ports::DeliveryError;

use super::registry::{ConnectionRegistry, RegistryError};

/// Errors from a targeted send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections that matched the role filter.
    pub attempted: usize,
    /// Connections whose transport accepted the frame.
    pub delivered: usize,
}

impl BroadcastReport {
    pub fn failed(&self) -> usize {
        self.attempted - self.delivered
    }
}

/// Serialize a relay-originated message once for all recipients.
///
/// Returns `None` (and logs) if serialization fails, which the scene
/// message types cannot trigger in practice.
pub fn encode(message: &SceneMessage) -> Option<Frame> {
    match Frame::encode(message) {
        Ok(frame) => Some(frame),
        Err(e) => {
            tracing::error!(kind = %message.kind, "Failed to serialize scene message: {}", e);
            None
        }
    }
}

/// Deliver `frame` to every connection holding `role`.
pub fn broadcast_to(registry: &ConnectionRegistry, role: ClientRole, frame: &Frame) -> BroadcastReport {
    let mut report = BroadcastReport::default();

    for connection in registry.all_of_role(role) {
        report.attempted += 1;
        match connection.deliver(frame.clone()) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection.id(),
                    role = %role,
                    "Skipping recipient: {}",
                    e
                );
            }
        }
    }

    report
}

/// Deliver `frame` to a single connection.
///
/// # Errors
///
/// - `Registry(NotFound)` if the connection is gone
/// - `Delivery(Closed)` if its transport no longer accepts frames
pub fn send_to(registry: &ConnectionRegistry, id: ConnectionId, frame: Frame) -> Result<(), SendError> {
    let connection = registry.get(id).ok_or(RegistryError::NotFound(id))?;
    connection.deliver(frame)?;
    Ok(())
}

/// Push the current scene and live role counts to every control connection.
pub fn push_status(registry: &ConnectionRegistry, scene: SceneKey) -> BroadcastReport {
    let counts = registry.counts();
    let Some(frame) = encode(&SceneMessage::status_push(scene, counts)) else {
        return BroadcastReport::default();
    };

    let report = broadcast_to(registry, ClientRole::Control, &frame);
    tracing::debug!(
        displays = counts.displays,
        controls = counts.controls,
        notified = report.delivered,
        "Pushed status to control connections"
    );
    report
}
