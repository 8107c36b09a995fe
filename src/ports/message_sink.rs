//! MessageSink port - Interface for pushing frames to one connection.
//!
//! The relay never writes to a socket itself. Each registered connection
//! owns a sink, and delivery is a non-blocking hand-off to whatever drives
//! the transport (for WebSockets, the connection's writer task).

use thiserror::Error;

use crate::domain::relay::Frame;

/// Errors that can occur when handing a frame to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The transport side has already gone away.
    #[error("Connection transport is closed")]
    Closed,
}

/// Port for fire-and-forget delivery to a single connection.
///
/// Implementations must:
/// - return without waiting for the frame to reach the peer
/// - report `Closed` once the transport can no longer accept frames
///
/// There is no acknowledgement and no retry.
pub trait MessageSink: Send + Sync {
    /// Hand one frame to the transport.
    fn deliver(&self, frame: Frame) -> Result<(), DeliveryError>;
}
