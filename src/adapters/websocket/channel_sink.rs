//! Channel-backed message sink.
//!
//! Every WebSocket connection gets an unbounded channel. The relay hub
//! pushes frames into the sending half; the connection's writer task drains
//! the receiving half into the socket. Once the writer stops, the receiver
//! is dropped and further deliveries report `Closed`.

use tokio::sync::mpsc;

use crate::domain::relay::Frame;
use crate::ports::{DeliveryError, MessageSink};

/// Sending half of a connection's outbound queue.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Frame>,
}

impl ChannelSink {
    /// Create a sink together with the receiver its writer task drains.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns true once the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl MessageSink for ChannelSink {
    fn deliver(&self, frame: Frame) -> Result<(), DeliveryError> {
        self.tx.send(frame).map_err(|_| DeliveryError::Closed)
    }
}
