//! Ports - Interfaces for external dependencies.
//!
//! The relay core never touches a socket directly; it delivers encoded frames
//! through a [`MessageSink`] supplied by the transport adapter.

mod message_sink;

pub use message_sink::{DeliveryError, MessageSink};
