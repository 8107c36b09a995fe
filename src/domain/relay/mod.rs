//! Relay protocol - wire messages and their typed inbound form.

mod inbound;
mod message;

pub use inbound::{InboundMessage, UserDetails};
pub use message::{Frame, MessageKind, RoleCounts, SceneMessage};
