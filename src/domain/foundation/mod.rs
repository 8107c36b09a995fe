//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the
//! vocabulary of the relay domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ProtocolError;
pub use ids::ConnectionId;
pub use timestamp::Timestamp;
