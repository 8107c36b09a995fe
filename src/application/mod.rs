//! Application layer - orchestration of domain state and ports.
//!
//! The relay is the only use case: it keeps the connection registry and
//! session state consistent while routing frames between connections.

pub mod relay;

pub use relay::{RelayHandle, RelayHub, RelaySnapshot, RelayState};
