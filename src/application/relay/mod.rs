//! Scene relay - registry, routing and fan-out.
//!
//! # Components
//!
//! - [`registry`] - Live connections and their roles
//! - [`broadcast`] - Role-filtered fan-out and targeted sends
//! - [`dispatcher`] - Routing of decoded inbound frames
//! - [`lifecycle`] - Connection open/close handling
//! - [`hub`] - The task that owns all of the above

pub mod broadcast;
pub mod dispatcher;
pub mod hub;
pub mod lifecycle;
pub mod registry;
mod state;

pub use broadcast::{BroadcastReport, SendError};
pub use dispatcher::{DropReason, Outcome};
pub use hub::{HubError, RelayEvent, RelayHandle, RelayHub};
pub use lifecycle::ClosedConnection;
pub use registry::{Connection, ConnectionRegistry, RegistryError};
pub use state::{RelaySnapshot, RelayState};
