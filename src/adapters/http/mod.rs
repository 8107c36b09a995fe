//! HTTP adapters - endpoints served beside the relay socket.

pub mod health;
pub mod routes;

pub use health::{health, HealthResponse};
pub use routes::http_router;
