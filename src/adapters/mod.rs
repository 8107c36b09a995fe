//! Adapters - Implementations of port interfaces and transport endpoints.
//!
//! Adapters connect the relay to the outside world:
//! - `websocket` - Relay socket endpoint and channel-backed message sinks
//! - `http` - Health endpoint with CORS

pub mod http;
pub mod websocket;

pub use http::http_router;
pub use websocket::{websocket_router, ChannelSink, WebSocketState};
