//! WebSocket adapters for the scene relay.
//!
//! # Architecture
//!
//! ```text
//!  socket ──reader──▶ RelayHandle::inbound ──▶ RelayHub
//!    ▲                                            │
//!    └──writer◀── ChannelSink (unbounded) ◀───────┘
//! ```
//!
//! # Components
//!
//! - [`handler`] - Axum WebSocket upgrade handler and per-connection tasks
//! - [`channel_sink`] - `MessageSink` backed by a per-connection channel

pub mod channel_sink;
pub mod handler;

pub use channel_sink::ChannelSink;
pub use handler::{websocket_router, ws_handler, WebSocketState};
