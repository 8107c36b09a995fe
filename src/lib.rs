//! Scene Relay - real-time scene coordination for a generative-art installation
//!
//! Control panels select which scene is shown; display screens render it. This
//! crate relays scene changes, status queries and control input between the two
//! over WebSocket, and keeps the session's current scene.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
