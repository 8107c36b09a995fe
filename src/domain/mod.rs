//! Domain layer containing relay types and session state.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (connection ids, timestamps, protocol errors)
//! - `scene` - Scene keys, scene status and client roles
//! - `session` - The installation's current scene
//! - `relay` - Wire messages and inbound decoding

pub mod foundation;
pub mod relay;
pub mod scene;
pub mod session;
