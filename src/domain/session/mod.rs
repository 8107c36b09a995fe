//! Session domain module.
//!
//! Holds the single piece of shared state the installation has: which
//! scene is currently selected.

mod state;

pub use state::SessionState;
