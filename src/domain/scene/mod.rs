//! Scene vocabulary - the closed sets the wire protocol is built from.

mod client_role;
mod scene_key;
mod scene_status;

pub use client_role::ClientRole;
pub use scene_key::{SceneKey, UnknownScene};
pub use scene_status::SceneStatus;
