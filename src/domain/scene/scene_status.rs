//! SceneStatus enum carried on status messages.

use serde::{Deserialize, Serialize};

/// Load state of a scene as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneStatus {
    Loading,
    Ready,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SceneStatus::Ready).unwrap(), "\"ready\"");
        assert_eq!(
            serde_json::from_str::<SceneStatus>("\"loading\"").unwrap(),
            SceneStatus::Loading
        );
        assert!(serde_json::from_str::<SceneStatus>("\"READY\"").is_err());
    }
}
