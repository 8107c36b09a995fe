//! SceneKey enum for the fixed set of visual scenes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the named visual experiences a display can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKey {
    #[default]
    Space,
    FlowField,
    Garden,
}

impl SceneKey {
    /// All scenes in display order.
    pub const ALL: [SceneKey; 3] = [SceneKey::Space, SceneKey::FlowField, SceneKey::Garden];

    /// Wire identifier, as it appears in the `scene` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKey::Space => "space",
            SceneKey::FlowField => "flow-field",
            SceneKey::Garden => "garden",
        }
    }

    /// Human-readable name shown on the control panel.
    pub fn label(&self) -> &'static str {
        match self {
            SceneKey::Space => "Space",
            SceneKey::FlowField => "Flow Field",
            SceneKey::Garden => "Garden",
        }
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known scene.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown scene '{0}'")]
pub struct UnknownScene(pub String);

impl FromStr for SceneKey {
    type Err = UnknownScene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneKey::ALL
            .into_iter()
            .find(|scene| scene.as_str() == s)
            .ok_or_else(|| UnknownScene(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_is_space() {
        assert_eq!(SceneKey::default(), SceneKey::Space);
    }

    #[test]
    fn serializes_to_kebab_case_wire_names() {
        assert_eq!(serde_json::to_string(&SceneKey::FlowField).unwrap(), "\"flow-field\"");
        assert_eq!(serde_json::to_string(&SceneKey::Garden).unwrap(), "\"garden\"");
    }

    #[test]
    fn serde_and_as_str_agree() {
        for scene in SceneKey::ALL {
            let json = format!("\"{}\"", scene.as_str());
            let parsed: SceneKey = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, scene);
        }
    }

    #[test]
    fn rejects_unknown_wire_name() {
        assert!(serde_json::from_str::<SceneKey>("\"ocean\"").is_err());
        assert!(serde_json::from_str::<SceneKey>("\"flow_field\"").is_err());
    }

    #[test]
    fn from_str_parses_known_scenes() {
        assert_eq!("garden".parse::<SceneKey>().unwrap(), SceneKey::Garden);
        assert_eq!(
            "ocean".parse::<SceneKey>().unwrap_err(),
            UnknownScene("ocean".to_string())
        );
    }

    #[test]
    fn labels_match_control_panel_names() {
        assert_eq!(SceneKey::Space.label(), "Space");
        assert_eq!(SceneKey::FlowField.label(), "Flow Field");
        assert_eq!(SceneKey::Garden.label(), "Garden");
    }
}
