//! Wire message types shared by the relay, control panels and displays.
//!
//! Every frame on the socket is one JSON object:
//!
//! ```text
//! { "type": "SCENE_CHANGE" | "SCENE_STATUS" | "CONTROL_INPUT",
//!   "scene"?: "space" | "flow-field" | "garden",
//!   "status"?: "loading" | "ready" | "error",
//!   "payload"?: { ... },
//!   "clientType"?: "control" | "display" }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::scene::{ClientRole, SceneKey, SceneStatus};

/// Message kind, carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    /// Select a new scene on every display.
    SceneChange,
    /// Query (client → relay) or report (relay → client) the current scene.
    SceneStatus,
    /// Free-form visitor input forwarded to displays.
    ControlInput,
}

impl MessageKind {
    /// Wire identifier, as it appears in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::SceneChange => "SCENE_CHANGE",
            MessageKind::SceneStatus => "SCENE_STATUS",
            MessageKind::ControlInput => "CONTROL_INPUT",
        }
    }

    /// Resolve a wire identifier; `None` for kinds this relay does not know.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "SCENE_CHANGE" => Some(MessageKind::SceneChange),
            "SCENE_STATUS" => Some(MessageKind::SceneStatus),
            "CONTROL_INPUT" => Some(MessageKind::ControlInput),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete scene message as sent by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SceneStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_type: Option<ClientRole>,
}

impl SceneMessage {
    fn bare(kind: MessageKind) -> Self {
        Self {
            kind,
            scene: None,
            status: None,
            payload: None,
            client_type: None,
        }
    }

    /// Private answer to a status query.
    pub fn status_reply(scene: SceneKey) -> Self {
        Self {
            scene: Some(scene),
            status: Some(SceneStatus::Ready),
            ..Self::bare(MessageKind::SceneStatus)
        }
    }

    /// Role-count status pushed to control connections.
    pub fn status_push(scene: SceneKey, counts: RoleCounts) -> Self {
        Self {
            scene: Some(scene),
            status: Some(SceneStatus::Ready),
            payload: Some(counts.to_payload()),
            ..Self::bare(MessageKind::SceneStatus)
        }
    }

    /// Scene selection, as sent by a control panel.
    pub fn scene_change(scene: SceneKey) -> Self {
        Self {
            scene: Some(scene),
            ..Self::bare(MessageKind::SceneChange)
        }
    }

    /// Status query with no registration attached.
    pub fn status_query() -> Self {
        Self::bare(MessageKind::SceneStatus)
    }

    /// Visitor input carrying an arbitrary payload.
    pub fn control_input(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            ..Self::bare(MessageKind::ControlInput)
        }
    }

    /// Role registration in the conventional shape clients send it.
    pub fn registration(role: ClientRole) -> Self {
        Self {
            status: Some(SceneStatus::Ready),
            client_type: Some(role),
            ..Self::bare(MessageKind::SceneStatus)
        }
    }

    /// Role counts, if this is a status push.
    pub fn role_counts(&self) -> Option<RoleCounts> {
        self.payload.as_ref().and_then(RoleCounts::from_payload)
    }
}

/// Number of live connections per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub displays: usize,
    pub controls: usize,
}

impl RoleCounts {
    /// Count for one role.
    pub fn of(&self, role: ClientRole) -> usize {
        match role {
            ClientRole::Control => self.controls,
            ClientRole::Display => self.displays,
        }
    }

    /// Total connections across roles.
    pub fn total(&self) -> usize {
        self.displays + self.controls
    }

    pub fn to_payload(self) -> Value {
        serde_json::json!({
            "displays": self.displays,
            "controls": self.controls,
        })
    }

    pub fn from_payload(payload: &Value) -> Option<Self> {
        RoleCounts::deserialize(payload).ok()
    }
}

/// One serialized outbound message.
///
/// Encoded once and shared by every recipient of a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Arc<str>);

impl Frame {
    /// Serialize a scene message.
    pub fn encode(message: &SceneMessage) -> Result<Self, serde_json::Error> {
        serde_json::to_string(message).map(|json| Self(json.into()))
    }

    /// Forward client text unchanged.
    pub fn verbatim(text: &str) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
