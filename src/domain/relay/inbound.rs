//! Decoding of client frames into typed relay commands.
//!
//! The wire shape overloads one object for two purposes: role registration
//! (any message with `clientType`) and kind-based routing. Decoding splits
//! them so the dispatcher never has to look at both.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::ProtocolError;
use crate::domain::scene::{ClientRole, SceneKey, SceneStatus};

use super::message::{Frame, MessageKind};

/// A decoded client frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// Declare the sender's role. Takes precedence over the declared kind.
    Register(ClientRole),

    /// Select a scene (when present) and forward the original frame to displays.
    SceneChange {
        scene: Option<SceneKey>,
        frame: Frame,
    },

    /// Ask for the current scene; answered to the sender only.
    StatusQuery,

    /// Visitor input forwarded to displays unchanged.
    ControlInput {
        user_details: Option<UserDetails>,
        frame: Frame,
    },

    /// Well-formed, but of a kind the relay does not route.
    Unrecognized { kind: Option<String> },
}

impl InboundMessage {
    /// Decode one text frame.
    ///
    /// # Errors
    ///
    /// - `InvalidJson` if the text is not JSON
    /// - `NotAnObject` for any other JSON value
    /// - `SchemaMismatch` if a known field holds a value outside its closed
    ///   set (scene, status, clientType) or has the wrong type
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ProtocolError::NotAnObject);
        }
        let raw = RawMessage::deserialize(&value)?;

        if let Some(role) = raw.client_type {
            return Ok(InboundMessage::Register(role));
        }

        let Some(kind_name) = raw.kind else {
            return Ok(InboundMessage::Unrecognized { kind: None });
        };

        let message = match MessageKind::from_wire(&kind_name) {
            Some(MessageKind::SceneChange) => InboundMessage::SceneChange {
                scene: raw.scene,
                frame: Frame::verbatim(text),
            },
            Some(MessageKind::SceneStatus) => InboundMessage::StatusQuery,
            Some(MessageKind::ControlInput) => InboundMessage::ControlInput {
                user_details: raw.payload.as_ref().and_then(UserDetails::from_payload),
                frame: Frame::verbatim(text),
            },
            None => InboundMessage::Unrecognized {
                kind: Some(kind_name),
            },
        };

        Ok(message)
    }

    /// Label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            InboundMessage::Register(_) => "register",
            InboundMessage::SceneChange { .. } => "scene_change",
            InboundMessage::StatusQuery => "status_query",
            InboundMessage::ControlInput { .. } => "control_input",
            InboundMessage::Unrecognized { .. } => "unrecognized",
        }
    }
}

/// Visitor details submitted from the control panel form.
///
/// Read for logging only; the payload is forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl UserDetails {
    /// Extract `payload.userDetails`, if it has the expected shape.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        payload
            .get("userDetails")
            .and_then(|details| UserDetails::deserialize(details).ok())
    }
}

/// Permissive view of an inbound frame.
///
/// Unknown fields are ignored. `status` is validated even though routing
/// never reads it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    #[serde(rename = "type", default)]
    kind: Option<String>,

    #[serde(default)]
    scene: Option<SceneKey>,

    #[serde(default)]
    #[allow(dead_code)]
    status: Option<SceneStatus>,

    #[serde(default)]
    payload: Option<Value>,

    #[serde(default)]
    client_type: Option<ClientRole>,
}
