//! ClientRole enum classifying relay connections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a connection plays in the installation.
///
/// Every connection starts as a display and keeps that role until it
/// registers as something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientRole {
    Control,
    #[default]
    Display,
}

impl ClientRole {
    /// Returns true for the role that issues commands.
    pub fn is_control(&self) -> bool {
        matches!(self, ClientRole::Control)
    }

    /// Wire identifier, as it appears in the `clientType` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientRole::Control => "control",
            ClientRole::Display => "display",
        }
    }
}

impl fmt::Display for ClientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
