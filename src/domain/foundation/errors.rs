//! Error types for the domain layer.

use serde_json::error::Category;
use thiserror::Error;

/// Errors raised while decoding an inbound wire message.
///
/// Every variant means the message is dropped; the split only exists so
/// logs can tell garbage apart from well-formed JSON with the wrong shape.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Message is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Message is not a JSON object")]
    NotAnObject,

    #[error("Message does not match the scene message schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),
}

impl ProtocolError {
    /// Short machine-readable reason, used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            ProtocolError::InvalidJson(_) => "invalid_json",
            ProtocolError::NotAnObject => "not_an_object",
            ProtocolError::SchemaMismatch(_) => "schema_mismatch",
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => ProtocolError::SchemaMismatch(err),
            Category::Syntax | Category::Eof | Category::Io => ProtocolError::InvalidJson(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_classify_as_invalid_json() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ProtocolError::from(err);
        assert!(matches!(err, ProtocolError::InvalidJson(_)));
        assert_eq!(err.reason(), "invalid_json");
    }

    #[test]
    fn type_errors_classify_as_schema_mismatch() {
        let err = serde_json::from_str::<u32>("\"text\"").unwrap_err();
        let err = ProtocolError::from(err);
        assert!(matches!(err, ProtocolError::SchemaMismatch(_)));
        assert_eq!(err.reason(), "schema_mismatch");
    }

    #[test]
    fn protocol_error_display_includes_cause() {
        let err = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let msg = ProtocolError::from(err).to_string();
        assert!(msg.starts_with("Message is not valid JSON"));
    }
}
