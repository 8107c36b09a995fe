//! Relay configuration

use serde::Deserialize;

use crate::domain::scene::SceneKey;

use super::error::ValidationError;

/// Relay hub configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Scene shown before any control panel selects one
    #[serde(default)]
    pub initial_scene: SceneKey,

    /// Depth of the hub's inbound event queue
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,
}

impl RelayConfig {
    /// Validate relay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.event_queue_capacity == 0 {
            return Err(ValidationError::InvalidQueueCapacity);
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            initial_scene: SceneKey::default(),
            event_queue_capacity: default_event_queue_capacity(),
        }
    }
}

fn default_event_queue_capacity() -> usize {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.initial_scene, SceneKey::Space);
        assert_eq!(config.event_queue_capacity, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = RelayConfig {
            event_queue_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidQueueCapacity));
    }

    #[test]
    fn test_relay_config_deserialization() {
        let json = r#"{"initial_scene": "flow-field"}"#;
        let config: RelayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.initial_scene, SceneKey::FlowField);
        assert_eq!(config.event_queue_capacity, 1024);
    }
}
