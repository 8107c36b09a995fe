//! Session state - the installation-wide current scene.

use crate::domain::foundation::Timestamp;
use crate::domain::scene::SceneKey;

/// Process-wide session state shared by every connection.
///
/// # Invariants
///
/// - exactly one current scene at any instant
/// - only a validated scene-change mutates it
///
/// Owned by the relay hub; nothing else holds a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current_scene: SceneKey,
    updated_at: Timestamp,
}

impl SessionState {
    /// Create session state starting at the given scene.
    pub fn new(initial_scene: SceneKey) -> Self {
        Self {
            current_scene: initial_scene,
            updated_at: Timestamp::now(),
        }
    }

    /// The scene every display should currently show.
    pub fn current_scene(&self) -> SceneKey {
        self.current_scene
    }

    /// When the scene was last set.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Replace the current scene, returning the previous one.
    pub fn set_scene(&mut self, scene: SceneKey) -> SceneKey {
        let previous = std::mem::replace(&mut self.current_scene, scene);
        self.updated_at = Timestamp::now();
        previous
    }

    /// Apply an optional scene from an inbound message.
    ///
    /// An absent scene keeps the prior value. Returns the previous scene
    /// when a change was applied.
    pub fn apply(&mut self, scene: Option<SceneKey>) -> Option<SceneKey> {
        scene.map(|scene| self.set_scene(scene))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SceneKey::default())
    }
}
