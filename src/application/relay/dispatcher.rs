//! Router / dispatcher - one inbound frame in, targeted deliveries out.
//!
//! Order of evaluation for each frame:
//! 1. decode; malformed frames are logged and dropped
//! 2. drop frames from connections the registry no longer knows
//! 3. registration short-circuits: set role, push status, done
//! 4. route by kind: scene change and control input go to displays,
//!    status queries are answered to the sender only
//! 5. unknown kinds are ignored

use crate::domain::foundation::{ConnectionId, ProtocolError};
use crate::domain::relay::{Frame, InboundMessage, SceneMessage, UserDetails};
use crate::domain::scene::{ClientRole, SceneKey};

use super::broadcast::{self, BroadcastReport};
use super::state::RelayState;

/// Why an inbound frame produced no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Decoding failed; carries the `ProtocolError::reason`.
    Malformed(&'static str),
    /// The sender is not (or no longer) registered.
    UnknownConnection,
}

/// Effect of dispatching one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Dropped(DropReason),
    Registered {
        role: ClientRole,
        previous: ClientRole,
        status_push: BroadcastReport,
    },
    SceneChanged {
        scene: SceneKey,
        changed: bool,
        forwarded: BroadcastReport,
    },
    StatusReplied {
        delivered: bool,
    },
    ControlInputForwarded {
        forwarded: BroadcastReport,
    },
    Ignored,
}

impl RelayState {
    /// Route one text frame received from `sender`.
    ///
    /// Never fails: every error is contained here and reported through the
    /// returned `Outcome`.
    pub fn handle_inbound(&mut self, sender: ConnectionId, text: &str) -> Outcome {
        let message = match InboundMessage::decode(text) {
            Ok(message) => message,
            Err(e) => return self.drop_malformed(sender, text, e),
        };

        if !self.registry.contains(sender) {
            tracing::debug!(
                connection_id = %sender,
                kind = message.label(),
                "Dropping message from unknown connection"
            );
            return Outcome::Dropped(DropReason::UnknownConnection);
        }

        match message {
            InboundMessage::Register(role) => self.register(sender, role),
            InboundMessage::SceneChange { scene, frame } => self.change_scene(sender, scene, frame),
            InboundMessage::StatusQuery => self.reply_status(sender),
            InboundMessage::ControlInput {
                user_details,
                frame,
            } => self.forward_control_input(sender, user_details, frame),
            InboundMessage::Unrecognized { kind } => {
                tracing::trace!(
                    connection_id = %sender,
                    kind = kind.as_deref().unwrap_or("<missing>"),
                    "Ignoring message of unrecognized kind"
                );
                Outcome::Ignored
            }
        }
    }

    fn drop_malformed(&self, sender: ConnectionId, text: &str, error: ProtocolError) -> Outcome {
        tracing::warn!(
            connection_id = %sender,
            reason = error.reason(),
            bytes = text.len(),
            "Failed to parse message: {}",
            error
        );
        Outcome::Dropped(DropReason::Malformed(error.reason()))
    }

    fn register(&mut self, sender: ConnectionId, role: ClientRole) -> Outcome {
        let previous = match self.registry.set_role(sender, role) {
            Ok(previous) => previous,
            Err(e) => {
                tracing::debug!(connection_id = %sender, "Registration dropped: {}", e);
                return Outcome::Dropped(DropReason::UnknownConnection);
            }
        };

        tracing::info!(
            connection_id = %sender,
            role = %role,
            previous = %previous,
            "Client registered"
        );

        let status_push = broadcast::push_status(&self.registry, self.session.current_scene());
        Outcome::Registered {
            role,
            previous,
            status_push,
        }
    }

    fn change_scene(
        &mut self,
        sender: ConnectionId,
        scene: Option<SceneKey>,
        frame: Frame,
    ) -> Outcome {
        let changed = match self.session.apply(scene) {
            Some(previous) => {
                let current = self.session.current_scene();
                tracing::info!(
                    connection_id = %sender,
                    from = %previous,
                    to = %current,
                    label = current.label(),
                    "Scene changed"
                );
                true
            }
            None => {
                tracing::debug!(
                    connection_id = %sender,
                    "Scene change without scene, forwarding only"
                );
                false
            }
        };

        let forwarded = broadcast::broadcast_to(&self.registry, ClientRole::Display, &frame);
        Outcome::SceneChanged {
            scene: self.session.current_scene(),
            changed,
            forwarded,
        }
    }

    fn reply_status(&self, sender: ConnectionId) -> Outcome {
        let scene = self.session.current_scene();
        let Some(frame) = broadcast::encode(&SceneMessage::status_reply(scene)) else {
            return Outcome::StatusReplied { delivered: false };
        };

        let delivered = match broadcast::send_to(&self.registry, sender, frame) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(connection_id = %sender, "Status reply not delivered: {}", e);
                false
            }
        };

        tracing::debug!(connection_id = %sender, scene = %scene, "Answered status query");
        Outcome::StatusReplied { delivered }
    }

    fn forward_control_input(
        &self,
        sender: ConnectionId,
        user_details: Option<UserDetails>,
        frame: Frame,
    ) -> Outcome {
        let forwarded = broadcast::broadcast_to(&self.registry, ClientRole::Display, &frame);

        let details = user_details.unwrap_or_default();
        tracing::debug!(
            connection_id = %sender,
            name = details.name.as_deref().unwrap_or(""),
            country = details.country.as_deref().unwrap_or(""),
            displays = forwarded.delivered,
            "Forwarded control input"
        );

        Outcome::ControlInputForwarded { forwarded }
    }
}
