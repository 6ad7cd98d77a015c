//! Inbound node events.
//!
//! Interrupt handlers and poll timers in the orchestrator debounce their
//! inputs and hand them to the single controller task as [`NodeEvent`]s.
//! The task feeds them to [`Controller::handle_event`](super::controller::Controller::handle_event)
//! one at a time, in arrival order.

use crate::message::MessageEnvelope;
use crate::sensors::remote::RemoteButton;
use crate::sensors::{EnvironmentReading, LuminosityReading, MovementChannel};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeEvent {
    /// Luminosity poll completed.
    Luminosity(LuminosityReading),
    /// Environment poll completed.
    Environment(EnvironmentReading),
    /// Door contact sampled (`true` = open).
    Door(bool),
    /// Debounced PIR edge.
    Movement(MovementChannel),
    /// Decoded IR remote key.
    RemoteButton(RemoteButton),
    /// Envelope received from the transport.
    Message(MessageEnvelope),
}
