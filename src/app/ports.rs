//! Port traits: the hexagonal boundary between the controller and the board.
//!
//! ```text
//!   Controller ──▶ runtime glue ──▶ Port trait ──▶ Adapter (GPIO, radio, …)
//! ```
//!
//! Driven adapters (power rails, status LED, message transport) implement
//! these traits. The runtime glue in [`runtime`](super::runtime) consumes
//! them via generics, so the controller never touches hardware directly.

use crate::channels::Channel;
use crate::error::Result;
use crate::fsm::context::StatusLed;
use crate::message::MessageEnvelope;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Set the status LED colour.
    fn set_status_led(&mut self, colour: StatusLed);

    /// Enable or disable the power rail of one channel.
    fn set_channel(&mut self, channel: Channel, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Message port (driven adapter: domain → transport)
// ───────────────────────────────────────────────────────────────

/// Outgoing envelope transport (UART link, radio, …).
pub trait MessagePort {
    /// Hand one envelope to the transport.
    fn send(&mut self, msg: &MessageEnvelope) -> Result<()>;
}
