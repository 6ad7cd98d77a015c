//! Mock hardware adapters for integration tests.
//!
//! Records every actuator write and every sent envelope so tests can
//! assert on the full history without touching real GPIO or a radio.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use homenode::app::ports::{ActuatorPort, MessagePort};
use homenode::channels::Channel;
use homenode::error::{Result, TransportError};
use homenode::fsm::context::StatusLed;
use homenode::message::MessageEnvelope;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    StatusLed(StatusLed),
    Channel(Channel, bool),
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Last value written to `channel`, or `false` if never written.
    pub fn is_on(&self, channel: Channel) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Channel(ch, on) if *ch == channel => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn status_led(&self) -> Option<StatusLed> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::StatusLed(colour) => Some(*colour),
            _ => None,
        })
    }

    pub fn writes_to(&self, channel: Channel) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Channel(ch, _) if *ch == channel))
            .count()
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ActuatorPort for MockPanel {
    fn set_status_led(&mut self, colour: StatusLed) {
        self.calls.push(ActuatorCall::StatusLed(colour));
    }

    fn set_channel(&mut self, channel: Channel, on: bool) {
        self.calls.push(ActuatorCall::Channel(channel, on));
    }
}

// ── MockLink ──────────────────────────────────────────────────

/// Message transport that records envelopes and can be taken offline.
pub struct MockLink {
    pub sent: Vec<MessageEnvelope>,
    pub online: bool,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            online: true,
        }
    }
}

impl MessagePort for MockLink {
    fn send(&mut self, msg: &MessageEnvelope) -> Result<()> {
        if !self.online {
            return Err(TransportError::LinkDown.into());
        }
        self.sent.push(msg.clone());
        Ok(())
    }
}

// ── MockPin ───────────────────────────────────────────────────

/// `embedded-hal` output pin whose level is observable through a clone.
#[derive(Clone, Default)]
pub struct MockPin(Rc<Cell<bool>>);

#[allow(dead_code)]
impl MockPin {
    pub fn is_high(&self) -> bool {
        self.0.get()
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}
