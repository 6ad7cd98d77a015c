//! GPIO power-rail adapter.
//!
//! Each actuator channel sits behind a load switch driven by one output
//! pin (active HIGH). The bicolour status LED uses two pins. Pin write
//! failures are logged and otherwise ignored; the next applied state
//! retries the write.

use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

use crate::app::ports::ActuatorPort;
use crate::channels::Channel;
use crate::fsm::context::StatusLed;

const MAX_RAILS: usize = Channel::ALL.len();

pub struct PowerRails<P> {
    rails: heapless::Vec<(Channel, P), MAX_RAILS>,
    led_red: P,
    led_green: P,
}

impl<P: OutputPin> PowerRails<P> {
    pub fn new(led_red: P, led_green: P) -> Self {
        Self {
            rails: heapless::Vec::new(),
            led_red,
            led_green,
        }
    }

    /// Bind `pin` to `channel`, replacing any earlier binding.
    pub fn with_rail(mut self, channel: Channel, pin: P) -> Self {
        if let Some(slot) = self.rails.iter_mut().find(|(c, _)| *c == channel) {
            slot.1 = pin;
        } else if self.rails.push((channel, pin)).is_err() {
            warn!("power rails: no slot left for {}", channel.name());
        }
        self
    }

    pub fn has_rail(&self, channel: Channel) -> bool {
        self.rails.iter().any(|(c, _)| *c == channel)
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool, what: &str) {
    let res = if high { pin.set_high() } else { pin.set_low() };
    if let Err(e) = res {
        warn!("power rails: {} write failed: {:?}", what, e.kind());
    }
}

impl<P: OutputPin> ActuatorPort for PowerRails<P> {
    fn set_status_led(&mut self, colour: StatusLed) {
        drive(&mut self.led_red, colour == StatusLed::Red, "status_red");
        drive(&mut self.led_green, colour == StatusLed::Green, "status_green");
    }

    fn set_channel(&mut self, channel: Channel, on: bool) {
        match self.rails.iter_mut().find(|(c, _)| *c == channel) {
            Some((_, pin)) => drive(pin, on, channel.name()),
            None => warn!("power rails: {} not wired", channel.name()),
        }
    }
}
