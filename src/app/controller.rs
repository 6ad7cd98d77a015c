//! Node controller, the hexagonal core.
//!
//! [`Controller`] owns the mode machine and the shared [`NodeContext`].
//! Every operation is total and non-blocking and performs no I/O: sensor
//! readings and inbound envelopes come in as values, actuator state and
//! outbound envelopes go out as values. The orchestrator is the only
//! caller and must serialise calls (see
//! [`SharedController`](super::runtime::SharedController)).
//!
//! ```text
//!  readings ─┐                          ┌─▶ get_state()   ─▶ ActuatorState
//!  movement ─┼─▶ ┌──────────────────┐ ──┤
//!  envelope ─┘   │    Controller    │   └─▶ get_message() ─▶ MessageEnvelope
//!                │ ModeMachine · ctx│
//!                └──────────────────┘
//! ```

use log::{debug, info, trace};

use crate::config::Profile;
use crate::fsm::context::{ActuatorState, NodeContext};
use crate::fsm::states::build_mode_table;
use crate::fsm::{Mode, ModeMachine};
use crate::message::{CommandId, MessageEnvelope, Switch};
use crate::sensors::remote::RemoteButton;
use crate::sensors::{EnvironmentReading, LuminosityReading, MovementChannel};

use super::events::NodeEvent;

/// What the display task needs to render the status screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySnapshot {
    pub environment: EnvironmentReading,
    pub display_off_timeout_ms: u32,
}

pub struct Controller {
    machine: ModeMachine,
    ctx: NodeContext,
}

impl Controller {
    /// Construct a controller in `SILENCE` with every window inactive, the
    /// sensor cache invalid, an empty outbox and the comfort warning enabled.
    pub fn new(profile: Profile) -> Self {
        info!("{}: controller up in SILENCE", profile.id);
        Self {
            machine: ModeMachine::new(build_mode_table(), Mode::Silence),
            ctx: NodeContext::new(profile),
        }
    }

    /// Return to the freshly constructed state, keeping the profile.
    pub fn reset(&mut self) {
        let profile = self.ctx.profile.clone();
        *self = Self::new(profile);
    }

    // ── Sensor input ──────────────────────────────────────────

    /// Update darkness. Returns the delay until the next luminosity poll.
    pub fn process_luminosity(&mut self, reading: LuminosityReading, _now: u32) -> u32 {
        let threshold = self.ctx.profile.darkness_threshold_lux;
        self.ctx.sensors.is_dark = reading.valid && reading.lux < threshold;
        trace!(
            "{}: lux={:.1} valid={} dark={}",
            self.ctx.id(),
            reading.lux,
            reading.valid,
            self.ctx.sensors.is_dark
        );
        self.ctx.profile.timing.luminosity_poll_ms
    }

    /// Cache an environment reading and, if valid, report it to the hub.
    /// Returns the delay until the next environment poll.
    pub fn process_environment(&mut self, reading: EnvironmentReading, _now: u32) -> u32 {
        self.ctx.sensors.environment = reading;
        if reading.valid {
            let hub = self.ctx.profile.hub;
            let pressure = reading.pressure_hpa.map_or(0, |p| p.round() as i32);
            let msg = match reading.humidity_pct {
                Some(humidity) => {
                    MessageEnvelope::new(self.ctx.id(), &[hub], CommandId::UpdateHumidity)
                        .with_values(humidity.round() as i32, pressure, reading.temperature_c)
                }
                None => MessageEnvelope::new(self.ctx.id(), &[hub], CommandId::UpdateTemperature)
                    .with_values(0, pressure, reading.temperature_c),
            };
            self.ctx.send(msg);
        } else {
            debug!("{}: invalid environment reading cached", self.ctx.id());
        }
        self.ctx.profile.timing.environment_poll_ms
    }

    /// Cache the door contact and report it to the hub.
    ///
    /// Returns the delay until the next door poll, or `None` on nodes
    /// without a door contact (the call is then ignored).
    pub fn process_door_state(&mut self, is_open: bool, _now: u32) -> Option<u32> {
        let Some(period) = self.ctx.profile.timing.door_poll_ms else {
            debug!("{}: no door sensor, ignoring door state", self.ctx.id());
            return None;
        };
        self.ctx.sensors.door_open = is_open;
        let hub = self.ctx.profile.hub;
        self.ctx
            .send_switch(&[hub], CommandId::UpdateDoorState, Switch::from(is_open));
        Some(period)
    }

    /// Remote-control input. Reserved; no key is mapped yet.
    pub fn process_remote_button(&mut self, button: RemoteButton) {
        trace!("{}: remote button {:?} (unmapped)", self.ctx.id(), button);
    }

    /// PIR trigger. Inputs the profile does not carry are ignored.
    pub fn process_movement(&mut self, channel: MovementChannel, now: u32) {
        let Some(action) = self.ctx.profile.movement_action(channel) else {
            debug!("{}: no {:?} input, ignoring", self.ctx.id(), channel);
            return;
        };
        self.ctx.normalize_windows(now);
        self.machine.movement(&mut self.ctx, action, now);
    }

    // ── Inbound messages ──────────────────────────────────────

    /// Act on an inbound envelope if it is addressed to this node.
    pub fn process_message(&mut self, msg: &MessageEnvelope, now: u32) {
        let id = self.ctx.id();
        if !msg.is_addressed_to(id, self.ctx.profile.accepts_broadcast) {
            debug!("{}: {:?} from {} not for us", id, msg.cmd, msg.source);
            return;
        }
        self.ctx.normalize_windows(now);

        match msg.cmd {
            CommandId::SetMode => match Mode::from_wire(msg.value0) {
                Some(mode) => self.machine.enter(mode, &mut self.ctx),
                None => debug!("{}: unknown mode {} from {}", id, msg.value0, msg.source),
            },
            CommandId::SetIntrusion => match msg.switch_value() {
                Switch::On => {
                    if self.ctx.reopen_intrusion(now) {
                        info!("{}: intrusion reported by {}", id, msg.source);
                    }
                }
                Switch::Off => self.ctx.intrusion.close(),
            },
            CommandId::SetLight => match msg.switch_value() {
                Switch::On => {
                    self.ctx.reopen_light(now);
                }
                Switch::Off => self.ctx.light.close(),
            },
            CommandId::SetWarning => {
                if self.ctx.profile.comfort.is_some() {
                    self.ctx.warning_enabled = msg.switch_value() == Switch::On;
                    info!("{}: comfort warning {:?}", id, msg.switch_value());
                } else {
                    debug!("{}: no comfort warning feature", id);
                }
            }
            CommandId::UpdateTemperature
            | CommandId::UpdateHumidity
            | CommandId::UpdateDoorState => {
                debug!("{}: telemetry {:?} is hub-bound, ignoring", id, msg.cmd);
            }
        }
    }

    /// Single dispatch entry for the orchestrator task.
    ///
    /// Returns the next poll delay for sensor events that have one.
    pub fn handle_event(&mut self, event: &NodeEvent, now: u32) -> Option<u32> {
        match event {
            NodeEvent::Luminosity(r) => Some(self.process_luminosity(*r, now)),
            NodeEvent::Environment(r) => Some(self.process_environment(*r, now)),
            NodeEvent::Door(open) => self.process_door_state(*open, now),
            NodeEvent::Movement(ch) => {
                self.process_movement(*ch, now);
                None
            }
            NodeEvent::RemoteButton(b) => {
                self.process_remote_button(*b);
                None
            }
            NodeEvent::Message(msg) => {
                self.process_message(msg, now);
                None
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Derive the actuator state at `now`. Pure: repeated calls with the
    /// same `now` and no input in between return the same value.
    pub fn get_state(&self, now: u32) -> ActuatorState {
        let out = self.machine.outputs(&self.ctx, now);
        ActuatorState::from_outputs(&out, &self.ctx.profile, !self.ctx.outbox.is_empty())
    }

    /// Pop the most recently queued outgoing envelope.
    pub fn get_message(&mut self) -> Option<MessageEnvelope> {
        self.ctx.outbox.pop()
    }

    pub fn get_display_snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            environment: self.ctx.sensors.environment,
            display_off_timeout_ms: self.ctx.profile.timing.display_duration_ms,
        }
    }

    /// Light-off delay for the orchestrator's own light timer.
    pub fn get_light_timeout_ms(&self) -> u32 {
        self.ctx.profile.timing.light_duration_ms
    }

    pub fn mode(&self) -> Mode {
        self.machine.current_mode()
    }

    pub fn is_dark(&self) -> bool {
        self.ctx.sensors.is_dark
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.ctx.warning_enabled
    }

    pub fn pending_messages(&self) -> usize {
        self.ctx.outbox.len()
    }

    pub fn profile(&self) -> &Profile {
        &self.ctx.profile
    }
}
