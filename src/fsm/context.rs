//! Shared context threaded through every mode handler.
//!
//! `NodeContext` is the blackboard the mode handlers read from and write
//! to: the node's profile, the sensor cache, the three timing windows, the
//! comfort-warning switch and the outbox. Actuator state is never stored
//! here; handlers derive a fresh [`ModeOutputs`] from it on every query.

use crate::channels::{Channel, ChannelSet};
use crate::config::Profile;
use crate::message::outbox::Outbox;
use crate::message::{CommandId, MessageEnvelope, NodeId, Switch};
use crate::sensors::SensorCache;
use crate::timing::Window;
use log::warn;

// ---------------------------------------------------------------------------
// Derived outputs
// ---------------------------------------------------------------------------

/// Status LED colour reported to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLed {
    Green,
    Red,
}

/// Light-strip tier (B02). At most one segment is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripTier {
    Off,
    Green,
    Yellow,
    Red,
}

/// Profile-independent outputs computed by a mode handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeOutputs {
    pub status_led: StatusLed,
    /// Primary light.
    pub light: bool,
    /// Intrusion alert (buzzer or warning LED).
    pub alert: bool,
    pub strip: StripTier,
    pub display: bool,
    pub motion_sensor: bool,
    /// Comfort warning, shown on the warning LED.
    pub comfort_warning: bool,
}

/// Snapshot of every output a node may drive.
///
/// Channels the profile does not carry always read `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub status_led: StatusLed,
    pub is_veranda_light_on: bool,
    pub is_front_light_on: bool,
    pub is_strip_green_on: bool,
    pub is_strip_yellow_on: bool,
    pub is_strip_red_on: bool,
    pub is_buzzer_on: bool,
    pub is_warning_led_on: bool,
    pub is_display_on: bool,
    pub is_motion_sensor_on: bool,
    /// The outbox holds at least one envelope.
    pub is_msg_to_send: bool,
}

impl ActuatorState {
    /// Map mode outputs onto the physical channels of `profile`.
    pub fn from_outputs(out: &ModeOutputs, profile: &Profile, msg_pending: bool) -> Self {
        let mut on = ChannelSet::EMPTY;
        if out.light {
            on.insert(profile.primary_light);
        }
        if out.alert {
            on.insert(profile.alert);
        }
        if out.comfort_warning {
            on.insert(Channel::WarningLed);
        }
        match out.strip {
            StripTier::Off => {}
            StripTier::Green => on.insert(Channel::StripGreen),
            StripTier::Yellow => on.insert(Channel::StripYellow),
            StripTier::Red => on.insert(Channel::StripRed),
        }
        if out.display {
            on.insert(Channel::Display);
        }
        if out.motion_sensor {
            on.insert(Channel::MotionSensor);
        }

        let lit = |c: Channel| on.contains(c) && profile.channels.contains(c);
        Self {
            status_led: out.status_led,
            is_veranda_light_on: lit(Channel::VerandaLight),
            is_front_light_on: lit(Channel::FrontLight),
            is_strip_green_on: lit(Channel::StripGreen),
            is_strip_yellow_on: lit(Channel::StripYellow),
            is_strip_red_on: lit(Channel::StripRed),
            is_buzzer_on: lit(Channel::Buzzer),
            is_warning_led_on: lit(Channel::WarningLed),
            is_display_on: lit(Channel::Display),
            is_motion_sensor_on: lit(Channel::MotionSensor),
            is_msg_to_send: msg_pending,
        }
    }

    /// Power state of one channel.
    pub fn channel(&self, channel: Channel) -> bool {
        match channel {
            Channel::VerandaLight => self.is_veranda_light_on,
            Channel::FrontLight => self.is_front_light_on,
            Channel::StripGreen => self.is_strip_green_on,
            Channel::StripYellow => self.is_strip_yellow_on,
            Channel::StripRed => self.is_strip_red_on,
            Channel::Buzzer => self.is_buzzer_on,
            Channel::WarningLed => self.is_warning_led_on,
            Channel::Display => self.is_display_on,
            Channel::MotionSensor => self.is_motion_sensor_on,
        }
    }
}

// ---------------------------------------------------------------------------
// NodeContext
// ---------------------------------------------------------------------------

pub struct NodeContext {
    pub profile: Profile,
    pub sensors: SensorCache,

    // -- Timing windows --
    pub light: Window,
    pub display: Window,
    pub intrusion: Window,

    /// Comfort-warning feature switch (`SET_WARNING`).
    pub warning_enabled: bool,

    pub outbox: Outbox,
}

impl NodeContext {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            sensors: SensorCache::default(),
            light: Window::INACTIVE,
            display: Window::INACTIVE,
            intrusion: Window::INACTIVE,
            warning_enabled: true,
            outbox: Outbox::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.profile.id
    }

    pub fn reset_windows(&mut self) {
        self.light.close();
        self.display.close();
        self.intrusion.close();
    }

    /// Apply the clock-wrap guard to every window.
    pub fn normalize_windows(&mut self, now: u32) {
        self.light.normalize(now);
        self.display.normalize(now);
        self.intrusion.normalize(now);
    }

    pub fn light_running(&self, now: u32) -> bool {
        self.light.is_running(now, self.profile.timing.light_duration_ms)
    }

    pub fn display_running(&self, now: u32) -> bool {
        self.display.is_running(now, self.profile.timing.display_duration_ms)
    }

    pub fn intrusion_running(&self, now: u32) -> bool {
        self.intrusion
            .is_running(now, self.profile.timing.intrusion_duration_ms)
    }

    pub fn reopen_light(&mut self, now: u32) -> bool {
        let duration = self.profile.timing.light_duration_ms;
        self.light.reopen_if_expired(now, duration)
    }

    /// Open the intrusion window and, with it, the light window.
    ///
    /// Returns `false` without touching either window while a previous
    /// intrusion is still running.
    pub fn reopen_intrusion(&mut self, now: u32) -> bool {
        let duration = self.profile.timing.intrusion_duration_ms;
        if self.intrusion.reopen_if_expired(now, duration) {
            self.light.open(now);
            true
        } else {
            false
        }
    }

    /// Comfort warning per the cached environment and door state.
    pub fn comfort_warning(&self) -> bool {
        let Some(band) = self.profile.comfort else {
            return false;
        };
        let env = &self.sensors.environment;
        if !self.warning_enabled || !env.valid {
            return false;
        }
        if self.sensors.door_open {
            env.temperature_c < band.low_c
        } else {
            env.temperature_c > band.high_c
        }
    }

    /// Queue an envelope from this node. Drops it if the outbox is full.
    pub fn send(&mut self, msg: MessageEnvelope) {
        let cmd = msg.cmd;
        if !self.outbox.push(msg) {
            warn!("{}: outbox full, dropped {:?}", self.profile.id, cmd);
        }
    }

    pub fn send_switch(&mut self, destinations: &[NodeId], cmd: CommandId, state: Switch) {
        let msg = MessageEnvelope::switch(self.profile.id, destinations, cmd, state);
        self.send(msg);
    }
}
