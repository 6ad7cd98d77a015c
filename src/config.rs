//! Node profiles
//!
//! A [`Profile`] carries everything that distinguishes one node type from
//! another: which outputs it has, how long transient activations last,
//! darkness and comfort thresholds, poll periods and routing policy.
//! Profiles are fixed when the controller is constructed.

use serde::{Deserialize, Serialize};

use crate::channels::{Channel, ChannelSet};
use crate::error::{Error, Result};
use crate::message::{Destinations, NodeId};
use crate::sensors::MovementChannel;

/// Maximum number of PIR inputs on one node.
pub const MAX_MOVEMENT_INPUTS: usize = 3;

/// What a movement on one PIR input does while the node is in `SILENCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementAction {
    /// Ask the light peer to switch its light on when dark.
    pub notify_light_peer: bool,
    /// Wake the status display.
    pub wake_display: bool,
}

/// Binds a PIR input to its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementBinding {
    pub channel: MovementChannel,
    pub action: MovementAction,
}

/// Window durations and poll periods, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Light stays on this long after the last trigger.
    pub light_duration_ms: u32,
    /// Display stays awake this long after the last wake.
    pub display_duration_ms: u32,
    /// Intrusion alert (buzzer / warning LED) lasts this long and
    /// suppresses repeated intrusion reports.
    pub intrusion_duration_ms: u32,
    pub luminosity_poll_ms: u32,
    pub environment_poll_ms: u32,
    /// `None` on nodes without a door contact.
    pub door_poll_ms: Option<u32>,
}

/// Comfort-warning thresholds (°C).
///
/// The warning fires when the door is open and it is colder than `low_c`,
/// or when the door is closed and it is warmer than `high_c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortThresholds {
    pub low_c: f32,
    pub high_c: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: NodeId,
    /// Telemetry sink.
    pub hub: NodeId,
    /// Node that receives `SET_LIGHT(ON)` when movement is seen in the dark.
    pub light_peer: NodeId,
    /// Recipients of `SET_INTRUSION(ON)` in `GUARD`.
    pub intrusion_targets: Destinations,
    /// Whether `BROADCAST`-addressed envelopes are acted upon.
    pub accepts_broadcast: bool,
    /// Outputs this node has.
    pub channels: ChannelSet,
    /// The light driven by movement and `SET_LIGHT`.
    pub primary_light: Channel,
    /// The output used for intrusion alerts.
    pub alert: Channel,
    pub movement: heapless::Vec<MovementBinding, MAX_MOVEMENT_INPUTS>,
    pub timing: TimingConfig,
    /// `is_dark` iff a valid reading is strictly below this.
    pub darkness_threshold_lux: f32,
    /// `Some` on nodes with the comfort-warning feature.
    pub comfort: Option<ComfortThresholds>,
}

impl Profile {
    /// Veranda / entrance node.
    ///
    /// Three PIR inputs (`FRONT` behaves exactly like `DOOR`), tri-colour
    /// light strip, buzzer, display. Accepts broadcasts and broadcasts its
    /// own intrusion reports.
    pub fn b02() -> Self {
        let entry = MovementAction {
            notify_light_peer: true,
            wake_display: false,
        };
        let veranda = MovementAction {
            notify_light_peer: false,
            wake_display: true,
        };
        Self {
            id: NodeId::B02,
            hub: NodeId::HUB,
            light_peer: NodeId::T01,
            intrusion_targets: destinations(&[NodeId::Broadcast]),
            accepts_broadcast: true,
            channels: ChannelSet::of(&[
                Channel::VerandaLight,
                Channel::StripGreen,
                Channel::StripYellow,
                Channel::StripRed,
                Channel::Buzzer,
                Channel::Display,
                Channel::MotionSensor,
            ]),
            primary_light: Channel::VerandaLight,
            alert: Channel::Buzzer,
            movement: bindings(&[
                (MovementChannel::Door, entry),
                (MovementChannel::Front, entry),
                (MovementChannel::Veranda, veranda),
            ]),
            timing: TimingConfig {
                light_duration_ms: 60_000,
                display_duration_ms: 30_000,
                intrusion_duration_ms: 30_000,
                luminosity_poll_ms: 1_000,
                environment_poll_ms: 60_000,
                door_poll_ms: None,
            },
            darkness_threshold_lux: 5.5,
            comfort: None,
        }
    }

    /// Hall node.
    ///
    /// One PIR input, door contact, warning LED with the comfort-warning
    /// feature, display. Ignores broadcasts; reports intrusions to the hub
    /// and B02 directly.
    pub fn t01() -> Self {
        Self {
            id: NodeId::T01,
            hub: NodeId::HUB,
            light_peer: NodeId::B02,
            intrusion_targets: destinations(&[NodeId::B01, NodeId::B02]),
            accepts_broadcast: false,
            channels: ChannelSet::of(&[
                Channel::FrontLight,
                Channel::WarningLed,
                Channel::Display,
                Channel::MotionSensor,
            ]),
            primary_light: Channel::FrontLight,
            alert: Channel::WarningLed,
            movement: bindings(&[(
                MovementChannel::Front,
                MovementAction {
                    notify_light_peer: true,
                    wake_display: true,
                },
            )]),
            timing: TimingConfig {
                light_duration_ms: 120_000,
                display_duration_ms: 20_000,
                intrusion_duration_ms: 30_000,
                luminosity_poll_ms: 1_000,
                environment_poll_ms: 30_000,
                door_poll_ms: Some(500),
            },
            darkness_threshold_lux: 10.0,
            comfort: Some(ComfortThresholds {
                low_c: 15.0,
                high_c: 25.0,
            }),
        }
    }

    /// Built-in profile for a node id.
    pub fn for_node(id: NodeId) -> Option<Self> {
        match id {
            NodeId::B02 => Some(Self::b02()),
            NodeId::T01 => Some(Self::t01()),
            NodeId::B01 | NodeId::Broadcast => None,
        }
    }

    /// Parse a profile from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("profile JSON is malformed"))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Action bound to a PIR input, if the node has it.
    pub fn movement_action(&self, channel: MovementChannel) -> Option<MovementAction> {
        self.movement
            .iter()
            .find(|b| b.channel == channel)
            .map(|b| b.action)
    }

    pub fn has_door_sensor(&self) -> bool {
        self.timing.door_poll_ms.is_some()
    }

    /// Reject profiles the controller cannot run sensibly.
    pub fn validate(&self) -> Result<()> {
        let t = &self.timing;
        if self.id == NodeId::Broadcast {
            return Err(Error::Config("id must not be BROADCAST"));
        }
        if self.light_peer == self.id {
            return Err(Error::Config("light_peer must differ from id"));
        }
        if self.intrusion_targets.is_empty() {
            return Err(Error::Config("intrusion_targets must not be empty"));
        }
        if t.light_duration_ms == 0 || t.display_duration_ms == 0 || t.intrusion_duration_ms == 0 {
            return Err(Error::Config("window durations must be non-zero"));
        }
        if t.luminosity_poll_ms == 0 || t.environment_poll_ms == 0 || t.door_poll_ms == Some(0) {
            return Err(Error::Config("poll periods must be non-zero"));
        }
        if !self.darkness_threshold_lux.is_finite() {
            return Err(Error::Config("darkness_threshold_lux must be finite"));
        }
        if let Some(c) = self.comfort {
            if c.low_c.partial_cmp(&c.high_c) != Some(core::cmp::Ordering::Less) {
                return Err(Error::Config("comfort low_c must be below high_c"));
            }
        }
        if !self.channels.contains(self.primary_light) || !self.channels.contains(self.alert) {
            return Err(Error::Config("primary_light and alert must be in channels"));
        }
        if self.movement.iter().any(|b| b.action.wake_display)
            && !self.channels.contains(Channel::Display)
        {
            return Err(Error::Config("display wake bound without a display channel"));
        }
        Ok(())
    }
}

fn destinations(ids: &[NodeId]) -> Destinations {
    ids.iter().copied().take(crate::message::MAX_DESTINATIONS).collect()
}

fn bindings(
    list: &[(MovementChannel, MovementAction)],
) -> heapless::Vec<MovementBinding, MAX_MOVEMENT_INPUTS> {
    list.iter()
        .take(MAX_MOVEMENT_INPUTS)
        .map(|&(channel, action)| MovementBinding { channel, action })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_validate() {
        Profile::b02().validate().unwrap();
        Profile::t01().validate().unwrap();
    }

    #[test]
    fn b02_front_aliases_door() {
        let p = Profile::b02();
        assert_eq!(
            p.movement_action(MovementChannel::Front),
            p.movement_action(MovementChannel::Door)
        );
        assert!(p.movement_action(MovementChannel::Veranda).is_some());
    }

    #[test]
    fn t01_has_single_front_input() {
        let p = Profile::t01();
        assert!(p.movement_action(MovementChannel::Front).is_some());
        assert!(p.movement_action(MovementChannel::Door).is_none());
        assert!(p.movement_action(MovementChannel::Veranda).is_none());
    }

    #[test]
    fn broadcast_policy_is_asymmetric() {
        assert!(Profile::b02().accepts_broadcast);
        assert!(!Profile::t01().accepts_broadcast);
        assert_eq!(Profile::b02().intrusion_targets.as_slice(), &[NodeId::Broadcast]);
        assert_eq!(
            Profile::t01().intrusion_targets.as_slice(),
            &[NodeId::B01, NodeId::B02]
        );
    }

    #[test]
    fn door_sensor_only_on_t01() {
        assert!(!Profile::b02().has_door_sensor());
        assert!(Profile::t01().has_door_sensor());
    }

    #[test]
    fn for_node_has_no_hub_profile() {
        assert!(Profile::for_node(NodeId::B01).is_none());
        assert_eq!(Profile::for_node(NodeId::T01), Some(Profile::t01()));
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let mut p = Profile::b02();
        p.timing.light_duration_ms = 0;
        assert_eq!(
            p.validate(),
            Err(Error::Config("window durations must be non-zero"))
        );
    }

    #[test]
    fn validate_rejects_inverted_comfort_band() {
        let mut p = Profile::t01();
        p.comfort = Some(ComfortThresholds {
            low_c: 30.0,
            high_c: 20.0,
        });
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_threshold() {
        let mut p = Profile::t01();
        p.darkness_threshold_lux = f32::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_self_peer() {
        let mut p = Profile::t01();
        p.light_peer = NodeId::T01;
        assert!(p.validate().is_err());
    }

    #[test]
    fn json_roundtrip() {
        let p = Profile::t01();
        let json = serde_json::to_string(&p).unwrap();
        let p2 = Profile::from_json(&json).unwrap();
        assert_eq!(p, p2);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert_eq!(
            Profile::from_json("{\"id\":"),
            Err(Error::Config("profile JSON is malformed"))
        );
    }

    #[test]
    fn from_json_runs_validation() {
        let mut p = Profile::b02();
        p.intrusion_targets.clear();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(
            Profile::from_json(&json),
            Err(Error::Config("intrusion_targets must not be empty"))
        );
    }

    #[test]
    fn postcard_roundtrip() {
        let p = Profile::b02();
        let bytes = postcard::to_allocvec(&p).unwrap();
        let p2: Profile = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(p, p2);
    }
}
