//! Physical actuator channels and per-profile channel sets.
//!
//! Each switchable output a node type can carry has one [`Channel`]. A
//! [`ChannelSet`] is a bitmask of the channels a profile actually wires up;
//! the controller masks its derived state with it so a node never reports
//! an output it does not have.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Channel {
    /// B02 primary light.
    VerandaLight = 1 << 0,
    /// T01 primary light.
    FrontLight = 1 << 1,
    /// B02 light strip, green segment.
    StripGreen = 1 << 2,
    /// B02 light strip, yellow segment.
    StripYellow = 1 << 3,
    /// B02 light strip, red segment (intrusion tier).
    StripRed = 1 << 4,
    /// B02 alert output.
    Buzzer = 1 << 5,
    /// T01 alert and comfort-warning output.
    WarningLed = 1 << 6,
    /// OLED status display power.
    Display = 1 << 7,
    /// PIR sensor power rail.
    MotionSensor = 1 << 8,
}

impl Channel {
    pub const ALL: [Self; 9] = [
        Self::VerandaLight,
        Self::FrontLight,
        Self::StripGreen,
        Self::StripYellow,
        Self::StripRed,
        Self::Buzzer,
        Self::WarningLed,
        Self::Display,
        Self::MotionSensor,
    ];

    pub const fn mask(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::VerandaLight => "veranda_light",
            Self::FrontLight => "front_light",
            Self::StripGreen => "strip_green",
            Self::StripYellow => "strip_yellow",
            Self::StripRed => "strip_red",
            Self::Buzzer => "buzzer",
            Self::WarningLed => "warning_led",
            Self::Display => "display",
            Self::MotionSensor => "motion_sensor",
        }
    }
}

/// Bitmask of [`Channel`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelSet(u16);

impl ChannelSet {
    pub const EMPTY: Self = Self(0);

    pub const fn of(channels: &[Channel]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < channels.len() {
            bits |= channels[i].mask();
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    pub fn insert(&mut self, channel: Channel) {
        self.0 |= channel.mask();
    }

    pub fn iter(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}
