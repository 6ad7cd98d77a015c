//! Inter-node message envelope.
//!
//! Every command and telemetry item exchanged between nodes travels as one
//! [`MessageEnvelope`]. The envelope is profile-agnostic: three generic
//! value slots whose meaning depends on [`CommandId`].
//!
//! ```text
//! ┌────────┬──────────────────┬─────┬────────┬────────┬────────┐
//! │ source │ destinations ≤ 2 │ cmd │ value0 │ value1 │ value2 │
//! │ NodeId │ NodeId, NodeId   │ u8  │ i32    │ i32    │ f32    │
//! └────────┴──────────────────┴─────┴────────┴────────┴────────┘
//! ```

pub mod codec;
pub mod outbox;

use serde::{Deserialize, Serialize};

/// Maximum number of destinations carried by one envelope.
pub const MAX_DESTINATIONS: usize = 2;

/// Bounded destination list.
pub type Destinations = heapless::Vec<NodeId, MAX_DESTINATIONS>;

// ---------------------------------------------------------------------------
// Node identity
// ---------------------------------------------------------------------------

/// Identifies a node on the home network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeId {
    /// Hub; the sink for all sensor telemetry.
    B01 = 1,
    /// Veranda / entrance node.
    B02 = 2,
    /// Hall node with door contact and comfort warning.
    T01 = 3,
    /// Sentinel addressing every node that accepts broadcasts.
    Broadcast = 0xFF,
}

impl NodeId {
    pub const HUB: Self = Self::B01;

    pub fn name(self) -> &'static str {
        match self {
            Self::B01 => "B01",
            Self::B02 => "B02",
            Self::T01 => "T01",
            Self::Broadcast => "BROADCAST",
        }
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CommandId {
    /// `value0` = mode (see [`Mode::to_wire`](crate::fsm::Mode::to_wire)).
    SetMode = 0,
    /// `value0` = 1 on, 0 off.
    SetIntrusion = 1,
    /// `value0` = 1 on, 0 off.
    SetLight = 2,
    /// `value0` = 1 on, 0 off. Comfort-warning feature switch.
    SetWarning = 3,
    /// `value1` = pressure hPa (0 if absent), `value2` = temperature °C.
    UpdateTemperature = 4,
    /// `value0` = humidity %, `value1` = pressure hPa (0 if absent),
    /// `value2` = temperature °C.
    UpdateHumidity = 5,
    /// `value0` = 1 open, 0 closed.
    UpdateDoorState = 6,
}

/// On/off argument carried in `value0` of the switch commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    Off,
    On,
}

impl Switch {
    /// Any non-zero value reads as `On`.
    pub fn from_wire(value: i32) -> Self {
        if value == 0 { Self::Off } else { Self::On }
    }

    pub fn to_wire(self) -> i32 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub source: NodeId,
    pub destinations: Destinations,
    pub cmd: CommandId,
    pub value0: i32,
    pub value1: i32,
    pub value2: f32,
}

impl MessageEnvelope {
    /// Build an envelope with zeroed value slots.
    ///
    /// Destinations past [`MAX_DESTINATIONS`] are dropped.
    pub fn new(source: NodeId, destinations: &[NodeId], cmd: CommandId) -> Self {
        let mut list = Destinations::new();
        for &d in destinations.iter().take(MAX_DESTINATIONS) {
            let _ = list.push(d);
        }
        Self {
            source,
            destinations: list,
            cmd,
            value0: 0,
            value1: 0,
            value2: 0.0,
        }
    }

    pub fn switch(source: NodeId, destinations: &[NodeId], cmd: CommandId, state: Switch) -> Self {
        Self::new(source, destinations, cmd).with_values(state.to_wire(), 0, 0.0)
    }

    pub fn with_values(mut self, value0: i32, value1: i32, value2: f32) -> Self {
        self.value0 = value0;
        self.value1 = value1;
        self.value2 = value2;
        self
    }

    /// Whether a node with `id` should act on this envelope.
    ///
    /// `BROADCAST` only matches when the receiver accepts broadcasts.
    pub fn is_addressed_to(&self, id: NodeId, accepts_broadcast: bool) -> bool {
        self.destinations
            .iter()
            .any(|&d| d == id || (accepts_broadcast && d == NodeId::Broadcast))
    }

    /// Interpret `value0` as an on/off switch.
    pub fn switch_value(&self) -> Switch {
        Switch::from_wire(self.value0)
    }
}
