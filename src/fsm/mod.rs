//! Function-pointer mode machine.
//!
//! The classic embedded table-driven FSM, one row per operating mode:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  ModeTable                                                    │
//! │  ┌─────────┬───────────┬───────────────────┬────────────────┐ │
//! │  │ Mode    │ on_enter  │ on_movement       │ outputs        │ │
//! │  ├─────────┼───────────┼───────────────────┼────────────────┤ │
//! │  │ Silence │ fn(ctx)   │ fn(ctx, act, now) │ fn(ctx, now)   │ │
//! │  │ Guard   │ fn(ctx)   │ fn(ctx, act, now) │ fn(ctx, now)   │ │
//! │  │ Alarm   │ fn(ctx)   │ fn(ctx, act, now) │ fn(ctx, now)   │ │
//! │  └─────────┴───────────┴───────────────────┴────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Modes change only on an inbound `SET_MODE`. Every transition, including
//! one to the mode already active, runs the target's `on_enter`, which
//! clears all timing windows. There is no terminal mode.

pub mod context;
pub mod states;

use context::{ModeOutputs, NodeContext};
use log::info;

use crate::config::MovementAction;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Silence = 0,
    Guard = 1,
    Alarm = 2,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 3;

    /// Decode the `value0` of a `SET_MODE` envelope.
    pub fn from_wire(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Silence),
            1 => Some(Self::Guard),
            2 => Some(Self::Alarm),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i32 {
        self as i32
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Runs once each time the mode is entered.
pub type ModeActionFn = fn(&mut NodeContext);

/// Reacts to a PIR trigger bound to `action`, at tick `now`.
pub type MovementFn = fn(&mut NodeContext, MovementAction, u32);

/// Derives the mode's outputs at tick `now`. Must not mutate.
pub type OutputFn = fn(&NodeContext, u32) -> ModeOutputs;

/// Static descriptor for one mode.
pub struct ModeDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: ModeActionFn,
    pub on_movement: MovementFn,
    pub outputs: OutputFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct ModeMachine {
    /// Indexed by `Mode as usize`.
    table: [ModeDescriptor; Mode::COUNT],
    current: usize,
}

impl ModeMachine {
    pub fn new(table: [ModeDescriptor; Mode::COUNT], initial: Mode) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "mode table rows out of order"
        );
        Self {
            table,
            current: initial as usize,
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.table[self.current].id
    }

    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// Switch to `next` and run its `on_enter`, even if already there.
    pub fn enter(&mut self, next: Mode, ctx: &mut NodeContext) {
        info!(
            "{}: mode {} -> {}",
            ctx.id(),
            self.table[self.current].name,
            self.table[next as usize].name
        );
        self.current = next as usize;
        (self.table[self.current].on_enter)(ctx);
    }

    pub fn movement(&self, ctx: &mut NodeContext, action: MovementAction, now: u32) {
        (self.table[self.current].on_movement)(ctx, action, now);
    }

    pub fn outputs(&self, ctx: &NodeContext, now: u32) -> ModeOutputs {
        (self.table[self.current].outputs)(ctx, now)
    }
}
