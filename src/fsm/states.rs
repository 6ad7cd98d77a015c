//! Concrete mode handlers and table builder.
//!
//! Each mode is three plain `fn` pointers: what entering it does, how it
//! reacts to a PIR trigger, and which outputs it derives. No closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!            SET_MODE(any)  (resets every window)
//!    ┌───────────────┬───────────────┬───────────────┐
//!    ▼               ▼               ▼               │
//!  SILENCE         GUARD           ALARM ────────────┘
//!  light+display   intrusion       everything on,
//!  on movement     report + alert  movement ignored
//! ```

use super::context::{ModeOutputs, NodeContext, StatusLed, StripTier};
use super::{Mode, ModeDescriptor};
use crate::config::MovementAction;
use crate::message::{CommandId, Switch};
use log::{debug, info, trace};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the mode table. Called once per controller.
pub fn build_mode_table() -> [ModeDescriptor; Mode::COUNT] {
    [
        ModeDescriptor {
            id: Mode::Silence,
            name: "SILENCE",
            on_enter: reset_windows,
            on_movement: silence_movement,
            outputs: silence_outputs,
        },
        ModeDescriptor {
            id: Mode::Guard,
            name: "GUARD",
            on_enter: reset_windows,
            on_movement: guard_movement,
            outputs: guard_outputs,
        },
        ModeDescriptor {
            id: Mode::Alarm,
            name: "ALARM",
            on_enter: reset_windows,
            on_movement: alarm_movement,
            outputs: alarm_outputs,
        },
    ]
}

fn reset_windows(ctx: &mut NodeContext) {
    ctx.reset_windows();
}

// ═══════════════════════════════════════════════════════════════════════════
//  SILENCE: courtesy lighting and display
// ═══════════════════════════════════════════════════════════════════════════

fn silence_movement(ctx: &mut NodeContext, action: MovementAction, now: u32) {
    // The light window's expiry gates both the peer request and the display.
    if !ctx.reopen_light(now) {
        trace!("{}: light window running, movement at {} absorbed", ctx.id(), now);
        return;
    }
    if ctx.sensors.is_dark && action.notify_light_peer {
        let peer = ctx.profile.light_peer;
        debug!("{}: dark movement, asking {} for light", ctx.id(), peer);
        ctx.send_switch(&[peer], CommandId::SetLight, Switch::On);
    }
    if action.wake_display {
        ctx.display.open(now);
        trace!("{}: display woken at {}", ctx.id(), now);
    }
}

fn silence_outputs(ctx: &NodeContext, now: u32) -> ModeOutputs {
    let light = ctx.sensors.is_dark && ctx.light_running(now);
    ModeOutputs {
        status_led: StatusLed::Green,
        light,
        alert: false,
        strip: if light { StripTier::Green } else { StripTier::Off },
        display: ctx.display_running(now),
        motion_sensor: true,
        comfort_warning: ctx.comfort_warning(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  GUARD: report intrusions, alert locally
// ═══════════════════════════════════════════════════════════════════════════

fn guard_movement(ctx: &mut NodeContext, _action: MovementAction, now: u32) {
    if ctx.reopen_intrusion(now) {
        info!("{}: intrusion detected at {}", ctx.id(), now);
        let targets = ctx.profile.intrusion_targets.clone();
        ctx.send_switch(&targets, CommandId::SetIntrusion, Switch::On);
    }
}

fn guard_outputs(ctx: &NodeContext, now: u32) -> ModeOutputs {
    let light = ctx.sensors.is_dark && ctx.light_running(now);
    let alert = ctx.intrusion_running(now);
    let strip = if alert {
        StripTier::Red
    } else if light {
        StripTier::Yellow
    } else {
        StripTier::Off
    };
    ModeOutputs {
        status_led: StatusLed::Red,
        light,
        alert,
        strip,
        display: false,
        motion_sensor: true,
        comfort_warning: false,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARM: everything on until the mode changes
// ═══════════════════════════════════════════════════════════════════════════

fn alarm_movement(ctx: &mut NodeContext, _action: MovementAction, now: u32) {
    trace!("{}: movement at {} ignored in ALARM", ctx.id(), now);
}

fn alarm_outputs(ctx: &NodeContext, _now: u32) -> ModeOutputs {
    ModeOutputs {
        status_led: StatusLed::Red,
        light: ctx.sensors.is_dark,
        alert: true,
        strip: StripTier::Red,
        display: false,
        motion_sensor: false,
        comfort_warning: false,
    }
}
