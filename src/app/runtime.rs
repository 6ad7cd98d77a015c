//! Glue between the orchestrator task and the controller.
//!
//! - [`SharedController`] serialises access to one controller behind a
//!   critical-section mutex, so ISR-notified paths and the controller task
//!   never call into it concurrently.
//! - [`ActuatorApplier`] pushes a derived [`ActuatorState`] through an
//!   [`ActuatorPort`], touching only outputs that changed.
//! - [`flush_outbox`] drains queued envelopes into a [`MessagePort`].

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{debug, warn};

use crate::channels::ChannelSet;
use crate::fsm::context::ActuatorState;

use super::controller::Controller;
use super::ports::{ActuatorPort, MessagePort};

// ───────────────────────────────────────────────────────────────
// SharedController
// ───────────────────────────────────────────────────────────────

pub struct SharedController {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Controller>>,
}

impl SharedController {
    pub fn new(controller: Controller) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(controller)),
        }
    }

    /// Run `f` with exclusive access to the controller.
    ///
    /// Must not be re-entered from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Tear down the guard and return the controller.
    pub fn into_inner(self) -> Controller {
        self.inner.into_inner().into_inner()
    }
}

// ───────────────────────────────────────────────────────────────
// ActuatorApplier
// ───────────────────────────────────────────────────────────────

/// Applies actuator snapshots, skipping outputs that did not change.
#[derive(Debug, Default)]
pub struct ActuatorApplier {
    last: Option<ActuatorState>,
}

impl ActuatorApplier {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Write `state` to `port` for every channel in `channels`.
    ///
    /// The first call writes everything. Returns the number of port writes.
    pub fn apply(
        &mut self,
        state: &ActuatorState,
        channels: ChannelSet,
        port: &mut impl ActuatorPort,
    ) -> usize {
        let mut writes = 0;
        let prev = self.last;

        if prev.is_none_or(|p| p.status_led != state.status_led) {
            port.set_status_led(state.status_led);
            writes += 1;
        }
        for channel in channels.iter() {
            let on = state.channel(channel);
            if prev.is_none_or(|p| p.channel(channel) != on) {
                port.set_channel(channel, on);
                writes += 1;
            }
        }

        self.last = Some(*state);
        writes
    }

    /// Forget the last applied state so the next `apply` writes everything.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

// ───────────────────────────────────────────────────────────────
// Outbox flushing
// ───────────────────────────────────────────────────────────────

/// Drain the controller's outbox into `port`.
///
/// Envelopes the transport rejects are logged and dropped; delivery is
/// fire-and-forget. Returns the number of envelopes accepted.
pub fn flush_outbox(controller: &mut Controller, port: &mut impl MessagePort) -> usize {
    let mut sent = 0;
    while let Some(msg) = controller.get_message() {
        match port.send(&msg) {
            Ok(()) => {
                debug!("{}: sent {:?} to {:?}", msg.source, msg.cmd, msg.destinations);
                sent += 1;
            }
            Err(e) => warn!("{}: dropping {:?}: {}", msg.source, msg.cmd, e),
        }
    }
    sent
}
