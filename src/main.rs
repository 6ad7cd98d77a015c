//! HomeNode host simulator
//!
//! Runs a B02 and a T01 controller side by side with a hub stand-in,
//! connected through the in-memory loopback bus. Every envelope crosses
//! the wire codec. The script walks through the three modes and prints the
//! actuator changes each node would apply to its power rails.
//!
//! ```text
//!   B02 ──┐                       ┌──▶ B02
//!         ├──▶ LoopbackBus ──▶ ───┼──▶ T01
//!   T01 ──┘    (postcard frames)  └──▶ hub (B01, logs telemetry)
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{LevelFilter, info, warn};

use homenode::adapters::loopback::LoopbackBus;
use homenode::app::controller::Controller;
use homenode::app::events::NodeEvent;
use homenode::app::ports::{ActuatorPort, MessagePort};
use homenode::app::runtime::{ActuatorApplier, SharedController, flush_outbox};
use homenode::channels::Channel;
use homenode::config::Profile;
use homenode::fsm::Mode;
use homenode::fsm::context::StatusLed;
use homenode::message::{CommandId, MessageEnvelope, NodeId};
use homenode::sensors::{EnvironmentReading, LuminosityReading, MovementChannel};

// ── Console actuator panel ────────────────────────────────────

/// Prints every actuator write instead of toggling a GPIO.
struct ConsolePanel {
    node: NodeId,
}

impl ActuatorPort for ConsolePanel {
    fn set_status_led(&mut self, colour: StatusLed) {
        info!("[{}] status LED {:?}", self.node, colour);
    }

    fn set_channel(&mut self, channel: Channel, on: bool) {
        info!("[{}] {} {}", self.node, channel.name(), if on { "ON" } else { "off" });
    }
}

// ── Simulated node ────────────────────────────────────────────

struct SimNode {
    controller: SharedController,
    applier: ActuatorApplier,
    panel: ConsolePanel,
}

impl SimNode {
    fn new(profile: Profile) -> Result<Self> {
        profile.validate()?;
        let node = profile.id;
        Ok(Self {
            controller: SharedController::new(Controller::new(profile)),
            applier: ActuatorApplier::new(),
            panel: ConsolePanel { node },
        })
    }

    fn event(&self, event: &NodeEvent, now: u32) {
        self.controller.with(|c| c.handle_event(event, now));
    }

    /// Apply the current actuator state and push queued envelopes to the bus.
    fn service(&mut self, bus: &mut LoopbackBus, now: u32) {
        let (state, channels) = self
            .controller
            .with(|c| (c.get_state(now), c.profile().channels));
        self.applier.apply(&state, channels, &mut self.panel);
        self.controller.with(|c| flush_outbox(c, bus));
    }
}

// ── Hub stand-in ──────────────────────────────────────────────

fn hub_command(bus: &mut LoopbackBus, to: &[NodeId], mode: Mode) -> Result<()> {
    let msg = MessageEnvelope::new(NodeId::B01, to, CommandId::SetMode)
        .with_values(mode.to_wire(), 0, 0.0);
    bus.send(&msg)?;
    Ok(())
}

fn hub_log(msg: &MessageEnvelope) {
    match msg.cmd {
        CommandId::UpdateTemperature => {
            info!("[hub] {} temperature {:.1} C", msg.source, msg.value2);
        }
        CommandId::UpdateHumidity => info!(
            "[hub] {} temperature {:.1} C humidity {} %",
            msg.source, msg.value2, msg.value0
        ),
        CommandId::UpdateDoorState => info!(
            "[hub] {} door {}",
            msg.source,
            if msg.value0 != 0 { "open" } else { "closed" }
        ),
        other => info!("[hub] {} sent {:?}({})", msg.source, other, msg.value0),
    }
}

/// Deliver every frame on the bus to every node; nodes filter by address.
fn deliver(bus: &mut LoopbackBus, nodes: &[&SimNode], now: u32) {
    while let Some(frame) = bus.receive() {
        let msg = match frame {
            Ok(msg) => msg,
            Err(e) => {
                warn!("bus: dropping undecodable frame: {}", e);
                continue;
            }
        };
        if msg.is_addressed_to(NodeId::HUB, true) {
            hub_log(&msg);
        }
        for node in nodes {
            node.event(&NodeEvent::Message(msg.clone()), now);
        }
    }
}

fn step(b02: &mut SimNode, t01: &mut SimNode, bus: &mut LoopbackBus, now: u32) {
    b02.service(bus, now);
    t01.service(bus, now);
    deliver(bus, &[&*b02, &*t01], now);
    b02.service(bus, now);
    t01.service(bus, now);
    deliver(bus, &[&*b02, &*t01], now);
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let verbose = std::env::args().any(|a| a == "-v" || a == "--verbose");
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()?;

    info!("HomeNode simulator v{}", env!("CARGO_PKG_VERSION"));

    let mut b02 = SimNode::new(Profile::b02())?;
    let mut t01 = SimNode::new(Profile::t01())?;
    let mut bus = LoopbackBus::new();

    // ── Evening, everyone home ────────────────────────────────
    info!("--- t=0 SILENCE, dusk ---");
    b02.event(&NodeEvent::Luminosity(LuminosityReading::new(3.0)), 0);
    t01.event(&NodeEvent::Luminosity(LuminosityReading::new(4.0)), 0);
    b02.event(
        &NodeEvent::Environment(EnvironmentReading::temperature(8.5).with_pressure(1009.0)),
        0,
    );
    t01.event(
        &NodeEvent::Environment(EnvironmentReading::temperature(12.0).with_humidity(61.0)),
        0,
    );
    t01.event(&NodeEvent::Door(true), 0);
    step(&mut b02, &mut t01, &mut bus, 0);

    info!("--- t=1000 someone at the door ---");
    b02.event(&NodeEvent::Movement(MovementChannel::Door), 1_000);
    step(&mut b02, &mut t01, &mut bus, 1_000);

    info!("--- t=2000 door closed ---");
    t01.event(&NodeEvent::Door(false), 2_000);
    step(&mut b02, &mut t01, &mut bus, 2_000);

    // ── Leaving the house ─────────────────────────────────────
    info!("--- t=200000 hub arms GUARD ---");
    hub_command(&mut bus, &[NodeId::B02, NodeId::T01], Mode::Guard)?;
    step(&mut b02, &mut t01, &mut bus, 200_000);

    info!("--- t=205000 movement in the hall ---");
    t01.event(&NodeEvent::Movement(MovementChannel::Front), 205_000);
    step(&mut b02, &mut t01, &mut bus, 205_000);

    info!("--- t=240000 intrusion window over ---");
    step(&mut b02, &mut t01, &mut bus, 240_000);

    // ── Confirmed break-in ────────────────────────────────────
    info!("--- t=250000 hub raises ALARM ---");
    hub_command(&mut bus, &[NodeId::B02, NodeId::T01], Mode::Alarm)?;
    step(&mut b02, &mut t01, &mut bus, 250_000);

    info!("--- t=300000 hub stands down ---");
    hub_command(&mut bus, &[NodeId::B02, NodeId::T01], Mode::Silence)?;
    step(&mut b02, &mut t01, &mut bus, 300_000);

    let b02 = b02.controller.into_inner();
    let t01 = t01.controller.into_inner();
    info!("final modes: B02={:?} T01={:?}", b02.mode(), t01.mode());
    Ok(())
}
