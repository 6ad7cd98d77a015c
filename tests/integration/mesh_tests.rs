//! Integration tests: B02 and T01 talking through the loopback bus.
//!
//! Every envelope is encoded, queued and decoded again, so these cover
//! the codec and both routing policies together.

use homenode::adapters::loopback::LoopbackBus;
use homenode::app::controller::Controller;
use homenode::app::runtime::flush_outbox;
use homenode::config::Profile;
use homenode::fsm::Mode;
use homenode::message::{CommandId, MessageEnvelope, NodeId};
use homenode::sensors::{LuminosityReading, MovementChannel};

struct Mesh {
    b02: Controller,
    t01: Controller,
    bus: LoopbackBus,
    hub_inbox: Vec<MessageEnvelope>,
}

impl Mesh {
    fn new() -> Self {
        Self {
            b02: Controller::new(Profile::b02()),
            t01: Controller::new(Profile::t01()),
            bus: LoopbackBus::new(),
            hub_inbox: Vec::new(),
        }
    }

    fn dusk(&mut self) {
        self.b02.process_luminosity(LuminosityReading::new(1.0), 0);
        self.t01.process_luminosity(LuminosityReading::new(1.0), 0);
    }

    fn hub_sets_mode(&mut self, mode: Mode, now: u32) {
        let msg = MessageEnvelope::new(NodeId::B01, &[NodeId::B02, NodeId::T01], CommandId::SetMode)
            .with_values(mode.to_wire(), 0, 0.0);
        self.b02.process_message(&msg, now);
        self.t01.process_message(&msg, now);
    }

    /// Flush both outboxes onto the bus and deliver everything once.
    fn pump(&mut self, now: u32) {
        flush_outbox(&mut self.b02, &mut self.bus);
        flush_outbox(&mut self.t01, &mut self.bus);
        while let Some(frame) = self.bus.receive() {
            let msg = frame.expect("bus frames decode");
            if msg.is_addressed_to(NodeId::HUB, true) {
                self.hub_inbox.push(msg.clone());
            }
            self.b02.process_message(&msg, now);
            self.t01.process_message(&msg, now);
        }
    }
}

#[test]
fn b02_door_movement_switches_t01_light_on() {
    let mut mesh = Mesh::new();
    mesh.dusk();
    mesh.b02.process_movement(MovementChannel::Door, 100);
    assert!(!mesh.t01.get_state(100).is_front_light_on);

    mesh.pump(110);
    assert!(mesh.t01.get_state(120).is_front_light_on);
    assert!(mesh.b02.get_state(120).is_veranda_light_on);
    // SET_LIGHT is peer-to-peer; the hub does not see it.
    assert!(mesh.hub_inbox.is_empty());
}

#[test]
fn t01_intrusion_reaches_b02_and_hub() {
    let mut mesh = Mesh::new();
    mesh.hub_sets_mode(Mode::Guard, 0);
    mesh.t01.process_movement(MovementChannel::Front, 1_000);
    mesh.pump(1_000);

    let b02 = mesh.b02.get_state(1_001);
    assert!(b02.is_buzzer_on);
    assert!(b02.is_strip_red_on);
    assert_eq!(mesh.hub_inbox.len(), 1);
    assert_eq!(mesh.hub_inbox[0].cmd, CommandId::SetIntrusion);
    assert_eq!(mesh.hub_inbox[0].source, NodeId::T01);

    // B02 does not echo the intrusion back out.
    mesh.pump(1_002);
    assert_eq!(mesh.hub_inbox.len(), 1);
}

#[test]
fn b02_broadcast_intrusion_is_ignored_by_t01() {
    let mut mesh = Mesh::new();
    mesh.hub_sets_mode(Mode::Guard, 0);
    mesh.b02.process_movement(MovementChannel::Front, 500);
    mesh.pump(500);

    assert!(mesh.b02.get_state(501).is_buzzer_on);
    assert!(!mesh.t01.get_state(501).is_warning_led_on);
    assert_eq!(mesh.hub_inbox.len(), 1);
    assert_eq!(mesh.hub_inbox[0].destinations.as_slice(), &[NodeId::Broadcast]);
}

#[test]
fn telemetry_lands_at_hub_only() {
    let mut mesh = Mesh::new();
    let before = mesh.b02.get_state(0);
    mesh.t01.process_door_state(true, 0);
    mesh.pump(0);
    assert_eq!(mesh.hub_inbox.len(), 1);
    assert_eq!(mesh.hub_inbox[0].cmd, CommandId::UpdateDoorState);
    assert_eq!(mesh.b02.get_state(0), before);
}

#[test]
fn alarm_overrides_windows_on_both_nodes() {
    let mut mesh = Mesh::new();
    mesh.dusk();
    mesh.hub_sets_mode(Mode::Alarm, 10);
    mesh.b02.process_movement(MovementChannel::Door, 20);
    mesh.t01.process_movement(MovementChannel::Front, 20);
    mesh.pump(20);
    assert!(mesh.hub_inbox.is_empty());

    let b02 = mesh.b02.get_state(1_000_000);
    assert!(b02.is_buzzer_on && b02.is_veranda_light_on && b02.is_strip_red_on);
    assert!(!b02.is_motion_sensor_on);
    let t01 = mesh.t01.get_state(1_000_000);
    assert!(t01.is_warning_led_on && t01.is_front_light_on);
    assert!(!t01.is_display_on);

    mesh.hub_sets_mode(Mode::Silence, 2_000_000);
    assert!(!mesh.b02.get_state(2_000_000).is_veranda_light_on);
    assert!(!mesh.t01.get_state(2_000_000).is_front_light_on);
}
