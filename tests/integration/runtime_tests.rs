//! Integration tests for the runtime glue: controller → applier → ports.
//!
//! Drives the controller the way the orchestrator task does and checks
//! what reaches the pins and the transport.

use super::mock_hw::{ActuatorCall, MockLink, MockPanel, MockPin};

use homenode::adapters::power_rails::PowerRails;
use homenode::app::controller::Controller;
use homenode::app::events::NodeEvent;
use homenode::app::runtime::{ActuatorApplier, SharedController, flush_outbox};
use homenode::channels::Channel;
use homenode::config::Profile;
use homenode::fsm::Mode;
use homenode::fsm::context::StatusLed;
use homenode::message::{CommandId, MessageEnvelope, NodeId, Switch};
use homenode::sensors::{EnvironmentReading, LuminosityReading, MovementChannel};

fn set_mode(to: NodeId, mode: Mode) -> NodeEvent {
    NodeEvent::Message(
        MessageEnvelope::new(NodeId::B01, &[to], CommandId::SetMode)
            .with_values(mode.to_wire(), 0, 0.0),
    )
}

// ── Applier through GPIO ──────────────────────────────────────

#[test]
fn b02_alarm_drives_rails() {
    let profile = Profile::b02();
    let red = MockPin::default();
    let green = MockPin::default();
    let veranda = MockPin::default();
    let buzzer = MockPin::default();
    let strip_red = MockPin::default();
    let display = MockPin::default();
    let mut rails = PowerRails::new(red.clone(), green.clone())
        .with_rail(Channel::VerandaLight, veranda.clone())
        .with_rail(Channel::Buzzer, buzzer.clone())
        .with_rail(Channel::StripRed, strip_red.clone())
        .with_rail(Channel::Display, display.clone());

    let mut c = Controller::new(profile.clone());
    let mut applier = ActuatorApplier::new();

    applier.apply(&c.get_state(0), profile.channels, &mut rails);
    assert!(green.is_high() && !red.is_high());
    assert!(!buzzer.is_high());

    c.handle_event(&NodeEvent::Luminosity(LuminosityReading::new(1.0)), 10);
    c.handle_event(&set_mode(NodeId::B02, Mode::Alarm), 20);
    applier.apply(&c.get_state(30), profile.channels, &mut rails);

    assert!(red.is_high() && !green.is_high());
    assert!(buzzer.is_high());
    assert!(strip_red.is_high());
    assert!(veranda.is_high());
    assert!(!display.is_high());
}

#[test]
fn applier_skips_unchanged_channels_across_ticks() {
    let profile = Profile::t01();
    let mut c = Controller::new(profile.clone());
    let mut panel = MockPanel::new();
    let mut applier = ActuatorApplier::new();

    c.process_luminosity(LuminosityReading::new(0.5), 0);
    for now in (0..10_000).step_by(1_000) {
        applier.apply(&c.get_state(now), profile.channels, &mut panel);
    }
    // Only the initial write for each channel.
    assert_eq!(panel.writes_to(Channel::FrontLight), 1);
    assert_eq!(panel.status_led(), Some(StatusLed::Green));

    c.process_movement(MovementChannel::Front, 10_000);
    applier.apply(&c.get_state(10_000), profile.channels, &mut panel);
    assert!(panel.is_on(Channel::FrontLight));
    assert!(panel.is_on(Channel::Display));

    // Display window (20 s) closes before the light window (120 s).
    applier.apply(&c.get_state(30_001), profile.channels, &mut panel);
    assert!(!panel.is_on(Channel::Display));
    assert!(panel.is_on(Channel::FrontLight));
    applier.apply(&c.get_state(130_001), profile.channels, &mut panel);
    assert!(!panel.is_on(Channel::FrontLight));
}

#[test]
fn channels_outside_profile_are_never_written() {
    let profile = Profile::t01();
    let c = Controller::new(profile.clone());
    let mut panel = MockPanel::new();
    ActuatorApplier::new().apply(&c.get_state(0), profile.channels, &mut panel);
    assert!(!panel.calls.iter().any(|call| matches!(
        call,
        ActuatorCall::Channel(Channel::Buzzer | Channel::VerandaLight | Channel::StripRed, _)
    )));
}

// ── Outbox flushing ───────────────────────────────────────────

#[test]
fn flush_delivers_newest_first() {
    let mut c = Controller::new(Profile::t01());
    c.process_door_state(true, 0);
    c.process_environment(EnvironmentReading::temperature(20.0).with_humidity(40.0), 0);
    let mut link = MockLink::new();
    assert_eq!(flush_outbox(&mut c, &mut link), 2);
    assert_eq!(link.sent[0].cmd, CommandId::UpdateHumidity);
    assert_eq!(link.sent[1].cmd, CommandId::UpdateDoorState);
    assert!(!c.get_state(0).is_msg_to_send);
}

#[test]
fn flush_over_dead_link_drains_and_drops() {
    let mut c = Controller::new(Profile::t01());
    c.process_door_state(false, 0);
    let mut link = MockLink::new();
    link.online = false;
    assert_eq!(flush_outbox(&mut c, &mut link), 0);
    assert_eq!(c.pending_messages(), 0);
    assert!(link.sent.is_empty());
}

#[test]
fn msg_flag_tracks_outbox() {
    let mut c = Controller::new(Profile::t01());
    assert!(!c.get_state(0).is_msg_to_send);
    c.process_door_state(true, 0);
    assert!(c.get_state(0).is_msg_to_send);
    let msg = c.get_message().unwrap();
    assert_eq!(msg.switch_value(), Switch::On);
    assert!(!c.get_state(0).is_msg_to_send);
}

// ── Shared controller ─────────────────────────────────────────

#[test]
fn shared_controller_serves_event_and_query_paths() {
    let shared = SharedController::new(Controller::new(Profile::b02()));
    shared.with(|c| c.handle_event(&set_mode(NodeId::B02, Mode::Guard), 0));
    shared.with(|c| c.handle_event(&NodeEvent::Movement(MovementChannel::Door), 5));
    let state = shared.with(|c| c.get_state(6));
    assert_eq!(state.status_led, StatusLed::Red);
    assert!(state.is_buzzer_on);

    let mut link = MockLink::new();
    assert_eq!(shared.with(|c| flush_outbox(c, &mut link)), 1);
    assert_eq!(link.sent[0].cmd, CommandId::SetIntrusion);
    assert_eq!(link.sent[0].destinations.as_slice(), &[NodeId::Broadcast]);

    let c = shared.into_inner();
    assert_eq!(c.mode(), Mode::Guard);
}
