//! Fuzz target: controller input sequences
//!
//! Interprets the input as a stream of 4-byte operations (opcode, two
//! argument bytes, time step) and drives a B02 or T01 controller with
//! them. Asserts that the outbox never exceeds its capacity and that
//! `get_state` is stable for a fixed `now`.
//!
//! cargo fuzz run fuzz_controller_inputs

#![no_main]

use homenode::app::controller::Controller;
use homenode::config::Profile;
use homenode::message::outbox::OUTBOX_CAPACITY;
use homenode::message::{CommandId, MessageEnvelope, NodeId};
use homenode::sensors::remote::RemoteButton;
use homenode::sensors::{EnvironmentReading, LuminosityReading, MovementChannel};
use libfuzzer_sys::fuzz_target;

const NODES: [NodeId; 4] = [NodeId::B01, NodeId::B02, NodeId::T01, NodeId::Broadcast];
const CMDS: [CommandId; 7] = [
    CommandId::SetMode,
    CommandId::SetIntrusion,
    CommandId::SetLight,
    CommandId::SetWarning,
    CommandId::UpdateTemperature,
    CommandId::UpdateHumidity,
    CommandId::UpdateDoorState,
];
const CHANNELS: [MovementChannel; 3] = [
    MovementChannel::Door,
    MovementChannel::Front,
    MovementChannel::Veranda,
];

fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let profile = if first & 1 == 0 { Profile::b02() } else { Profile::t01() };
    let mut c = Controller::new(profile);
    let mut now: u32 = u32::from(first) << 24;

    for op in ops.chunks_exact(4) {
        let (a, b) = (op[1], op[2]);
        now = now.wrapping_add(u32::from(op[3]) * 500);

        match op[0] % 7 {
            0 => {
                let reading = LuminosityReading { lux: f32::from(a) / 8.0, valid: b & 1 == 0 };
                c.process_luminosity(reading, now);
            }
            1 => {
                let mut r = EnvironmentReading::temperature(f32::from(a as i8) / 2.0);
                if b & 1 != 0 {
                    r = r.with_humidity(f32::from(b >> 1));
                }
                if b & 2 != 0 {
                    r.valid = false;
                }
                c.process_environment(r, now);
            }
            2 => {
                c.process_door_state(a & 1 != 0, now);
            }
            3 => c.process_movement(CHANNELS[usize::from(a) % CHANNELS.len()], now),
            4 => c.process_remote_button(RemoteButton::from_nec_command(a)),
            5 => {
                let msg = MessageEnvelope::new(
                    NODES[usize::from(a >> 4) % NODES.len()],
                    &[NODES[usize::from(a) % NODES.len()]],
                    CMDS[usize::from(b) % CMDS.len()],
                )
                .with_values(i32::from(b >> 4) - 1, 0, 0.0);
                c.process_message(&msg, now);
            }
            _ => {
                let _ = c.get_message();
            }
        }

        assert!(c.pending_messages() <= OUTBOX_CAPACITY);
        let state = c.get_state(now);
        assert_eq!(c.get_state(now), state);
        assert_eq!(state.is_msg_to_send, c.pending_messages() > 0);
    }
});
