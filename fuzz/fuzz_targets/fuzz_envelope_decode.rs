//! Fuzz target: `decode_envelope`
//!
//! Feeds arbitrary bytes to the envelope decoder and asserts that it never
//! panics, and that anything it accepts re-encodes into one frame and
//! decodes back to the same envelope.
//!
//! cargo fuzz run fuzz_envelope_decode

#![no_main]

use homenode::message::codec::{MAX_ENVELOPE_LEN, decode_envelope, encode_envelope};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(msg) = decode_envelope(data) else {
        return;
    };

    assert!(!msg.destinations.is_empty(), "decoder yielded no destinations");

    let mut buf = [0u8; MAX_ENVELOPE_LEN];
    let n = encode_envelope(&msg, &mut buf).expect("decoded envelope must re-encode");
    let again = decode_envelope(&buf[..n]).expect("re-encoded envelope must decode");

    // NaN payloads compare unequal to themselves.
    if !msg.value2.is_nan() {
        assert_eq!(again, msg);
    }
});
