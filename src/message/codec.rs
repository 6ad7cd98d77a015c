//! Envelope wire codec.
//!
//! Envelopes are serialised with `postcard` (varint integers, enum
//! discriminants as varints, `f32` little-endian). A fully populated
//! envelope fits well inside [`MAX_ENVELOPE_LEN`], which transports use to
//! size their frame buffers. Framing (length prefix, COBS, radio packet)
//! belongs to the transport.

use super::MessageEnvelope;
use crate::error::{CodecError, Result};

/// Upper bound on the encoded size of one envelope.
pub const MAX_ENVELOPE_LEN: usize = 32;

/// Encode `msg` into `out`. Returns the number of bytes written.
pub fn encode_envelope(msg: &MessageEnvelope, out: &mut [u8]) -> Result<usize> {
    let used = postcard::to_slice(msg, out)?;
    Ok(used.len())
}

/// Decode one envelope from `bytes`. Trailing bytes are rejected.
pub fn decode_envelope(bytes: &[u8]) -> Result<MessageEnvelope> {
    let (msg, rest): (MessageEnvelope, &[u8]) = postcard::take_from_bytes(bytes)?;
    if !rest.is_empty() {
        return Err(CodecError::Malformed.into());
    }
    // Oversized destination lists already fail inside the heapless decoder.
    if msg.destinations.is_empty() {
        return Err(CodecError::BadDestinations.into());
    }
    Ok(msg)
}
