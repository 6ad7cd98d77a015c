//! In-memory envelope bus.
//!
//! Implements [`MessagePort`] by encoding each envelope with the wire codec
//! into a bounded frame queue. Receivers pull frames back out and decode
//! them, so anything that crosses the bus has survived a real encode/decode
//! cycle. Used by the host simulator and the integration tests.

use crate::app::ports::MessagePort;
use crate::error::{Result, TransportError};
use crate::message::codec::{MAX_ENVELOPE_LEN, decode_envelope, encode_envelope};
use crate::message::MessageEnvelope;

pub const BUS_DEPTH: usize = 16;

type Frame = heapless::Vec<u8, MAX_ENVELOPE_LEN>;

pub struct LoopbackBus {
    frames: heapless::Deque<Frame, BUS_DEPTH>,
    link_up: bool,
}

impl LoopbackBus {
    pub fn new() -> Self {
        Self {
            frames: heapless::Deque::new(),
            link_up: true,
        }
    }

    /// Simulate the link going down or coming back.
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
    }

    pub fn pending(&self) -> usize {
        self.frames.len()
    }

    /// Push raw bytes as if they arrived off the wire.
    pub fn inject_raw(&mut self, bytes: &[u8]) -> Result<()> {
        let frame = Frame::from_slice(bytes).map_err(|()| TransportError::Busy)?;
        self.frames
            .push_back(frame)
            .map_err(|_| TransportError::Busy)?;
        Ok(())
    }

    /// Pop and decode the oldest frame.
    pub fn receive(&mut self) -> Option<Result<MessageEnvelope>> {
        self.frames.pop_front().map(|frame| decode_envelope(&frame))
    }
}

impl Default for LoopbackBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePort for LoopbackBus {
    fn send(&mut self, msg: &MessageEnvelope) -> Result<()> {
        if !self.link_up {
            return Err(TransportError::LinkDown.into());
        }
        let mut buf = [0u8; MAX_ENVELOPE_LEN];
        let n = encode_envelope(msg, &mut buf)?;
        self.inject_raw(&buf[..n])
    }
}
