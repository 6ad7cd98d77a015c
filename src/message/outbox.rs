//! Bounded LIFO buffer of outgoing envelopes.
//!
//! Producers push and forget: once [`OUTBOX_CAPACITY`] envelopes are
//! pending, further pushes are dropped. [`Outbox::pop`] returns the most
//! recently pushed envelope first. Transports that care about delivery
//! order must not assume FIFO.

use super::MessageEnvelope;

pub const OUTBOX_CAPACITY: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct Outbox {
    stack: heapless::Vec<MessageEnvelope, OUTBOX_CAPACITY>,
}

impl Outbox {
    pub fn new() -> Self {
        Self { stack: heapless::Vec::new() }
    }

    /// Push an envelope. Returns `false` if the outbox was full and the
    /// envelope was dropped.
    pub fn push(&mut self, msg: MessageEnvelope) -> bool {
        self.stack.push(msg).is_ok()
    }

    /// Remove the most recently pushed envelope.
    pub fn pop(&mut self) -> Option<MessageEnvelope> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.stack.is_full()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
