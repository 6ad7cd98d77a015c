//! Unified error types for the node firmware support layers.
//!
//! The node controller itself is total and never returns an error. These
//! types cover the layers around it: the envelope wire codec, the
//! message transport port, and profile validation. All variants are `Copy`
//! so they can be passed through the runtime glue without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An envelope could not be encoded or decoded.
    Codec(CodecError),
    /// The transport refused or lost an outgoing envelope.
    Transport(TransportError),
    /// A profile failed validation. The message names the field.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "codec: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The output buffer cannot hold the encoded envelope.
    BufferTooSmall,
    /// The input bytes are not a valid envelope.
    Malformed,
    /// The envelope decoded but carries no destination.
    BadDestinations,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::Malformed => write!(f, "malformed envelope"),
            Self::BadDestinations => write!(f, "invalid destination list"),
        }
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

impl From<postcard::Error> for CodecError {
    fn from(e: postcard::Error) -> Self {
        match e {
            postcard::Error::SerializeBufferFull => Self::BufferTooSmall,
            _ => Self::Malformed,
        }
    }
}

impl From<postcard::Error> for Error {
    fn from(e: postcard::Error) -> Self {
        Self::Codec(e.into())
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The link to the peer is down.
    LinkDown,
    /// The transport queue is full; the envelope was not accepted.
    Busy,
    /// No route to any of the envelope's destinations.
    Unroutable,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkDown => write!(f, "link down"),
            Self::Busy => write!(f, "transport busy"),
            Self::Unroutable => write!(f, "no route to destination"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
