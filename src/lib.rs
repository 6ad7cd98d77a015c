//! HomeNode firmware library.
//!
//! Control logic for the B02 (veranda) and T01 (hall) nodes of the home
//! network. The core is pure and host-testable: the [`app::controller`]
//! takes sensor readings and inbound envelopes as values and hands back
//! actuator state and outbound envelopes. Board wiring lives behind the
//! port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod channels;
pub mod config;
pub mod error;
pub mod fsm;
pub mod message;
pub mod sensors;
pub mod timing;
