//! Application core: node control logic, zero I/O.
//!
//! [`controller`] holds the decision engine. Hardware and transport are
//! reached only through the traits in [`ports`]; [`runtime`] holds the
//! small pieces of glue every orchestrator needs around the controller.

pub mod controller;
pub mod events;
pub mod ports;
pub mod runtime;
