//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements   | Connects to                       |
//! |---------------|--------------|-----------------------------------|
//! | `power_rails` | ActuatorPort | `embedded-hal` output pins        |
//! | `loopback`    | MessagePort  | In-memory bus of encoded frames   |

pub mod loopback;
pub mod power_rails;
