//! Sensor readings handed to the controller and the cache it keeps.
//!
//! Drivers live outside this crate. They report failure through the
//! `valid` flag rather than an error; consumers must check it before
//! trusting a cached value.

pub mod remote;

use serde::{Deserialize, Serialize};

/// One photoresistor sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LuminosityReading {
    pub lux: f32,
    pub valid: bool,
}

impl LuminosityReading {
    pub fn new(lux: f32) -> Self {
        Self { lux, valid: true }
    }

    pub fn invalid() -> Self {
        Self::default()
    }
}

/// One temperature/humidity/pressure sample (BME280 / BMP280 class sensor).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    pub temperature_c: f32,
    /// Absent on sensors without a humidity element (BMP280).
    pub humidity_pct: Option<f32>,
    pub pressure_hpa: Option<f32>,
    pub valid: bool,
}

impl EnvironmentReading {
    pub fn temperature(temperature_c: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct: None,
            pressure_hpa: None,
            valid: true,
        }
    }

    pub fn with_humidity(mut self, humidity_pct: f32) -> Self {
        self.humidity_pct = Some(humidity_pct);
        self
    }

    pub fn with_pressure(mut self, pressure_hpa: f32) -> Self {
        self.pressure_hpa = Some(pressure_hpa);
        self
    }

    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Latest values the controller has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorCache {
    /// Derived from the last luminosity reading.
    pub is_dark: bool,
    /// Last environment reading, valid or not.
    pub environment: EnvironmentReading,
    /// Last door contact state (door-sensor profiles only).
    pub door_open: bool,
}

/// PIR inputs a node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementChannel {
    /// Entrance door PIR (B02).
    Door,
    /// Front PIR (T01; on B02 it behaves exactly like `Door`).
    Front,
    /// Veranda PIR (B02).
    Veranda,
}
