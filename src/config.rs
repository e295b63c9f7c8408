// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

/// Standard I2C address of the SGP41.
pub const DEFAULT_ADDRESS: u16 = 0x59;

/// Bus the driver opens when none is given.
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";

/// 50 %RH; sending it leaves humidity compensation disabled.
pub const DEFAULT_HUMIDITY_TICKS: u16 = 0x8000;

/// 25 degC; sending it leaves temperature compensation disabled.
pub const DEFAULT_TEMPERATURE_TICKS: u16 = 0x6666;

/// Converts a relative humidity in %RH to ticks (`%RH * 65535 / 100`).
///
/// Input is clamped to 0..=100 %RH.
pub fn humidity_to_ticks(percent_rh: f32) -> u16 {
    let rh = percent_rh.clamp(0.0, 100.0);
    (rh * 65535.0 / 100.0) as u16
}

/// Converts a temperature in degC to ticks (`(degC + 45) * 65535 / 175`).
///
/// Input is clamped to -45..=130 degC.
pub fn temperature_to_ticks(celsius: f32) -> u16 {
    let t = celsius.clamp(-45.0, 130.0);
    ((t + 45.0) * 65535.0 / 175.0) as u16
}

/// Configuration for an SGP41 instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path of the I2C bus character device.
    pub bus_path: String,
    /// 7-bit device address.
    pub address: u16,
    /// Humidity sent by the `*_default` commands.
    pub default_humidity_ticks: u16,
    /// Temperature sent by the `*_default` commands.
    pub default_temperature_ticks: u16,
}

impl Config {
    /// Sets the bus device path.
    pub fn bus_path(mut self, bus_path: impl Into<String>) -> Self {
        self.bus_path = bus_path.into();
        self
    }

    /// Sets the device address.
    pub fn address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }

    /// Sets the compensation values used by the `*_default` commands.
    ///
    /// # Arguments
    ///
    /// * `humidity_ticks` - Relative humidity in ticks, see [`humidity_to_ticks`].
    /// * `temperature_ticks` - Temperature in ticks, see [`temperature_to_ticks`].
    pub fn compensation(mut self, humidity_ticks: u16, temperature_ticks: u16) -> Self {
        self.default_humidity_ticks = humidity_ticks;
        self.default_temperature_ticks = temperature_ticks;
        self
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bus_path: DEFAULT_BUS_PATH.to_string(),
            address: DEFAULT_ADDRESS,
            default_humidity_ticks: DEFAULT_HUMIDITY_TICKS,
            default_temperature_ticks: DEFAULT_TEMPERATURE_TICKS,
        }
    }
}
