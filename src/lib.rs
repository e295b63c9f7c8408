// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! SGP41 driver implementing the I2C command set of the Sensirion VOC and NOx sensor
//!
//! Commands taken from the SGP41 datasheet. Every 16-bit word exchanged with the
//! chip is big-endian and followed by a crc 8 checksum; replies are only returned
//! once every word checks out.
//!
//! Converting the raw signals into VOC/NOx gas indices is not done here.
//!
//! ## Basic Example
//!
//! Conditioning the NOx pixel for 10 seconds and then reading raw signals
//! without humidity or temperature compensation.
//!
//!```no_run
//!use sgp41_i2c::sgp41::Sgp41;
//!use sgp41_i2c::config::{DEFAULT_HUMIDITY_TICKS, DEFAULT_TEMPERATURE_TICKS};
//!use std::thread;
//!use std::time::Duration;
//!
//!fn main() {
//!    // Open the I2C device
//!    let mut sgp = Sgp41::new().unwrap();
//!    let report = sgp.init().unwrap();
//!    println!("SGP41 {} self test passed: {}", report.serial_number, report.self_test.is_passed());
//!
//!    for _ in 0..10 {
//!        sgp.execute_conditioning(DEFAULT_HUMIDITY_TICKS, DEFAULT_TEMPERATURE_TICKS).unwrap();
//!        thread::sleep(Duration::from_secs(1));
//!    }
//!
//!    loop {
//!        match sgp.measure_raw_signals(DEFAULT_HUMIDITY_TICKS, DEFAULT_TEMPERATURE_TICKS) {
//!            Ok(signals) => {
//!                println!("SRAW_VOC: {} SRAW_NOX: {}", signals.sraw_voc, signals.sraw_nox);
//!                thread::sleep(Duration::from_secs(1));
//!            }
//!            Err(e) => {
//!                println!("Error obtaining raw signals. More details: {}", e);
//!                thread::sleep(Duration::from_secs(10));
//!            }
//!        }
//!    }
//!}
//!```
//!

/// CRC-8 word checksum
pub mod crc;

/// Command table, frame encoder and reply decoder
pub mod command;

pub mod config;

/// Settle delays between a command and its reply
pub mod delay;

pub mod error;

/// Bus access used by the driver
pub mod transport;

/// SGP41 device handle and its operations
pub mod sgp41;

pub use config::Config;
pub use error::{ChecksumMismatch, Sgp41Error};
pub use sgp41::{InitReport, RawSignals, SerialNumber, Sgp41, TestResult};
pub use transport::{I2cTransport, Transport};
