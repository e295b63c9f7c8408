// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use crate::command::{self, Command};
use crate::config::Config;
use crate::delay::{Delay, StdDelay};
use crate::error::Sgp41Error;
use crate::transport::Transport;
use log::{debug, error, info, warn};
use std::fmt;

#[cfg(target_os = "linux")]
use crate::transport::I2cTransport;
#[cfg(target_os = "linux")]
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};

/// Self-test word reported when every pixel passed.
pub const SELF_TEST_PASSED: u16 = 0xD400;

/// Raw self-test result word.
///
/// The most significant byte is to be ignored; the four low bits of the
/// least significant byte carry the per-pixel result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestResult(pub u16);

impl TestResult {
    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn is_passed(self) -> bool {
        self.0 == SELF_TEST_PASSED
    }
}

/// Raw VOC and NOx signals in ticks, proportional to the logarithm of the
/// resistance of each sensing pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSignals {
    pub sraw_voc: u16,
    pub sraw_nox: u16,
}

/// 48-bit unique serial number as sent by the chip, most significant word first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialNumber(pub [u16; 3]);

impl SerialNumber {
    /// Words in the order the chip sent them.
    pub fn words(self) -> [u16; 3] {
        self.0
    }

    pub fn as_u64(self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, &word| (acc << 16) | u64::from(word))
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0X{:04X}{:04X}{:04X}", self.0[0], self.0[1], self.0[2])
    }
}

/// What [`Sgp41::init`] found out about the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    pub self_test: TestResult,
    pub serial_number: SerialNumber,
}

/// SGP41 Struct, owns the transport to one sensor
/// and the delay used to wait for its replies.
///
/// Every operation is write, settle delay, read; `&mut self` keeps
/// a single command in flight per handle.
pub struct Sgp41<T, D = StdDelay> {
    transport: T,
    delay: D,
    config: Config,
}

#[cfg(target_os = "linux")]
impl Sgp41<I2cTransport<LinuxI2CDevice>, StdDelay> {
    /// Create a new SGP41 Struct
    ///
    /// Tries to create the device on standard address 0x59 of /dev/i2c-1.
    /// If fails, return an LinuxI2CError from i2cdev
    ///
    pub fn new() -> Result<Self, LinuxI2CError> {
        Self::with_config(Config::default())
    }

    /// Create a new SGP41 Struct on the bus and address given by `config`.
    pub fn with_config(config: Config) -> Result<Self, LinuxI2CError> {
        let device = LinuxI2CDevice::new(&config.bus_path, config.address)?;
        debug!(
            "Opened SGP41 on {} at address 0x{:02X}",
            config.bus_path, config.address
        );
        Ok(Sgp41::from_parts(I2cTransport::new(device), StdDelay, config))
    }
}

impl<T, D> Sgp41<T, D>
where
    T: Transport,
    D: Delay,
{
    /// Builds a handle from an already attached transport.
    pub fn from_parts(transport: T, delay: D, config: Config) -> Self {
        Sgp41 {
            transport,
            delay,
            config,
        }
    }

    /// Configuration the handle was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gives back the transport and the delay.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Runs the self-test and reads the serial number.
    ///
    /// A self-test result other than 0xD400 is logged and reported, it does
    /// not fail the initialization. Bus and checksum errors do.
    pub fn init(&mut self) -> Result<InitReport, Sgp41Error<T::Error>> {
        info!("Initializing SGP41 instance...");

        info!("Executing self test...");
        let self_test = self.execute_self_test()?;
        if self_test.is_passed() {
            info!("Self test executed successfully");
        } else {
            warn!("Self test failed with result: 0x{:04X}", self_test.raw());
        }

        let serial_number = self.get_serial_number()?;
        info!("Serial number: {}", serial_number);

        info!("SGP41 instance initialized successfully");
        Ok(InitReport {
            self_test,
            serial_number,
        })
    }

    /// Starts the conditioning: the NOx pixel is heated for conditioning
    /// while the VOC pixel is measured as by [`Sgp41::measure_raw_signals`].
    /// Returns SRAW_VOC in ticks.
    ///
    /// # Arguments
    ///
    /// * `default_rh` - Relative humidity in ticks.
    /// * `default_t` - Temperature in ticks.
    pub fn execute_conditioning(
        &mut self,
        default_rh: u16,
        default_t: u16,
    ) -> Result<u16, Sgp41Error<T::Error>> {
        let [sraw_voc] = self.execute::<1>(Command::ExecuteConditioning {
            default_rh,
            default_t,
        })?;
        Ok(sraw_voc)
    }

    /// [`Sgp41::execute_conditioning`] with the compensation values of the config.
    pub fn execute_conditioning_default(&mut self) -> Result<u16, Sgp41Error<T::Error>> {
        let (rh, t) = self.default_compensation();
        self.execute_conditioning(rh, t)
    }

    /// Starts or continues the VOC+NOx measurement mode.
    ///
    /// Sending 0x8000 as `relative_humidity` and 0x6666 as `temperature`
    /// leaves compensation disabled; the values are transmitted like any other.
    pub fn measure_raw_signals(
        &mut self,
        relative_humidity: u16,
        temperature: u16,
    ) -> Result<RawSignals, Sgp41Error<T::Error>> {
        let [sraw_voc, sraw_nox] = self.execute::<2>(Command::MeasureRawSignals {
            relative_humidity,
            temperature,
        })?;
        Ok(RawSignals { sraw_voc, sraw_nox })
    }

    /// [`Sgp41::measure_raw_signals`] with the compensation values of the config.
    pub fn measure_raw_signals_default(&mut self) -> Result<RawSignals, Sgp41Error<T::Error>> {
        let (rh, t) = self.default_compensation();
        self.measure_raw_signals(rh, t)
    }

    /// Triggers the built-in self-test of hotplate and MOX material.
    pub fn execute_self_test(&mut self) -> Result<TestResult, Sgp41Error<T::Error>> {
        let [result] = self.execute::<1>(Command::ExecuteSelfTest)?;
        Ok(TestResult(result))
    }

    /// Turns the hotplate off and stops the measurement; the sensor goes idle.
    pub fn turn_heater_off(&mut self) -> Result<(), Sgp41Error<T::Error>> {
        self.execute::<0>(Command::TurnHeaterOff)?;
        Ok(())
    }

    /// Reads the 48-bit serial number as three words.
    pub fn get_serial_number(&mut self) -> Result<SerialNumber, Sgp41Error<T::Error>> {
        let words = self.execute::<3>(Command::GetSerialNumber)?;
        Ok(SerialNumber(words))
    }

    fn default_compensation(&self) -> (u16, u16) {
        (
            self.config.default_humidity_ticks,
            self.config.default_temperature_ticks,
        )
    }

    // Write the command, wait its settle time, then read and check N reply words.
    fn execute<const N: usize>(
        &mut self,
        command: Command,
    ) -> Result<[u16; N], Sgp41Error<T::Error>> {
        debug_assert_eq!(N, command.response_words());

        let frame = command::encode(command);
        debug!("Executing {:?}: {:02X?}", command, frame.as_bytes());
        self.transport.write(frame.as_bytes()).map_err(|e| {
            error!("Failed to write {:?}: {}", command, e);
            Sgp41Error::TransportWrite(e)
        })?;

        self.delay.delay_ms(command.settle_delay_ms());

        if N == 0 {
            return Ok([0; N]);
        }

        let mut slots = [[0u8; 3]; N];
        self.transport
            .read(slots.as_flattened_mut())
            .map_err(|e| {
                error!("Failed to read {:?} reply: {}", command, e);
                Sgp41Error::TransportRead(e)
            })?;
        debug!("{:?} reply: {:02X?}", command, slots.as_flattened());

        let words = command::decode_words(&slots).map_err(|e| {
            error!(
                "Invalid {:?} reply {:02X?}: {}",
                command,
                slots.as_flattened(),
                e
            );
            e
        })?;
        Ok(words)
    }
}
