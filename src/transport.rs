// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use i2cdev::core::I2CDevice;
use std::error::Error;

/// Raw bus access to one SGP41, addressed when the transport was created.
///
/// Each call is one complete bus transaction; callers never interleave
/// transactions of different commands on the same transport.
pub trait Transport {
    type Error: Error + 'static;

    /// Sends an encoded frame (opcode followed by its payload).
    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Reads exactly `out.len()` bytes.
    fn read(&mut self, out: &mut [u8]) -> Result<(), Self::Error>;
}

/// [`Transport`] over any i2cdev device, e.g. a `LinuxI2CDevice`.
pub struct I2cTransport<D> {
    pub i2cdev: D,
}

impl<D: I2CDevice> I2cTransport<D> {
    pub fn new(i2cdev: D) -> Self {
        I2cTransport { i2cdev }
    }
}

impl<D> Transport for I2cTransport<D>
where
    D: I2CDevice,
    D::Error: 'static,
{
    type Error = D::Error;

    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.i2cdev.write(frame)
    }

    fn read(&mut self, out: &mut [u8]) -> Result<(), Self::Error> {
        self.i2cdev.read(out)
    }
}
