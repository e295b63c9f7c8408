// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::error::Error;
use std::fmt;

/// A response word whose trailing checksum byte did not match.
///
/// `word` is the zero-based slot of the offending word in the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumMismatch {
    pub word: usize,
    pub expected: u8,
    pub received: u8,
}

impl fmt::Display for ChecksumMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "checksum mismatch on word {}: expected 0x{:02X}, received 0x{:02X}",
            self.word, self.expected, self.received
        )
    }
}

impl Error for ChecksumMismatch {}

///
///SGP41 error enum. `E` is the error type of the underlying
///transport. TransportWrite and TransportRead wrap a failed
///bus transaction, ChecksumMismatch is returned when any word
///of a reply fails its crc 8 check, in which case no word of
///that reply is returned.
///
#[derive(Debug)]
pub enum Sgp41Error<E> {
    /// The command frame could not be written to the device
    TransportWrite(E),
    /// The reply could not be read from the device
    TransportRead(E),
    /// A reply word did not match its checksum
    ChecksumMismatch(ChecksumMismatch),
}

impl<E> From<ChecksumMismatch> for Sgp41Error<E> {
    fn from(e: ChecksumMismatch) -> Self {
        Sgp41Error::ChecksumMismatch(e)
    }
}

///Implementation of display for Sgp41Error
impl<E: fmt::Display> fmt::Display for Sgp41Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Sgp41Error::TransportWrite(ref e) => write!(f, "Write to device failed: {}", e),
            Sgp41Error::TransportRead(ref e) => write!(f, "Read from device failed: {}", e),
            Sgp41Error::ChecksumMismatch(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl<E: Error + 'static> Error for Sgp41Error<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Sgp41Error::TransportWrite(ref e) | Sgp41Error::TransportRead(ref e) => Some(e),
            Sgp41Error::ChecksumMismatch(ref e) => Some(e),
        }
    }
}
