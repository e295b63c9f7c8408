// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! SGP41 command table, outgoing frame encoder and reply decoder.
//!
//! Every 16-bit word on the wire is sent big-endian and followed by its
//! crc 8 checksum byte. A write frame is the 2 byte opcode followed by
//! `3 * n` parameter bytes; a reply is `3 * n` bytes.

use crate::crc;
use crate::error::ChecksumMismatch;

/// Largest write frame: opcode plus two checksummed parameter words.
pub const MAX_FRAME_LEN: usize = 8;

/// Largest reply the driver reads: the 3 word serial number.
pub const MAX_RESPONSE_WORDS: usize = 3;

/// Commands understood by the SGP41, with the parameter words each one sends.
///
/// Humidity and temperature are in ticks; 0x8000 and 0x6666 leave
/// compensation disabled and are sent like any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Heats the NOx pixel for conditioning, returns SRAW_VOC.
    ExecuteConditioning { default_rh: u16, default_t: u16 },
    /// Starts or continues the VOC+NOx measurement mode.
    MeasureRawSignals {
        relative_humidity: u16,
        temperature: u16,
    },
    /// Built-in hotplate and MOX material integrity test.
    ExecuteSelfTest,
    /// Turns the hotplate off, the sensor goes idle.
    TurnHeaterOff,
    /// Reads the 48-bit serial number.
    GetSerialNumber,
}

impl Command {
    pub const fn opcode(self) -> u16 {
        match self {
            Command::ExecuteConditioning { .. } => 0x2612,
            Command::MeasureRawSignals { .. } => 0x2619,
            Command::ExecuteSelfTest => 0x280E,
            Command::TurnHeaterOff => 0x3615,
            Command::GetSerialNumber => 0x3682,
        }
    }

    /// Parameter words sent after the opcode, in wire order.
    pub const fn parameters(self) -> Option<[u16; 2]> {
        match self {
            Command::ExecuteConditioning {
                default_rh,
                default_t,
            } => Some([default_rh, default_t]),
            Command::MeasureRawSignals {
                relative_humidity,
                temperature,
            } => Some([relative_humidity, temperature]),
            Command::ExecuteSelfTest | Command::TurnHeaterOff | Command::GetSerialNumber => None,
        }
    }

    /// Number of parameter words sent after the opcode.
    pub const fn parameter_words(self) -> usize {
        match self.parameters() {
            Some(_) => 2,
            None => 0,
        }
    }

    /// Number of checksummed words the device replies with.
    pub const fn response_words(self) -> usize {
        match self {
            Command::ExecuteConditioning { .. } | Command::ExecuteSelfTest => 1,
            Command::MeasureRawSignals { .. } => 2,
            Command::TurnHeaterOff => 0,
            Command::GetSerialNumber => 3,
        }
    }

    /// Time the chip needs after the write before its reply is valid.
    pub const fn settle_delay_ms(self) -> u32 {
        match self {
            Command::ExecuteConditioning { .. } | Command::MeasureRawSignals { .. } => 50,
            Command::ExecuteSelfTest => 320,
            Command::TurnHeaterOff | Command::GetSerialNumber => 1,
        }
    }
}

/// An encoded write frame, at most [`MAX_FRAME_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Writes `word` big-endian followed by its checksum.
pub fn encode_word(word: u16) -> [u8; 3] {
    let [msb, lsb] = word.to_be_bytes();
    [msb, lsb, crc::compute([msb, lsb])]
}

/// Builds the write frame for `command`: opcode, then each parameter word
/// with its checksum.
pub fn encode(command: Command) -> Frame {
    let mut buf = [0u8; MAX_FRAME_LEN];
    buf[..2].copy_from_slice(&command.opcode().to_be_bytes());
    let mut len = 2;
    if let Some(params) = command.parameters() {
        for word in params {
            buf[len..len + 3].copy_from_slice(&encode_word(word));
            len += 3;
        }
    }
    Frame { buf, len }
}

/// Validates and reassembles `N` checksummed `[msb, lsb, crc]` word slots.
///
/// The first word failing its checksum aborts the decode; nothing is
/// returned for the words that passed.
pub fn decode_words<const N: usize>(
    slots: &[[u8; 3]; N],
) -> Result<[u16; N], ChecksumMismatch> {
    let mut words = [0u16; N];
    for (i, (word, slot)) in words.iter_mut().zip(slots.iter()).enumerate() {
        let bytes = [slot[0], slot[1]];
        if !crc::verify(bytes, slot[2]) {
            return Err(ChecksumMismatch {
                word: i,
                expected: crc::compute(bytes),
                received: slot[2],
            });
        }
        *word = u16::from_be_bytes(bytes);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Command; 5] = [
        Command::ExecuteConditioning {
            default_rh: 0x1234,
            default_t: 0x5678,
        },
        Command::MeasureRawSignals {
            relative_humidity: 0x1234,
            temperature: 0x5678,
        },
        Command::ExecuteSelfTest,
        Command::TurnHeaterOff,
        Command::GetSerialNumber,
    ];

    #[test]
    fn frame_lengths_follow_parameter_count() {
        for command in ALL {
            let frame = encode(command);
            assert_eq!(frame.len(), 2 + 3 * command.parameter_words());
            assert!(frame.len() <= MAX_FRAME_LEN);
            assert!(command.response_words() <= MAX_RESPONSE_WORDS);
        }
    }

    #[test]
    fn only_compensated_commands_carry_parameters() {
        assert_eq!(ALL[0].parameters(), Some([0x1234, 0x5678]));
        assert_eq!(ALL[1].parameters(), Some([0x1234, 0x5678]));
        for command in &ALL[2..] {
            assert_eq!(command.parameters(), None);
            assert_eq!(encode(*command).as_bytes(), &command.opcode().to_be_bytes());
        }
    }

    #[test]
    fn self_test_frame_is_bare_opcode() {
        let frame = encode(Command::ExecuteSelfTest);
        assert_eq!(frame.as_bytes(), &[0x28, 0x0E]);
    }

    #[test]
    fn measure_with_sentinels_sends_both_words() {
        let frame = encode(Command::MeasureRawSignals {
            relative_humidity: 0x8000,
            temperature: 0x6666,
        });
        assert_eq!(
            frame.as_bytes(),
            &[0x26, 0x19, 0x80, 0x00, 0xA2, 0x66, 0x66, 0x93]
        );
    }

    #[test]
    fn conditioning_frame() {
        let frame = encode(ALL[0]);
        assert_eq!(
            frame.as_bytes(),
            &[0x26, 0x12, 0x12, 0x34, 0x37, 0x56, 0x78, 0x7D]
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let command = Command::MeasureRawSignals {
            relative_humidity: 0x9ABC,
            temperature: 0x0102,
        };
        assert_eq!(encode(command), encode(command));
    }

    #[test]
    fn decodes_serial_number_words() {
        let slots = [[0x12, 0x34, 0x37], [0x56, 0x78, 0x7D], [0x9A, 0xBC, 0xE0]];
        let words = decode_words(&slots).unwrap();
        assert_eq!(words, [0x1234, 0x5678, 0x9ABC]);
    }

    #[test]
    fn decodes_single_word() {
        assert_eq!(decode_words(&[[0xD4, 0x00, 0xC6]]), Ok([0xD400]));
    }

    #[test]
    fn bad_checksum_rejects_whole_reply() {
        let slots = [[0x12, 0x34, 0x37], [0x56, 0x78, 0x7D], [0x9A, 0xBC, 0xE1]];
        let err = decode_words(&slots).unwrap_err();
        assert_eq!(
            err,
            ChecksumMismatch {
                word: 2,
                expected: 0xE0,
                received: 0xE1
            }
        );
    }

    #[test]
    fn first_corrupted_word_is_reported() {
        let slots = [[0xD4, 0x00, 0x00], [0x12, 0x34, 0x00]];
        let err = decode_words(&slots).unwrap_err();
        assert_eq!(err.word, 0);
        assert_eq!(err.expected, 0xC6);
    }
}
