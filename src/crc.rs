// Copyright 2024, F. Stan
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! CRC-8 word checksum used on every 16-bit word exchanged with the SGP41.
//!
//! Polynomial `0x31` (x^8 + x^5 + x^4 + 1), initial value `0xFF`, no reflection
//! and no final XOR. More info regarding the
//! [algorithm](https://en.wikipedia.org/wiki/Computation_of_cyclic_redundancy_checks)

const POLYNOMIAL: u8 = 0x31;
const INIT: u8 = 0xFF;

/// Computes the checksum of one big-endian word.
pub fn compute(word: [u8; 2]) -> u8 {
    let mut rem = INIT;
    for byte in word {
        rem ^= byte;
        for _ in 0..8 {
            if (rem & 0x80) != 0 {
                rem = (rem << 1) ^ POLYNOMIAL;
            } else {
                rem <<= 1;
            }
        }
    }
    rem
}

/// Returns true if `checksum` matches the computed checksum of `word`.
pub fn verify(word: [u8; 2], checksum: u8) -> bool {
    compute(word) == checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasheet_vector() {
        assert_eq!(compute([0xBE, 0xEF]), 0x92);
    }

    #[test]
    fn default_compensation_words() {
        // 50 %RH and 25 degC as sent by the sensor vendor's reference driver
        assert_eq!(compute([0x80, 0x00]), 0xA2);
        assert_eq!(compute([0x66, 0x66]), 0x93);
    }

    #[test]
    fn zero_word() {
        assert_eq!(compute([0x00, 0x00]), 0x81);
    }

    #[test]
    fn verify_accepts_computed_checksum() {
        for word in [0x0000u16, 0x0001, 0x8000, 0x6666, 0xD400, 0xFFFF] {
            let bytes = word.to_be_bytes();
            assert!(verify(bytes, compute(bytes)));
        }
    }

    #[test]
    fn single_bit_flips_are_detected() {
        let word = [0xD4, 0x00];
        let checksum = compute(word);
        for bit in 0..16 {
            let flipped = (u16::from_be_bytes(word) ^ (1 << bit)).to_be_bytes();
            assert!(!verify(flipped, checksum), "bit {} not detected", bit);
        }
        for bit in 0..8 {
            assert!(!verify(word, checksum ^ (1 << bit)));
        }
    }
}
