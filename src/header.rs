//! The leading header byte of an encoded bag tag.
//!
//! Bit layout, most significant first:
//! - bits 0..=2 : format version
//! - bit  3     : license plate block present
//! - bit  4     : identifier block present
//! - bits 5..=7 : number of flight legs minus one

use crate::error::{RangeError, Result};

/// Highest version the 3-bit field can carry.
pub const MAX_VERSION: u8 = 7;
/// Flight leg count is stored as `count - 1` in three bits.
pub const MAX_FLIGHT_LEGS: usize = 8;

pub const LICENSE_PLATE_BYTES: usize = 5;
pub const IDENTIFIER_BYTES: usize = 16;
pub const FLIGHT_LEG_BYTES: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub version: u8,
    pub has_license_plate: bool,
    pub has_identifier: bool,
    /// Number of flight legs, 1..=8.
    pub leg_count: usize,
}

impl TagHeader {
    /// Validate the fields and build a header.
    pub fn new(
        version: u8,
        has_license_plate: bool,
        has_identifier: bool,
        leg_count: usize,
    ) -> Result<Self> {
        if version > MAX_VERSION {
            return Err(RangeError::Version(version).into());
        }
        if !(1..=MAX_FLIGHT_LEGS).contains(&leg_count) {
            return Err(RangeError::FlightLegCount(leg_count).into());
        }
        Ok(Self {
            version,
            has_license_plate,
            has_identifier,
            leg_count,
        })
    }

    pub fn pack(self) -> u8 {
        (self.version & 0x7) << 5
            | (self.has_license_plate as u8) << 4
            | (self.has_identifier as u8) << 3
            | (self.leg_count.wrapping_sub(1) & 0x7) as u8
    }

    /// Every byte value is a well-formed header.
    pub fn unpack(byte: u8) -> Self {
        Self {
            version: (byte >> 5) & 0x7,
            has_license_plate: (byte >> 4) & 1 != 0,
            has_identifier: (byte >> 3) & 1 != 0,
            leg_count: (byte & 0x7) as usize + 1,
        }
    }

    /// Number of meaningful bytes in a tag carrying this header, header
    /// byte included.
    pub fn encoded_len(&self) -> usize {
        1 + if self.has_license_plate { LICENSE_PLATE_BYTES } else { 0 }
            + if self.has_identifier { IDENTIFIER_BYTES } else { 0 }
            + FLIGHT_LEG_BYTES * self.leg_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BagTagError;

    #[test]
    fn known_header_byte() {
        let header = TagHeader::new(1, true, true, 2).unwrap();
        assert_eq!(header.pack(), 0x39);
        assert_eq!(TagHeader::unpack(0x39), header);
    }

    #[test]
    fn every_byte_roundtrips() {
        for byte in 0..=255u8 {
            let header = TagHeader::unpack(byte);
            assert!((1..=MAX_FLIGHT_LEGS).contains(&header.leg_count));
            assert_eq!(header.pack(), byte);
        }
    }

    #[test]
    fn encoded_len_counts_blocks() {
        assert_eq!(TagHeader::new(0, false, false, 1).unwrap().encoded_len(), 12);
        assert_eq!(TagHeader::new(0, true, false, 1).unwrap().encoded_len(), 17);
        assert_eq!(TagHeader::new(0, false, true, 1).unwrap().encoded_len(), 28);
        assert_eq!(TagHeader::new(7, true, true, 8).unwrap().encoded_len(), 110);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            TagHeader::new(8, false, false, 1),
            Err(BagTagError::Range(RangeError::Version(8)))
        );
        assert_eq!(
            TagHeader::new(0, false, false, 0),
            Err(BagTagError::Range(RangeError::FlightLegCount(0)))
        );
        assert_eq!(
            TagHeader::new(0, false, false, 9),
            Err(BagTagError::Range(RangeError::FlightLegCount(9)))
        );
    }
}
