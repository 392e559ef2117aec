//! Fixed 11-byte flight leg record.
//!
//! Field layout, MSB first (88 bits):
//!
//! ```text
//! designator  5 + 5 + 6   Alpha, Alpha, AlphaNumeric (space if absent)
//! flight no.  14
//! year        14
//! month       4           zero based
//! day         5           day of month
//! departure   5 + 5 + 5   Alpha
//! arrival     5 + 5 + 5   Alpha
//! reserved    5           zero
//! ```

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use crate::bits::{BitReader, BitWriter};
use crate::codeset::Codeset;
use crate::error::{RangeError, Result};
use crate::header::FLIGHT_LEG_BYTES;
use crate::types::FlightLeg;

pub const MAX_FLIGHT_NUMBER: u16 = 9999;

const FLIGHT_NUMBER_BITS: u8 = 14;
const YEAR_BITS: u8 = 14;
const MONTH_BITS: u8 = 4;
const DAY_BITS: u8 = 5;
const RESERVED_BITS: u8 = 5;

/// A flight leg reduced to the integer codes that go on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedLeg {
    pub designator: [u8; 3],
    pub flight_number: u16,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub departure: [u8; 3],
    pub arrival: [u8; 3],
}

fn airport_codes(airport: &str) -> Result<[u8; 3]> {
    let codes = Codeset::Alpha.encode_str(airport)?;
    codes
        .try_into()
        .map_err(|_| RangeError::AirportLength(airport.to_string()).into())
}

fn airport_text(codes: &[u8; 3]) -> Result<String> {
    Codeset::Alpha.decode_codes(codes)
}

impl PackedLeg {
    /// Validate `leg` and map its characters to codes.
    pub fn from_leg(leg: &FlightLeg) -> Result<Self> {
        let designator: Vec<char> = leg.designator.chars().collect();
        // A space in the third position is what a two-character designator
        // encodes to, so it cannot be spelled out.
        if !(2..=3).contains(&designator.len()) || designator.get(2) == Some(&' ') {
            return Err(RangeError::DesignatorLength(leg.designator.clone()).into());
        }
        let flight_number = u16::try_from(leg.flight_number)
            .ok()
            .filter(|&n| n <= MAX_FLIGHT_NUMBER)
            .ok_or(RangeError::FlightNumber(leg.flight_number))?;
        let third = designator.get(2).copied().unwrap_or(' ');
        let date = leg.date_of_flight;
        Ok(Self {
            designator: [
                Codeset::Alpha.encode(designator[0])?,
                Codeset::Alpha.encode(designator[1])?,
                Codeset::AlphaNumeric.encode(third)?,
            ],
            flight_number,
            year: (date.year() & 0x3FFF) as u16,
            month: date.month0() as u8,
            day: date.day() as u8,
            departure: airport_codes(&leg.departure_airport)?,
            arrival: airport_codes(&leg.arrival_airport)?,
        })
    }

    /// Map codes back to text and rebuild the calendar date.
    pub fn to_leg(&self) -> Result<FlightLeg> {
        let mut designator = String::with_capacity(3);
        designator.push(Codeset::Alpha.decode(self.designator[0])?);
        designator.push(Codeset::Alpha.decode(self.designator[1])?);
        let third = Codeset::AlphaNumeric.decode(self.designator[2])?;
        if third != ' ' {
            designator.push(third);
        }
        if self.flight_number > MAX_FLIGHT_NUMBER {
            return Err(RangeError::FlightNumber(self.flight_number.into()).into());
        }
        let (year, month, day) = (self.year as i32, self.month as u32 + 1, self.day as u32);
        let date_of_flight = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(RangeError::InvalidDate { year, month, day })?;
        Ok(FlightLeg {
            designator,
            flight_number: self.flight_number.into(),
            date_of_flight,
            departure_airport: airport_text(&self.departure)?,
            arrival_airport: airport_text(&self.arrival)?,
        })
    }

    pub fn write(&self, writer: &mut BitWriter) -> Result<()> {
        let start = writer.bits_written();
        writer.write_bits(self.designator[0] as u32, Codeset::Alpha.bit_width())?;
        writer.write_bits(self.designator[1] as u32, Codeset::Alpha.bit_width())?;
        writer.write_bits(self.designator[2] as u32, Codeset::AlphaNumeric.bit_width())?;
        writer.write_bits(self.flight_number as u32, FLIGHT_NUMBER_BITS)?;
        writer.write_bits(self.year as u32, YEAR_BITS)?;
        writer.write_bits(self.month as u32, MONTH_BITS)?;
        writer.write_bits(self.day as u32, DAY_BITS)?;
        for &code in self.departure.iter().chain(self.arrival.iter()) {
            writer.write_bits(code as u32, Codeset::Alpha.bit_width())?;
        }
        writer.write_bits(0, RESERVED_BITS)?;
        debug_assert_eq!(writer.bits_written() - start, FLIGHT_LEG_BYTES * 8);
        trace!(leg = ?self, offset = start / 8, "packed flight leg");
        Ok(())
    }

    pub fn read(reader: &mut BitReader) -> Result<Self> {
        let alpha = Codeset::Alpha.bit_width();
        let designator = [
            reader.read_bits(alpha)? as u8,
            reader.read_bits(alpha)? as u8,
            reader.read_bits(Codeset::AlphaNumeric.bit_width())? as u8,
        ];
        let flight_number = reader.read_bits(FLIGHT_NUMBER_BITS)? as u16;
        let year = reader.read_bits(YEAR_BITS)? as u16;
        let month = reader.read_bits(MONTH_BITS)? as u8;
        let day = reader.read_bits(DAY_BITS)? as u8;
        let mut airports = [0u8; 6];
        for code in airports.iter_mut() {
            *code = reader.read_bits(alpha)? as u8;
        }
        reader.read_bits(RESERVED_BITS)?;
        Ok(Self {
            designator,
            flight_number,
            year,
            month,
            day,
            departure: [airports[0], airports[1], airports[2]],
            arrival: [airports[3], airports[4], airports[5]],
        })
    }
}

/// Encode a single leg into its 11-byte record.
pub fn encode_leg(leg: &FlightLeg) -> Result<[u8; FLIGHT_LEG_BYTES]> {
    let packed = PackedLeg::from_leg(leg)?;
    let mut out = [0u8; FLIGHT_LEG_BYTES];
    packed.write(&mut BitWriter::new(&mut out))?;
    Ok(out)
}

/// Decode a leg from the first 11 bytes of `data`.
pub fn decode_leg(data: &[u8]) -> Result<FlightLeg> {
    PackedLeg::read(&mut BitReader::from_slice(data))?.to_leg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BagTagError;

    fn leg(designator: &str, flight_number: i64, date: (i32, u32, u32), dep: &str, arr: &str) -> FlightLeg {
        FlightLeg {
            designator: designator.into(),
            flight_number,
            date_of_flight: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            departure_airport: dep.into(),
            arrival_airport: arr.into(),
        }
    }

    #[test]
    fn packs_known_leg() {
        // LH 500 on 2025-04-01, FRA to MUC.
        let bytes = encode_leg(&leg("LH", 500, (2025, 4, 1), "FRA", "MUC")).unwrap();
        // L=12 H=8 ' '=0 | 500 | 2025 | 3 | 1 | F=6 R=18 A=1 | M=13 U=21 C=3 | 0
        assert_eq!(
            bytes,
            [0x62, 0x00, 0x07, 0xD0, 0x7E, 0x93, 0x09, 0xA4, 0x16, 0xD4, 0x60]
        );
    }

    #[test]
    fn designator_third_character() {
        let with_third = encode_leg(&leg("EW9", 1, (2024, 12, 31), "CGN", "PMI")).unwrap();
        let without = encode_leg(&leg("EW", 1, (2024, 12, 31), "CGN", "PMI")).unwrap();
        assert_eq!(with_third[1] & 0x3F, 36);
        assert_eq!(without[1] & 0x3F, 0);
        assert_eq!(decode_leg(&with_third).unwrap().designator, "EW9");
        assert_eq!(decode_leg(&without).unwrap().designator, "EW");
    }

    #[test]
    fn decode_inverts_encode() {
        for l in [
            leg("LH", 500, (2025, 4, 1), "FRA", "MUC"),
            leg("LH", 600, (2025, 4, 2), "MUC", "PMI"),
            leg("BA3", 9999, (1999, 2, 28), "LHR", "JFK"),
            leg("ZZZ", 0, (2000, 1, 31), "ZZZ", "AAA"),
        ] {
            assert_eq!(decode_leg(&encode_leg(&l).unwrap()).unwrap(), l);
        }
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            encode_leg(&leg("L", 1, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::Range(RangeError::DesignatorLength("L".into())))
        );
        assert_eq!(
            encode_leg(&leg("LHAB", 1, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::Range(RangeError::DesignatorLength("LHAB".into())))
        );
        assert_eq!(
            encode_leg(&leg("LH", 10_000, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::Range(RangeError::FlightNumber(10_000)))
        );
        assert_eq!(
            encode_leg(&leg("LH", 1, (2025, 1, 1), "FRAN", "MUC")),
            Err(BagTagError::Range(RangeError::AirportLength("FRAN".into())))
        );
        assert_eq!(
            encode_leg(&leg("LH", -1, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::Range(RangeError::FlightNumber(-1)))
        );
        assert_eq!(
            encode_leg(&leg("LH", 70_000, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::Range(RangeError::FlightNumber(70_000)))
        );
        assert_eq!(
            encode_leg(&leg("LH ", 1, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::Range(RangeError::DesignatorLength("LH ".into())))
        );
        assert!(matches!(
            encode_leg(&leg("lh", 1, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::InvalidCharacter { ch: 'l', codeset: Codeset::Alpha })
        ));
        assert!(matches!(
            encode_leg(&leg("L1", 1, (2025, 1, 1), "FRA", "MUC")),
            Err(BagTagError::InvalidCharacter { ch: '1', codeset: Codeset::Alpha })
        ));
        assert!(matches!(
            encode_leg(&leg("LH", 1, (2025, 1, 1), "FR1", "MUC")),
            Err(BagTagError::InvalidCharacter { ch: '1', .. })
        ));
    }

    #[test]
    fn decode_rejects_bad_codes_and_dates() {
        let good = encode_leg(&leg("LH", 500, (2025, 4, 1), "FRA", "MUC")).unwrap();

        let mut bad_code = good;
        bad_code[0] |= 0xF8; // first designator code 31
        assert!(matches!(
            decode_leg(&bad_code),
            Err(BagTagError::InvalidCode { code: 31, codeset: Codeset::Alpha })
        ));

        let mut bad_month = good;
        bad_month[5] |= 0x0F; // month index 15
        assert!(matches!(
            decode_leg(&bad_month),
            Err(BagTagError::Range(RangeError::InvalidDate { month: 16, .. }))
        ));

        assert!(matches!(
            decode_leg(&good[..10]),
            Err(BagTagError::Range(RangeError::Truncated { .. }))
        ));
    }
}
