use thiserror::Error;

use crate::codeset::Codeset;

/// Length and numeric range violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// License plate number is not exactly ten characters.
    #[error("license plate number has {0} characters, expected 10")]
    LicensePlateLength(usize),

    /// Identifier did not parse into exactly 16 bytes.
    #[error("identifier {0:?} does not yield 16 bytes")]
    Identifier(String),

    /// Airline designator is not two or three characters, or pads the
    /// third position with an explicit space.
    #[error("flight designator {0:?} must be 2 or 3 characters without padding")]
    DesignatorLength(String),

    /// Flight number outside 0-9999.
    #[error("flight number {0} is not in allowed range (0-9999)")]
    FlightNumber(i64),

    /// Airport code is not exactly three characters.
    #[error("airport code {0:?} does not have 3 characters")]
    AirportLength(String),

    /// Number of flight legs outside 1-8.
    #[error("{0} flight legs given, expected 1-8")]
    FlightLegCount(usize),

    /// Version does not fit the 3-bit header field.
    #[error("version {0} does not fit in 3 bits")]
    Version(u8),

    /// Input ended before the data announced by the header.
    #[error("input truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// Write past the end of the output buffer.
    #[error("bit field at offset {offset} overflows a {capacity}-byte buffer")]
    BufferOverflow { offset: usize, capacity: usize },

    /// Decoded year/month/day is not a calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a valid date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BagTagError {
    /// Length or numeric range violation.
    #[error("range error: {0}")]
    Range(#[from] RangeError),

    /// Character outside the codeset while encoding.
    #[error("{ch:?} is not a supported character in {codeset} codeset")]
    InvalidCharacter { ch: char, codeset: Codeset },

    /// Code value outside the codeset while decoding.
    #[error("{code} is not a valid code in {codeset} codeset")]
    InvalidCode { code: u8, codeset: Codeset },

    /// Failure reported by the printable transform, message unchanged.
    #[error("printable transform error: {0}")]
    Transform(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BagTagError>;
