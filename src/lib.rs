//! Binary codec for airline bag tags.
//!
//! A [`BagTagRecord`] (optional license plate number, optional UUID and one
//! to eight flight legs) is packed into a compact bit layout and then turned
//! into Base45 text for a 2D barcode. [`decode`] reverses both steps.
//!
//! ```
//! use bagtag::{decode, encode, encode_to_printable, BagTagRecord};
//!
//! let record: BagTagRecord = serde_json::from_str(r#"{
//!     "version": 1,
//!     "lpn": "0220123456",
//!     "flights": [{
//!         "designator": "LH",
//!         "flightNumber": 500,
//!         "dateOfFlight": "2025-04-01",
//!         "departureAirport": "FRA",
//!         "arrivalAirport": "MUC"
//!     }]
//! }"#).unwrap();
//!
//! let tag = encode(&record).unwrap();
//! assert_eq!(tag.len(), 1 + 5 + 11);
//! let text = encode_to_printable(tag.as_bytes());
//! assert_eq!(decode(&text).unwrap(), record);
//! ```

pub mod bits;
pub mod codec;
pub mod codeset;
pub mod config;
pub mod error;
pub mod flight_leg;
pub mod header;
pub mod io_utils;
pub mod printable;
pub mod types;

pub use bits::{pack_fields, unpack_fields, BitReader, BitWriter};
pub use codec::{decode_bytes, Codec, EncodedTag};
pub use codeset::Codeset;
pub use config::CodecConfig;
pub use error::{BagTagError, RangeError, Result};
pub use flight_leg::{decode_leg, encode_leg};
pub use header::TagHeader;
pub use printable::{decode_from_printable, encode_to_printable, Base45, PrintableTransform};
pub use types::{BagTagRecord, FlightLeg};

/// Encode `record` with the default configuration.
pub fn encode(record: &BagTagRecord) -> Result<EncodedTag> {
    Codec::new(CodecConfig::default()).encode(record)
}

/// Decode Base45 text produced from an encoded tag.
pub fn decode(text: &str) -> Result<BagTagRecord> {
    decode_bytes(&decode_from_printable(text)?)
}
