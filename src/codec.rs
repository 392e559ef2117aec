//! Bag tag record layout.
//!
//! ```text
//! [header: 1][license plate: 5]?[identifier: 16]?[flight leg: 11] x 1..=8
//! ```
//!
//! The encoder always fills a fixed-capacity buffer. Only the prefix whose
//! length follows from the header is meaningful; the rest is zero padding
//! which the decoder never looks at.

use tracing::debug;
use uuid::Uuid;

use crate::bits::{BitReader, BitWriter};
use crate::codeset::Codeset;
use crate::config::CodecConfig;
use crate::error::{RangeError, Result};
use crate::flight_leg::PackedLeg;
use crate::header::{TagHeader, IDENTIFIER_BYTES};
use crate::printable::{Base45, PrintableTransform};
use crate::types::BagTagRecord;

/// Number of digits in a license plate number.
pub const LICENSE_PLATE_DIGITS: usize = 10;

/// Output of [`Codec::encode`]: a fixed-capacity buffer and the length of
/// its meaningful prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTag {
    buffer: Vec<u8>,
    len: usize,
}

impl EncodedTag {
    /// The meaningful bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// The whole buffer, padding included.
    pub fn padded(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Drop the padding and keep the meaningful bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.len);
        self.buffer
    }
}

fn license_plate_codes(plate: &str) -> Result<Vec<u8>> {
    let count = plate.chars().count();
    if count != LICENSE_PLATE_DIGITS {
        return Err(RangeError::LicensePlateLength(count).into());
    }
    Codeset::Numeric.encode_str(plate)
}

/// Only the 36-character hyphenated form is accepted, in either case.
fn identifier_bytes(identifier: &str) -> Result<[u8; IDENTIFIER_BYTES]> {
    let invalid = || RangeError::Identifier(identifier.to_string());
    let uuid = Uuid::parse_str(identifier).map_err(|_| invalid())?;
    if !uuid
        .hyphenated()
        .to_string()
        .eq_ignore_ascii_case(identifier)
    {
        return Err(invalid().into());
    }
    Ok(*uuid.as_bytes())
}

/// Encoder/decoder for bag tags, parameterised over the printable
/// transform applied to the binary payload.
#[derive(Debug, Clone)]
pub struct Codec<T = Base45> {
    config: CodecConfig,
    transform: T,
}

impl Codec<Base45> {
    pub fn new(config: CodecConfig) -> Self {
        Self::with_transform(config, Base45)
    }
}

impl Default for Codec<Base45> {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl<T: PrintableTransform> Codec<T> {
    pub fn with_transform(config: CodecConfig, transform: T) -> Self {
        Self { config, transform }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serialize `record` into the binary layout.
    ///
    /// Every field is validated before the buffer is written, and nothing is
    /// returned on failure.
    pub fn encode(&self, record: &BagTagRecord) -> Result<EncodedTag> {
        let header = TagHeader::new(
            record.version,
            record.license_plate.is_some(),
            record.identifier.is_some(),
            record.flight_legs.len(),
        )?;
        self.config.check_fits(&header)?;

        let plate = record
            .license_plate
            .as_deref()
            .map(license_plate_codes)
            .transpose()?;
        let identifier = record
            .identifier
            .as_deref()
            .map(identifier_bytes)
            .transpose()?;
        let legs = record
            .flight_legs
            .iter()
            .map(PackedLeg::from_leg)
            .collect::<Result<Vec<_>>>()?;

        let mut buffer = vec![0u8; self.config.capacity];
        let mut writer = BitWriter::new(&mut buffer);
        writer.write_bits(header.pack() as u32, 8)?;
        if let Some(codes) = &plate {
            for &code in codes {
                writer.write_bits(code as u32, Codeset::Numeric.bit_width())?;
            }
        }
        if let Some(bytes) = &identifier {
            writer.write_bytes(bytes)?;
        }
        for leg in &legs {
            leg.write(&mut writer)?;
        }

        let len = header.encoded_len();
        debug_assert_eq!(writer.bits_written(), len * 8);
        debug!(
            len,
            capacity = self.config.capacity,
            legs = header.leg_count,
            license_plate = header.has_license_plate,
            identifier = header.has_identifier,
            "encoded bag tag"
        );
        Ok(EncodedTag { buffer, len })
    }

    /// Render an encoded tag as printable text, honouring `pad_printable`.
    pub fn to_printable(&self, tag: &EncodedTag) -> String {
        if self.config.pad_printable {
            self.transform.encode(tag.padded())
        } else {
            self.transform.encode(tag.as_bytes())
        }
    }

    pub fn encode_printable(&self, record: &BagTagRecord) -> Result<String> {
        Ok(self.to_printable(&self.encode(record)?))
    }

    /// Parse printable text back into a record. Transform errors are passed
    /// through unchanged.
    pub fn decode(&self, text: &str) -> Result<BagTagRecord> {
        let bytes = self.transform.decode(text)?;
        decode_bytes(&bytes)
    }
}

/// Decode the binary layout. Bytes past the header-derived length are
/// ignored.
pub fn decode_bytes(data: &[u8]) -> Result<BagTagRecord> {
    let first = *data.first().ok_or(RangeError::Truncated {
        needed: 1,
        available: 0,
    })?;
    let header = TagHeader::unpack(first);
    let needed = header.encoded_len();
    if data.len() < needed {
        return Err(RangeError::Truncated {
            needed,
            available: data.len(),
        }
        .into());
    }

    let mut reader = BitReader::from_slice(&data[1..needed]);
    let license_plate = if header.has_license_plate {
        let mut codes = [0u8; LICENSE_PLATE_DIGITS];
        for code in codes.iter_mut() {
            *code = reader.read_bits(Codeset::Numeric.bit_width())? as u8;
        }
        Some(Codeset::Numeric.decode_codes(&codes)?)
    } else {
        None
    };
    let identifier = if header.has_identifier {
        let bytes = reader.read_bytes(IDENTIFIER_BYTES)?;
        let uuid = Uuid::from_slice(&bytes)
            .map_err(|_| RangeError::Identifier(hex::encode(&bytes)))?;
        Some(uuid.hyphenated().to_string())
    } else {
        None
    };
    let flight_legs = (0..header.leg_count)
        .map(|_| PackedLeg::read(&mut reader)?.to_leg())
        .collect::<Result<Vec<_>>>()?;

    debug!(
        len = needed,
        trailing = data.len() - needed,
        legs = header.leg_count,
        "decoded bag tag"
    );
    Ok(BagTagRecord {
        version: header.version,
        license_plate,
        identifier,
        flight_legs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlightLeg;
    use crate::BagTagError;
    use chrono::NaiveDate;

    fn codec() -> Codec {
        Codec::default()
    }

    fn demo() -> BagTagRecord {
        BagTagRecord {
            version: 1,
            license_plate: Some("0220123456".into()),
            identifier: Some("676a1ff6-3750-4399-b427-a1d74e07f6c9".into()),
            flight_legs: vec![
                FlightLeg {
                    designator: "LH".into(),
                    flight_number: 500,
                    date_of_flight: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                    departure_airport: "FRA".into(),
                    arrival_airport: "MUC".into(),
                },
                FlightLeg {
                    designator: "LH".into(),
                    flight_number: 600,
                    date_of_flight: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
                    departure_airport: "MUC".into(),
                    arrival_airport: "PMI".into(),
                },
            ],
        }
    }

    #[test]
    fn demo_layout() {
        let tag = codec().encode(&demo()).unwrap();
        assert_eq!(tag.capacity(), 600);
        assert_eq!(tag.len(), 1 + 5 + 16 + 22);
        let bytes = tag.as_bytes();
        assert_eq!(bytes[0], 0x39);
        assert_eq!(&bytes[1..6], &[0x02, 0x20, 0x12, 0x34, 0x56]);
        assert_eq!(
            &bytes[6..22],
            &[
                0x67, 0x6a, 0x1f, 0xf6, 0x37, 0x50, 0x43, 0x99, 0xb4, 0x27, 0xa1, 0xd7, 0x4e,
                0x07, 0xf6, 0xc9
            ]
        );
        assert_eq!(
            &bytes[22..33],
            &[0x62, 0x00, 0x07, 0xD0, 0x7E, 0x93, 0x09, 0xA4, 0x16, 0xD4, 0x60]
        );
        assert!(tag.padded()[tag.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn roundtrip_through_printable() {
        let codec = codec();
        let text = codec.encode_printable(&demo()).unwrap();
        assert_eq!(codec.decode(&text).unwrap(), demo());
    }

    #[test]
    fn padded_printable_decodes_the_same() {
        let codec = Codec::new(CodecConfig {
            pad_printable: true,
            ..CodecConfig::default()
        });
        let text = codec.encode_printable(&demo()).unwrap();
        assert_eq!(codec.config().capacity, 600);
        assert_eq!(Base45.decode(&text).unwrap().len(), 600);
        assert_eq!(codec.decode(&text).unwrap(), demo());
    }

    #[test]
    fn optional_blocks_are_omitted() {
        let mut record = demo();
        record.license_plate = None;
        record.identifier = None;
        let tag = codec().encode(&record).unwrap();
        assert_eq!(tag.len(), 1 + 22);
        assert_eq!(tag.as_bytes()[0], 0x21);
        assert_eq!(decode_bytes(tag.as_bytes()).unwrap(), record);
    }

    #[test]
    fn license_plate_errors() {
        let mut record = demo();
        record.license_plate = Some("022012345".into());
        assert_eq!(
            codec().encode(&record),
            Err(BagTagError::Range(RangeError::LicensePlateLength(9)))
        );
        record.license_plate = Some("02201234X6".into());
        assert!(matches!(
            codec().encode(&record),
            Err(BagTagError::InvalidCharacter { ch: 'X', codeset: Codeset::Numeric })
        ));
    }

    #[test]
    fn identifier_must_parse() {
        let mut record = demo();
        record.identifier = Some("676a1ff6-3750-4399-b427".into());
        assert!(matches!(
            codec().encode(&record),
            Err(BagTagError::Range(RangeError::Identifier(_)))
        ));
    }

    #[test]
    fn identifier_must_be_hyphenated() {
        let mut record = demo();
        for spelling in [
            "676a1ff637504399b427a1d74e07f6c9",
            "{676a1ff6-3750-4399-b427-a1d74e07f6c9}",
            "urn:uuid:676a1ff6-3750-4399-b427-a1d74e07f6c9",
        ] {
            record.identifier = Some(spelling.into());
            assert_eq!(
                codec().encode(&record),
                Err(BagTagError::Range(RangeError::Identifier(spelling.into())))
            );
        }
        record.identifier = Some("676A1FF6-3750-4399-B427-A1D74E07F6C9".into());
        let tag = codec().encode(&record).unwrap();
        assert_eq!(decode_bytes(tag.as_bytes()).unwrap().identifier, demo().identifier);
    }

    #[test]
    fn leg_count_limits() {
        let mut record = demo();
        record.flight_legs = vec![record.flight_legs[0].clone(); 9];
        assert_eq!(
            codec().encode(&record),
            Err(BagTagError::Range(RangeError::FlightLegCount(9)))
        );
        record.flight_legs.clear();
        assert_eq!(
            codec().encode(&record),
            Err(BagTagError::Range(RangeError::FlightLegCount(0)))
        );
    }

    #[test]
    fn small_capacity_is_config_error() {
        let codec = Codec::new(CodecConfig {
            capacity: 16,
            ..CodecConfig::default()
        });
        assert!(matches!(codec.encode(&demo()), Err(BagTagError::Config(_))));
    }

    #[test]
    fn decode_rejects_bad_numeric_nibble() {
        let mut bytes = codec().encode(&demo()).unwrap().into_bytes();
        bytes[1] = 0xA0;
        assert_eq!(
            decode_bytes(&bytes),
            Err(BagTagError::InvalidCode {
                code: 10,
                codeset: Codeset::Numeric
            })
        );
    }

    #[test]
    fn decode_reports_truncation() {
        let bytes = codec().encode(&demo()).unwrap().into_bytes();
        assert_eq!(
            decode_bytes(&bytes[..40]),
            Err(BagTagError::Range(RangeError::Truncated {
                needed: 44,
                available: 40
            }))
        );
        assert!(matches!(
            decode_bytes(&[]),
            Err(BagTagError::Range(RangeError::Truncated { needed: 1, available: 0 }))
        ));
    }
}
