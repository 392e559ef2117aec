//! Byte to printable text transform used for the barcode payload.
//!
//! The transform itself lives in the `base45` crate (RFC 9285). This module
//! only adapts it to the codec's error type and lets callers plug in a
//! different transform.

use crate::error::{BagTagError, Result};

/// Lossless, order preserving conversion between bytes and text.
pub trait PrintableTransform {
    fn encode(&self, data: &[u8]) -> String;
    fn decode(&self, text: &str) -> Result<Vec<u8>>;
}

/// Base45 alphabet, as used for QR alphanumeric mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base45;

impl PrintableTransform for Base45 {
    fn encode(&self, data: &[u8]) -> String {
        base45::encode(data)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        base45::decode(text).map_err(|e| BagTagError::Transform(e.to_string()))
    }
}

/// Render bytes with the default transform.
pub fn encode_to_printable(data: &[u8]) -> String {
    Base45.encode(data)
}

pub fn decode_from_printable(text: &str) -> Result<Vec<u8>> {
    Base45.decode(text)
}
