//! Fixed character tables used to squeeze text fields below eight bits.
//!
//! Each codeset is a total bijection between its character domain and the
//! contiguous code range `0..len`. The code of a character is its index in
//! the table.

use std::fmt;

use crate::error::{BagTagError, Result};

const NUMERIC: &[u8; 10] = b"0123456789";
const ALPHA: &[u8; 27] = b" ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHA_NUMERIC: &[u8; 37] = b" ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codeset {
    /// `0`-`9`, codes 0-9, nibble packed.
    Numeric,
    /// Space and `A`-`Z`, codes 0-26.
    Alpha,
    /// Space, `A`-`Z` and `0`-`9`, codes 0-36.
    AlphaNumeric,
}

impl Codeset {
    fn table(self) -> &'static [u8] {
        match self {
            Codeset::Numeric => NUMERIC,
            Codeset::Alpha => ALPHA,
            Codeset::AlphaNumeric => ALPHA_NUMERIC,
        }
    }

    /// Number of bits one code occupies in the packed layout.
    pub fn bit_width(self) -> u8 {
        match self {
            Codeset::Numeric => 4,
            Codeset::Alpha => 5,
            Codeset::AlphaNumeric => 6,
        }
    }

    /// Number of characters in the domain.
    pub fn len(self) -> usize {
        self.table().len()
    }

    pub fn encode(self, ch: char) -> Result<u8> {
        // Every table is ASCII, so anything wider can never match.
        let found = u8::try_from(ch)
            .ok()
            .and_then(|b| self.table().iter().position(|&c| c == b));
        match found {
            Some(code) => Ok(code as u8),
            None => Err(BagTagError::InvalidCharacter { ch, codeset: self }),
        }
    }

    pub fn decode(self, code: u8) -> Result<char> {
        self.table()
            .get(code as usize)
            .map(|&b| b as char)
            .ok_or(BagTagError::InvalidCode {
                code,
                codeset: self,
            })
    }

    /// Encode every character of `text`, failing on the first one outside
    /// the domain.
    pub fn encode_str(self, text: &str) -> Result<Vec<u8>> {
        text.chars().map(|ch| self.encode(ch)).collect()
    }

    pub fn decode_codes(self, codes: &[u8]) -> Result<String> {
        codes.iter().map(|&code| self.decode(code)).collect()
    }
}

impl fmt::Display for Codeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Codeset::Numeric => "Numeric (0-9)",
            Codeset::Alpha => "Alpha (A-Z)",
            Codeset::AlphaNumeric => "Alpha Numeric (A-Z, 0-9)",
        };
        f.write_str(name)
    }
}
