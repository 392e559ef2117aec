//! MSB-first bit field packing.
//!
//! Fields are written most significant bit first and follow each other
//! without gaps, so a field may end in the middle of one byte and continue
//! at the top of the next. Values wider than their declared width are
//! masked, never rejected. Range checks belong to the caller.

use crate::error::{RangeError, Result};

/// Largest supported field width.
pub const MAX_FIELD_BITS: u8 = 32;

fn mask(width: u8) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// Writes bit fields into a borrowed byte buffer.
#[derive(Debug)]
pub struct BitWriter<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Start writing at `bit_offset` instead of the first bit.
    pub fn at(data: &'a mut [u8], bit_offset: usize) -> Self {
        Self {
            data,
            pos: bit_offset,
        }
    }

    pub fn bits_written(&self) -> usize {
        self.pos
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        let byte = self.pos / 8;
        if byte >= self.data.len() {
            return Err(RangeError::BufferOverflow {
                offset: self.pos,
                capacity: self.data.len(),
            }
            .into());
        }
        let shift = 7 - (self.pos % 8);
        if bit {
            self.data[byte] |= 1 << shift;
        } else {
            self.data[byte] &= !(1 << shift);
        }
        self.pos += 1;
        Ok(())
    }

    /// Write the low `width` bits of `value`.
    pub fn write_bits(&mut self, value: u32, width: u8) -> Result<()> {
        debug_assert!(width <= MAX_FIELD_BITS);
        let width = width.min(MAX_FIELD_BITS);
        let needed = self.pos + width as usize;
        if needed > self.data.len() * 8 {
            return Err(RangeError::BufferOverflow {
                offset: self.pos,
                capacity: self.data.len(),
            }
            .into());
        }
        let value = value & mask(width);
        for i in (0..width).rev() {
            self.write_bit((value >> i) & 1 != 0)?;
        }
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &b in bytes {
            self.write_bits(b as u32, 8)?;
        }
        Ok(())
    }
}

/// Reads bit fields back out of a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn bits_read(&self) -> usize {
        self.pos
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        if self.pos / 8 >= self.data.len() {
            return Err(self.truncated(1));
        }
        let bit = ((self.data[self.pos / 8] >> (7 - (self.pos % 8))) & 1) != 0;
        self.pos += 1;
        Ok(bit)
    }

    pub fn read_bits(&mut self, width: u8) -> Result<u32> {
        debug_assert!(width <= MAX_FIELD_BITS);
        let width = width.min(MAX_FIELD_BITS);
        if self.pos + width as usize > self.data.len() * 8 {
            return Err(self.truncated(width as usize));
        }
        let mut value = 0u32;
        for _ in 0..width {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.read_bits(8)? as u8);
        }
        Ok(out)
    }

    fn truncated(&self, bits: usize) -> crate::BagTagError {
        RangeError::Truncated {
            needed: (self.pos + bits).div_ceil(8),
            available: self.data.len(),
        }
        .into()
    }
}

/// Pack `(value, width)` fields into the smallest byte vector holding them.
/// Unused bits of the final byte are zero.
pub fn pack_fields(fields: &[(u32, u8)]) -> Vec<u8> {
    let total: usize = fields.iter().map(|&(_, w)| w as usize).sum();
    let mut out = vec![0u8; total.div_ceil(8)];
    let mut writer = BitWriter::new(&mut out);
    for &(value, width) in fields {
        // The buffer is sized from the same widths, so this cannot overflow.
        if writer.write_bits(value, width).is_err() {
            break;
        }
    }
    out
}

/// Read fields of the given widths from the front of `data`.
pub fn unpack_fields(data: &[u8], widths: &[u8]) -> Result<Vec<u32>> {
    let mut reader = BitReader::from_slice(data);
    widths.iter().map(|&w| reader.read_bits(w)).collect()
}
