use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::error::{HzipError, Result};

/// An owned sequence of bits, rendered as `'0'`/`'1'` text.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { bits: Vec::with_capacity(capacity) }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline(always)]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> Option<bool> {
        self.bits.get(i).copied()
    }

    /// Appends the 8 bits of `byte`, most significant first.
    pub fn push_byte(&mut self, byte: u8) {
        for shift in (0..8).rev() {
            self.bits.push((byte >> shift) & 1 == 1);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.bits.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString({})", self)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid bit character {0:?}")]
pub struct ParseBitStringError(pub char);

impl FromStr for BitString {
    type Err = ParseBitStringError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(ParseBitStringError(other)),
            })
            .collect()
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self { bits: iter.into_iter().collect() }
    }
}

impl Extend<bool> for BitString {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

/// A packed, zero-padded section together with its exact bit length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryWriter {
    pub os: Box<[u8]>,
    pub written_bits: usize,
}

pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    current: u64,
    free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    /// Flushes the partial byte, if any. The unused low bits stay zero, so
    /// `(8 - written_bits % 8) % 8` padding bits are added and an aligned
    /// stream gets none.
    pub fn build(mut self) -> BinaryWriter {
        if self.free != 8 {
            self.write(self.current);
        }

        BinaryWriter {
            os: self.os.into_boxed_slice(),
            written_bits: self.written_bits,
        }
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Packs a whole bit string in one go.
    pub fn pack(bits: &BitString) -> BinaryWriter {
        let mut writer = Self::new();
        writer.push_bit_string(bits);
        writer.build()
    }

    #[inline(always)]
    fn write(&mut self, b: u64) {
        self.os.push(b as u8);
    }

    #[inline(always)]
    fn write_in_current(&mut self, b: u64, len: u64) -> u64 {
        debug_assert!(len as usize <= self.free);

        self.free -= len as usize;
        self.current |= (b & ((1 << len) - 1)) << self.free;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len as usize;
        len
    }

    /// Writes the `len` low bits of `x`, most significant first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> u64 {
        assert!(len <= 64, "Cannot write {} bits from an integer", len);

        let mut remaining = len;
        while remaining != 0 {
            let chunk = remaining.min(self.free as u64);
            remaining -= chunk;
            self.write_in_current(x >> remaining, chunk);
        }

        len
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) -> u64 {
        self.write_in_current(bit as u64, 1)
    }

    pub fn push_bit_string(&mut self, bits: &BitString) -> u64 {
        for bit in bits.iter() {
            self.push_bit(bit);
        }
        bits.len() as u64
    }
}

/// Reads at most `limit` bits from a packed section. The padding after the
/// last declared bit is never returned.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BinaryReader<'a> {
    is: &'a [u8],
    position: usize,
    pub read_bits: usize,
    current: u64,
    fill: usize,
    limit: usize,
}

impl<'a> BinaryReader<'a> {
    /// Number of bytes occupied by a section of `bits` bits.
    #[inline(always)]
    pub fn bytes_for(bits: usize) -> usize {
        (bits + 7) / 8
    }

    pub fn new(input_stream: &'a [u8], limit: usize) -> Result<Self> {
        let needed = Self::bytes_for(limit);
        if needed > input_stream.len() {
            return Err(HzipError::TruncatedInput { needed, available: input_stream.len() });
        }

        Ok(BinaryReader {
            is: &input_stream[..needed],
            position: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
            limit,
        })
    }

    /// Unpacks exactly `bits` bits from `bytes`.
    pub fn unpack(bytes: &'a [u8], bits: usize) -> Result<BitString> {
        let mut reader = Self::new(bytes, bits)?;
        let mut out = BitString::with_capacity(bits);
        while let Some(bit) = reader.read_bit() {
            out.push(bit);
        }
        Ok(out)
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.limit - self.read_bits
    }

    #[inline(always)]
    fn read(&mut self) -> Option<u64> {
        let byte = *self.is.get(self.position)?;
        self.position += 1;
        Some(byte as u64)
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.read_bits >= self.limit {
            return None;
        }

        if self.fill == 0 {
            self.current = self.read()?;
            self.fill = 8;
        }

        self.fill -= 1;
        self.read_bits += 1;
        Some((self.current >> self.fill) & 1 == 1)
    }

    /// Reads `len` bits as an integer, most significant first. Returns `None`
    /// without consuming anything if fewer than `len` bits remain.
    pub fn read_int(&mut self, len: u64) -> Option<u64> {
        assert!(len <= 64, "Cannot read {} bits into an integer", len);

        if (len as usize) > self.remaining() {
            return None;
        }

        let mut x = 0u64;
        for _ in 0..len {
            x = (x << 1) | self.read_bit()? as u64;
        }
        Some(x)
    }
}

#[cfg(test)]
mod tests;
