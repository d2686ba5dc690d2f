use serde::{Deserialize, Serialize};

use crate::{
    bitstreams::BinaryReader,
    error::{HzipError, Result},
};

/// Size of the serialized header: three little-endian `u32`s.
pub const HEADER_LEN: usize = 12;

/// Bit lengths, not byte lengths, of the three sections that follow the
/// header. Padding bits are never counted.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub info_bit_length: u32,
    pub tree_bit_length: u32,
    pub data_bit_length: u32,
}

fn to_u32(section: &'static str, bits: usize) -> Result<u32> {
    u32::try_from(bits).map_err(|_| HzipError::SectionTooLong { section, bits })
}

impl FileHeader {
    pub fn new(info_bits: usize, tree_bits: usize, data_bits: usize) -> Result<Self> {
        Ok(FileHeader {
            info_bit_length: to_u32("metadata", info_bits)?,
            tree_bit_length: to_u32("tree", tree_bits)?,
            data_bit_length: to_u32("data", data_bits)?,
        })
    }

    /// Appends the 12 header bytes to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let before = out.len();
        bincode::serialize_into(&mut *out, self)?;
        debug_assert_eq!(out.len() - before, HEADER_LEN);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_LEN);
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(HzipError::TruncatedInput { needed: HEADER_LEN, available: bytes.len() });
        }

        Ok(bincode::deserialize(&bytes[..HEADER_LEN])?)
    }

    /// Bytes occupied by the three packed sections.
    pub fn body_len(&self) -> usize {
        BinaryReader::bytes_for(self.info_bit_length as usize)
            + BinaryReader::bytes_for(self.tree_bit_length as usize)
            + BinaryReader::bytes_for(self.data_bit_length as usize)
    }

    /// Size of a well-formed file carrying this header.
    pub fn file_len(&self) -> usize {
        HEADER_LEN + self.body_len()
    }
}
