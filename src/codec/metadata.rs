use std::{
    ffi::OsString,
    path::{Component, Path},
};

use crate::{
    bitstreams::{BinaryReader, BitString},
    error::{HzipError, Result},
    utils::paths,
};

/// Original base name and extension of a compressed file, as the raw bytes
/// the file system handed out. The extension keeps its leading `.`, which
/// doubles as the separator once encoded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: Vec<u8>,
    pub extension: Vec<u8>,
}

impl FileMetadata {
    pub fn new(name: impl Into<Vec<u8>>, extension: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), extension: extension.into() }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(paths::base_name(path), paths::extension(path))
    }

    pub fn file_name(&self) -> OsString {
        let mut raw = Vec::with_capacity(self.name.len() + self.extension.len());
        raw.extend_from_slice(&self.name);
        raw.extend_from_slice(&self.extension);
        paths::os_string(raw)
    }

    /// Lossy rendering for logs and listings.
    pub fn display_name(&self) -> String {
        self.file_name().to_string_lossy().into_owned()
    }

    /// Every byte of the name then of the extension, 8 bits each.
    pub fn to_bits(&self) -> BitString {
        let mut bits = BitString::with_capacity(8 * (self.name.len() + self.extension.len()));
        for &b in self.name.iter().chain(self.extension.iter()) {
            bits.push_byte(b);
        }
        bits
    }

    /// Splits on the first `.`: a name that itself contains a dot moves its
    /// tail into the extension, `file_name` is unaffected.
    pub fn from_raw(raw: &[u8]) -> Self {
        let split = raw.iter().position(|&b| b == b'.').unwrap_or(raw.len());
        let (name, extension) = raw.split_at(split);

        Self::new(name, extension)
    }

    /// Reads a metadata section of exactly `bits` bits.
    pub fn decode(section: &[u8], bits: usize) -> Result<Self> {
        if bits % 8 != 0 {
            return Err(HzipError::MalformedMetadata(format!("{} bits is not a whole number of bytes", bits)));
        }

        let mut reader = BinaryReader::new(section, bits)?;
        let mut raw = Vec::with_capacity(bits / 8);
        while let Some(byte) = reader.read_int(8) {
            raw.push(byte as u8);
        }

        Ok(Self::from_raw(&raw))
    }

    /// The restored name must be a single plain path component, so that it
    /// cannot escape the output directory.
    pub fn validate(&self) -> Result<()> {
        let file_name = self.file_name();
        let mut components = Path::new(&file_name).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == file_name.as_os_str() => Ok(()),
            _ => Err(HzipError::MalformedMetadata(format!(
                "{:?} is not a plain file name",
                self.display_name()
            ))),
        }
    }
}
