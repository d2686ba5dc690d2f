use std::{collections::BTreeMap, io::{self, BufReader, Read}};

/// Occurrence count of every byte value seen in a source, keyed by byte.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes `reader` to its end and counts every byte.
    pub fn sample<R: Read>(reader: R) -> io::Result<Self> {
        let mut reader = BufReader::new(reader);
        let mut buf = [0u8; 8192];
        let mut freq = Self::new();

        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => freq.record(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(freq)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut freq = Self::new();
        freq.record(bytes);
        freq
    }

    fn record(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.counts.entry(b).and_modify(|count| *count += 1).or_insert(1);
        }
    }

    pub fn get(&self, byte: u8) -> Option<u64> {
        self.counts.get(&byte).copied()
    }

    /// Number of distinct byte values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(byte, count)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&b, &c)| (b, c))
    }
}

#[cfg(test)]
mod tests;
