use std::collections::BTreeMap;

use crate::{
    bitstreams::{BinaryWriterBuilder, BitString},
    error::{HzipError, Result},
};

use super::{HuffmanNode, HuffmanTree};

/// Byte value to prefix code. Left edges are `0`, right edges `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
}

impl CodeTable {
    pub fn generate(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable::default();
        let mut path = BitString::new();

        table.walk(&tree.root, &mut path);

        table
    }

    fn walk(&mut self, node: &HuffmanNode, path: &mut BitString) {
        match node {
            HuffmanNode::Leaf { byte, .. } => {
                // a lone root leaf still needs a non-empty code
                let code = if path.is_empty() { BitString::from_iter([false]) } else { path.clone() };
                self.codes.entry(*byte).or_insert(code);
            }
            HuffmanNode::Internal { left, right, .. } => {
                path.push(false);
                self.walk(left, path);
                path.pop();

                path.push(true);
                self.walk(right, path);
                path.pop();
            }
        }
    }

    pub fn get(&self, byte: u8) -> Option<&BitString> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> + '_ {
        self.codes.iter().map(|(&b, code)| (b, code))
    }

    /// True when no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitString> = self.codes.values().collect();

        codes.iter().enumerate().all(|(i, a)| {
            codes.iter().enumerate().all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Number of bits `data` takes once encoded.
    pub fn encoded_len(&self, data: &[u8]) -> Result<usize> {
        data.iter().try_fold(0usize, |acc, &b| {
            self.get(b).map(|code| acc + code.len()).ok_or(HzipError::UnknownSymbol(b))
        })
    }

    /// Appends the code of every byte of `data`, in order.
    pub fn encode_into(&self, data: &[u8], writer: &mut BinaryWriterBuilder) -> Result<u64> {
        let mut written = 0;
        for &b in data {
            let code = self.get(b).ok_or(HzipError::UnknownSymbol(b))?;
            written += writer.push_bit_string(code);
        }
        Ok(written)
    }
}
