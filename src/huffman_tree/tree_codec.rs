use crate::{
    bitstreams::BitString,
    error::{HzipError, Result},
};

use super::{HuffmanNode, HuffmanTree};

const LEAF: bool = false;
const INTERNAL: bool = true;

/// A tree over byte symbols has at most 256 leaves, hence at most 255 levels.
const MAX_DEPTH: usize = 255;

impl HuffmanTree {
    /// Pre-order encoding: `0` + 8-bit value for a leaf, `1` followed by the
    /// left and right subtrees for an internal node.
    pub fn serialize(&self) -> BitString {
        let mut bits = BitString::new();
        write_node(&self.root, &mut bits);
        bits
    }

    /// Number of bits [`serialize`](HuffmanTree::serialize) produces.
    pub fn serialized_len(&self) -> usize {
        // 9 bits per leaf, 1 per internal node
        let leaves = self.leaf_count();
        9 * leaves + (leaves - 1)
    }

    /// Rebuilds a tree from `bits`, starting at `*cursor` and leaving the
    /// cursor just past the last consumed bit. Leaf weights are set to 0.
    pub fn deserialize(bits: &BitString, cursor: &mut usize) -> Result<HuffmanTree> {
        let mut seen = [false; 256];
        let root = read_node(bits, cursor, 0, &mut seen)?;
        Ok(HuffmanTree { root })
    }
}

fn write_node(node: &HuffmanNode, bits: &mut BitString) {
    match node {
        HuffmanNode::Leaf { byte, .. } => {
            bits.push(LEAF);
            bits.push_byte(*byte);
        }
        HuffmanNode::Internal { left, right, .. } => {
            bits.push(INTERNAL);
            write_node(left, bits);
            write_node(right, bits);
        }
    }
}

fn next_bit(bits: &BitString, cursor: &mut usize) -> Result<bool> {
    let bit = bits.get(*cursor).ok_or_else(|| {
        HzipError::MalformedTree(format!("representation ends at bit {}", *cursor))
    })?;
    *cursor += 1;
    Ok(bit)
}

fn read_node(bits: &BitString, cursor: &mut usize, depth: usize, seen: &mut [bool; 256]) -> Result<HuffmanNode> {
    if next_bit(bits, cursor)? == INTERNAL {
        if depth >= MAX_DEPTH {
            return Err(HzipError::MalformedTree(format!("tree deeper than {} levels", MAX_DEPTH)));
        }

        let left = read_node(bits, cursor, depth + 1, seen)?;
        let right = read_node(bits, cursor, depth + 1, seen)?;

        return Ok(HuffmanNode::merge(left, right));
    }

    let mut byte = 0u8;
    for _ in 0..8 {
        byte = (byte << 1) | next_bit(bits, cursor)? as u8;
    }

    if std::mem::replace(&mut seen[byte as usize], true) {
        return Err(HzipError::MalformedTree(format!("byte {:#04x} appears in more than one leaf", byte)));
    }

    Ok(HuffmanNode::leaf(byte, 0))
}
