pub mod code_table;
pub mod tree_codec;

use crate::{
    error::Result,
    frequency::FrequencyMap,
    priority_queue::{MinPriorityQueue, Weighted},
};

pub use code_table::CodeTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        byte: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(byte: u8, weight: u64) -> Self {
        HuffmanNode::Leaf { byte, weight }
    }

    /// Joins two subtrees; `a` goes left, `b` goes right.
    pub fn merge(a: Self, b: Self) -> Self {
        HuffmanNode::Internal {
            weight: a.weight() + b.weight(),
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    /// Structural equality that ignores weights. Deserialized trees carry
    /// zero weights, so this is the comparison that survives a round trip.
    pub fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (HuffmanNode::Leaf { byte: a, .. }, HuffmanNode::Leaf { byte: b, .. }) => a == b,
            (
                HuffmanNode::Internal { left: l1, right: r1, .. },
                HuffmanNode::Internal { left: l2, right: r2, .. },
            ) => l1.same_shape(l2) && r1.same_shape(r2),
            _ => false,
        }
    }
}

impl Weighted for HuffmanNode {
    #[inline(always)]
    fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffmanNode,
}

impl HuffmanTree {
    /// Seeds a queue with one leaf per distinct byte, in ascending byte order.
    pub fn seed_queue(frequencies: &FrequencyMap) -> MinPriorityQueue<HuffmanNode> {
        frequencies.iter().map(|(byte, count)| HuffmanNode::leaf(byte, count)).collect()
    }

    /// Merges the two lightest nodes until one is left. A queue holding a
    /// single leaf yields that leaf as the root.
    pub fn build(mut queue: MinPriorityQueue<HuffmanNode>) -> Result<Self> {
        while queue.len() > 1 {
            let a = queue.extract_min()?;
            let b = queue.extract_min()?;

            queue.insert(HuffmanNode::merge(a, b));
        }

        let root = queue.extract_min()?;

        Ok(HuffmanTree { root })
    }

    pub fn from_frequencies(frequencies: &FrequencyMap) -> Result<Self> {
        Self::build(Self::seed_queue(frequencies))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyMap::from_bytes(bytes))
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 1,
                HuffmanNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &HuffmanNode) -> usize {
            match node {
                HuffmanNode::Leaf { .. } => 0,
                HuffmanNode::Internal { left, right, .. } => 1 + depth(left).max(depth(right)),
            }
        }
        depth(&self.root)
    }

    pub fn code_table(&self) -> CodeTable {
        CodeTable::generate(self)
    }

    pub fn same_shape(&self, other: &HuffmanTree) -> bool {
        self.root.same_shape(&other.root)
    }
}
