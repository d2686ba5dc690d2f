//! Static Huffman compression of single files into the `.hzip` format.
//!
//! A `.hzip` file is a 12-byte header holding three little-endian `u32` bit
//! lengths, followed by three byte-aligned, zero-padded sections: the
//! original file name, the pre-order serialized tree, and the encoded data.

pub mod bitstreams;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod huffman_tree;
pub mod priority_queue;
pub mod properties;
pub mod utils;

pub use codec::{compress, compress_bytes, decompress, decompress_bytes, inspect, Decompressed, FileHeader, FileMetadata};
pub use error::{HzipError, Result};
pub use huffman_tree::{CodeTable, HuffmanNode, HuffmanTree};
pub use properties::CodecProperties;
