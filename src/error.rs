use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HzipError>;

#[derive(Error, Debug)]
pub enum HzipError {
    /// The input file is missing or cannot be read
    #[error("failed to read {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file cannot be created or committed
    #[error("failed to write {}: {source}", .path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Extraction from an empty priority queue. Never user-facing.
    #[error("extract_min called on an empty priority queue")]
    EmptyQueue,

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    /// The data bits ran out while the decoder was still inside the tree
    #[error("data section ended {depth} levels below the root after {consumed} bits")]
    DecodeUnderflow { consumed: usize, depth: usize },

    #[error("truncated input: {needed} bytes needed, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    #[error("byte {0:#04x} has no code in the table")]
    UnknownSymbol(u8),

    #[error("{section} section is {bits} bits long, more than a 32-bit header can describe")]
    SectionTooLong { section: &'static str, bits: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(#[from] bincode::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HzipError {
    /// Whether the error means the input is not a valid compressed file.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            HzipError::MalformedTree(_)
                | HzipError::MalformedMetadata(_)
                | HzipError::DecodeUnderflow { .. }
                | HzipError::TruncatedInput { .. }
                | HzipError::InvalidHeader(_)
        )
    }
}
