//! Error handling for the Huffman codec
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! is [`HuffmanError`]. Structural problems found while decoding are fatal and
//! are never silently recovered.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for compression and decompression
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The source file could not be opened
    #[error("input not found: {}", path.display())]
    InputNotFound {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A tree was requested for a zero-length buffer
    #[error("empty input: nothing to encode")]
    EmptyInput,

    /// The serialized tree holds an unknown marker, ends early, or is otherwise invalid
    #[error("malformed tree at byte {offset}: {reason}")]
    MalformedTree {
        /// Byte offset into the compressed buffer
        offset: usize,
        /// What was wrong at that offset
        reason: &'static str,
    },

    /// The tree was not followed by the newline delimiter
    #[error("missing delimiter between tree and payload")]
    MissingDelimiter,

    /// The bit sequence ended in the middle of a codeword
    #[error("truncated payload: {bit_len} bits do not end on a codeword boundary")]
    TruncatedPayload {
        /// Number of bits that were available
        bit_len: usize,
    },

    /// A payload byte or bit that cannot appear in a well-formed stream
    #[error("malformed payload at position {position}: unexpected value {byte:#04x}")]
    MalformedPayload {
        /// Byte or bit position inside the payload
        position: usize,
        /// Offending value
        byte: u8,
    },

    /// Encode-time lookup miss: the table and the buffer came from different sources
    #[error("symbol {0:#04x} has no code in the table")]
    UnknownSymbol(u8),

    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A worker thread panicked before reaching the join barrier
    #[error("worker thread panicked")]
    WorkerPanicked,

    /// I/O failure while reading or writing files
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HuffmanError {
    pub(crate) fn malformed_tree(offset: usize, reason: &'static str) -> Self {
        HuffmanError::MalformedTree { offset, reason }
    }

    /// True for errors caused by a structurally invalid compressed stream.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            HuffmanError::MalformedTree { .. }
                | HuffmanError::MissingDelimiter
                | HuffmanError::TruncatedPayload { .. }
                | HuffmanError::MalformedPayload { .. }
        )
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, HuffmanError>;
