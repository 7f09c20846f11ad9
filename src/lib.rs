//! # parallel_huffman
//!
//! Huffman compression for byte buffers, with fork-join frequency counting and
//! codeword-aligned parallel decoding.
//!
//! A compressed buffer is the preorder-serialized tree, a newline, and the
//! encoded bits. By default each bit is one ASCII `'0'`/`'1'` byte; see
//! [`WireFormat`] for the packed alternative.
//!
//! ## Quick Start
//!
//! ```rust
//! use parallel_huffman::{compress, decompress};
//!
//! let compressed = compress(b"aaab", 2)?;
//! assert_eq!(compressed.payload, b"01b1a\n1110");
//!
//! let restored = decompress(&compressed.payload, 2)?;
//! assert_eq!(restored.buffer, b"aaab");
//! # Ok::<(), parallel_huffman::HuffmanError>(())
//! ```
//!
//! ## Configuring the codec
//!
//! ```rust
//! use parallel_huffman::{CodecConfig, HuffmanCodec, WireFormat};
//!
//! let codec = HuffmanCodec::new(
//!     CodecConfig::with_workers(4).with_wire_format(WireFormat::Packed),
//! );
//! let compressed = codec.compress(b"abracadabra")?;
//! let restored = codec.decompress(&compressed.payload)?;
//! assert_eq!(restored.buffer, b"abracadabra");
//! # Ok::<(), parallel_huffman::HuffmanError>(())
//! ```

pub mod code_table;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod metadata;

// Internal modules - not part of public API
mod compressed_data;
mod min_heap;

// Re-export main types for convenience
pub use code_table::{Code, CodeTable};
pub use config::{CodecConfig, WireFormat};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
pub use metadata::{CompressOutput, DecompressOutput, Timings};

/// Compress `buffer` with `worker_count` counting threads, ASCII payload.
pub fn compress(buffer: &[u8], worker_count: usize) -> Result<CompressOutput> {
    HuffmanCodec::new(CodecConfig::with_workers(worker_count)).compress(buffer)
}

/// Decompress an ASCII-payload buffer with `worker_count` decoding threads.
pub fn decompress(buffer: &[u8], worker_count: usize) -> Result<DecompressOutput> {
    HuffmanCodec::new(CodecConfig::with_workers(worker_count)).decompress(buffer)
}
