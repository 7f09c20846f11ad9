//! Codec configuration

use std::num::NonZeroUsize;
use std::thread;

use crate::error::{HuffmanError, Result};

/// Layout of the encoded bit sequence after the tree delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// One ASCII `'0'` or `'1'` byte per bit. Human-inspectable and
    /// byte-compatible with the classic tool output.
    #[default]
    Ascii,
    /// Eight bits per byte, MSB first, preceded by a little-endian `u64`
    /// holding the exact bit length.
    Packed,
}

/// Configuration for a [`HuffmanCodec`](crate::HuffmanCodec)
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Number of worker threads for counting and decoding
    pub worker_count: usize,
    /// Payload layout; decoder and encoder must agree
    pub wire_format: WireFormat,
    /// Inputs shorter than this are processed by a single worker
    pub min_parallel_len: usize,
    /// Also run and time the sequential path as a baseline
    pub measure_baseline: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            worker_count: default_workers(),
            wire_format: WireFormat::Ascii,
            min_parallel_len: 0,
            measure_baseline: true,
        }
    }
}

impl CodecConfig {
    /// Single worker, no baseline run
    pub fn sequential() -> Self {
        Self {
            worker_count: 1,
            measure_baseline: false,
            ..Self::default()
        }
    }

    /// Default configuration with an explicit worker count
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Self::default()
        }
    }

    /// Packed payload, no baseline run
    pub fn compact() -> Self {
        Self {
            wire_format: WireFormat::Packed,
            measure_baseline: false,
            ..Self::default()
        }
    }

    pub fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }

    pub fn with_min_parallel_len(mut self, min_parallel_len: usize) -> Self {
        self.min_parallel_len = min_parallel_len;
        self
    }

    pub fn with_baseline(mut self, measure_baseline: bool) -> Self {
        self.measure_baseline = measure_baseline;
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(HuffmanError::InvalidConfig(
                "worker_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Workers to use for an input of `len` units
    pub(crate) fn effective_workers(&self, len: usize) -> usize {
        if len < self.min_parallel_len {
            1
        } else {
            self.worker_count.max(1)
        }
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
