//! Results and timing metadata returned by the codec.

use std::time::Duration;

/// Wall-clock timings of the sequential baseline and the parallel path.
///
/// For compression these cover frequency counting; for decompression they
/// cover payload decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timings {
    /// `None` when the baseline run was disabled
    pub sequential: Option<Duration>,
    pub parallel: Duration,
}

impl Timings {
    pub fn sequential_ms(&self) -> Option<f64> {
        self.sequential.map(duration_ms)
    }

    pub fn parallel_ms(&self) -> f64 {
        duration_ms(self.parallel)
    }

    /// Sequential time divided by parallel time.
    pub fn speedup(&self) -> Option<f64> {
        let sequential = self.sequential?;
        if self.parallel.is_zero() {
            return None;
        }
        Some(sequential.as_secs_f64() / self.parallel.as_secs_f64())
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

#[derive(Debug, Clone)]
pub struct CompressOutput {
    pub payload: Vec<u8>,
    pub timings: Timings,
    pub original_len: usize,
    /// Distinct symbols in the input
    pub symbol_count: usize,
}

impl CompressOutput {
    /// Compressed size over original size; `None` for empty input.
    pub fn compression_ratio(&self) -> Option<f64> {
        if self.original_len == 0 {
            return None;
        }
        Some(self.payload.len() as f64 / self.original_len as f64)
    }
}

#[derive(Debug, Clone)]
pub struct DecompressOutput {
    pub buffer: Vec<u8>,
    pub timings: Timings,
}
