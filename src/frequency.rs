//! Symbol frequency counting
//!
//! The parallel path is a fork-join: the input is cut into contiguous slices,
//! every worker fills a private table for its slice, and the partial tables are
//! folded into the result on the calling thread once all workers have joined.
//! No table is ever shared between threads while it is being written.

use std::ops::Range;
use std::thread;

use crate::error::{HuffmanError, Result};

const ALPHABET: usize = 256;

/// Per-symbol occurrence counts of a byte buffer
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; ALPHABET],
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; ALPHABET],
        }
    }

    /// Count every byte of `data` on the calling thread.
    pub fn count(data: &[u8]) -> Self {
        let mut table = FrequencyTable::new();
        table.add_bytes(data);
        table
    }

    /// Count `data` with `workers` threads.
    ///
    /// The result is identical to [`FrequencyTable::count`] for every worker
    /// count. A worker count of one skips thread creation entirely.
    pub fn count_parallel(data: &[u8], workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(HuffmanError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        if workers == 1 {
            return Ok(Self::count(data));
        }

        let ranges = partition(data.len(), workers);
        log::trace!("counting {} bytes over {} slices", data.len(), ranges.len());

        let partials: Vec<Result<FrequencyTable>> = thread::scope(|scope| {
            let handles: Vec<_> = ranges
                .iter()
                .map(|range| {
                    let slice = &data[range.clone()];
                    scope.spawn(move || FrequencyTable::count(slice))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| HuffmanError::WorkerPanicked))
                .collect()
        });

        let mut table = FrequencyTable::new();
        for partial in partials {
            table.merge(&partial?);
        }
        Ok(table)
    }

    fn add_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Accumulate another table into this one.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += *theirs;
        }
    }

    pub fn get(&self, symbol: u8) -> usize {
        self.counts[symbol as usize]
    }

    /// Sum of all counts; equals the length of the counted input.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }

    /// Non-zero `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(u8, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, usize)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (symbol, count) in iter {
            table.counts[symbol as usize] += count;
        }
        table
    }
}

/// Split `len` items into `parts` contiguous ranges.
///
/// Every range but the last has `len / parts` items; the last one absorbs the
/// remainder. Ranges cover `0..len` exactly and in order.
pub(crate) fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let slice = len / parts;
    (0..parts)
        .map(|i| {
            let start = i * slice;
            let end = if i == parts - 1 { len } else { start + slice };
            start..end
        })
        .collect()
}
