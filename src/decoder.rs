//! Bit sequence decoding.
//!
//! The parallel decoder never cuts the bit sequence at an arbitrary offset. A
//! sequential pre-pass walks the tree once, counting codewords, and records a
//! split point at the first codeword boundary at or past each even share of
//! the input. Each worker then decodes one root-aligned span with its own walk
//! pointer and output buffer, and the spans are concatenated in order after
//! the join.

use std::ops::Range;
use std::thread;

use bitvec::prelude::*;

use crate::error::{HuffmanError, Result};
use crate::frequency::partition;
use crate::hufftree::{HuffNode, HuffmanTree};

/// Root-aligned slice of the bit sequence handed to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub bits: Range<usize>,
    pub symbols: usize,
}

/// Walk `bits` from the root, calling `on_symbol(end, byte)` after every
/// complete codeword. `end` is the absolute bit position just past the
/// codeword; `offset` is the absolute position of `bits[0]`.
fn walk<F>(
    tree: &HuffmanTree,
    bits: &BitSlice<u8, Msb0>,
    offset: usize,
    mut on_symbol: F,
) -> Result<()>
where
    F: FnMut(usize, u8),
{
    let root = tree.root();

    if let HuffNode::Leaf { byte, .. } = tree.node(root) {
        // single-symbol tree: every codeword is one `0` bit
        for (i, bit) in bits.iter().by_vals().enumerate() {
            if bit {
                return Err(HuffmanError::MalformedPayload {
                    position: offset + i,
                    byte: 1,
                });
            }
            on_symbol(offset + i + 1, *byte);
        }
        return Ok(());
    }

    let mut node = root;
    for (i, bit) in bits.iter().by_vals().enumerate() {
        node = match tree.node(node) {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    *right
                } else {
                    *left
                }
            }
            HuffNode::Leaf { .. } => unreachable!("walk pointer only rests on internal nodes"),
        };
        if let HuffNode::Leaf { byte, .. } = tree.node(node) {
            on_symbol(offset + i + 1, *byte);
            node = root;
        }
    }

    if node != root {
        return Err(HuffmanError::TruncatedPayload {
            bit_len: offset + bits.len(),
        });
    }
    Ok(())
}

fn decode_span(
    tree: &HuffmanTree,
    bits: &BitSlice<u8, Msb0>,
    offset: usize,
    capacity: usize,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(capacity);
    walk(tree, bits, offset, |_, byte| out.push(byte))?;
    Ok(out)
}

/// Decode the whole bit sequence on the calling thread.
pub fn decode(tree: &HuffmanTree, bits: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
    decode_span(tree, bits, 0, bits.len() / 2)
}

/// Find up to `workers` root-aligned spans covering `bits`.
///
/// Also validates the tail of the sequence, so a truncated payload fails here
/// before any worker is started.
pub fn split_points(
    tree: &HuffmanTree,
    bits: &BitSlice<u8, Msb0>,
    workers: usize,
) -> Result<Vec<Span>> {
    let len = bits.len();
    let targets: Vec<usize> = partition(len, workers)
        .into_iter()
        .map(|r| r.end)
        .take(workers.saturating_sub(1))
        .collect();

    let mut spans = Vec::with_capacity(workers);
    let mut next = 0usize;
    let mut start = 0usize;
    let mut symbols = 0usize;

    walk(tree, bits, 0, |end, _| {
        symbols += 1;
        if next < targets.len() && end >= targets[next] {
            spans.push(Span {
                bits: start..end,
                symbols,
            });
            start = end;
            symbols = 0;
            while next < targets.len() && targets[next] <= end {
                next += 1;
            }
        }
    })?;

    if start < len {
        spans.push(Span {
            bits: start..len,
            symbols,
        });
    }
    Ok(spans)
}

/// Decode with up to `workers` threads over codeword-aligned spans.
///
/// Produces exactly the output of [`decode`] for every worker count.
pub fn decode_parallel(
    tree: &HuffmanTree,
    bits: &BitSlice<u8, Msb0>,
    workers: usize,
) -> Result<Vec<u8>> {
    if workers <= 1 {
        return decode(tree, bits);
    }

    let spans = split_points(tree, bits, workers)?;
    let total: usize = spans.iter().map(|s| s.symbols).sum();
    log::debug!(
        "decoding {} bits as {} spans for {} workers",
        bits.len(),
        spans.len(),
        workers
    );

    let parts: Vec<Result<Vec<u8>>> = thread::scope(|scope| {
        let handles: Vec<_> = spans
            .iter()
            .map(|span| {
                let slice = &bits[span.bits.clone()];
                let offset = span.bits.start;
                let capacity = span.symbols;
                scope.spawn(move || decode_span(tree, slice, offset, capacity))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| HuffmanError::WorkerPanicked)
                    .and_then(|part| part)
            })
            .collect()
    });

    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(&part?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_table::CodeTable;
    use crate::encoder::encode;

    fn encoded(text: &[u8]) -> (HuffmanTree, BitVec<u8, Msb0>) {
        let tree = HuffmanTree::from_bytes(text).unwrap();
        let table = CodeTable::from_tree(&tree);
        let bits = encode(text, &table).unwrap();
        (tree, bits)
    }

    #[test]
    fn test_decode_aaab() {
        let (tree, bits) = encoded(b"aaab");
        assert_eq!(decode(&tree, &bits).unwrap(), b"aaab".to_vec());
    }

    #[test]
    fn test_decode_single_symbol() {
        let (tree, bits) = encoded(b"xxxxxxx");
        assert_eq!(decode(&tree, &bits).unwrap(), b"xxxxxxx".to_vec());
        assert_eq!(decode_parallel(&tree, &bits, 3).unwrap(), b"xxxxxxx".to_vec());
    }

    #[test]
    fn test_single_symbol_rejects_one_bits() {
        let tree = HuffmanTree::from_bytes(b"xx").unwrap();
        let bits = bitvec![u8, Msb0; 0, 1, 0];
        let err = decode(&tree, &bits).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedPayload { position: 1, .. }));
    }

    #[test]
    fn test_truncated_payload() {
        let (tree, mut bits) = encoded(b"abcdefgh");
        // every code here is three bits long
        bits.pop();
        let err = decode(&tree, &bits).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedPayload { bit_len: 23 }));

        let err = decode_parallel(&tree, &bits, 4).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedPayload { .. }));
    }

    #[test]
    fn test_split_points_are_codeword_aligned() {
        let text: Vec<u8> = b"she sells sea shells by the sea shore".repeat(20);
        let (tree, bits) = encoded(&text);
        let table = CodeTable::from_tree(&tree);

        let mut boundaries = vec![0usize];
        for &byte in &text {
            let last = *boundaries.last().unwrap();
            boundaries.push(last + table.code(byte).unwrap().len());
        }

        for workers in [2, 3, 5, 8] {
            let spans = split_points(&tree, &bits, workers).unwrap();
            assert!(spans.len() <= workers);
            assert_eq!(spans.first().unwrap().bits.start, 0);
            assert_eq!(spans.last().unwrap().bits.end, bits.len());
            assert_eq!(spans.iter().map(|s| s.symbols).sum::<usize>(), text.len());
            for pair in spans.windows(2) {
                assert_eq!(pair[0].bits.end, pair[1].bits.start);
                assert!(boundaries.contains(&pair[0].bits.end));
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text: Vec<u8> = (0..5000u32).map(|i| ((i * i + 7 * i) % 97) as u8).collect();
        let (tree, bits) = encoded(&text);
        let expected = decode(&tree, &bits).unwrap();
        assert_eq!(expected, text);
        for workers in [1, 2, 3, 4, 6, 13, 64] {
            assert_eq!(decode_parallel(&tree, &bits, workers).unwrap(), expected);
        }
    }

    #[test]
    fn test_more_workers_than_bits() {
        let (tree, bits) = encoded(b"ab");
        assert_eq!(bits.len(), 2);
        assert_eq!(decode_parallel(&tree, &bits, 16).unwrap(), b"ab".to_vec());
    }

    #[test]
    fn test_empty_bits() {
        let (tree, _) = encoded(b"abc");
        let empty: BitVec<u8, Msb0> = BitVec::new();
        assert!(decode(&tree, &empty).unwrap().is_empty());
        assert!(decode_parallel(&tree, &empty, 4).unwrap().is_empty());
    }
}
