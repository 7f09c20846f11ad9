use bitvec::prelude::*;

use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

/// A single codeword, most significant (root-side) bit first.
pub type Code = BitVec<u8, Msb0>;

/// Symbol to codeword mapping derived from a [`HuffmanTree`].
///
/// Left edges contribute `0`, right edges `1`. A tree whose root is a leaf
/// maps its only symbol to the one-bit code `0`.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes: Vec<Option<Code>> = vec![None; 256];

        if let HuffNode::Leaf { byte, .. } = tree.node(tree.root()) {
            codes[*byte as usize] = Some(bitvec![u8, Msb0; 0]);
            return CodeTable { codes };
        }

        let mut stack: Vec<(usize, Code)> = vec![(tree.root(), Code::new())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                HuffNode::Leaf { byte, .. } => codes[*byte as usize] = Some(path),
                HuffNode::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((*right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((*left, left_path));
                }
            }
        }

        CodeTable { codes }
    }

    pub fn code(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol as usize].as_deref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|c| (symbol as u8, c)))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<_> = self.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                let n = a.len().min(b.len());
                if a[..n] == b[..n] {
                    return false;
                }
            }
        }
        true
    }

    /// Exact payload length in bits for input with these frequencies.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> usize {
        frequencies
            .iter()
            .map(|(symbol, count)| count * self.code(symbol).map_or(0, |c| c.len()))
            .sum()
    }
}
