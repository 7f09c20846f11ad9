use bitvec::prelude::*;

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

/// Concatenate the code of every byte of `data`, in input order.
///
/// `table` must come from the frequencies of this same buffer; a byte without
/// a code fails with [`HuffmanError::UnknownSymbol`].
pub fn encode(data: &[u8], table: &CodeTable) -> Result<BitVec<u8, Msb0>> {
    let mut bits = BitVec::with_capacity(data.len() * 2);
    for &byte in data {
        let code = table.code(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
        bits.extend_from_bitslice(code);
    }
    log::trace!("encoded {} bytes into {} bits", data.len(), bits.len());
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hufftree::HuffmanTree;

    #[test]
    fn test_encode_aaab() {
        let tree = HuffmanTree::from_bytes(b"aaab").unwrap();
        let table = CodeTable::from_tree(&tree);
        let bits = encode(b"aaab", &table).unwrap();
        assert_eq!(bits, bitvec![u8, Msb0; 1, 1, 1, 0]);
    }

    #[test]
    fn test_encode_single_symbol() {
        let tree = HuffmanTree::from_bytes(b"kkkkk").unwrap();
        let table = CodeTable::from_tree(&tree);
        let bits = encode(b"kkkkk", &table).unwrap();
        assert_eq!(bits.len(), 5);
        assert!(bits.not_any());
    }

    #[test]
    fn test_unknown_symbol() {
        let tree = HuffmanTree::from_bytes(b"abc").unwrap();
        let table = CodeTable::from_tree(&tree);
        let err = encode(b"abd", &table).unwrap_err();
        assert!(matches!(err, HuffmanError::UnknownSymbol(b'd')));
    }

    #[test]
    fn test_empty_input_encodes_to_nothing() {
        let tree = HuffmanTree::from_bytes(b"abc").unwrap();
        let table = CodeTable::from_tree(&tree);
        assert!(encode(&[], &table).unwrap().is_empty());
    }
}
