use bitvec::prelude::*;

use crate::config::WireFormat;
use crate::error::{HuffmanError, Result};
use crate::hufftree::HuffmanTree;

/// Separates the serialized tree from the payload.
pub const DELIMITER: u8 = b'\n';

const ASCII_ZERO: u8 = b'0';
const ASCII_ONE: u8 = b'1';
const BIT_LEN_BYTES: usize = 8;

/// A tree together with the bit sequence it encodes.
///
/// On the wire: the preorder tree, one newline, then the payload. There is no
/// magic number, length prefix or checksum around the whole thing.
#[derive(Debug)]
pub struct CompressedData {
    pub tree: HuffmanTree,
    pub bits: BitVec<u8, Msb0>,
}

impl CompressedData {
    pub fn serialize(&self, format: WireFormat) -> Vec<u8> {
        let mut bytes = self.tree.serialize();
        bytes.push(DELIMITER);

        match format {
            WireFormat::Ascii => {
                bytes.reserve(self.bits.len());
                bytes.extend(
                    self.bits
                        .iter()
                        .by_vals()
                        .map(|bit| if bit { ASCII_ONE } else { ASCII_ZERO }),
                );
            }
            WireFormat::Packed => {
                let bit_count = self.bits.len() as u64;
                bytes.extend_from_slice(&bit_count.to_le_bytes());

                let mut packed = self.bits.clone();
                packed.set_uninitialized(false);
                bytes.extend_from_slice(packed.as_raw_slice());
            }
        }

        bytes
    }

    pub fn deserialize(data: &[u8], format: WireFormat) -> Result<CompressedData> {
        let (tree, consumed) = HuffmanTree::deserialize(data)?;
        if data.get(consumed) != Some(&DELIMITER) {
            return Err(HuffmanError::MissingDelimiter);
        }
        let payload = &data[consumed + 1..];

        let bits = match format {
            WireFormat::Ascii => read_ascii(payload)?,
            WireFormat::Packed => read_packed(payload)?,
        };

        Ok(CompressedData { tree, bits })
    }
}

fn read_ascii(payload: &[u8]) -> Result<BitVec<u8, Msb0>> {
    let mut bits = BitVec::with_capacity(payload.len());
    for (position, &byte) in payload.iter().enumerate() {
        match byte {
            ASCII_ZERO => bits.push(false),
            ASCII_ONE => bits.push(true),
            _ => return Err(HuffmanError::MalformedPayload { position, byte }),
        }
    }
    Ok(bits)
}

fn read_packed(payload: &[u8]) -> Result<BitVec<u8, Msb0>> {
    if payload.len() < BIT_LEN_BYTES {
        return Err(HuffmanError::TruncatedPayload { bit_len: 0 });
    }
    let (header, body) = payload.split_at(BIT_LEN_BYTES);

    let mut bit_count_bytes = [0u8; BIT_LEN_BYTES];
    bit_count_bytes.copy_from_slice(header);
    let bit_count = u64::from_le_bytes(bit_count_bytes);

    let available = body.len().saturating_mul(8);
    let bit_len = match usize::try_from(bit_count) {
        Ok(n) if n <= available => n,
        _ => return Err(HuffmanError::TruncatedPayload { bit_len: available }),
    };

    let needed = bit_len.div_ceil(8);
    if let Some(&extra) = body.get(needed) {
        return Err(HuffmanError::MalformedPayload {
            position: BIT_LEN_BYTES + needed,
            byte: extra,
        });
    }

    let mut bits = BitVec::from_vec(body.to_vec());
    bits.truncate(bit_len);
    Ok(bits)
}
