// src/codec/decoder.rs

//! The decode entry point: container in, original bytes out.

use crate::codec::container::CompressedContainer;
use crate::codec::tree::{build_tree, HuffNode};
use crate::stream::bit_stream::BitReader;
use crate::utils::error::{HuffmanError, Result};
use log::debug;

/// Decodes a [`CompressedContainer`] back into the original byte buffer.
///
/// The tree is rebuilt by rerunning the deterministic builder on the
/// container's frequency table, then walked bit by bit: `0` descends left,
/// `1` right, a leaf emits its symbol and resets the walk. The loop stops
/// after exactly the recorded number of emissions; running out of bits
/// first is [`HuffmanError::TruncatedStream`], and payload bits left over
/// afterwards are [`HuffmanError::CorruptData`].
pub fn decode(container: &CompressedContainer) -> Result<Vec<u8>> {
    let symbol_count = container.original_len();
    if symbol_count == 0 {
        return Ok(Vec::new());
    }

    let root = build_tree(container.frequencies())?;
    let mut reader = BitReader::new(container.payload(), container.encoded_bit_len())?;
    let mut output = Vec::with_capacity(symbol_count as usize);

    if let HuffNode::Leaf { symbol } = &root {
        // One-symbol alphabet: the encoder spent one bit per occurrence.
        for _ in 0..symbol_count {
            reader.next_bit().ok_or(HuffmanError::TruncatedStream)?;
            output.push(*symbol);
        }
    } else {
        while (output.len() as u64) < symbol_count {
            let mut node = &root;
            while let HuffNode::Internal { left, right } = node {
                let bit = reader.next_bit().ok_or(HuffmanError::TruncatedStream)?;
                node = if bit { right.as_ref() } else { left.as_ref() };
            }
            if let HuffNode::Leaf { symbol } = node {
                output.push(*symbol);
            }
        }
    }

    if reader.remaining() > 0 {
        return Err(HuffmanError::CorruptData(format!(
            "{} payload bits left after the final symbol",
            reader.remaining()
        )));
    }

    debug!("decoded {} bytes", output.len());
    Ok(output)
}

/// Parses and decodes serialized container bytes in one step.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode(&CompressedContainer::from_bytes(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoder::{compress, encode};
    use crate::codec::frequency::FrequencyTable;

    #[test]
    fn test_roundtrip_abracadabra() {
        let container = encode(b"abracadabra").unwrap();
        assert_eq!(decode(&container).unwrap(), b"abracadabra");
    }

    #[test]
    fn test_roundtrip_empty() {
        let container = encode(&[]).unwrap();
        assert_eq!(decode(&container).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_roundtrip_single_byte() {
        let container = encode(&[0x00]).unwrap();
        assert_eq!(decode(&container).unwrap(), vec![0x00]);
    }

    #[test]
    fn test_roundtrip_repeated_symbol() {
        let container = encode(b"AAAA").unwrap();
        assert_eq!(decode(&container).unwrap(), b"AAAA");
    }

    #[test]
    fn test_decode_is_restartable() {
        let container = encode(b"decode twice from one container").unwrap();
        let first = decode(&container).unwrap();
        let second = decode(&container).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_bits_are_truncation() {
        // A container claiming more symbols than its bitstream can supply.
        let freq = FrequencyTable::count(b"aab").unwrap();
        // Codes: a=0, b=1; three symbols need three bits, but only two are
        // recorded.
        let container = CompressedContainer::new(freq, 2, vec![0b0100_0000]);
        let err = decode(&container).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedStream));
    }

    #[test]
    fn test_leftover_bits_are_corrupt() {
        let freq = FrequencyTable::count(b"aab").unwrap();
        // Five recorded bits, but three symbols only consume three.
        let container = CompressedContainer::new(freq, 5, vec![0b0100_0000]);
        let err = decode(&container).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptData(_)));
    }

    #[test]
    fn test_decompress_truncated_wire_bytes() {
        let bytes = compress(b"abracadabra").unwrap();
        let err = decompress(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::TruncatedStream | HuffmanError::CorruptData(_)
        ));
    }
}
