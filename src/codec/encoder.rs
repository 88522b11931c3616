// src/codec/encoder.rs

//! The encode entry point: raw bytes in, self-describing container out.

use crate::codec::code::assign_codes;
use crate::codec::container::CompressedContainer;
use crate::codec::frequency::FrequencyTable;
use crate::codec::tree::build_tree;
use crate::stream::bit_stream::BitWriter;
use crate::utils::error::{HuffmanError, Result};
use log::debug;

/// Encodes a byte buffer into a [`CompressedContainer`].
///
/// One frequency pass, one tree build, one pass appending each byte's code.
/// Deterministic: the same input always produces a byte-identical
/// container. Empty input short-circuits to the empty container without
/// building a tree.
pub fn encode(input: &[u8]) -> Result<CompressedContainer> {
    if input.is_empty() {
        debug!("empty input, emitting empty container");
        return Ok(CompressedContainer::empty());
    }

    let freq = FrequencyTable::count(input)?;
    let root = build_tree(&freq)?;
    let codes = assign_codes(&root)?;

    let mut writer = BitWriter::with_capacity(input.len());
    for &byte in input {
        let code = codes.code(byte).ok_or_else(|| {
            HuffmanError::MalformedTree(format!("no code assigned for byte {byte:#04x}"))
        })?;
        writer.push_code(code);
    }
    let (payload, bit_len) = writer.finish();

    debug!(
        "encoded {} bytes as {} bits over a {}-symbol alphabet",
        input.len(),
        bit_len,
        freq.distinct()
    );
    Ok(CompressedContainer::new(freq, bit_len, payload))
}

/// Encodes and serializes in one step, for callers that only want the wire
/// bytes.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    encode(input)?.to_bytes()
}
