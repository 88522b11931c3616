// src/codec/container.rs

//! The self-describing compressed container.
//!
//! Wire layout (all integers big-endian):
//!
//! | field        | size            | meaning                                |
//! |--------------|-----------------|----------------------------------------|
//! | magic        | 4 (`HUF1`)      | format tag                             |
//! | symbol count | 8               | number of original input bytes         |
//! | bit length   | 8               | exact payload length in bits           |
//! | distinct     | 2               | distinct symbols in the table (0-256)  |
//! | symbols      | distinct        | byte values, strictly ascending        |
//! | counts       | 4 × distinct    | occurrence counts, parallel to symbols |
//! | payload      | rest            | packed code bits, zero-padded          |
//!
//! The header carries the frequency table rather than explicit codes: the
//! decoder reruns the deterministic tree builder on it and lands on the
//! exact tree the encoder used. A container parses only if every header
//! field is consistent with the payload; nothing is guessed or padded.

use crate::codec::frequency::FrequencyTable;
use crate::stream::byte_stream::{ByteStream, MemoryStream};
use crate::utils::error::{HuffmanError, Result};
use log::trace;
use std::io::Write;

/// Format tag at the start of every serialized container.
pub const CONTAINER_MAGIC: [u8; 4] = *b"HUF1";

/// Fixed header size before the per-symbol table: magic + symbol count +
/// bit length + distinct.
const FIXED_HEADER_LEN: usize = 4 + 8 + 8 + 2;

/// An encoded byte buffer together with everything a decoder needs to
/// reconstruct the original bytes. Built once by [`encode`], consumed by
/// [`decode`], immutable in between.
///
/// [`encode`]: crate::codec::encoder::encode
/// [`decode`]: crate::codec::decoder::decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedContainer {
    freq: FrequencyTable,
    bit_len: u64,
    payload: Vec<u8>,
}

impl CompressedContainer {
    pub(crate) fn new(freq: FrequencyTable, bit_len: u64, payload: Vec<u8>) -> Self {
        Self {
            freq,
            bit_len,
            payload,
        }
    }

    /// The degenerate container for empty input: zero symbols, no payload.
    pub(crate) fn empty() -> Self {
        Self {
            freq: FrequencyTable::new(),
            bit_len: 0,
            payload: Vec::new(),
        }
    }

    /// The frequency table describing the code tree.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freq
    }

    /// Number of bytes the original input held.
    pub fn original_len(&self) -> u64 {
        self.freq.total()
    }

    /// Exact number of meaningful bits in the payload.
    pub fn encoded_bit_len(&self) -> u64 {
        self.bit_len
    }

    /// The packed bitstream, including final-byte padding.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Size of the serialized container in bytes.
    pub fn compressed_len(&self) -> usize {
        FIXED_HEADER_LEN + 5 * self.freq.distinct() + self.payload.len()
    }

    /// Serialized bytes per original byte, or `None` for an empty container.
    /// Values below 1.0 mean the container is smaller than its input.
    pub fn compression_ratio(&self) -> Option<f64> {
        if self.original_len() == 0 {
            return None;
        }
        Some(self.compressed_len() as f64 / self.original_len() as f64)
    }

    /// Serializes the container to its wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = MemoryStream::with_capacity(self.compressed_len());
        out.write_all(&CONTAINER_MAGIC)?;
        out.write_u64(self.freq.total())?;
        out.write_u64(self.bit_len)?;
        out.write_u16(self.freq.distinct() as u16)?;

        let (symbols, counts): (Vec<u8>, Vec<u32>) = self.freq.iter().unzip();
        out.write_all(&symbols)?;
        out.write_u32_slice(&counts)?;
        out.write_all(&self.payload)?;

        trace!(
            "serialized container: {} symbols, {} bits, {} bytes total",
            self.freq.total(),
            self.bit_len,
            out.as_slice().len()
        );
        Ok(out.into_vec())
    }

    /// Parses a serialized container, validating every header field against
    /// the payload before anything is decoded.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut stream = MemoryStream::from_slice(data);

        let magic = stream.read_bytes(4)?;
        if magic != CONTAINER_MAGIC {
            return Err(HuffmanError::CorruptData("bad magic".to_string()));
        }

        let symbol_count = stream.read_u64()?;
        let bit_len = stream.read_u64()?;
        let distinct = stream.read_u16()? as usize;
        if distinct > 256 {
            return Err(HuffmanError::CorruptData(format!(
                "{distinct} distinct symbols recorded, alphabet holds at most 256"
            )));
        }
        if distinct == 0 && (symbol_count != 0 || bit_len != 0) {
            return Err(HuffmanError::CorruptData(
                "empty frequency table with nonzero symbol or bit count".to_string(),
            ));
        }

        let symbols = stream.read_bytes(distinct)?;
        for pair in symbols.windows(2) {
            if pair[0] >= pair[1] {
                return Err(HuffmanError::CorruptData(
                    "frequency table symbols not strictly ascending".to_string(),
                ));
            }
        }
        let counts = stream.read_u32_slice(distinct)?;

        let freq =
            FrequencyTable::from_pairs(symbols.iter().copied().zip(counts.iter().copied()))?;
        if freq.total() != symbol_count {
            return Err(HuffmanError::CorruptData(format!(
                "frequency table sums to {} symbols but header records {}",
                freq.total(),
                symbol_count
            )));
        }

        let expected_payload = bit_len.div_ceil(8);
        let remaining = stream.remaining() as u64;
        if remaining < expected_payload {
            return Err(HuffmanError::TruncatedStream);
        }
        if remaining > expected_payload {
            return Err(HuffmanError::CorruptData(format!(
                "{} trailing bytes after the payload",
                remaining - expected_payload
            )));
        }
        let payload = stream.read_bytes(expected_payload as usize)?;

        Ok(Self {
            freq,
            bit_len,
            payload,
        })
    }
}
