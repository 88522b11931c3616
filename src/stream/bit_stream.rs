// src/stream/bit_stream.rs

//! MSB-first bit packing and unpacking over byte buffers.
//!
//! `BitWriter` accumulates code bits into a growable buffer and reports the
//! exact bit count so the final partial byte's padding can be recorded.
//! `BitReader` replays a buffer bit by bit and stops exactly at the recorded
//! count, never yielding padding bits.

use crate::utils::error::{HuffmanError, Result};
use bitvec::order::Msb0;
use bitvec::prelude::*;

/// Packs individual bits and whole code bit-strings most-significant-bit-first.
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Appends a single bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends every bit of a code in order.
    pub fn push_code(&mut self, code: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(code);
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bits.len() as u64
    }

    /// Consumes the writer, returning the packed bytes and the exact bit
    /// count. The last byte is zero-padded.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        let bit_len = self.bits.len() as u64;
        self.bits.set_uninitialized(false);
        (self.bits.into_vec(), bit_len)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Replays exactly `bit_len` bits out of a packed byte buffer.
///
/// Restartable: construct a fresh reader over the same buffer to re-decode.
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Fails with `TruncatedStream` when the buffer holds fewer than
    /// `bit_len` bits.
    pub fn new(bytes: &'a [u8], bit_len: u64) -> Result<Self> {
        if bit_len > bytes.len() as u64 * 8 {
            return Err(HuffmanError::TruncatedStream);
        }
        let bits = &bytes.view_bits::<Msb0>()[..bit_len as usize];
        Ok(Self { bits, pos: 0 })
    }

    /// Yields the next bit, or `None` once the recorded count is exhausted.
    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.pos)?;
        self.pos += 1;
        Some(*bit)
    }

    /// Bits left before the recorded count is reached.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.next_bit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_packing() {
        let mut writer = BitWriter::new();
        writer.push(true);
        writer.push(false);
        writer.push(true);
        assert_eq!(writer.bit_len(), 3);

        let (bytes, bit_len) = writer.finish();
        assert_eq!(bit_len, 3);
        // 101 packed from the high bit down, padded with zeros.
        assert_eq!(bytes, vec![0b1010_0000]);
    }

    #[test]
    fn test_push_code_crosses_byte_boundary() {
        let mut writer = BitWriter::new();
        let code: BitVec<u8, Msb0> = bitvec![u8, Msb0; 1, 1, 0, 1, 1];
        writer.push_code(&code);
        writer.push_code(&code);

        let (bytes, bit_len) = writer.finish();
        assert_eq!(bit_len, 10);
        assert_eq!(bytes, vec![0b1101_1110, 0b1100_0000]);
    }

    #[test]
    fn test_reader_stops_at_recorded_count() {
        // Padding bits in the last byte are set; the reader must not see them.
        let bytes = [0b1010_1111u8];
        let reader = BitReader::new(&bytes, 4).unwrap();
        let bits: Vec<bool> = reader.collect();
        assert_eq!(bits, vec![true, false, true, false]);
    }

    #[test]
    fn test_reader_rejects_overlong_count() {
        let bytes = [0u8; 2];
        let err = BitReader::new(&bytes, 17).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedStream));
    }

    #[test]
    fn test_reader_is_restartable() {
        let mut writer = BitWriter::new();
        for i in 0..12 {
            writer.push(i % 3 == 0);
        }
        let (bytes, bit_len) = writer.finish();

        let first: Vec<bool> = BitReader::new(&bytes, bit_len).unwrap().collect();
        let second: Vec<bool> = BitReader::new(&bytes, bit_len).unwrap().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
    }

    #[test]
    fn test_empty_writer() {
        let (bytes, bit_len) = BitWriter::new().finish();
        assert!(bytes.is_empty());
        assert_eq!(bit_len, 0);

        let mut reader = BitReader::new(&bytes, 0).unwrap();
        assert_eq!(reader.next_bit(), None);
    }
}
