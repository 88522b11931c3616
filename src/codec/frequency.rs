// src/codec/frequency.rs

//! Frequency analysis for byte buffers.
//!
//! Counts the occurrence of each byte value (0-255) in an input buffer.
//! The table is built in one linear pass and is immutable afterwards; it is
//! both the input to tree construction and the tree description stored in
//! the container.

use crate::utils::error::{HuffmanError, Result};

/// Per-byte occurrence counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Count of each byte value (index = byte value, value = count).
    counts: [u32; 256],
    /// Sum of all counts.
    total: u64,
    /// Number of distinct byte values with nonzero count.
    distinct: u16,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0u32; 256],
            total: 0,
            distinct: 0,
        }
    }

    /// Counts byte frequencies in the input buffer.
    ///
    /// Empty input yields an empty table, which the encoder treats as the
    /// degenerate empty-container case. A count overflowing u32 (the width
    /// the container serializes) fails with [`HuffmanError::Overflow`].
    pub fn count(input: &[u8]) -> Result<Self> {
        let mut counts = [0u32; 256];
        for &byte in input {
            let slot = &mut counts[byte as usize];
            *slot = slot
                .checked_add(1)
                .ok_or(HuffmanError::Overflow(byte))?;
        }

        let mut total = 0u64;
        let mut distinct = 0u16;
        for &c in &counts {
            total += c as u64;
            distinct += (c > 0) as u16;
        }

        Ok(Self {
            counts,
            total,
            distinct,
        })
    }

    /// Rebuilds a table from deserialized `(symbol, count)` pairs.
    ///
    /// Rejects zero counts and repeated symbols with `CorruptData`; ordering
    /// is the container parser's concern.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, u32)>) -> Result<Self> {
        let mut counts = [0u32; 256];
        let mut total = 0u64;
        let mut distinct = 0u16;
        for (symbol, count) in pairs {
            if count == 0 {
                return Err(HuffmanError::CorruptData(format!(
                    "zero frequency recorded for byte {symbol:#04x}"
                )));
            }
            if counts[symbol as usize] != 0 {
                return Err(HuffmanError::CorruptData(format!(
                    "byte {symbol:#04x} listed twice in the frequency table"
                )));
            }
            counts[symbol as usize] = count;
            total += count as u64;
            distinct += 1;
        }
        Ok(Self {
            counts,
            total,
            distinct,
        })
    }

    /// Count for one byte value (zero when the byte never occurred).
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, i.e. the original input length.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of byte values with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.distinct as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates `(symbol, count)` pairs in ascending symbol order, skipping
    /// absent symbols. This is the canonical ordering used by tree
    /// construction and the container header.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
