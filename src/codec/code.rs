// src/codec/code.rs

//! Code assignment: turning a prefix tree into per-symbol bit-strings.

use crate::codec::tree::HuffNode;
use crate::utils::error::{HuffmanError, Result};
use bitvec::order::Msb0;
use bitvec::prelude::*;

/// A single symbol's code, MSB-first.
pub type Code = BitVec<u8, Msb0>;

/// Per-symbol codes, indexed by byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    fn new() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }

    /// The code for a byte value, if that byte occurs in the tree.
    pub fn code(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol as usize]
            .as_ref()
            .map(|code| code.as_bitslice())
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|code| code.is_none())
    }

    /// Iterates `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| {
                code.as_ref().map(|c| (symbol as u8, c.as_bitslice()))
            })
    }
}

/// Walks the tree depth-first and records each leaf's root-to-leaf path as
/// its code: `0` descending left, `1` descending right.
///
/// A bare leaf root gets the synthetic one-bit code `0` so that even a
/// one-symbol alphabet produces a decodable, non-empty bitstream. The
/// traversal is an explicit stack, so skewed trees cannot overflow the call
/// stack. Two leaves carrying the same symbol violate the builder's
/// invariant and fail with `MalformedTree`.
pub fn assign_codes(root: &HuffNode) -> Result<CodeTable> {
    let mut table = CodeTable::new();
    let mut stack: Vec<(&HuffNode, Code)> = vec![(root, Code::new())];

    while let Some((node, prefix)) = stack.pop() {
        match node {
            HuffNode::Leaf { symbol } => {
                let code = if prefix.is_empty() {
                    bitvec![u8, Msb0; 0]
                } else {
                    prefix
                };
                if table.codes[*symbol as usize].replace(code).is_some() {
                    return Err(HuffmanError::MalformedTree(format!(
                        "byte {symbol:#04x} appears in two leaves"
                    )));
                }
            }
            HuffNode::Internal { left, right } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(false);
                let mut right_prefix = prefix;
                right_prefix.push(true);
                // Right goes on the stack first so the left branch is
                // visited first.
                stack.push((right.as_ref(), right_prefix));
                stack.push((left.as_ref(), left_prefix));
            }
        }
    }

    Ok(table)
}
