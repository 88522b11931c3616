// src/utils/error.rs

use thiserror::Error;

/// The primary error type for all operations in the Huffman codec library.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The frequency table is empty, so no tree can be built. Not a fatal
    /// condition: `encode` and `decode` special-case empty input and never
    /// surface this to the caller.
    #[error("empty input: no symbols to build a tree from")]
    EmptyInput,

    /// A frequency count exceeded the serialized counter width.
    #[error("frequency count for byte {0:#04x} exceeds the u32 counter width")]
    Overflow(u8),

    /// A structural invariant of the code tree was violated. Indicates a bug
    /// in tree construction rather than bad input.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// The container header is inconsistent with itself or with the payload.
    #[error("corrupt container: {0}")]
    CorruptData(String),

    /// The container or its bitstream ended before the recorded length.
    #[error("stream ended before the recorded length")]
    TruncatedStream,

    /// An error surfaced from the underlying byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Huffman codec operations.
pub type Result<T> = std::result::Result<T, HuffmanError>;
