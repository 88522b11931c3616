//! Byte- and bit-level stream primitives for the container format.

pub mod bit_stream;
pub mod byte_stream;

// Re-export commonly used types
pub use bit_stream::{BitReader, BitWriter};
pub use byte_stream::{ByteStream, MemoryStream};
