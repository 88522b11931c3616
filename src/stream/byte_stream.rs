// src/stream/byte_stream.rs

//! A byte stream abstraction for reading and writing container structures.
//! All multi-byte integers are big-endian on the wire.

use crate::utils::error::{HuffmanError, Result};
use bytemuck::{cast_slice, Pod, Zeroable};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Maps a short read to the codec's truncation error; everything else stays
/// an I/O error.
fn map_eof(err: std::io::Error) -> HuffmanError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        HuffmanError::TruncatedStream
    } else {
        HuffmanError::Io(err)
    }
}

/// A trait for reading and writing structured container data.
pub trait ByteStream: Read + Write {
    fn read_u8(&mut self) -> Result<u8> {
        ReadBytesExt::read_u8(self).map_err(map_eof)
    }

    fn read_u16(&mut self) -> Result<u16> {
        ReadBytesExt::read_u16::<BigEndian>(self).map_err(map_eof)
    }

    fn read_u32(&mut self) -> Result<u32> {
        ReadBytesExt::read_u32::<BigEndian>(self).map_err(map_eof)
    }

    fn read_u64(&mut self) -> Result<u64> {
        ReadBytesExt::read_u64::<BigEndian>(self).map_err(map_eof)
    }

    /// Reads exactly `count` raw bytes.
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; count];
        self.read_exact(&mut buffer).map_err(map_eof)?;
        Ok(buffer)
    }

    fn write_u8(&mut self, value: u8) -> Result<()> {
        Ok(WriteBytesExt::write_u8(self, value)?)
    }

    fn write_u16(&mut self, value: u16) -> Result<()> {
        Ok(WriteBytesExt::write_u16::<BigEndian>(self, value)?)
    }

    fn write_u32(&mut self, value: u32) -> Result<()> {
        Ok(WriteBytesExt::write_u32::<BigEndian>(self, value)?)
    }

    fn write_u64(&mut self, value: u64) -> Result<()> {
        Ok(WriteBytesExt::write_u64::<BigEndian>(self, value)?)
    }

    /// Efficiently write a slice of u32 values in big-endian format using bytemuck
    fn write_u32_slice(&mut self, values: &[u32]) -> Result<()> {
        let be_values: Vec<BeU32> = values.iter().map(|&v| v.into()).collect();
        let bytes: &[u8] = cast_slice(&be_values);
        self.write_all(bytes)?;
        Ok(())
    }

    /// Efficiently read a slice of u32 values in big-endian format using bytemuck
    fn read_u32_slice(&mut self, count: usize) -> Result<Vec<u32>> {
        let mut buffer = vec![0u8; count * 4];
        self.read_exact(&mut buffer).map_err(map_eof)?;
        let be_values: &[BeU32] = cast_slice(&buffer);
        Ok(be_values.iter().map(|&v| v.into()).collect())
    }
}

/// Implement ByteStream for any type that implements Read + Write
impl<T: Read + Write> ByteStream for T {}

/// A wrapper around Vec<u8> that implements ByteStream for in-memory operations
pub struct MemoryStream {
    buffer: Vec<u8>,
    position: usize,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            position: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            position: 0,
        }
    }

    /// Creates a stream positioned at the start of an existing buffer,
    /// ready for parsing.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            buffer: data.to_vec(),
            position: 0,
        }
    }

    /// Bytes left between the read position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for MemoryStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let available = self.buffer.len().saturating_sub(self.position);
        let to_read = buf.len().min(available);

        if to_read > 0 {
            buf[..to_read].copy_from_slice(&self.buffer[self.position..self.position + to_read]);
            self.position += to_read;
        }

        Ok(to_read)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // Writes are append-only in practice; the resize path covers a
        // stream that was rewound via from_slice.
        if self.position == self.buffer.len() {
            self.buffer.extend_from_slice(buf);
        } else {
            let end_pos = self.position + buf.len();
            if end_pos > self.buffer.len() {
                self.buffer.resize(end_pos, 0);
            }
            self.buffer[self.position..end_pos].copy_from_slice(buf);
        }

        self.position += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Big-endian u32 that can be safely cast to/from bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct BeU32([u8; 4]);

impl From<u32> for BeU32 {
    fn from(value: u32) -> Self {
        BeU32(value.to_be_bytes())
    }
}

impl From<BeU32> for u32 {
    fn from(value: BeU32) -> Self {
        u32::from_be_bytes(value.0)
    }
}

#[cfg(test)]
mod tests {
    // ReadBytesExt/WriteBytesExt stay out of scope here so the ByteStream
    // methods resolve unambiguously.
    use super::{ByteStream, MemoryStream};
    use crate::utils::error::HuffmanError;

    #[test]
    fn test_integer_roundtrip() {
        let mut stream = MemoryStream::new();
        stream.write_u8(0xAB).unwrap();
        stream.write_u16(0x1234).unwrap();
        stream.write_u32(0xDEADBEEF).unwrap();
        stream.write_u64(0x0123_4567_89AB_CDEF).unwrap();

        let mut stream = MemoryStream::from_slice(stream.as_slice());
        assert_eq!(stream.read_u8().unwrap(), 0xAB);
        assert_eq!(stream.read_u16().unwrap(), 0x1234);
        assert_eq!(stream.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(stream.read_u64().unwrap(), 0x0123_4567_89AB_CDEF);
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn test_u32_slice_is_big_endian() {
        let mut stream = MemoryStream::new();
        stream.write_u32_slice(&[1, 0x0102_0304]).unwrap();
        assert_eq!(stream.as_slice(), &[0, 0, 0, 1, 1, 2, 3, 4]);

        let mut stream = MemoryStream::from_slice(stream.as_slice());
        assert_eq!(stream.read_u32_slice(2).unwrap(), vec![1, 0x0102_0304]);
    }

    #[test]
    fn test_short_read_is_truncation() {
        let mut stream = MemoryStream::from_slice(&[0x01, 0x02]);
        let err = stream.read_u32().unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedStream));
    }
}
