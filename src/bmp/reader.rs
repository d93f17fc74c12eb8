//! Little-endian field reader over a seekable byte source.

use std::io::{Read, Seek, SeekFrom};

use crate::error::BmpError;

pub(crate) struct ByteReader<'r, R> {
    inner: &'r mut R,
}

impl<'r, R: Read + Seek> ByteReader<'r, R> {
    pub(crate) fn new(inner: &'r mut R) -> Self {
        Self { inner }
    }

    pub(crate) fn set_position(&mut self, pos: u64) -> Result<(), BmpError> {
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Total length of the source. The read position is preserved.
    pub(crate) fn stream_len(&mut self) -> Result<u64, BmpError> {
        let pos = self.inner.stream_position()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(len)
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        // Seeking past EOF succeeds, so read the bytes to surface short input.
        let mut scratch = [0u8; 4];
        let mut left = n;
        while left > 0 {
            let chunk = left.min(scratch.len());
            self.read_exact_bytes(&mut scratch[..chunk])?;
            left -= chunk;
        }
        Ok(())
    }

    pub(crate) fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), BmpError> {
        self.inner.read_exact(buf)?;
        Ok(())
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

/// Little-endian field accessors over a fixed header block.
pub(crate) fn u16_le(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

pub(crate) fn u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

pub(crate) fn i32_le(bytes: &[u8], at: usize) -> i32 {
    u32_le(bytes, at) as i32
}
