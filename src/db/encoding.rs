//! Primitive binary codec shared by the frame header and payloads
//!
//! Lengths use the compact size encoding: values below 253 take one byte,
//! larger values are a marker byte (`0xfd`, `0xfe`, `0xff`) followed by a
//! little-endian u16, u32 or u64. Decoding only accepts the shortest form.

use thiserror::Error;

/// Largest length a compact size may announce
pub const MAX_SIZE: u64 = 0x0200_0000;

/// Encoding and decoding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    #[error("non-canonical compact size")]
    NonCanonicalSize,

    #[error("size too large: {0}")]
    SizeTooLarge(u64),

    #[error("invalid UTF-8 in string")]
    InvalidUtf8,

    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),

    #[error("{0}")]
    Custom(String),
}

/// Append a compact size to `buf`
pub fn write_compact_size(buf: &mut Vec<u8>, value: u64) {
    if value < 253 {
        buf.push(value as u8);
    } else if value <= u64::from(u16::MAX) {
        buf.push(0xfd);
        buf.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= u64::from(u32::MAX) {
        buf.push(0xfe);
        buf.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        buf.push(0xff);
        buf.extend_from_slice(&value.to_le_bytes());
    }
}

/// Append a length-prefixed UTF-8 string to `buf`
pub fn write_string(buf: &mut Vec<u8>, value: &str) -> Result<(), CodecError> {
    let len = value.len() as u64;
    if len > MAX_SIZE {
        return Err(CodecError::SizeTooLarge(len));
    }
    write_compact_size(buf, len);
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Cursor over a borrowed byte slice
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Unconsumed tail of the input
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consume exactly `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEnd {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Read a compact size, rejecting non-canonical forms and values above `MAX_SIZE`
    pub fn read_compact_size(&mut self) -> Result<u64, CodecError> {
        let value = match self.read_u8()? {
            0xfd => {
                let v = u64::from(self.read_u16()?);
                if v < 253 {
                    return Err(CodecError::NonCanonicalSize);
                }
                v
            }
            0xfe => {
                let v = u64::from(self.read_u32()?);
                if v <= u64::from(u16::MAX) {
                    return Err(CodecError::NonCanonicalSize);
                }
                v
            }
            0xff => {
                let v = self.read_u64()?;
                if v <= u64::from(u32::MAX) {
                    return Err(CodecError::NonCanonicalSize);
                }
                v
            }
            b => u64::from(b),
        };

        if value > MAX_SIZE {
            return Err(CodecError::SizeTooLarge(value));
        }
        Ok(value)
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_compact_size()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Succeeds only if every byte was consumed
    pub fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }
}
