//! Instruction data (de)serialization helpers
//!
//! Little-endian fixed-width fields. All readers perform bounds checking and
//! return errors on invalid input.

use crate::error::PoolError;
use crate::types::Pubkey;

/// Read a u8 from instruction data
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, PoolError> {
    if offset >= data.len() {
        return Err(PoolError::InvalidInstruction);
    }
    Ok(data[offset])
}

/// Read a u16 (little-endian) from instruction data
#[inline]
pub fn read_u16(data: &[u8], offset: usize) -> Result<u16, PoolError> {
    Ok(u16::from_le_bytes(read_bytes(data, offset)?))
}

/// Read a u64 (little-endian) from instruction data
#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, PoolError> {
    Ok(u64::from_le_bytes(read_bytes(data, offset)?))
}

/// Read a u128 (little-endian) from instruction data
#[inline]
pub fn read_u128(data: &[u8], offset: usize) -> Result<u128, PoolError> {
    Ok(u128::from_le_bytes(read_bytes(data, offset)?))
}

/// Read a bool encoded as a single 0/1 byte
#[inline]
pub fn read_bool(data: &[u8], offset: usize) -> Result<bool, PoolError> {
    match read_u8(data, offset)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(PoolError::InvalidInstruction),
    }
}

/// Read a fixed-size byte array from instruction data
#[inline]
pub fn read_bytes<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], PoolError> {
    let end = offset.checked_add(N).ok_or(PoolError::InvalidInstruction)?;
    if end > data.len() {
        return Err(PoolError::InvalidInstruction);
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[offset..end]);
    Ok(bytes)
}

/// Instruction data reader with tracked offset
///
/// Provides a convenient way to sequentially read fields from instruction data
/// while automatically tracking the current offset.
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    /// Create a new instruction reader
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get remaining bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Read a u8 and advance offset
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, PoolError> {
        let val = read_u8(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    /// Read a u16 and advance offset
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, PoolError> {
        let val = read_u16(self.data, self.offset)?;
        self.offset += 2;
        Ok(val)
    }

    /// Read a u64 and advance offset
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, PoolError> {
        let val = read_u64(self.data, self.offset)?;
        self.offset += 8;
        Ok(val)
    }

    /// Read a u128 and advance offset
    #[inline]
    pub fn read_u128(&mut self) -> Result<u128, PoolError> {
        let val = read_u128(self.data, self.offset)?;
        self.offset += 16;
        Ok(val)
    }

    /// Read a bool and advance offset
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, PoolError> {
        let val = read_bool(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    /// Read a fixed-size byte array and advance offset
    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], PoolError> {
        let val = read_bytes(self.data, self.offset)?;
        self.offset += N;
        Ok(val)
    }

    /// Read a 32-byte key and advance offset
    #[inline]
    pub fn read_pubkey(&mut self) -> Result<Pubkey, PoolError> {
        self.read_bytes::<32>()
    }

    /// Fail if any bytes are left unread
    #[inline]
    pub fn finish(&self) -> Result<(), PoolError> {
        if self.remaining() != 0 {
            return Err(PoolError::InvalidInstruction);
        }
        Ok(())
    }
}

/// Append-only instruction data builder, the inverse of [`InstructionReader`]
#[derive(Debug, Default)]
pub struct InstructionWriter {
    buf: Vec<u8>,
}

impl InstructionWriter {
    pub fn new(discriminator: u8) -> Self {
        Self { buf: vec![discriminator] }
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.buf.push(v);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u64(mut self, v: u64) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u128(mut self, v: u128) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn bool(self, v: bool) -> Self {
        self.u8(v as u8)
    }

    pub fn pubkey(mut self, key: &Pubkey) -> Self {
        self.buf.extend_from_slice(key);
        self
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}
