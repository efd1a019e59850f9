//! Growable byte writer and bounds-checked byte reader for the wire codec.

use crate::util::{var_int, Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Append-only growable byte buffer.
///
/// Single-owner; `into_bytes` materializes exactly the bytes written.
#[derive(Default, Debug)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns whether nothing has been written yet.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends a single byte.
    #[inline]
    pub fn put_u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    /// Appends a little-endian u16.
    pub fn put_u16_le(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    /// Appends a big-endian u16.
    pub fn put_u16_be(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Appends a little-endian u32.
    pub fn put_u32_le(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    /// Appends a big-endian u32.
    pub fn put_u32_be(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Appends a little-endian i32.
    pub fn put_i32_le(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    /// Appends a little-endian u64.
    pub fn put_u64_le(&mut self, v: u64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    /// Appends a little-endian i64.
    pub fn put_i64_le(&mut self, v: i64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    /// Appends a raw byte run.
    pub fn put_slice(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Appends a varint.
    ///
    /// # Errors
    /// `Error::ValueRange` above the safe-integer ceiling.
    pub fn put_var_int(&mut self, n: u64) -> Result<&mut Self> {
        var_int::write(n, &mut self.buf)?;
        Ok(self)
    }

    /// Appends a varint length prefix followed by the bytes.
    ///
    /// # Errors
    /// `Error::ValueRange` above the safe-integer ceiling.
    pub fn put_var_slice(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.put_var_int(bytes.len() as u64)?;
        Ok(self.put_slice(bytes))
    }

    /// Appends a varint count prefix followed by a var-slice per element.
    /// Used for witness stacks.
    ///
    /// # Errors
    /// `Error::ValueRange` above the safe-integer ceiling.
    pub fn put_vector(&mut self, items: &[Vec<u8>]) -> Result<&mut Self> {
        self.put_var_int(items.len() as u64)?;
        for item in items {
            self.put_var_slice(item)?;
        }
        Ok(self)
    }

    /// Materializes the written bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Bounds-checked cursor over a fixed byte buffer.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader over the buffer, positioned at the start.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader { buf, offset: 0 }
    }

    /// Current cursor position.
    #[must_use]
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    #[must_use]
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Returns whether the cursor has reached the end of the buffer.
    #[must_use]
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.offset >= self.buf.len()
    }

    fn take(&mut self, size: usize) -> Result<&'a [u8]> {
        if self.offset + size > self.buf.len() {
            return Err(Error::BadData("Read out of bounds".to_string()));
        }
        let bytes = &self.buf[self.offset..self.offset + size];
        self.offset += size;
        Ok(bytes)
    }

    /// Reads a single byte.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a little-endian u16.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Reads a big-endian u16.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    /// Reads a little-endian u32.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Reads a little-endian i32.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Reads a little-endian u64.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Reads a little-endian i64.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_i64_le(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    /// Reads a raw byte run of the given size.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>> {
        Ok(self.take(size)?.to_vec())
    }

    /// Reads a varint.
    ///
    /// # Errors
    /// `Error::BadData` past the end; `Error::ValueRange` above the ceiling.
    pub fn read_var_int(&mut self) -> Result<u64> {
        let n0 = self.read_u8()?;
        match n0 {
            0xff => {
                let n = self.read_u64_le()?;
                if n > var_int::MAX_SAFE_VALUE {
                    return Err(Error::ValueRange(format!("Varint too large: {}", n)));
                }
                Ok(n)
            }
            0xfe => Ok(u64::from(self.read_u32_le()?)),
            0xfd => Ok(u64::from(self.read_u16_le()?)),
            _ => Ok(u64::from(n0)),
        }
    }

    /// Reads a varint length prefix followed by that many bytes.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_var_slice(&mut self) -> Result<Vec<u8>> {
        let size = self.read_var_int()?;
        self.read_bytes(size as usize)
    }

    /// Reads a varint count prefix followed by a var-slice per element.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn read_vector(&mut self) -> Result<Vec<Vec<u8>>> {
        let count = self.read_var_int()?;
        // the count comes off the wire; cap the reservation by the bytes left
        let mut items = Vec::with_capacity(count.min(self.remaining() as u64) as usize);
        for _ in 0..count {
            items.push(self.read_var_slice()?);
        }
        Ok(items)
    }

    /// Returns the next byte without consuming it.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn peek_u8(&self) -> Result<u8> {
        if self.offset >= self.buf.len() {
            return Err(Error::BadData("Read out of bounds".to_string()));
        }
        Ok(self.buf[self.offset])
    }

    /// Returns the next two bytes without consuming them.
    ///
    /// # Errors
    /// `Error::BadData` past the end of the buffer.
    pub fn peek_2(&self) -> Result<[u8; 2]> {
        if self.offset + 2 > self.buf.len() {
            return Err(Error::BadData("Read out of bounds".to_string()));
        }
        Ok([self.buf[self.offset], self.buf[self.offset + 1]])
    }
}
