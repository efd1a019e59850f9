//! Variable length integer (CompactSize) ser/des for the Dogecoin wire format.

use crate::util::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Largest value representable without loss in a JSON-safe number (2^53 - 1).
pub const MAX_SAFE_VALUE: u64 = 9_007_199_254_740_991;

/// Returns the number of bytes required for the varint.
#[must_use]
#[inline]
pub fn size(n: u64) -> usize {
    if n <= 252 {
        1
    } else if n <= 0xffff {
        3
    } else if n <= 0xffffffff {
        5
    } else {
        9
    }
}

/// Returns the encoded size of a length-prefixed byte slice.
#[must_use]
#[inline]
pub fn var_slice_size(len: usize) -> usize {
    size(len as u64) + len
}

/// Returns the encoded size of a count-prefixed vector of byte slices.
#[must_use]
#[inline]
pub fn vector_size(items: &[Vec<u8>]) -> usize {
    size(items.len() as u64) + items.iter().map(|v| var_slice_size(v.len())).sum::<usize>()
}

/// Writes the var int to bytes.
///
/// # Errors
/// `Error::ValueRange` if the value exceeds the safe-integer ceiling; IO errors.
#[inline]
pub fn write(n: u64, writer: &mut dyn Write) -> Result<()> {
    if n > MAX_SAFE_VALUE {
        return Err(Error::ValueRange(format!("Varint too large: {}", n)));
    }
    if n <= 252 {
        writer.write_u8(n as u8)?;
    } else if n <= 0xffff {
        writer.write_u8(0xfd)?;
        writer.write_u16::<LittleEndian>(n as u16)?;
    } else if n <= 0xffffffff {
        writer.write_u8(0xfe)?;
        writer.write_u32::<LittleEndian>(n as u32)?;
    } else {
        writer.write_u8(0xff)?;
        writer.write_u64::<LittleEndian>(n)?;
    }
    Ok(())
}

/// Reads a var int from bytes.
///
/// # Errors
/// `Error::ValueRange` if an 8-byte value exceeds the safe-integer ceiling;
/// IO errors on a short read.
#[inline]
pub fn read(reader: &mut dyn Read) -> Result<u64> {
    let n0 = reader.read_u8()?;
    match n0 {
        0xff => {
            let n = reader.read_u64::<LittleEndian>()?;
            if n > MAX_SAFE_VALUE {
                return Err(Error::ValueRange(format!("Varint too large: {}", n)));
            }
            Ok(n)
        }
        0xfe => Ok(u64::from(reader.read_u32::<LittleEndian>()?)),
        0xfd => Ok(u64::from(reader.read_u16::<LittleEndian>()?)),
        _ => Ok(u64::from(n0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn size() {
        assert_eq!(super::size(0), 1);
        assert_eq!(super::size(252), 1);
        assert_eq!(super::size(253), 3);
        assert_eq!(super::size(u16::MAX as u64), 3);
        assert_eq!(super::size(u16::MAX as u64 + 1), 5);
        assert_eq!(super::size(u32::MAX as u64), 5);
        assert_eq!(super::size(u32::MAX as u64 + 1), 9);
    }

    #[test]
    fn write_read() {
        write_read_value(0);
        write_read_value(253);
        write_read_value(u16::MAX as u64);
        write_read_value(u32::MAX as u64);
        write_read_value(MAX_SAFE_VALUE);
    }

    #[test]
    fn rejects_above_safe_ceiling() {
        let mut v = Vec::new();
        assert!(write(MAX_SAFE_VALUE + 1, &mut v).is_err());

        let mut encoded = vec![0xffu8];
        encoded.extend_from_slice(&(MAX_SAFE_VALUE + 1).to_le_bytes());
        assert!(read(&mut Cursor::new(&encoded)).is_err());
    }

    #[test]
    fn slice_and_vector_sizes() {
        assert_eq!(var_slice_size(0), 1);
        assert_eq!(var_slice_size(252), 253);
        assert_eq!(var_slice_size(253), 256);
        assert_eq!(vector_size(&[]), 1);
        assert_eq!(vector_size(&[vec![0; 3], vec![0; 300]]), 1 + 4 + 303);
    }

    fn write_read_value(n: u64) {
        let mut v = Vec::new();
        write(n, &mut v).unwrap();
        assert_eq!(v.len(), super::size(n));
        assert_eq!(read(&mut Cursor::new(&v)).unwrap(), n);
    }
}
