//! 256-bit hash for transaction ids.
//!
//! Stored in internal (wire) byte order; displayed byte-reversed per chain
//! convention.

use crate::util::{Error, Result};
use bitcoin_hashes::{sha256d as bh_sha256d, Hash};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// 256-bit hash for blocks and transactions.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Converts the hash into its display hex string (byte-reversed).
    #[must_use]
    #[inline]
    pub fn encode(&self) -> String {
        let mut r = self.0;
        r.reverse();
        hex::encode(r)
    }

    /// Converts a display string of 64 hex characters into a hash.
    ///
    /// # Errors
    /// Hex errors, or `Error::BadArgument` if not exactly 32 bytes.
    #[inline]
    pub fn decode(s: &str) -> Result<Hash256> {
        let decoded_bytes = hex::decode(s)?;
        if decoded_bytes.len() != 32 {
            return Err(Error::BadArgument(format!(
                "Length {} of decoded bytes",
                decoded_bytes.len()
            )));
        }
        let mut hash_bytes = [0; 32];
        hash_bytes.copy_from_slice(&decoded_bytes);
        hash_bytes.reverse();
        Ok(Hash256(hash_bytes))
    }

    /// Reads a hash from its serialized internal-order form.
    ///
    /// # Errors
    /// IO errors on a short read.
    pub fn read(reader: &mut dyn Read) -> Result<Hash256> {
        let mut bytes = [0; 32];
        reader.read_exact(&mut bytes).map_err(Error::IOError)?;
        Ok(Hash256(bytes))
    }

    /// Writes the hash in internal byte order.
    ///
    /// # Errors
    /// IO errors.
    pub fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}

/// Hashes a data array twice using SHA256.
#[must_use]
#[inline]
pub fn sha256d(data: &[u8]) -> Hash256 {
    Hash256(bh_sha256d::Hash::hash(data).to_byte_array())
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
