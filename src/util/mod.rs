//! Miscellaneous helpers: hashing, varints, byte cursors, errors.

pub mod bytes;
mod hash160;
mod hash256;
mod result;
pub mod var_int;

pub use self::bytes::{ByteReader, ByteWriter};
pub use self::hash160::{hash160, Hash160};
pub use self::hash256::{sha256d, Hash256};
pub use self::result::{Error, Result};
