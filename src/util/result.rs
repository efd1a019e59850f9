//! Standard error and result types for the library.
use base58::FromBase58Error;
use hex::FromHexError;
use secp256k1::Error as Secp256k1Error;
use std::io;
use std::num::ParseIntError;
use std::string::FromUtf8Error;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// An argument provided is invalid
    BadArgument(String),
    /// The data given is not valid
    BadData(String),
    /// Base58 string could not be decoded
    FromBase58Error(FromBase58Error),
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// UTF8 parsing error
    FromUtf8Error(FromUtf8Error),
    /// A signature failed structural DER checks or cryptographic verification
    InvalidSignature(String),
    /// Standard library IO error
    IOError(io::Error),
    /// Error parsing an integer
    ParseIntError(ParseIntError),
    /// Error assembling or disassembling a script
    ScriptError(String),
    /// Error in the Secp256k1 library
    Secp256k1Error(Secp256k1Error),
    /// A builder input had no lock script, redeem script or previous transaction
    UnresolvedInput(String),
    /// A value requires more precision than the 53-bit safe-integer ceiling
    ValueRange(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => write!(f, "Bad argument: {}", s),
            Error::BadData(s) => write!(f, "Bad data: {}", s),
            Error::FromBase58Error(e) => write!(f, "Base58 decoding error: {:?}", e),
            Error::FromHexError(e) => write!(f, "Hex decoding error: {}", e),
            Error::FromUtf8Error(e) => write!(f, "Utf8 parsing error: {}", e),
            Error::InvalidSignature(s) => write!(f, "Invalid signature: {}", s),
            Error::IOError(e) => write!(f, "IO error: {}", e),
            Error::ParseIntError(e) => write!(f, "ParseIntError: {}", e),
            Error::ScriptError(s) => write!(f, "Script error: {}", s),
            Error::Secp256k1Error(e) => write!(f, "Secp256k1 error: {}", e),
            Error::UnresolvedInput(s) => write!(f, "Unresolved input: {}", s),
            Error::ValueRange(s) => write!(f, "Value out of range: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FromHexError(e) => Some(e),
            Error::FromUtf8Error(e) => Some(e),
            Error::IOError(e) => Some(e),
            Error::ParseIntError(e) => Some(e),
            Error::Secp256k1Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FromBase58Error> for Error {
    fn from(e: FromBase58Error) -> Self {
        Error::FromBase58Error(e)
    }
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(e: FromUtf8Error) -> Self {
        Error::FromUtf8Error(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IOError(e)
    }
}

impl From<ParseIntError> for Error {
    fn from(e: ParseIntError) -> Self {
        Error::ParseIntError(e)
    }
}

impl From<Secp256k1Error> for Error {
    fn from(e: Secp256k1Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;
