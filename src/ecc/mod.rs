//! Elliptic-curve signature and key codecs.

pub mod encoding;

pub use self::encoding::{
    check_der_encoding, compress_public_key, decode_der_signature, der_encode_signature,
    validate_der_encoding, verify_normalize_signature,
};
