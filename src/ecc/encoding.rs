//! DER signature encoding, structural validation and public key compression.

use crate::util::{Error, Result};
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1};

/// DER-encodes a signature from its raw 32-byte r and s magnitudes.
///
/// Each magnitude is right-aligned into a 33-byte scratch buffer so a zero
/// pad byte always precedes it, then trimmed to the minimal length whose
/// leading byte has a clear high bit. Trimming stops at one byte.
#[must_use]
pub fn der_encode_signature(r: &[u8; 32], s: &[u8; 32]) -> Vec<u8> {
    let r = minimal_magnitude(r);
    let s = minimal_magnitude(s);
    let mut der = Vec::with_capacity(6 + r.len() + s.len());
    der.push(0x30);
    der.push((4 + r.len() + s.len()) as u8);
    der.push(0x02);
    der.push(r.len() as u8);
    der.extend_from_slice(&r);
    der.push(0x02);
    der.push(s.len() as u8);
    der.extend_from_slice(&s);
    der
}

fn minimal_magnitude(bytes: &[u8; 32]) -> Vec<u8> {
    let mut scratch = [0u8; 33];
    scratch[1..].copy_from_slice(bytes);
    let mut start = 0;
    while start < 32 && scratch[start] == 0x00 && scratch[start + 1] < 0x80 {
        start += 1;
    }
    scratch[start..].to_vec()
}

/// Decodes a DER signature into its raw 64-byte (r ‖ s) form.
///
/// Accepts magnitudes up to 33 bytes (one pad byte); shorter magnitudes are
/// left-padded with zeros to 32 bytes.
///
/// # Errors
/// `Error::InvalidSignature` on any structural violation.
pub fn decode_der_signature(der: &[u8]) -> Result<[u8; 64]> {
    let err = || Error::InvalidSignature("Malformed DER signature".to_string());
    if der.len() < 8 || der[0] != 0x30 || der[2] != 0x02 {
        return Err(err());
    }
    let r_len = der[3] as usize;
    if 6 + r_len > der.len() || der[4 + r_len] != 0x02 {
        return Err(err());
    }
    let s_len = der[5 + r_len] as usize;
    if 6 + r_len + s_len != der.len() {
        return Err(err());
    }
    let r = &der[4..4 + r_len];
    let s = &der[6 + r_len..];
    let mut raw = [0u8; 64];
    copy_magnitude(r, &mut raw[..32]).ok_or_else(err)?;
    copy_magnitude(s, &mut raw[32..]).ok_or_else(err)?;
    Ok(raw)
}

fn copy_magnitude(magnitude: &[u8], dest: &mut [u8]) -> Option<()> {
    let magnitude = match magnitude.len() {
        0 => return None,
        33 if magnitude[0] == 0x00 => &magnitude[1..],
        len if len <= 32 => magnitude,
        _ => return None,
    };
    dest[32 - magnitude.len()..].copy_from_slice(magnitude);
    Some(())
}

/// Runs the 14 structural checks on a DER signature followed by its
/// sighash-type byte. Returns 0 when valid, otherwise the number of the
/// first failed check.
///
/// The checks, in order: length bounds (1, 2), `0x30` tag (3), declared
/// total length (4), r-length bookkeeping (5), total r/s bookkeeping (6),
/// `0x02` tag, non-zero length, clear high bit and no redundant pad for r
/// (7-10) and for s (11-14).
#[must_use]
pub fn check_der_encoding(sig: &[u8]) -> u8 {
    if sig.len() < 9 {
        return 1;
    }
    if sig.len() > 73 {
        return 2;
    }
    if sig[0] != 0x30 {
        return 3;
    }
    if sig[1] as usize != sig.len() - 3 {
        return 4;
    }
    let len_r = sig[3] as usize;
    if 5 + len_r >= sig.len() {
        return 5;
    }
    let len_s = sig[5 + len_r] as usize;
    if len_r + len_s + 7 != sig.len() {
        return 6;
    }
    if sig[2] != 0x02 {
        return 7;
    }
    if len_r == 0 {
        return 8;
    }
    if sig[4] & 0x80 != 0 {
        return 9;
    }
    if len_r > 1 && sig[4] == 0x00 && sig[5] & 0x80 == 0 {
        return 10;
    }
    if sig[len_r + 4] != 0x02 {
        return 11;
    }
    if len_s == 0 {
        return 12;
    }
    if sig[len_r + 6] & 0x80 != 0 {
        return 13;
    }
    if len_s > 1 && sig[len_r + 6] == 0x00 && sig[len_r + 7] & 0x80 == 0 {
        return 14;
    }
    0
}

/// Validates a DER signature plus sighash-type byte, failing with the
/// number of the first violated structural check.
///
/// # Errors
/// `Error::InvalidSignature` naming the failed check.
pub fn validate_der_encoding(sig: &[u8]) -> Result<()> {
    match check_der_encoding(sig) {
        0 => Ok(()),
        code => Err(Error::InvalidSignature(format!(
            "DER encoding check {} failed",
            code
        ))),
    }
}

/// Compresses a 65-byte uncompressed public key to 33 bytes.
///
/// The parity byte is `0x02` for even Y, `0x03` for odd, taken from the
/// least-significant bit of the last coordinate byte.
///
/// # Errors
/// `Error::BadArgument` on wrong length or a missing `0x04` marker.
pub fn compress_public_key(public_key: &[u8]) -> Result<[u8; 33]> {
    if public_key.len() != 65 {
        return Err(Error::BadArgument("Invalid public key length".to_string()));
    }
    if public_key[0] != 0x04 {
        return Err(Error::BadArgument("Invalid public key prefix".to_string()));
    }
    let mut compressed = [0u8; 33];
    compressed[0] = if public_key[64] & 1 != 0 { 0x03 } else { 0x02 };
    compressed[1..].copy_from_slice(&public_key[1..33]);
    Ok(compressed)
}

/// Verifies a signature over a message hash, normalizing DER input to the
/// raw 64-byte (r ‖ s) form first. Returns the raw signature hex.
///
/// Accepts either a 64-byte raw signature or a DER one (leading `0x30`).
/// Never returns an unverified signature.
///
/// # Errors
/// `Error::InvalidSignature` on structural or cryptographic failure.
pub fn verify_normalize_signature(
    signature_hex: &str,
    message_hash_hex: &str,
    public_key_hex: &str,
) -> Result<String> {
    let sig_bytes = hex::decode(signature_hex)?;
    let mut raw = [0u8; 64];
    if sig_bytes.len() == 64 {
        raw.copy_from_slice(&sig_bytes);
    } else if sig_bytes.len() > 32 && sig_bytes[0] == 0x30 {
        raw = decode_der_signature(&sig_bytes)?;
    } else {
        return Err(Error::InvalidSignature("Unrecognized signature form".to_string()));
    }

    let signature = Signature::from_compact(&raw)
        .map_err(|_| Error::InvalidSignature("Signature out of field range".to_string()))?;
    let message = Message::from_digest_slice(&hex::decode(message_hash_hex)?)?;
    let public_key = PublicKey::from_slice(&hex::decode(public_key_hex)?)?;
    let secp = Secp256k1::verification_only();
    secp.verify_ecdsa(&message, &signature, &public_key)
        .map_err(|_| Error::InvalidSignature("Signature verification failed".to_string()))?;
    Ok(hex::encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw_parts(raw_hex: &str) -> ([u8; 32], [u8; 32]) {
        let bytes = hex::decode(raw_hex).unwrap();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        (r, s)
    }

    const RAW_SIG: &str = "5889f73400c96378860d331f349e13dfd37c583826dd5bba8b30d56c36e4dd3672104354b7252a9b71fa9ac1c0788085af72eb96b2952070b809330226cddcb8";
    const DER_SIG: &str = "304402205889f73400c96378860d331f349e13dfd37c583826dd5bba8b30d56c36e4dd36022072104354b7252a9b71fa9ac1c0788085af72eb96b2952070b809330226cddcb8";
    const MSG_HASH: &str = "f748cc58f5437a0c714ed90937f9b3254908047dcc203a9ae956f7085d38b96b";
    const PUBLIC_KEY: &str = "0399bbc8a765627f9a5041a8cbae34679f11ab8e93c6ce12ab126d5e79d152dbb0";

    #[test]
    fn encode_known_signature() {
        let (r, s) = raw_parts(RAW_SIG);
        assert_eq!(hex::encode(der_encode_signature(&r, &s)), DER_SIG);
    }

    #[test]
    fn encode_pads_high_bit() {
        let mut r = [0u8; 32];
        r[0] = 0x80;
        let mut s = [0u8; 32];
        s[31] = 0x01;
        let der = der_encode_signature(&r, &s);
        // r keeps a zero pad byte, s trims to a single byte
        assert_eq!(der[3], 33);
        assert_eq!(der[4], 0x00);
        assert_eq!(der[5], 0x80);
        assert_eq!(der[4 + 33 + 1], 1);
        assert_eq!(*der.last().unwrap(), 0x01);
    }

    #[test]
    fn encode_zero_magnitude_keeps_one_byte() {
        let r = [0u8; 32];
        let mut s = [0u8; 32];
        s[31] = 0x7f;
        let der = der_encode_signature(&r, &s);
        assert_eq!(hex::encode(der), "300602010002017f");
    }

    #[test]
    fn decode_round_trip() {
        let (r, s) = raw_parts(RAW_SIG);
        let raw = decode_der_signature(&der_encode_signature(&r, &s)).unwrap();
        assert_eq!(hex::encode(raw), RAW_SIG);

        // short magnitudes are left-padded back to 32 bytes
        let mut small_r = [0u8; 32];
        small_r[31] = 0x05;
        let raw = decode_der_signature(&der_encode_signature(&small_r, &s)).unwrap();
        assert_eq!(&raw[..32], &small_r);
    }

    #[test]
    fn decode_rejects_malformed() {
        assert!(decode_der_signature(&[]).is_err());
        assert!(decode_der_signature(&hex::decode("31440220").unwrap()).is_err());
        let mut der = hex::decode(DER_SIG).unwrap();
        der[2] = 0x03;
        assert!(decode_der_signature(&der).is_err());
    }

    fn valid_sig_with_type() -> Vec<u8> {
        let mut sig = hex::decode(DER_SIG).unwrap();
        sig.push(0x01);
        sig
    }

    #[test]
    fn der_checks_pass_for_encoded() {
        assert_eq!(check_der_encoding(&valid_sig_with_type()), 0);
        assert!(validate_der_encoding(&valid_sig_with_type()).is_ok());
    }

    #[test]
    fn der_checks_fail_individually() {
        // 1: too short
        assert_eq!(check_der_encoding(&[0x30; 8]), 1);
        // 2: too long
        assert_eq!(check_der_encoding(&[0x30; 74]), 2);
        // 3: wrong tag
        let mut sig = valid_sig_with_type();
        sig[0] = 0x31;
        assert_eq!(check_der_encoding(&sig), 3);
        // 4: wrong declared length
        let mut sig = valid_sig_with_type();
        sig[1] += 1;
        assert_eq!(check_der_encoding(&sig), 4);
        // 5: r length runs past the end
        let mut sig = valid_sig_with_type();
        sig[3] = 0x45;
        assert_eq!(check_der_encoding(&sig), 5);
        // 6: r + s lengths do not fill the buffer
        let mut sig = valid_sig_with_type();
        sig[3] -= 1;
        assert_eq!(check_der_encoding(&sig), 6);
        // 7: missing r integer tag
        let mut sig = valid_sig_with_type();
        sig[2] = 0x01;
        assert_eq!(check_der_encoding(&sig), 7);
        // 8: zero-length r
        let sig = [
            &[0x30, 0x26, 0x02, 0x00][..],
            &[0x02, 0x22][..],
            &[0x01; 34][..],
            &[0x01][..],
        ]
        .concat();
        assert_eq!(check_der_encoding(&sig), 8);
        // 9: negative r
        let mut sig = valid_sig_with_type();
        sig[4] |= 0x80;
        assert_eq!(check_der_encoding(&sig), 9);
        // 10: redundant r padding
        let sig = [
            &[0x30, 0x27, 0x02, 0x02, 0x00, 0x01][..],
            &[0x02, 0x21][..],
            &[0x01; 33][..],
            &[0x01][..],
        ]
        .concat();
        assert_eq!(check_der_encoding(&sig), 10);
        // 11: missing s integer tag
        let mut sig = valid_sig_with_type();
        let len_r = sig[3] as usize;
        sig[len_r + 4] = 0x01;
        assert_eq!(check_der_encoding(&sig), 11);
        // 12: zero-length s
        let sig = [
            &[0x30, 0x26, 0x02, 0x22][..],
            &[0x01; 34][..],
            &[0x02, 0x00, 0x01][..],
        ]
        .concat();
        assert_eq!(check_der_encoding(&sig), 12);
        // 13: negative s
        let mut sig = valid_sig_with_type();
        let len_r = sig[3] as usize;
        sig[len_r + 6] |= 0x80;
        assert_eq!(check_der_encoding(&sig), 13);
        // 14: redundant s padding
        let sig = [
            &[0x30, 0x27, 0x02, 0x21][..],
            &[0x01; 33][..],
            &[0x02, 0x02, 0x00, 0x01, 0x01][..],
        ]
        .concat();
        assert_eq!(check_der_encoding(&sig), 14);
    }

    #[test]
    fn compress_parity() {
        let mut key = [0u8; 65];
        key[0] = 0x04;
        key[1] = 0xaa;
        key[64] = 0x02;
        let compressed = compress_public_key(&key).unwrap();
        assert_eq!(compressed[0], 0x02);
        assert_eq!(compressed[1], 0xaa);

        key[64] = 0x03;
        assert_eq!(compress_public_key(&key).unwrap()[0], 0x03);

        assert!(compress_public_key(&key[..64]).is_err());
        key[0] = 0x03;
        assert!(compress_public_key(&key).is_err());
    }

    #[test]
    fn verify_raw_and_der() {
        assert_eq!(
            verify_normalize_signature(RAW_SIG, MSG_HASH, PUBLIC_KEY).unwrap(),
            RAW_SIG
        );
        assert_eq!(
            verify_normalize_signature(DER_SIG, MSG_HASH, PUBLIC_KEY).unwrap(),
            RAW_SIG
        );
    }

    #[test]
    fn verify_rejects_wrong_hash() {
        let wrong = "0000000000000000000000000000000000000000000000000000000000000001";
        assert!(matches!(
            verify_normalize_signature(RAW_SIG, wrong, PUBLIC_KEY),
            Err(Error::InvalidSignature(_))
        ));
        assert!(matches!(
            verify_normalize_signature("ff", MSG_HASH, PUBLIC_KEY),
            Err(Error::InvalidSignature(_))
        ));
    }
}
