//! Dogecoin address handling: P2PKH and P2SH base58check encoding/decoding,
//! lock-script derivation, and private keys in wallet import format.

use crate::network::{is_p2pkh_version, is_p2sh_version, Network};
use crate::script::Script;
use crate::util::{sha256d, Error, Hash160, Result};
use base58::{FromBase58, ToBase58};

/// Encodes a base58check address from version byte and 20-byte payload.
///
/// # Errors
/// Returns `Error::BadArgument` if payload is not exactly 20 bytes.
#[inline]
pub fn encode_address(version: u8, payload: &[u8]) -> Result<String> {
    if payload.len() != 20 {
        return Err(Error::BadArgument("Payload must be 20 bytes".to_string()));
    }
    let mut v = [0u8; 25];
    v[0] = version;
    v[1..21].copy_from_slice(payload);
    let checksum = sha256d(&v[..21]);
    v[21..25].copy_from_slice(&checksum.0[..4]);
    Ok(v.to_base58())
}

/// Decodes a base58check address into version and 20-byte payload.
///
/// Verifies 25-byte length and checksum; extracts version (byte 0) and
/// payload (bytes 1-20).
///
/// # Errors
/// Returns `Error::FromBase58Error` on decode failure, `Error::BadData` on
/// invalid length or checksum.
#[inline]
pub fn decode_address(input: &str) -> Result<(u8, Hash160)> {
    let bytes = input.from_base58().map_err(Error::FromBase58Error)?;
    if bytes.len() != 25 {
        return Err(Error::BadData("Invalid address length".to_string()));
    }
    let checksum = sha256d(&bytes[..21]);
    if checksum.0[..4] != bytes[21..] {
        return Err(Error::BadData("Invalid checksum".to_string()));
    }
    let mut payload = Hash160([0; 20]);
    payload.0.copy_from_slice(&bytes[1..21]);
    Ok((bytes[0], payload))
}

/// Encodes a P2PKH address from a 20-byte pubkey hash.
///
/// # Errors
/// `Error::BadArgument` if the hash is not 20 bytes.
#[inline]
pub fn encode_p2pkh_address(network: Network, pubkey_hash: &[u8]) -> Result<String> {
    encode_address(network.p2pkh_version(), pubkey_hash)
}

/// Encodes a P2SH address from a 20-byte script hash.
///
/// # Errors
/// `Error::BadArgument` if the hash is not 20 bytes.
#[inline]
pub fn encode_p2sh_address(network: Network, script_hash: &[u8]) -> Result<String> {
    encode_address(network.p2sh_version(), script_hash)
}

/// Creates a P2PKH lock script (DUP HASH160 [hash] EQUALVERIFY CHECKSIG).
#[must_use]
#[inline]
pub fn p2pkh_lock_script(pubkey_hash: &Hash160) -> Script {
    let mut script = Script::with_capacity(25);
    script.append_slice(&[0x76, 0xa9, 0x14]);
    script.append_slice(&pubkey_hash.0);
    script.append_slice(&[0x88, 0xac]);
    script
}

/// Creates a P2SH lock script (HASH160 [hash] EQUAL).
#[must_use]
#[inline]
pub fn p2sh_lock_script(script_hash: &Hash160) -> Script {
    let mut script = Script::with_capacity(23);
    script.append_slice(&[0xa9, 0x14]);
    script.append_slice(&script_hash.0);
    script.append(0x87);
    script
}

/// Checks if a script is a P2PKH lock (len=25, ops match).
#[must_use]
#[inline]
pub fn is_p2pkh_lock_script(script: &[u8]) -> bool {
    script.len() == 25
        && script[0] == 0x76
        && script[1] == 0xa9
        && script[2] == 0x14
        && script[23] == 0x88
        && script[24] == 0xac
}

/// Extracts the pubkey hash from a P2PKH lock script.
///
/// # Errors
/// `Error::BadData` if the script is not a P2PKH lock.
pub fn pubkey_hash_from_p2pkh_lock_script(script: &[u8]) -> Result<Hash160> {
    if !is_p2pkh_lock_script(script) {
        return Err(Error::BadData("Not a P2PKH lock script".to_string()));
    }
    let mut hash = Hash160([0; 20]);
    hash.0.copy_from_slice(&script[3..23]);
    Ok(hash)
}

/// Resolves an address to its locking script, P2PKH or P2SH by version byte.
///
/// # Errors
/// Address decoding errors; `Error::BadData` for an unknown address type.
pub fn address_to_lock_script(address: &str) -> Result<Script> {
    let (version, hash) = decode_address(address)?;
    if is_p2pkh_version(version) {
        Ok(p2pkh_lock_script(&hash))
    } else if is_p2sh_version(version) {
        Ok(p2sh_lock_script(&hash))
    } else {
        Err(Error::BadData("Unknown address type".to_string()))
    }
}

/// Encodes a 32-byte private key in wallet import format (compressed flag set).
///
/// # Errors
/// `Error::BadArgument` if the key is not 32 bytes.
pub fn encode_wif(private_key: &[u8], network: Network) -> Result<String> {
    if private_key.len() != 32 {
        return Err(Error::BadArgument("Private key must be 32 bytes".to_string()));
    }
    let mut v = [0u8; 38];
    v[0] = network.wif_version();
    v[1..33].copy_from_slice(private_key);
    v[33] = 0x01;
    let checksum = sha256d(&v[..34]);
    v[34..38].copy_from_slice(&checksum.0[..4]);
    Ok(v.to_base58())
}

/// Decodes a WIF string into a 32-byte private key and its network.
///
/// # Errors
/// Base58/checksum errors; `Error::BadData` for an unknown version byte.
pub fn decode_wif(wif: &str) -> Result<([u8; 32], Network)> {
    let bytes = wif.from_base58().map_err(Error::FromBase58Error)?;
    if bytes.len() != 37 && bytes.len() != 38 {
        return Err(Error::BadData("Invalid WIF length".to_string()));
    }
    let (payload, checksum) = bytes.split_at(bytes.len() - 4);
    if sha256d(payload).0[..4] != *checksum {
        return Err(Error::BadData("Invalid checksum".to_string()));
    }
    let network = Network::from_wif_version(payload[0])?;
    let mut key = [0u8; 32];
    key.copy_from_slice(&payload[1..33]);
    Ok((key, network))
}
