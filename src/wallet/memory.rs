//! In-memory wallet holding a single secp256k1 key.

use crate::address::{decode_wif, encode_p2pkh_address, encode_wif};
use crate::network::Network;
use crate::util::{hash160, Error, Result};
use crate::wallet::{SignatureRequest, SignatureResult, TransactionSigner};
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};

/// A single-key wallet with the private key held in memory.
///
/// Signs deterministically (RFC 6979), so repeated signing of the same hash
/// yields identical DER bytes.
pub struct MemoryWallet {
    secp: Secp256k1<All>,
    private_key: SecretKey,
    /// Compressed public key.
    pub public_key: PublicKey,
    /// P2PKH address for the key.
    pub address: String,
    /// Private key in wallet import format.
    pub wif: String,
    /// Network the address and WIF encode for.
    pub network: Network,
}

impl MemoryWallet {
    /// Creates a wallet from a 32-byte secret key.
    ///
    /// # Errors
    /// `Error::Secp256k1Error` on an out-of-range key.
    pub fn from_secret_key(secret: &[u8], network: Network) -> Result<MemoryWallet> {
        let secp = Secp256k1::new();
        let private_key = SecretKey::from_slice(secret)?;
        let public_key = PublicKey::from_secret_key(&secp, &private_key);
        let pubkey_hash = hash160(&public_key.serialize());
        let address = encode_p2pkh_address(network, &pubkey_hash.0)?;
        let wif = encode_wif(&private_key.secret_bytes(), network)?;
        Ok(MemoryWallet {
            secp,
            private_key,
            public_key,
            address,
            wif,
            network,
        })
    }

    /// Creates a wallet from a WIF string, taking the network from its
    /// version byte.
    ///
    /// # Errors
    /// WIF decoding errors.
    pub fn from_wif(wif: &str) -> Result<MemoryWallet> {
        let (secret, network) = decode_wif(wif)?;
        MemoryWallet::from_secret_key(&secret, network)
    }
}

impl TransactionSigner for MemoryWallet {
    fn compressed_public_key(&self) -> Result<String> {
        Ok(hex::encode(self.public_key.serialize()))
    }

    fn can_sign_hash(&self) -> bool {
        true
    }

    fn sign_hash(&self, hash_hex: &str) -> Result<SignatureResult> {
        let message = Message::from_digest_slice(&hex::decode(hash_hex)?)?;
        let signature = self.secp.sign_ecdsa(&message, &self.private_key);
        Ok(SignatureResult {
            public_key: hex::encode(self.public_key.serialize()),
            signature: hex::encode(signature.serialize_der()),
        })
    }

    fn sign_transaction(&self, _request: &SignatureRequest) -> Result<SignatureResult> {
        // never dispatched here since can_sign_hash is true
        Err(Error::BadArgument(
            "MemoryWallet signs hashes directly".to_string(),
        ))
    }
}
