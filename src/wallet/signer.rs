//! Signer capability contract consumed by the transaction builder.

use crate::transaction::Tx;
use crate::util::Result;

/// A produced signature with the public key it verifies against, both hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureResult {
    /// Compressed public key hex.
    pub public_key: String,
    /// DER signature hex, without the sighash-type byte.
    pub signature: String,
}

/// Everything a signer that cannot sign raw hashes needs to compute the
/// sighash itself: the canonicalized preimage transaction and the type.
#[derive(Debug, Clone)]
pub struct SignatureRequest {
    /// The sighash-preimage transaction view.
    pub transaction: Tx,
    /// Sighash type the signature commits to.
    pub sighash_type: u32,
    /// Index of the input being signed.
    pub input_index: usize,
}

/// A pluggable transaction signer.
///
/// Exactly one of [`sign_hash`](TransactionSigner::sign_hash) and
/// [`sign_transaction`](TransactionSigner::sign_transaction) is invoked per
/// input, chosen by [`can_sign_hash`](TransactionSigner::can_sign_hash).
/// Implementations may be backed by in-memory keys, hardware devices or
/// remote services; the builder invokes them strictly in input order so the
/// final transaction bytes are deterministic for deterministic signers.
pub trait TransactionSigner {
    /// Compressed public key hex for this signer's key.
    ///
    /// # Errors
    /// Signer-specific failures.
    fn compressed_public_key(&self) -> Result<String>;

    /// Whether this signer accepts a raw sighash directly.
    fn can_sign_hash(&self) -> bool;

    /// Signs a raw hash given as hex.
    ///
    /// # Errors
    /// Signer-specific failures.
    fn sign_hash(&self, hash_hex: &str) -> Result<SignatureResult>;

    /// Signs a sighash-preimage transaction.
    ///
    /// # Errors
    /// Signer-specific failures.
    fn sign_transaction(&self, request: &SignatureRequest) -> Result<SignatureResult>;
}
