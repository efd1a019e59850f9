//! Pay-to-public-key-hash spend construction.

use crate::address::{decode_address, p2pkh_lock_script};
use crate::transaction::{BuilderInput, BuilderOutput, TransactionBuilder};
use crate::util::{Hash256, Result};
use crate::wallet::TransactionSigner;
use std::sync::Arc;

/// A known spendable output funding a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingUtxo {
    /// Transaction id in display order.
    pub txid: String,
    /// Output index.
    pub vout: u32,
    /// Output value.
    pub value: u64,
    /// Sequence override for the spending input.
    pub sequence: Option<u32>,
}

/// Builds a transaction spending P2PKH outputs of `address`, each input
/// signed by `signer`.
///
/// # Errors
/// Address decoding or txid errors.
pub fn create_p2pkh_transaction(
    signer: Arc<dyn TransactionSigner>,
    address: &str,
    inputs: &[FundingUtxo],
    outputs: Vec<BuilderOutput>,
) -> Result<TransactionBuilder> {
    let (_, pubkey_hash) = decode_address(address)?;
    let lock_script = p2pkh_lock_script(&pubkey_hash);
    let mut builder = TransactionBuilder::new();
    for input in inputs {
        builder.add_input(BuilderInput {
            hash: Hash256::decode(&input.txid)?,
            index: input.vout,
            sequence: input.sequence,
            lock_script: Some(lock_script.clone()),
            value: input.value,
            signers: vec![signer.clone()],
            ..Default::default()
        })?;
    }
    for output in outputs {
        builder.add_output(output)?;
    }
    Ok(builder)
}
