//! Transaction builder with pluggable signers and finalizers.

use crate::address::{address_to_lock_script, p2sh_lock_script};
use crate::script::{assemble, disassemble, Script};
use crate::transaction::sighash::sighash_preimage_bytes;
use crate::transaction::{Tx, TxIn, TxOut, DEFAULT_SEQUENCE, SIGHASH_ALL};
use crate::util::{hash160, sha256d, Error, Hash256, Result};
use crate::wallet::{SignatureRequest, TransactionSigner};
use std::sync::Arc;

/// A (public key, signature) pair destined for an unlocking script. The
/// signature bytes carry their trailing sighash-type byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSig {
    /// Compressed public key bytes.
    pub pubkey: Vec<u8>,
    /// DER signature followed by the sighash-type byte.
    pub signature: Vec<u8>,
}

/// Context handed to a finalizer to produce one input's unlocking script.
pub struct FinalizerInfo<'a> {
    /// Redeem script for pay-to-script-hash inputs.
    pub redeem_script: Option<&'a Script>,
    /// Pre-supplied unlock script fragments.
    pub unlock_script: &'a [Vec<u8>],
    /// Index of the input being finalized.
    pub input_index: usize,
    /// Accumulated signatures, pre-supplied first, then signer-produced.
    pub signatures: &'a [PartialSig],
    /// Sighash type used for this input.
    pub sighash_type: u32,
    /// Serialized sighash preimage.
    pub sighash_preimage: &'a [u8],
    /// Sighash the signatures commit to.
    pub sighash: &'a Hash256,
}

/// Strategy producing an input's final unlocking script bytes.
pub type Finalizer = Box<dyn Fn(&FinalizerInfo) -> Result<Vec<u8>>>;

/// Assembles the standard unlocking script: each signature and public key
/// as push tokens, then any pre-supplied fragments disassembled to mnemonic
/// form, then, for pay-to-script-hash, the redeem script as a final push.
///
/// # Errors
/// Script assembly or disassembly errors.
pub fn default_finalizer(info: &FinalizerInfo) -> Result<Vec<u8>> {
    let mut assembly: Vec<String> = info
        .signatures
        .iter()
        .map(|sig| format!("{} {}", hex::encode(&sig.signature), hex::encode(&sig.pubkey)))
        .collect();
    for fragment in info.unlock_script {
        assembly.push(disassemble(fragment)?);
    }
    if let Some(redeem_script) = info.redeem_script {
        assembly.push(redeem_script.to_hex());
    }
    let text = assembly
        .iter()
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    assemble(&text)
}

/// A builder input before normalization. Exactly one of `lock_script`,
/// `redeem_script` or `prev_transaction` must resolve the locking script.
#[derive(Default)]
pub struct BuilderInput {
    /// Hash of the spent transaction, internal byte order.
    pub hash: Hash256,
    /// Index of the spent output.
    pub index: u32,
    /// Sequence number, defaulting to [`DEFAULT_SEQUENCE`].
    pub sequence: Option<u32>,
    /// Locking script of the spent output, when known directly.
    pub lock_script: Option<Script>,
    /// Redeem script; derives a pay-to-script-hash locking script.
    pub redeem_script: Option<Script>,
    /// Previous transaction to take the locking script from.
    pub prev_transaction: Option<Tx>,
    /// Value of the spent output.
    pub value: u64,
    /// Pre-supplied signatures.
    pub signatures: Vec<PartialSig>,
    /// Signers invoked during finalization, in order.
    pub signers: Vec<Arc<dyn TransactionSigner>>,
    /// Sighash type override; ALL when absent.
    pub sighash_type: Option<u32>,
    /// Pre-supplied unlock script fragments.
    pub unlock_script: Vec<Vec<u8>>,
    /// Custom finalizer for exotic script templates.
    pub finalizer: Option<Finalizer>,
}

/// A builder input with its locking script and sequence resolved.
pub struct NormalizedInput {
    /// Hash of the spent transaction, internal byte order.
    pub hash: Hash256,
    /// Index of the spent output.
    pub index: u32,
    /// Sequence number.
    pub sequence: u32,
    /// Resolved locking script.
    pub lock_script: Script,
    /// Redeem script for pay-to-script-hash inputs.
    pub redeem_script: Option<Script>,
    /// Value of the spent output.
    pub value: u64,
    /// Pre-supplied signatures.
    pub signatures: Vec<PartialSig>,
    /// Signers invoked during finalization.
    pub signers: Vec<Arc<dyn TransactionSigner>>,
    /// Sighash type override.
    pub sighash_type: Option<u32>,
    /// Pre-supplied unlock script fragments.
    pub unlock_script: Vec<Vec<u8>>,
    /// Custom finalizer.
    pub finalizer: Option<Finalizer>,
}

fn normalize_input(input: BuilderInput) -> Result<NormalizedInput> {
    let sequence = input.sequence.unwrap_or(DEFAULT_SEQUENCE);
    let lock_script = if let Some(lock_script) = input.lock_script {
        lock_script
    } else if let Some(redeem_script) = &input.redeem_script {
        p2sh_lock_script(&hash160(&redeem_script.0))
    } else if let Some(prev_transaction) = &input.prev_transaction {
        prev_transaction
            .outputs
            .get(input.index as usize)
            .map(|output| output.script.clone())
            .ok_or_else(|| Error::BadArgument("Invalid input index".to_string()))?
    } else {
        return Err(Error::UnresolvedInput(
            "a lock script, redeem script or previous transaction must be provided".to_string(),
        ));
    };
    Ok(NormalizedInput {
        hash: input.hash,
        index: input.index,
        sequence,
        lock_script,
        redeem_script: input.redeem_script,
        value: input.value,
        signatures: input.signatures,
        signers: input.signers,
        sighash_type: input.sighash_type,
        unlock_script: input.unlock_script,
        finalizer: input.finalizer,
    })
}

/// A builder output, either an address and value or a finished output.
pub enum BuilderOutput {
    /// Pay to an address; the locking script is derived from it.
    Address {
        /// Destination address.
        address: String,
        /// Amount in the smallest unit.
        value: u64,
    },
    /// A finished output used as-is.
    Script(TxOut),
}

/// Resolves a builder output to a finished one.
///
/// # Errors
/// Address decoding errors.
pub fn normalize_output(output: BuilderOutput) -> Result<TxOut> {
    match output {
        BuilderOutput::Address { address, value } => Ok(TxOut {
            value,
            script: address_to_lock_script(&address)?,
        }),
        BuilderOutput::Script(tx_out) => Ok(tx_out),
    }
}

/// Builds and signs transactions input by input.
#[derive(Default)]
pub struct TransactionBuilder {
    /// Normalized inputs.
    pub inputs: Vec<NormalizedInput>,
    /// Finished outputs.
    pub outputs: Vec<TxOut>,
}

impl TransactionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    /// Adds an input, normalizing it.
    ///
    /// # Errors
    /// `Error::UnresolvedInput` when no locking script can be resolved,
    /// `Error::BadArgument` on a previous-transaction index out of range.
    pub fn add_input(&mut self, input: BuilderInput) -> Result<&mut Self> {
        self.inputs.push(normalize_input(input)?);
        Ok(self)
    }

    /// Adds an output, resolving addresses to locking scripts.
    ///
    /// # Errors
    /// Address decoding errors.
    pub fn add_output(&mut self, output: BuilderOutput) -> Result<&mut Self> {
        self.outputs.push(normalize_output(output)?);
        Ok(self)
    }

    /// The unsigned skeleton transaction.
    #[must_use]
    pub fn to_partial_transaction(&self) -> Tx {
        let inputs = self
            .inputs
            .iter()
            .map(|input| TxIn {
                prev_hash: input.hash,
                prev_index: input.index,
                script: Script::new(),
                sequence: input.sequence,
                witness: None,
            })
            .collect();
        Tx::from_partial(inputs, self.outputs.clone(), 0)
    }

    fn prev_script(&self, input_index: usize) -> Result<&Script> {
        let input = self
            .inputs
            .get(input_index)
            .ok_or_else(|| Error::BadArgument(format!("Input index {} out of range", input_index)))?;
        Ok(input.redeem_script.as_ref().unwrap_or(&input.lock_script))
    }

    /// Sighash preimage for one input, signed against its redeem script if
    /// present, else its locking script.
    ///
    /// # Errors
    /// `Error::BadArgument` on an index out of range; sighash errors.
    pub fn sig_hash_preimage(&self, input_index: usize, sighash_type: u32) -> Result<Vec<u8>> {
        let prev_script = self.prev_script(input_index)?;
        sighash_preimage_bytes(
            &self.to_partial_transaction(),
            input_index,
            prev_script,
            sighash_type,
        )
    }

    /// Sighash for one input.
    ///
    /// # Errors
    /// As [`sig_hash_preimage`](TransactionBuilder::sig_hash_preimage).
    pub fn sig_hash(&self, input_index: usize, sighash_type: u32) -> Result<Hash256> {
        Ok(sha256d(&self.sig_hash_preimage(input_index, sighash_type)?))
    }

    /// Signs every input in order and writes the finalized unlocking
    /// scripts into the skeleton transaction.
    ///
    /// Per input: the sighash type resolves to the override or ALL; each
    /// signer receives the raw sighash when it can sign hashes directly,
    /// otherwise the preimage transaction; the collected signatures, unlock
    /// fragments and redeem script go to the input's finalizer (default or
    /// custom) whose output becomes the input's script.
    ///
    /// # Errors
    /// Sighash, signer and finalizer errors.
    pub fn finalize_and_sign(&self) -> Result<Tx> {
        let mut result = self.to_partial_transaction();
        for (input_index, input) in self.inputs.iter().enumerate() {
            let sighash_type = input.sighash_type.unwrap_or(SIGHASH_ALL);
            let preimage = self.sig_hash_preimage(input_index, sighash_type)?;
            let sighash = sha256d(&preimage);

            let mut signatures = input.signatures.clone();
            for signer in &input.signers {
                let produced = if signer.can_sign_hash() {
                    signer.sign_hash(&hex::encode(sighash.0))?
                } else {
                    signer.sign_transaction(&SignatureRequest {
                        transaction: Tx::from_bytes(&preimage)?,
                        sighash_type,
                        input_index,
                    })?
                };
                let mut signature = hex::decode(&produced.signature)?;
                signature.push(sighash_type as u8);
                signatures.push(PartialSig {
                    pubkey: hex::decode(&produced.public_key)?,
                    signature,
                });
            }

            let info = FinalizerInfo {
                redeem_script: input.redeem_script.as_ref(),
                unlock_script: &input.unlock_script,
                input_index,
                signatures: &signatures,
                sighash_type,
                sighash_preimage: &preimage,
                sighash: &sighash,
            };
            let script = match &input.finalizer {
                Some(finalizer) => finalizer(&info)?,
                None => default_finalizer(&info)?,
            };
            result.inputs[input_index].script = Script(script);
        }
        Ok(result)
    }
}
