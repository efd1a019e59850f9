//! Pay-to-script-hash spend construction from raw or BASM-lite scripts.

use crate::address::encode_p2sh_address;
use crate::network::Network;
use crate::script::{compile_basm_bytes, Script};
use crate::transaction::p2pkh::FundingUtxo;
use crate::transaction::{BuilderInput, BuilderOutput, TransactionBuilder};
use crate::util::{hash160, Error, Hash256, Result};
use crate::wallet::TransactionSigner;
use std::sync::Arc;

/// Parameters for a pay-to-script-hash spend. The redeem script may be
/// given as bytes or BASM-lite source; likewise the unlock fragments.
#[derive(Default)]
pub struct P2shParams {
    /// Redeem script bytes.
    pub redeem_script: Option<Vec<u8>>,
    /// Redeem script as BASM-lite source, compiled when bytes are absent.
    pub redeem_script_basm: Option<String>,
    /// Pre-supplied unlock script fragments.
    pub unlock_script: Option<Vec<Vec<u8>>>,
    /// Unlock fragment as BASM-lite source, compiled when bytes are absent.
    pub unlock_script_basm: Option<String>,
    /// Signers applied to every input.
    pub signers: Vec<Arc<dyn TransactionSigner>>,
    /// Spent outputs.
    pub inputs: Vec<FundingUtxo>,
    /// Outputs created.
    pub outputs: Vec<BuilderOutput>,
}

/// P2SH address for a redeem script.
///
/// # Errors
/// Encoding errors.
pub fn p2sh_address(redeem_script: &[u8], network: Network) -> Result<String> {
    encode_p2sh_address(network, &hash160(redeem_script).0)
}

/// Builds a transaction spending outputs locked to the hash of the given
/// redeem script.
///
/// # Errors
/// `Error::BadArgument` when neither redeem script form is given; script
/// compilation, address and txid errors.
pub fn create_p2sh_transaction(params: P2shParams) -> Result<TransactionBuilder> {
    let redeem_script = match (params.redeem_script, &params.redeem_script_basm) {
        (Some(bytes), _) => bytes,
        (None, Some(basm)) => compile_basm_bytes(basm)?,
        (None, None) => {
            return Err(Error::BadArgument(
                "a redeem script or its BASM source must be provided".to_string(),
            ))
        }
    };
    let unlock_script = match (params.unlock_script, &params.unlock_script_basm) {
        (Some(fragments), _) => fragments,
        (None, Some(basm)) => vec![compile_basm_bytes(basm)?],
        (None, None) => vec![],
    };

    let mut builder = TransactionBuilder::new();
    for input in &params.inputs {
        builder.add_input(BuilderInput {
            hash: Hash256::decode(&input.txid)?,
            index: input.vout,
            sequence: input.sequence,
            redeem_script: Some(Script(redeem_script.clone())),
            value: input.value,
            signers: params.signers.clone(),
            unlock_script: unlock_script.clone(),
            ..Default::default()
        })?;
    }
    for output in params.outputs {
        builder.add_output(output)?;
    }
    Ok(builder)
}
