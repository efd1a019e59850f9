//! Legacy sighash computation.

use crate::script::Script;
use crate::transaction::{Tx, TxOut, SIGHASH_ANYONECANPAY, SIGHASH_NONE, SIGHASH_SINGLE};
use crate::util::{sha256d, Error, Hash256, Result};

/// A canonicalized transaction view plus the sighash type it commits to.
/// Serializing it with [`Tx::to_sighash_bytes`] yields the preimage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigHashPreimage {
    /// Transaction view with the NONE/SINGLE/ANYONECANPAY transformations
    /// applied and the previous script placed into the signed input.
    pub transaction: Tx,
    /// Sighash type appended as the trailing preimage field.
    pub sighash_type: u32,
}

/// Builds the canonicalized transaction view a signature commits to.
///
/// The original transaction is never mutated. With NONE all outputs are
/// dropped and this input's sequence zeroed; with SINGLE the outputs are
/// truncated to the paired one and earlier outputs blanked with their
/// inputs' sequences zeroed. ANYONECANPAY keeps only this input, otherwise
/// every other input's script is emptied.
///
/// # Errors
/// `Error::BadArgument` when `input_index` is out of range, or when SINGLE
/// has no output paired with it.
pub fn prepare_sighash_preimage(
    tx: &Tx,
    input_index: usize,
    prev_script: &Script,
    sighash_type: u32,
) -> Result<SigHashPreimage> {
    if input_index >= tx.inputs.len() {
        return Err(Error::BadArgument(format!(
            "Input index {} out of range",
            input_index
        )));
    }

    let mut view = tx.clone();
    let base_type = sighash_type & 0x1f;
    if base_type == SIGHASH_NONE {
        view.outputs.clear();
        view.inputs[input_index].sequence = 0;
    } else if base_type == SIGHASH_SINGLE {
        if input_index >= view.outputs.len() {
            return Err(Error::BadArgument(format!(
                "No output pairs with input index {} for SIGHASH_SINGLE",
                input_index
            )));
        }
        view.outputs.truncate(input_index + 1);
        for i in 0..input_index {
            view.outputs[i] = TxOut::default();
            view.inputs[i].sequence = 0;
        }
    }

    if sighash_type & SIGHASH_ANYONECANPAY != 0 {
        let mut input = view.inputs.swap_remove(input_index);
        input.script = prev_script.clone();
        view.inputs = vec![input];
    } else {
        for input in &mut view.inputs {
            input.script.0.clear();
        }
        view.inputs[input_index].script = prev_script.clone();
    }

    Ok(SigHashPreimage {
        transaction: view,
        sighash_type,
    })
}

/// Serializes the sighash preimage for one input.
///
/// # Errors
/// As [`prepare_sighash_preimage`], plus serialization errors.
pub fn sighash_preimage_bytes(
    tx: &Tx,
    input_index: usize,
    prev_script: &Script,
    sighash_type: u32,
) -> Result<Vec<u8>> {
    let preimage = prepare_sighash_preimage(tx, input_index, prev_script, sighash_type)?;
    preimage.transaction.to_sighash_bytes(preimage.sighash_type)
}

/// Computes the sighash one input's signature commits to: the double-SHA256
/// of the preimage.
///
/// # Errors
/// As [`sighash_preimage_bytes`].
pub fn sighash(
    tx: &Tx,
    input_index: usize,
    prev_script: &Script,
    sighash_type: u32,
) -> Result<Hash256> {
    Ok(sha256d(&sighash_preimage_bytes(
        tx,
        input_index,
        prev_script,
        sighash_type,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::p2pkh_lock_script;
    use crate::transaction::{TxIn, SIGHASH_ALL};
    use crate::util::Hash160;
    use pretty_assertions::assert_eq;

    fn lock_script(pubkey_hash_hex: &str) -> Script {
        let mut hash = Hash160([0; 20]);
        hash.0.copy_from_slice(&hex::decode(pubkey_hash_hex).unwrap());
        p2pkh_lock_script(&hash)
    }

    fn test_tx() -> (Tx, Script, Script) {
        let lock0 = lock_script("1122334455667788990011223344556677889900");
        let lock1 = lock_script("917444c6ddd7d5bf07d7d3da2ecc1379014539a0");
        let tx = Tx {
            version: 2,
            inputs: vec![
                TxIn {
                    prev_hash: Hash256::decode(
                        "a882c8f75a0db716caf15c67f8bd94385a75a231571f72527bbd46f8786848df",
                    )
                    .unwrap(),
                    prev_index: 0,
                    script: Script::new(),
                    sequence: 0xffffffff,
                    witness: None,
                },
                TxIn {
                    prev_hash: Hash256::decode(
                        "e389461b1a276f5f836c75d31e6ae9cbf7009d6655388d600b77d6fd6b3a5c99",
                    )
                    .unwrap(),
                    prev_index: 1,
                    script: Script::new(),
                    sequence: 0xfffffffe,
                    witness: None,
                },
            ],
            outputs: vec![
                TxOut {
                    value: 123456789,
                    script: lock0.clone(),
                },
                TxOut {
                    value: 50000000,
                    script: lock1.clone(),
                },
            ],
            lock_time: 0,
        };
        (tx, lock0, lock1)
    }

    #[test]
    fn sighash_all() {
        let (tx, lock0, _) = test_tx();
        let preimage = sighash_preimage_bytes(&tx, 0, &lock0, SIGHASH_ALL).unwrap();
        assert_eq!(preimage.len(), 189);
        assert_eq!(
            hex::encode(sighash(&tx, 0, &lock0, SIGHASH_ALL).unwrap().0),
            "ddcc5367c0ac61046ea349871b460cde2dde48107c9a5fb3cd3e06cbd0a233d3"
        );
        // the original transaction is untouched
        assert!(tx.inputs[0].script.is_empty());
        assert_eq!(tx.outputs.len(), 2);
    }

    #[test]
    fn sighash_none() {
        let (tx, lock0, _) = test_tx();
        let preimage = prepare_sighash_preimage(&tx, 0, &lock0, SIGHASH_NONE).unwrap();
        assert!(preimage.transaction.outputs.is_empty());
        assert_eq!(preimage.transaction.inputs[0].sequence, 0);
        assert_eq!(preimage.transaction.inputs[1].sequence, 0xfffffffe);
        let bytes = preimage.transaction.to_sighash_bytes(SIGHASH_NONE).unwrap();
        assert_eq!(bytes.len(), 121);
        assert_eq!(
            hex::encode(sighash(&tx, 0, &lock0, SIGHASH_NONE).unwrap().0),
            "ff8dbf3522ce0f1e950633dc42d4071941f8e2001510843bc220c3904ed3ddaf"
        );
    }

    #[test]
    fn sighash_single() {
        let (tx, _, lock1) = test_tx();
        let preimage = prepare_sighash_preimage(&tx, 1, &lock1, SIGHASH_SINGLE).unwrap();
        assert_eq!(preimage.transaction.outputs.len(), 2);
        assert_eq!(preimage.transaction.outputs[0], TxOut::default());
        assert_eq!(preimage.transaction.inputs[0].sequence, 0);
        let bytes = preimage.transaction.to_sighash_bytes(SIGHASH_SINGLE).unwrap();
        assert_eq!(bytes.len(), 164);
        assert_eq!(
            hex::encode(sighash(&tx, 1, &lock1, SIGHASH_SINGLE).unwrap().0),
            "06ba337648f8e3f4d4f037a6681467320fd71961a2c2c720739003e497c32ead"
        );
    }

    #[test]
    fn sighash_anyonecanpay() {
        let (tx, _, lock1) = test_tx();
        let sighash_type = SIGHASH_ALL | SIGHASH_ANYONECANPAY;
        let preimage = prepare_sighash_preimage(&tx, 1, &lock1, sighash_type).unwrap();
        assert_eq!(preimage.transaction.inputs.len(), 1);
        assert_eq!(preimage.transaction.inputs[0].script, lock1);
        let bytes = preimage.transaction.to_sighash_bytes(sighash_type).unwrap();
        assert_eq!(bytes.len(), 148);
        assert_eq!(
            hex::encode(sighash(&tx, 1, &lock1, sighash_type).unwrap().0),
            "0393b25992b31e6fc691e21db41b545895a6febeab01bed0726ac24d41cdd61e"
        );
    }

    #[test]
    fn deterministic_and_input_sensitive() {
        let (tx, lock0, lock1) = test_tx();
        let first = sighash(&tx, 0, &lock0, SIGHASH_ALL).unwrap();
        assert_eq!(sighash(&tx, 0, &lock0, SIGHASH_ALL).unwrap(), first);
        assert_ne!(sighash(&tx, 1, &lock1, SIGHASH_ALL).unwrap(), first);
        assert_ne!(sighash(&tx, 0, &lock1, SIGHASH_ALL).unwrap(), first);
        assert_ne!(sighash(&tx, 0, &lock0, SIGHASH_NONE).unwrap(), first);
    }

    #[test]
    fn out_of_range_input() {
        let (tx, lock0, _) = test_tx();
        assert!(matches!(
            sighash(&tx, 2, &lock0, SIGHASH_ALL),
            Err(Error::BadArgument(_))
        ));
    }

    #[test]
    fn single_without_paired_output() {
        let (mut tx, lock0, lock1) = test_tx();
        tx.outputs.truncate(1);
        assert!(matches!(
            sighash(&tx, 1, &lock1, SIGHASH_SINGLE),
            Err(Error::BadArgument(_))
        ));
        // index 0 still pairs with the remaining output
        assert!(sighash(&tx, 0, &lock0, SIGHASH_SINGLE).is_ok());
    }
}
