//! JSON-safe transaction form: byte fields hex-encoded, structure mirroring
//! the wire layout field for field. Hashes stay in internal byte order so
//! the mapping is a pure re-encoding.

use crate::script::Script;
use crate::transaction::{Tx, TxIn, TxOut};
use crate::util::{Error, Hash256, Result};
use serde::{Deserialize, Serialize};

/// JSON-safe transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxJson {
    /// Transaction version.
    pub version: i32,
    /// Inputs spent.
    pub inputs: Vec<TxInJson>,
    /// Outputs created.
    pub outputs: Vec<TxOutJson>,
    /// Locktime.
    pub locktime: u32,
}

/// JSON-safe transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInJson {
    /// Spent transaction hash, internal-order hex.
    pub hash: String,
    /// Spent output index.
    pub index: u32,
    /// Unlocking script hex.
    pub script: String,
    /// Sequence number.
    pub sequence: u32,
    /// Witness stack items as hex, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness: Option<Vec<String>>,
}

/// JSON-safe transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutJson {
    /// Amount in the smallest unit.
    pub value: u64,
    /// Locking script hex.
    pub script: String,
}

impl Tx {
    /// Converts to the JSON-safe form.
    #[must_use]
    pub fn to_json(&self) -> TxJson {
        TxJson {
            version: self.version,
            inputs: self
                .inputs
                .iter()
                .map(|input| TxInJson {
                    hash: hex::encode(input.prev_hash.0),
                    index: input.prev_index,
                    script: input.script.to_hex(),
                    sequence: input.sequence,
                    witness: input
                        .witness
                        .as_ref()
                        .map(|w| w.iter().map(hex::encode).collect()),
                })
                .collect(),
            outputs: self
                .outputs
                .iter()
                .map(|output| TxOutJson {
                    value: output.value,
                    script: output.script.to_hex(),
                })
                .collect(),
            locktime: self.lock_time,
        }
    }

    /// Converts from the JSON-safe form.
    ///
    /// # Errors
    /// Hex errors, or `Error::BadData` on a hash of the wrong length.
    pub fn from_json(json: &TxJson) -> Result<Tx> {
        let mut inputs = Vec::with_capacity(json.inputs.len());
        for input in &json.inputs {
            let hash_bytes = hex::decode(&input.hash)?;
            if hash_bytes.len() != 32 {
                return Err(Error::BadData("Invalid hash length".to_string()));
            }
            let mut prev_hash = Hash256([0; 32]);
            prev_hash.0.copy_from_slice(&hash_bytes);
            let witness = match &input.witness {
                Some(items) => Some(
                    items
                        .iter()
                        .map(|item| hex::decode(item).map_err(Error::FromHexError))
                        .collect::<Result<Vec<_>>>()?,
                ),
                None => None,
            };
            inputs.push(TxIn {
                prev_hash,
                prev_index: input.index,
                script: Script::from_hex(&input.script)?,
                sequence: input.sequence,
                witness,
            });
        }
        let mut outputs = Vec::with_capacity(json.outputs.len());
        for output in &json.outputs {
            outputs.push(TxOut {
                value: output.value,
                script: Script::from_hex(&output.script)?,
            });
        }
        Ok(Tx {
            version: json.version,
            inputs,
            outputs,
            lock_time: json.locktime,
        })
    }
}
