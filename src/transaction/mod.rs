//! Transaction model, wire codec, sighash computation and builder.

pub mod builder;
pub mod json;
pub mod p2pkh;
pub mod p2sh;
pub mod sighash;
mod tx;
mod tx_in;
mod tx_out;

pub use self::builder::{
    default_finalizer, normalize_output, BuilderInput, BuilderOutput, Finalizer, FinalizerInfo,
    NormalizedInput, PartialSig, TransactionBuilder,
};
pub use self::json::{TxInJson, TxJson, TxOutJson};
pub use self::p2pkh::{create_p2pkh_transaction, FundingUtxo};
pub use self::p2sh::{create_p2sh_transaction, p2sh_address, P2shParams};
pub use self::sighash::{prepare_sighash_preimage, sighash, sighash_preimage_bytes, SigHashPreimage};
pub use self::tx::{Tx, Utxo};
pub use self::tx_in::TxIn;
pub use self::tx_out::TxOut;

/// Sign all outputs.
pub const SIGHASH_ALL: u32 = 0x01;
/// Sign no outputs.
pub const SIGHASH_NONE: u32 = 0x02;
/// Sign only the output paired with this input.
pub const SIGHASH_SINGLE: u32 = 0x03;
/// Sign only this input, letting others add or remove inputs freely.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Marker byte preceding witness-bearing serializations.
pub const ADVANCED_TRANSACTION_MARKER: u8 = 0x00;
/// Flag byte following the witness marker.
pub const ADVANCED_TRANSACTION_FLAG: u8 = 0x01;

/// Sequence for inputs that opt out of replacement and relative locktime.
pub const DEFAULT_SEQUENCE: u32 = 0xffffffff;
