//! Transaction signers and an in-memory key wallet.

mod memory;
mod signer;

pub use self::memory::MemoryWallet;
pub use self::signer::{SignatureRequest, SignatureResult, TransactionSigner};
