//! 160-bit hash (RIPEMD160 of SHA256) for public keys and redeem scripts.
use bitcoin_hashes::{hash160 as bh_hash160, Hash};

/// 160-bit hash for addresses and script hashes.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash160(pub [u8; 20]);

impl std::fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Hashes a data array using SHA256 followed by RIPEMD160.
#[must_use]
#[inline]
pub fn hash160(data: &[u8]) -> Hash160 {
    Hash160(bh_hash160::Hash::hash(data).to_byte_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hash160_test() {
        let pubkey =
            hex::decode("0399bbc8a765627f9a5041a8cbae34679f11ab8e93c6ce12ab126d5e79d152dbb0")
                .unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey).0),
            "917444c6ddd7d5bf07d7d3da2ecc1379014539a0"
        );
    }
}
