//! Dogecoin network parameters: address and WIF version bytes.

use crate::util::{Error, Result};

/// Dogecoin network to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Main network
    Mainnet,
    /// Test network
    Testnet,
    /// Regression-test network
    Regtest,
}

impl Network {
    /// Version byte for pay-to-public-key-hash addresses.
    #[must_use]
    #[inline]
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x1e,
            Network::Testnet => 0x71,
            Network::Regtest => 0x6f,
        }
    }

    /// Version byte for pay-to-script-hash addresses.
    #[must_use]
    #[inline]
    pub fn p2sh_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x16,
            Network::Testnet | Network::Regtest => 0xc4,
        }
    }

    /// Version byte for private keys in wallet import format.
    #[must_use]
    #[inline]
    pub fn wif_version(self) -> u8 {
        match self {
            Network::Mainnet => 0x9e,
            Network::Testnet => 0xf1,
            Network::Regtest => 0xef,
        }
    }

    /// All known networks.
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Regtest];

    /// Resolves the network carrying this P2PKH or P2SH address version.
    ///
    /// # Errors
    /// `Error::BadData` for an unknown version byte.
    pub fn from_address_version(version: u8) -> Result<Network> {
        Network::ALL
            .into_iter()
            .find(|n| n.p2pkh_version() == version || n.p2sh_version() == version)
            .ok_or_else(|| Error::BadData(format!("Unknown address version: 0x{:02x}", version)))
    }

    /// Resolves the network carrying this WIF version byte.
    ///
    /// # Errors
    /// `Error::BadData` for an unknown version byte.
    pub fn from_wif_version(version: u8) -> Result<Network> {
        Network::ALL
            .into_iter()
            .find(|n| n.wif_version() == version)
            .ok_or_else(|| Error::BadData(format!("Unknown WIF version: 0x{:02x}", version)))
    }
}

/// Returns whether the version byte denotes a P2PKH address on any network.
#[must_use]
#[inline]
pub fn is_p2pkh_version(version: u8) -> bool {
    Network::ALL.iter().any(|n| n.p2pkh_version() == version)
}

/// Returns whether the version byte denotes a P2SH address on any network.
#[must_use]
#[inline]
pub fn is_p2sh_version(version: u8) -> bool {
    Network::ALL.iter().any(|n| n.p2sh_version() == version)
}
