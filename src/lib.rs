#![deny(missing_docs)]
#![deny(unsafe_code)]

/*! # Dogelink

A Dogecoin wallet toolkit for building, signing and serializing transactions.
Provides the consensus wire codec, a script assembler/disassembler with a
small template language, DER signature encoding, legacy sighash computation,
and a transaction builder driven by pluggable signers.

## Usage
use dogelink::address::encode_p2pkh_address;
use dogelink::network::Network;
let addr = encode_p2pkh_address(Network::Mainnet, &[0; 20]).unwrap();
assert!(addr.starts_with('D'));

## Security
- This crate constructs and signs transactions; it does not validate blocks
  or scripts against consensus. Use a trusted Dogecoin node for validation.
- Randomness is never read from ambient state; keys must be supplied by the
  caller.
*/

pub mod address;
pub mod ecc;
pub mod network;
pub mod script;
pub mod transaction;
pub mod util;
pub mod wallet;
