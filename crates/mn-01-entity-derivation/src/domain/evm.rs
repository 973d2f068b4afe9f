//! # EVM Address Derivation
//!
//! An account alias holding a serialized ECDSA(secp256k1) key maps to the
//! EVM address of that key: the last 20 bytes of the Keccak-256 hash of the
//! uncompressed public key (without its `0x04` prefix).

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use sha3::{Digest, Keccak256};
use shared_types::EVM_ADDRESS_LENGTH;

/// Serialized key prefix: field 7 (ECDSA secp256k1), 33 length-delimited bytes.
const ECDSA_SECP256K1_PREFIX: [u8; 2] = [0x3A, 0x21];
const ECDSA_ALIAS_LENGTH: usize = 35;

/// The EVM address of an ECDSA key alias, or `None` for any other alias.
pub fn alias_to_evm_address(alias: &[u8]) -> Option<[u8; EVM_ADDRESS_LENGTH]> {
    if alias.len() != ECDSA_ALIAS_LENGTH || alias[..2] != ECDSA_SECP256K1_PREFIX {
        return None;
    }

    let public_key = PublicKey::from_sec1_bytes(&alias[2..]).ok()?;
    let uncompressed = public_key.to_encoded_point(false);
    let hash = Keccak256::digest(&uncompressed.as_bytes()[1..]);

    let mut address = [0u8; EVM_ADDRESS_LENGTH];
    address.copy_from_slice(&hash[hash.len() - EVM_ADDRESS_LENGTH..]);
    Some(address)
}
