//! # Shared Crypto
//!
//! secp256k1 primitives for authorizing ledger vouchers.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 + Keccak-256 | Voucher signing and signer recovery |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;

pub use ecdsa::{
    address_from_verifying_key, eth_signed_message_hash, recover_address, EthSigner,
    RecoverableSignature, SIGNATURE_LENGTH,
};
pub use errors::CryptoError;
