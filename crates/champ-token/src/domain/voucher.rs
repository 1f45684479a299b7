//! # Reward Vouchers
//!
//! A voucher binds `(recipient, amount, expiry, nonce)`. It travels as four
//! ABI words and is authorized by a `personal_sign` signature over the
//! Keccak-256 of its packed form:
//!
//! ```text
//! digest = keccak256("\x19Ethereum Signed Message:\n32" ||
//!          keccak256(recipient[20] || amount[32] || expiry[32] || nonce[32]))
//! ```

use crate::errors::VoucherError;
use serde::{Deserialize, Serialize};
use shared_crypto::{
    eth_signed_message_hash, recover_address, CryptoError, EthSigner, RecoverableSignature,
};
use shared_types::abi::{self, WORD_SIZE};
use shared_types::{keccak256_concat, Address, Hash, Timestamp, U256};

/// An off-chain grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Paid account.
    pub recipient: Address,
    /// Amount in the payout asset's base units.
    pub amount: U256,
    /// Last valid second.
    pub expiry: U256,
    /// Must equal the recipient's next nonce.
    pub nonce: U256,
}

impl Voucher {
    /// Length of the ABI encoding.
    pub const ENCODED_LEN: usize = 4 * WORD_SIZE;

    /// Creates a voucher.
    #[must_use]
    pub fn new(recipient: Address, amount: U256, expiry: Timestamp, nonce: U256) -> Self {
        Self {
            recipient,
            amount,
            expiry: U256::from(expiry),
            nonce,
        }
    }

    /// ABI encoding (four words).
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        abi::join_words(&[
            abi::encode_address(&self.recipient),
            abi::encode_u256(self.amount),
            abi::encode_u256(self.expiry),
            abi::encode_u256(self.nonce),
        ])
    }

    /// Parses the ABI encoding.
    pub fn decode(data: &[u8]) -> Result<Self, VoucherError> {
        let words = abi::split_words(data, 4)?;
        Ok(Self {
            recipient: abi::decode_address(&words[0])?,
            amount: abi::decode_u256(&words[1]),
            expiry: abi::decode_u256(&words[2]),
            nonce: abi::decode_u256(&words[3]),
        })
    }

    /// Keccak-256 of the packed encoding.
    #[must_use]
    pub fn packed_hash(&self) -> Hash {
        keccak256_concat(&[
            self.recipient.as_bytes(),
            &abi::encode_u256(self.amount),
            &abi::encode_u256(self.expiry),
            &abi::encode_u256(self.nonce),
        ])
    }

    /// Digest the signer actually signs.
    #[must_use]
    pub fn signing_digest(&self) -> Hash {
        eth_signed_message_hash(&self.packed_hash())
    }

    /// `now > expiry`.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        U256::from(now) > self.expiry
    }

    /// Issues a 65-byte signature.
    pub fn sign(&self, signer: &EthSigner) -> Result<Vec<u8>, CryptoError> {
        Ok(signer.sign_eth_message(&self.packed_hash())?.to_bytes().to_vec())
    }

    /// Address that produced `signature` over this voucher.
    pub fn recover_signer(&self, signature: &[u8]) -> Result<Address, VoucherError> {
        let signature = RecoverableSignature::from_bytes(signature)?;
        Ok(recover_address(&self.signing_digest(), &signature)?)
    }
}
