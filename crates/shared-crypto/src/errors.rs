//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature is not 65 bytes.
    #[error("Invalid signature length: expected 65, got {0}")]
    InvalidSignatureLength(usize),

    /// r or s is zero or outside the curve order.
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// s is in the upper half of the curve order (EIP-2).
    #[error("Malleable signature: s is not in the lower half order")]
    MalleableSignature,

    /// v is not one of 0, 1, 27, 28.
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed.
    #[error("Public key recovery failed")]
    RecoveryFailed,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing backend failure.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
