//! Encryption error types.

use thiserror::Error;

/// Errors raised by password encryptors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The cipher refused to encrypt.
    #[error("failed to encrypt password")]
    Encrypt,

    /// Authentication failed while decrypting (wrong key or tampered data).
    #[error("failed to decrypt password")]
    Decrypt,

    /// The blob does not have the expected layout.
    #[error("malformed encrypted blob: {reason}")]
    MalformedBlob { reason: String },

    /// The blocking worker running key derivation did not complete.
    #[error("encryption worker failed")]
    Worker(#[from] tokio::task::JoinError),

    /// Failure reported by a third-party encryptor.
    #[error("encryption backend error: {message}")]
    Backend { message: String },
}

/// Result type for encryption operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
