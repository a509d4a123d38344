//! PBKDF2 + AES-256-GCM password encryption.
//!
//! The key is derived from the master password with PBKDF2-HMAC-SHA256,
//! salted with `domain + "\0" + name`, so every (domain, name) pair gets
//! its own key. Blob layout is `base64(nonce) "_" base64(ciphertext)`.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ep_model::EncryptedBlob;
use sha2::Sha256;

use crate::encryptor::{EncryptParams, PasswordEncryptor};
use crate::error::{CryptoError, Result};
use crate::master::MasterPassword;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 262_144;

const NONCE_LEN: usize = 12;
const BLOB_SEPARATOR: char = '_';

/// Settings for [`Pbkdf2AesGcm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoConfig {
    pub iterations: u32,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl CryptoConfig {
    /// Set the PBKDF2 iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }
}

/// Stock encryptor.
///
/// Key derivation is CPU bound, so each call runs on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Pbkdf2AesGcm {
    config: CryptoConfig,
}

impl Pbkdf2AesGcm {
    pub fn new(config: CryptoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> CryptoConfig {
        self.config
    }
}

#[async_trait]
impl PasswordEncryptor for Pbkdf2AesGcm {
    async fn encrypt_password(&self, params: EncryptParams) -> Result<EncryptedBlob> {
        let iterations = self.config.iterations;
        tokio::task::spawn_blocking(move || encrypt_blocking(&params, iterations)).await?
    }
}

fn derive_key(master: &MasterPassword, domain: &str, name: &str, iterations: u32) -> [u8; 32] {
    let salt = format!("{domain}\0{name}");
    let mut key = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(
        master.expose().as_bytes(),
        salt.as_bytes(),
        iterations,
        &mut key,
    );
    key
}

fn encrypt_blocking(params: &EncryptParams, iterations: u32) -> Result<EncryptedBlob> {
    let key = derive_key(
        &params.master_password,
        &params.domain,
        &params.name,
        iterations,
    );
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, params.password.as_bytes())
        .map_err(|_| CryptoError::Encrypt)?;

    tracing::trace!(iterations, bytes = ciphertext.len(), "encrypted password");
    Ok(EncryptedBlob::new(format!(
        "{}{BLOB_SEPARATOR}{}",
        STANDARD.encode(nonce),
        STANDARD.encode(ciphertext)
    )))
}

/// Decrypts a blob produced by [`Pbkdf2AesGcm`].
///
/// `domain`, `name` and `iterations` must match the values used for
/// encryption.
pub fn decrypt_password(
    blob: &EncryptedBlob,
    domain: &str,
    master: &MasterPassword,
    name: &str,
    iterations: u32,
) -> Result<String> {
    let (nonce_b64, ciphertext_b64) =
        blob.as_str()
            .split_once(BLOB_SEPARATOR)
            .ok_or_else(|| CryptoError::MalformedBlob {
                reason: "missing separator".to_string(),
            })?;
    let nonce = STANDARD
        .decode(nonce_b64)
        .map_err(|e| CryptoError::MalformedBlob {
            reason: format!("nonce: {e}"),
        })?;
    if nonce.len() != NONCE_LEN {
        return Err(CryptoError::MalformedBlob {
            reason: format!("nonce is {} bytes, expected {NONCE_LEN}", nonce.len()),
        });
    }
    let ciphertext = STANDARD
        .decode(ciphertext_b64)
        .map_err(|e| CryptoError::MalformedBlob {
            reason: format!("ciphertext: {e}"),
        })?;

    let key = derive_key(master, domain, name, iterations);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|_| CryptoError::Decrypt)?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::MalformedBlob {
        reason: format!("plaintext: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ITERATIONS: u32 = 16;

    fn master() -> MasterPassword {
        MasterPassword::from_non_empty("correct horse").expect("master")
    }

    fn params(name: &str, password: &str) -> EncryptParams {
        EncryptParams {
            domain: "example.com".to_string(),
            master_password: master(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    fn encryptor() -> Pbkdf2AesGcm {
        Pbkdf2AesGcm::new(CryptoConfig::default().with_iterations(TEST_ITERATIONS))
    }

    #[tokio::test]
    async fn test_encrypt_then_decrypt() {
        let blob = encryptor()
            .encrypt_password(params("jane", "s3cret"))
            .await
            .expect("encrypt");
        assert!(!blob.as_str().contains("s3cret"));

        let plain = decrypt_password(&blob, "example.com", &master(), "jane", TEST_ITERATIONS)
            .expect("decrypt");
        assert_eq!(plain, "s3cret");
    }

    #[tokio::test]
    async fn test_nonce_differs_per_call() {
        let first = encryptor()
            .encrypt_password(params("jane", "same"))
            .await
            .expect("encrypt");
        let second = encryptor()
            .encrypt_password(params("jane", "same"))
            .await
            .expect("encrypt");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_name_is_part_of_key() {
        let blob = encryptor()
            .encrypt_password(params("jane\0\0notes", "note text"))
            .await
            .expect("encrypt");
        let err = decrypt_password(&blob, "example.com", &master(), "jane", TEST_ITERATIONS)
            .unwrap_err();
        assert!(matches!(err, CryptoError::Decrypt));
    }

    #[test]
    fn test_malformed_blob() {
        let err = decrypt_password(
            &EncryptedBlob::new("no-separator"),
            "example.com",
            &master(),
            "jane",
            TEST_ITERATIONS,
        )
        .unwrap_err();
        assert!(matches!(err, CryptoError::MalformedBlob { .. }));

        let err = decrypt_password(
            &EncryptedBlob::new("AAAA_AAAA"),
            "example.com",
            &master(),
            "jane",
            TEST_ITERATIONS,
        )
        .unwrap_err();
        assert!(matches!(err, CryptoError::MalformedBlob { .. }));
    }

    #[test]
    fn test_iterations_never_zero() {
        assert_eq!(CryptoConfig::default().with_iterations(0).iterations, 1);
    }
}
