use std::fmt;

use async_trait::async_trait;
use ep_model::EncryptedBlob;

use crate::error::Result;
use crate::master::MasterPassword;

/// Input of one encryption call.
#[derive(Clone)]
pub struct EncryptParams {
    /// Normalized domain the secret belongs to.
    pub domain: String,
    pub master_password: MasterPassword,
    /// Discriminator name: the username, or a derived name for notes.
    pub name: String,
    /// Plaintext to encrypt.
    pub password: String,
}

impl fmt::Debug for EncryptParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptParams")
            .field("domain", &self.domain)
            .field("master_password", &self.master_password)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Asynchronous password encryption backend.
#[async_trait]
pub trait PasswordEncryptor: Send + Sync {
    async fn encrypt_password(&self, params: EncryptParams) -> Result<EncryptedBlob>;
}
