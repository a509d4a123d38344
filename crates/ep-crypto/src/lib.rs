//! Encryption collaborators used by the Lastpass importer.
//!
//! The importer only depends on two seams:
//!
//! - [`PasswordEncryptor`]: asynchronously turns a plaintext secret into an
//!   [`EncryptedBlob`](ep_model::EncryptedBlob)
//! - [`MasterPasswordProvider`]: synchronously reports the current master
//!   password, or nothing when the store is locked
//!
//! [`Pbkdf2AesGcm`] is the stock encryptor. Tests and embedders can supply
//! their own implementations of either trait.

mod encryptor;
mod error;
mod master;
mod pbkdf2_aes;

pub use encryptor::{EncryptParams, PasswordEncryptor};
pub use error::{CryptoError, Result};
pub use master::{MasterPassword, MasterPasswordProvider, StaticMasterPassword};
pub use pbkdf2_aes::{CryptoConfig, DEFAULT_ITERATIONS, Pbkdf2AesGcm, decrypt_password};
