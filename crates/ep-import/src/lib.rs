//! Lastpass import for Easy Passwords.
//!
//! The pipeline has two stages. The tokenizer from `ep-ingest` turns the
//! export text into records, then [`LastpassImporter`] reduces the records
//! into an [`ImportResult`](ep_model::ImportResult), launching one
//! encryption task per secret and joining them all before returning.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ep_crypto::{Pbkdf2AesGcm, StaticMasterPassword};
//! use ep_import::{LastpassImporter, parse_lastpass_export};
//!
//! let importer = LastpassImporter::new(
//!     Arc::new(Pbkdf2AesGcm::default()),
//!     Arc::new(StaticMasterPassword::new("master")),
//! );
//! match parse_lastpass_export(&text, &importer).await? {
//!     Some(result) => store.merge(result),
//!     None => try_next_format(&text),
//! }
//! ```

mod domain;
mod error;
mod parse;
mod record;
mod reducer;

pub use domain::{FALLBACK_DOMAIN, normalize_domain};
pub use error::{ImportError, Result};
pub use parse::parse_lastpass_export;
pub use record::{LastpassRecord, notes_discriminator};
pub use reducer::{ImportProgress, LastpassImporter};
