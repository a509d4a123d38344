//! Shape of an import, ready to be merged into the credential store.
//!
//! Serialization follows the store's JSON backup format:
//!
//! ```json
//! {
//!   "application": "easypasswords",
//!   "format": 1,
//!   "sites": {
//!     "example.com": {
//!       "passwords": {
//!         "jane": { "name": "Mail", "type": "stored", "password": "...", "notes": "..." }
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blob::EncryptedBlob;

/// Value of the `application` marker in every import.
pub const APPLICATION: &str = "easypasswords";

/// Version of the backup format produced by the importer.
pub const FORMAT_VERSION: u32 = 1;

/// Complete result of one import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub application: String,
    pub format: u32,
    /// Sites keyed by normalized domain.
    pub sites: BTreeMap<String, Site>,
}

impl ImportResult {
    pub fn new() -> Self {
        Self {
            application: APPLICATION.to_string(),
            format: FORMAT_VERSION,
            sites: BTreeMap::new(),
        }
    }

    /// Returns the site for `domain`, creating it on first sight.
    pub fn site_entry(&mut self, domain: &str) -> &mut Site {
        self.sites.entry(domain.to_string()).or_default()
    }

    /// Total number of password entries across all sites.
    pub fn entry_count(&self) -> usize {
        self.sites.values().map(|site| site.passwords.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl Default for ImportResult {
    fn default() -> Self {
        Self::new()
    }
}

/// All credentials stored for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Entries keyed by username. Keys are unique within a site.
    pub passwords: BTreeMap<String, PasswordEntry>,
}

/// Kind of password held by an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// The password is kept encrypted in the store rather than generated.
    Stored,
}

/// One credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<EncryptedBlob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<EncryptedBlob>,
}

impl PasswordEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: None,
            password: None,
            notes: None,
        }
    }

    /// Stores an encrypted password and marks the entry as [`EntryType::Stored`].
    pub fn set_password(&mut self, password: EncryptedBlob) {
        self.entry_type = Some(EntryType::Stored);
        self.password = Some(password);
    }

    pub fn set_notes(&mut self, notes: EncryptedBlob) {
        self.notes = Some(notes);
    }
}
