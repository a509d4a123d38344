//! Import error types.
//!
//! Every error aborts the whole import. There is no per-row recovery and
//! no partial result.

use ep_crypto::CryptoError;
use ep_ingest::CsvError;
use thiserror::Error;

/// Reasons a Lastpass import can fail.
#[derive(Debug, Error)]
pub enum ImportError {
    /// No master password is available.
    #[error("a master password is required to import passwords")]
    MasterPasswordRequired,

    /// The export is not well-formed CSV.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// A record has an empty name, which Lastpass never produces.
    #[error("Line {line}: entry has an empty name, which Lastpass doesn't allow")]
    MissingName { line: usize },

    /// Two records map to the same domain and username.
    #[error("multiple records for domain: {domain}, user: {username}")]
    DuplicateEntry { domain: String, username: String },

    /// An encryption task reported an error.
    #[error("failed to encrypt imported data: {0}")]
    Encryption(#[from] CryptoError),

    /// An encryption task panicked or was cancelled.
    #[error("encryption task did not complete")]
    TaskFailed(#[source] tokio::task::JoinError),
}

impl ImportError {
    /// Stable identifier for callers that localize messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MasterPasswordRequired => "master-password-required",
            Self::Csv(_) => "malformed-csv",
            Self::MissingName { .. } => "missing-name",
            Self::DuplicateEntry { .. } => "duplicate-entry",
            Self::Encryption(_) | Self::TaskFailed(_) => "encryption-failed",
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MasterPasswordRequired => Some("Unlock the store with the master password first."),
            Self::Csv(_) => Some("Export the vault from Lastpass again; the file appears truncated or edited."),
            Self::MissingName { .. } => Some("Give the entry a name in Lastpass and export again."),
            Self::DuplicateEntry { .. } => {
                Some("Remove or rename one of the duplicate entries in Lastpass and export again.")
            }
            Self::Encryption(_) | Self::TaskFailed(_) => None,
        }
    }
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_error_is_transparent() {
        let err = ImportError::from(CsvError::WrongValueCount {
            line: 4,
            saw: 8,
            expected: 7,
        });
        assert_eq!(
            err.to_string(),
            "Line 4: wrong number of values, saw 8, expected 7"
        );
        assert_eq!(err.code(), "malformed-csv");
    }

    #[test]
    fn test_duplicate_display() {
        let err = ImportError::DuplicateEntry {
            domain: "example.com".to_string(),
            username: "jane".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "multiple records for domain: example.com, user: jane"
        );
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_master_password_code() {
        assert_eq!(
            ImportError::MasterPasswordRequired.code(),
            "master-password-required"
        );
    }
}
