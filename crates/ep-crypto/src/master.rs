//! Master password access.

use std::fmt;
use std::sync::Arc;

/// A non-empty master password.
///
/// Cloning is cheap; every encryption task gets its own handle.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterPassword(Arc<str>);

impl MasterPassword {
    /// Returns `None` for an empty password, which counts as locked.
    pub fn from_non_empty(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(Arc::from(value)))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MasterPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterPassword([REDACTED])")
    }
}

/// Source of the current master password.
pub trait MasterPasswordProvider: Send + Sync {
    /// Returns the master password, or `None` when none is available.
    fn master_password(&self) -> Option<MasterPassword>;
}

impl<F> MasterPasswordProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn master_password(&self) -> Option<MasterPassword> {
        self().and_then(MasterPassword::from_non_empty)
    }
}

/// Provider holding a fixed value, typically read from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticMasterPassword(Option<MasterPassword>);

impl StaticMasterPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(MasterPassword::from_non_empty(value))
    }

    /// Provider that never yields a password.
    pub fn locked() -> Self {
        Self(None)
    }
}

impl MasterPasswordProvider for StaticMasterPassword {
    fn master_password(&self) -> Option<MasterPassword> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_is_locked() {
        assert!(MasterPassword::from_non_empty("").is_none());
        assert!(StaticMasterPassword::new("").master_password().is_none());
        assert!(StaticMasterPassword::locked().master_password().is_none());
    }

    #[test]
    fn test_static_provider_returns_value() {
        let provider = StaticMasterPassword::new("hunter2");
        let master = provider.master_password().expect("master password");
        assert_eq!(master.expose(), "hunter2");
    }

    #[test]
    fn test_closure_provider() {
        let provider = || Some(String::from("s3cret"));
        assert_eq!(
            provider.master_password().map(|m| m.expose().to_string()),
            Some("s3cret".to_string())
        );
        let empty = || Some(String::new());
        assert!(empty.master_password().is_none());
    }

    #[test]
    fn test_debug_is_redacted() {
        let master = MasterPassword::from_non_empty("hunter2").expect("master");
        assert!(!format!("{master:?}").contains("hunter2"));
    }
}
