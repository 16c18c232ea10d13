//! Environment variable secret provider.
//!
//! The completion API credential is read from the process environment once
//! at start-up and wrapped in a [`SecretString`] so it is never printed by
//! `Debug` or tracing output.

use secrecy::SecretString;

/// Read-only secret provider backed by environment variables.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key` as an environment variable.
    ///
    /// Unset, empty and non-Unicode values are all treated as missing.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "environment variable is not valid Unicode, ignoring");
                None
            }
        }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
