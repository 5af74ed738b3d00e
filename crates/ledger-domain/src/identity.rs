//! Caller identity used to scope every sales fetch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the account whose sales are fetched, typically the user's primary email.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates an identity, trimming surrounding whitespace. Returns `None` for blank input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a file-name-safe key that is distinct for every distinct identity.
    ///
    /// Lowercase ASCII letters and digits are kept; every other UTF-8 byte (uppercase letters
    /// and `_` included) becomes `_xx` in lowercase hex, so the mapping is reversible and
    /// cannot collide on case-insensitive filesystems.
    pub fn storage_key(&self) -> String {
        let mut key = String::with_capacity(self.0.len());
        for byte in self.0.bytes() {
            if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
                key.push(char::from(byte));
            } else {
                key.push_str(&format!("_{byte:02x}"));
            }
        }
        key
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
