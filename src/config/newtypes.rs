//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around the partner credentials
//! that validate their contents on construction. Invalid values are rejected
//! with clear error messages.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated Shopee partner id.
///
/// This newtype ensures the partner id is a positive integer and provides
/// type safety to prevent accidental misuse of raw numbers.
///
/// # Example
///
/// ```rust
/// use shopee_api::PartnerId;
///
/// let id = PartnerId::new(2_001_887).unwrap();
/// assert_eq!(id.get(), 2_001_887);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(u64);

impl PartnerId {
    /// Creates a new validated partner id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPartnerId`] if the id is zero.
    pub const fn new(id: u64) -> Result<Self, ConfigError> {
        if id == 0 {
            return Err(ConfigError::InvalidPartnerId);
        }
        Ok(Self(id))
    }

    /// Returns the raw partner id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated Shopee partner key.
///
/// This newtype ensures the partner key is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `PartnerKey(*****)` instead of the actual key.
///
/// # Example
///
/// ```rust
/// use shopee_api::PartnerKey;
///
/// let key = PartnerKey::new("my-partner-key").unwrap();
/// assert_eq!(key.as_ref(), "my-partner-key");
/// assert_eq!(format!("{:?}", key), "PartnerKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PartnerKey(String);

impl PartnerKey {
    /// Creates a new validated partner key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPartnerKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyPartnerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for PartnerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PartnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PartnerKey(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_id_accepts_positive_values() {
        let id = PartnerId::new(2_001_887).unwrap();
        assert_eq!(id.get(), 2_001_887);
        assert_eq!(id.to_string(), "2001887");
    }

    #[test]
    fn test_partner_id_rejects_zero() {
        assert!(matches!(
            PartnerId::new(0),
            Err(ConfigError::InvalidPartnerId)
        ));
    }

    #[test]
    fn test_partner_id_serializes_transparently() {
        let id = PartnerId::new(123_456).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "123456");
    }

    #[test]
    fn test_partner_key_accepts_non_empty_values() {
        let key = PartnerKey::new("secret").unwrap();
        assert_eq!(key.as_ref(), "secret");
    }

    #[test]
    fn test_partner_key_rejects_empty_string() {
        assert!(matches!(
            PartnerKey::new(""),
            Err(ConfigError::EmptyPartnerKey)
        ));
    }

    #[test]
    fn test_partner_key_debug_is_masked() {
        let key = PartnerKey::new("super-secret").unwrap();
        let debug = format!("{key:?}");
        assert_eq!(debug, "PartnerKey(*****)");
        assert!(!debug.contains("super-secret"));
    }
}
