//! Top-level error types for the SDK.
//!
//! This module contains [`ConfigError`], returned by configuration
//! constructors and the [`ShopeeConfigBuilder`](crate::ShopeeConfigBuilder),
//! and [`ShopeeError`], the combined error type returned by the resource
//! modules.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation before any network activity takes place. Resource
//! module calls return `Result<T, ShopeeError>`, which wraps the token- and
//! dispatch-layer errors without altering them.
//!
//! # Example
//!
//! ```rust
//! use shopee_api::{ConfigError, PartnerKey};
//!
//! let result = PartnerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyPartnerKey)));
//! ```

use crate::auth::TokenError;
use crate::clients::ApiError;
use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration values. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Partner id must be a positive integer.
    #[error("Partner id must be a positive integer. Use the partner id issued by the Shopee Open Platform console.")]
    InvalidPartnerId,

    /// Partner key cannot be empty.
    #[error("Partner key cannot be empty. Please provide the partner key issued by the Shopee Open Platform console.")]
    EmptyPartnerKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Combined error type returned by the resource modules.
///
/// A resource call first resolves the entity's access token through the
/// [`TokenCache`](crate::auth::TokenCache), then dispatches the signed
/// request; either step can fail. Both underlying errors are surfaced
/// unmodified.
#[derive(Debug, Error)]
pub enum ShopeeError {
    /// Token resolution failed (missing authorization, rejected exchange
    /// or refresh, or a failure during the refresh call).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The API call itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// Verify ShopeeError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeError>();
};
