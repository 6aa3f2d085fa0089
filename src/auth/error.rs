//! Error types for request signing and token management.
//!
//! This module contains the error types for the two auth-layer concerns:
//! computing request signatures ([`SignatureError`]) and resolving access
//! tokens through the [`TokenCache`](crate::auth::TokenCache)
//! ([`TokenError`]).
//!
//! # Example
//!
//! ```rust
//! use shopee_api::auth::{EntityKind, TokenError};
//!
//! let error = TokenError::NotAuthorized {
//!     kind: EntityKind::Shop,
//!     entity_id: 14_701_711,
//! };
//! assert!(error.to_string().contains("14701711"));
//! ```

use crate::auth::token::EntityKind;
use crate::clients::ApiError;
use thiserror::Error;

/// Errors raised when the inputs for a signing base string are incomplete.
///
/// These are always programming errors on the caller's side: shop- and
/// merchant-scope requests sign over the access token, so omitting it can
/// never produce a valid signature. They are never retried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    /// A shop-scope request was signed without an access token.
    #[error("shop API requests require an access token")]
    MissingShopToken,

    /// A merchant-scope request was signed without an access token.
    #[error("merchant API requests require an access token")]
    MissingMerchantToken,
}

/// Errors that can occur while exchanging, refreshing, or resolving tokens.
///
/// # Thread Safety
///
/// `TokenError` is `Send + Sync`, making it safe to use across async
/// boundaries.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No token is stored for the requested entity.
    ///
    /// The host application must run the authorization flow (or load a
    /// persisted record via
    /// [`TokenCache::set_token`](crate::auth::TokenCache::set_token))
    /// before making calls for this entity.
    #[error("no access token stored for {kind} {entity_id}; complete the authorization flow first")]
    NotAuthorized {
        /// The kind of entity the token was requested for.
        kind: EntityKind,
        /// The shop or merchant id.
        entity_id: u64,
    },

    /// The platform rejected the authorization-code exchange.
    #[error("platform rejected the authorization code exchange: {0}")]
    ExchangeRejected(#[source] ApiError),

    /// The platform rejected the refresh token.
    ///
    /// The stored token record is left untouched when this occurs.
    #[error("platform rejected the token refresh for {kind} {entity_id}: {source}")]
    RefreshRejected {
        /// The kind of entity being refreshed.
        kind: EntityKind,
        /// The shop or merchant id.
        entity_id: u64,
        /// The underlying platform error.
        #[source]
        source: ApiError,
    },

    /// A transport- or envelope-level failure during a token operation.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// Verify the error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SignatureError>();
    assert_send_sync::<TokenError>();
};
