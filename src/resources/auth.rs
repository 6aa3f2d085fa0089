//! Authorization flow: auth links, code exchange, and explicit refresh.
//!
//! Shop owners authorize the partner application by visiting an
//! authorization link; the platform then redirects back with a one-time
//! code that is exchanged for the initial token pair. Subsequent refreshes
//! normally happen transparently inside the
//! [`TokenCache`](crate::auth::TokenCache), but explicit entry points are
//! provided for hosts that want to refresh eagerly.
//!
//! # Example
//!
//! ```rust,ignore
//! // Step 1: send the shop owner here
//! let url = client.auth.auth_url("https://my-app.example.com/callback");
//!
//! // Step 2: the callback arrives with ?code=...&shop_id=...
//! let records = client
//!     .auth
//!     .get_access_token("authorization-code", Some(14_701_711), None)
//!     .await?;
//! ```

use std::sync::Arc;

use crate::auth::signature;
use crate::auth::{TokenCache, TokenRecord};
use crate::clients::HttpClient;
use crate::config::paths;
use crate::error::ShopeeError;

/// Auth module for the platform's authorization flow.
#[derive(Debug)]
pub struct AuthModule {
    http: Arc<HttpClient>,
    tokens: Arc<TokenCache>,
}

impl AuthModule {
    pub(crate) fn new(http: Arc<HttpClient>, tokens: Arc<TokenCache>) -> Self {
        Self { http, tokens }
    }

    /// Builds the authorization link a shop owner visits to authorize the
    /// partner application.
    ///
    /// The link is signed with public scope over the auth-partner path and
    /// carries the URL-encoded redirect target:
    /// `{host}/api/v2/shop/auth_partner?partner_id=..&timestamp=..&sign=..&redirect=..`
    #[must_use]
    pub fn auth_url(&self, redirect_url: &str) -> String {
        let config = self.http.config();
        let timestamp = signature::timestamp();
        let sign = signature::sign_public(
            config.partner_id(),
            config.partner_key(),
            paths::AUTH_PARTNER,
            timestamp,
        );

        format!(
            "{}{}?partner_id={}&timestamp={}&sign={}&redirect={}",
            config.base_url(),
            paths::AUTH_PARTNER,
            config.partner_id(),
            timestamp,
            sign,
            urlencoding::encode(redirect_url),
        )
    }

    /// Exchanges the authorization code from the OAuth callback for the
    /// initial token records and stores them in the cache.
    ///
    /// Pass `shop_id` for a single-shop authorization, or
    /// `main_account_id` for a main-account authorization (the platform
    /// then returns every granted shop and merchant id).
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the platform rejects the code or the
    /// call fails at the transport layer.
    pub async fn get_access_token(
        &self,
        code: &str,
        shop_id: Option<u64>,
        main_account_id: Option<u64>,
    ) -> Result<Vec<TokenRecord>, ShopeeError> {
        Ok(self
            .tokens
            .exchange_code(code, shop_id, main_account_id)
            .await?)
    }

    /// Refreshes the shop's access token now.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop has no stored record or the
    /// platform rejects the refresh token.
    pub async fn refresh_shop_token(&self, shop_id: u64) -> Result<TokenRecord, ShopeeError> {
        Ok(self
            .tokens
            .refresh(crate::auth::EntityKind::Shop, shop_id)
            .await?)
    }

    /// Refreshes the merchant's access token now.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the merchant has no stored record or
    /// the platform rejects the refresh token.
    pub async fn refresh_merchant_token(
        &self,
        merchant_id: u64,
    ) -> Result<TokenRecord, ShopeeError> {
        Ok(self
            .tokens
            .refresh(crate::auth::EntityKind::Merchant, merchant_id)
            .await?)
    }
}
