//! Public (partner-level) endpoints.
//!
//! These calls sign with public scope and need no shop or merchant token;
//! they enumerate the entities currently authorized to the partner.

use std::sync::Arc;

use crate::auth::Scope;
use crate::clients::{HttpClient, QueryParams};
use crate::config::paths;
use crate::error::ShopeeError;

/// Pagination for the partner-level listing endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartnerListOptions {
    /// Entries per page (defaults to the platform's own default).
    pub page_size: Option<u32>,
    /// Zero-based page offset.
    pub page_no: Option<u32>,
}

/// Public module for partner-level listings.
#[derive(Debug)]
pub struct PublicModule {
    http: Arc<HttpClient>,
}

impl PublicModule {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    async fn list(
        &self,
        path: &'static str,
        options: PartnerListOptions,
    ) -> Result<serde_json::Value, ShopeeError> {
        let mut params = QueryParams::new();
        params.push_opt("page_size", options.page_size);
        params.push_opt("page_no", options.page_no);

        let listing = self.http.get(path, &params, &Scope::Public, None).await?;
        Ok(listing)
    }

    /// Lists the shops authorized to the partner.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the call fails.
    pub async fn get_shops_by_partner(
        &self,
        options: PartnerListOptions,
    ) -> Result<serde_json::Value, ShopeeError> {
        self.list(paths::GET_SHOPS_BY_PARTNER, options).await
    }

    /// Lists the merchants authorized to the partner.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the call fails.
    pub async fn get_merchants_by_partner(
        &self,
        options: PartnerListOptions,
    ) -> Result<serde_json::Value, ShopeeError> {
        self.list(paths::GET_MERCHANTS_BY_PARTNER, options).await
    }
}
