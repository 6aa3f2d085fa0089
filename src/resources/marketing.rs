//! Marketing (Ads) endpoints.
//!
//! Ad payloads vary heavily by campaign type, so list and report results
//! are returned as raw JSON.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::{EntityKind, Scope, TokenCache};
use crate::clients::{HttpClient, QueryParams};
use crate::config::paths;
use crate::error::ShopeeError;

/// Filters for [`MarketingModule::get_ad_list`].
#[derive(Clone, Debug, Default)]
pub struct AdListOptions {
    /// Ad type filter, e.g. `product_search_ad`.
    pub ad_type: Option<String>,
    /// Status filter, e.g. `ongoing`.
    pub status: Option<String>,
}

/// One ad change for [`MarketingModule::mutate_ads`].
#[derive(Clone, Debug, Serialize)]
pub struct AdMutation {
    pub ad_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[derive(Debug, Serialize)]
struct MutateAdsBody<'a> {
    operation: &'a str,
    ads: &'a [AdMutation],
}

/// Marketing module for managing ads.
#[derive(Debug)]
pub struct MarketingModule {
    http: Arc<HttpClient>,
    tokens: Arc<TokenCache>,
}

impl MarketingModule {
    pub(crate) fn new(http: Arc<HttpClient>, tokens: Arc<TokenCache>) -> Self {
        Self { http, tokens }
    }

    async fn token(&self, shop_id: u64) -> Result<String, ShopeeError> {
        Ok(self.tokens.get_valid_token(EntityKind::Shop, shop_id).await?)
    }

    /// Gets a list of ads matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_ad_list(
        &self,
        shop_id: u64,
        options: &AdListOptions,
    ) -> Result<serde_json::Value, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push_opt("type", options.ad_type.as_deref());
        params.push_opt("status", options.status.as_deref());

        let ads = self
            .http
            .get(
                paths::GET_AD_LIST,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(ads)
    }

    /// Gets the daily performance report for shop ads on a given date
    /// (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_shop_ads_daily_report(
        &self,
        shop_id: u64,
        date: &str,
    ) -> Result<serde_json::Value, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push("date", date);

        let report = self
            .http
            .get(
                paths::GET_SHOP_ADS_DAILY_REPORT,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(report)
    }

    /// Creates, updates, or deletes ads.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn mutate_ads(
        &self,
        shop_id: u64,
        operation: &str,
        ads: &[AdMutation],
    ) -> Result<serde_json::Value, ShopeeError> {
        let token = self.token(shop_id).await?;

        let result = self
            .http
            .post(
                paths::MUTATE_ADS,
                &MutateAdsBody { operation, ads },
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(result)
    }
}
