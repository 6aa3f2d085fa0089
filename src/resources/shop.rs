//! Shop profile endpoints.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{EntityKind, Scope, TokenCache};
use crate::clients::{HttpClient, QueryParams};
use crate::config::paths;
use crate::error::ShopeeError;

/// Shop information returned by `get_shop_info`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ShopInfo {
    pub shop_id: u64,
    pub shop_name: String,
    pub region: String,
    pub status: String,
    /// Whether the shop sells cross-border.
    pub is_cb: bool,
    /// Whether the shop belongs to a China-seller service-center account.
    pub is_cnsc: bool,
    pub auth_time: i64,
    pub expire_time: i64,
}

/// Profile fields accepted by `update_profile`. Unset fields are left
/// unchanged.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateProfileOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Shop module for accessing shop information and settings.
///
/// # Example
///
/// ```rust,ignore
/// let info = client.shop.get_shop_info(14_701_711).await?;
/// println!("{} ({})", info.shop_name, info.region);
/// ```
#[derive(Debug)]
pub struct ShopModule {
    http: Arc<HttpClient>,
    tokens: Arc<TokenCache>,
}

impl ShopModule {
    pub(crate) fn new(http: Arc<HttpClient>, tokens: Arc<TokenCache>) -> Self {
        Self { http, tokens }
    }

    /// Gets shop information.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_shop_info(&self, shop_id: u64) -> Result<ShopInfo, ShopeeError> {
        let token = self.tokens.get_valid_token(EntityKind::Shop, shop_id).await?;
        let info = self
            .http
            .get(
                paths::GET_SHOP_INFO,
                &QueryParams::new(),
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(info)
    }

    /// Updates shop profile information.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn update_profile(
        &self,
        shop_id: u64,
        options: &UpdateProfileOptions,
    ) -> Result<(), ShopeeError> {
        let token = self.tokens.get_valid_token(EntityKind::Shop, shop_id).await?;
        let _: serde_json::Value = self
            .http
            .post(
                paths::UPDATE_SHOP_PROFILE,
                options,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(())
    }
}
