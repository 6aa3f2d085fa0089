//! Product catalog endpoints.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{EntityKind, Scope, TokenCache};
use crate::clients::{HttpClient, QueryParams};
use crate::config::paths;
use crate::error::ShopeeError;

/// Item status values reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Normal,
    Banned,
    Unlist,
    Reviewing,
    SellerDelete,
    ShopeeDelete,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "NORMAL",
            Self::Banned => "BANNED",
            Self::Unlist => "UNLIST",
            Self::Reviewing => "REVIEWING",
            Self::SellerDelete => "SELLER_DELETE",
            Self::ShopeeDelete => "SHOPEE_DELETE",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// One node of the category tree.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryInfo {
    pub category_id: u64,
    pub parent_category_id: u64,
    pub original_category_name: String,
    pub display_category_name: String,
    pub has_children: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CategoryResponse {
    category_list: Vec<CategoryInfo>,
}

/// Options for [`ProductModule::list_items`].
#[derive(Clone, Debug)]
pub struct ItemListOptions {
    /// Statuses to include; at least one is required by the platform.
    pub item_status: Vec<ItemStatus>,
    /// Zero-based offset into the result set (defaults to 0).
    pub offset: Option<u32>,
    /// Items per page (max 100, defaults to 50).
    pub page_size: Option<u32>,
    pub update_time_from: Option<i64>,
    pub update_time_to: Option<i64>,
}

/// One page of the item list.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemListResponse {
    pub item: Vec<ItemSummary>,
    pub has_next_page: bool,
    pub next_offset: u32,
    pub total_count: u32,
}

/// Id, status, and update time of one item.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemSummary {
    pub item_id: u64,
    pub item_status: String,
    pub update_time: i64,
}

/// Basic information for one item.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemBaseInfo {
    pub item_id: u64,
    pub category_id: u64,
    pub item_name: String,
    pub description: String,
    pub item_sku: String,
    pub create_time: i64,
    pub update_time: i64,
    pub item_status: Option<ItemStatus>,
    pub has_model: bool,
    pub condition: String,
    pub weight: String,
    pub price_info: Vec<ItemPriceInfo>,
    pub stock_info: Vec<ItemStockInfo>,
    pub image: ItemImage,
    pub logistic_info: Vec<ItemLogisticInfo>,
}

/// Price of one item, per currency.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemPriceInfo {
    pub currency: String,
    pub original_price: f64,
    pub current_price: f64,
}

/// Stock levels of one item.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemStockInfo {
    pub stock_type: u32,
    pub current_stock: u32,
    pub normal_stock: u32,
}

/// Image references of one item.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemImage {
    pub image_id_list: Vec<String>,
    pub image_url_list: Vec<String>,
}

/// One logistics channel enabled for an item.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemLogisticInfo {
    pub logistic_id: u64,
    pub logistic_name: String,
    pub enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemBaseInfoResponse {
    item_list: Vec<ItemBaseInfo>,
}

/// Product module for managing shop products.
#[derive(Debug)]
pub struct ProductModule {
    http: Arc<HttpClient>,
    tokens: Arc<TokenCache>,
}

impl ProductModule {
    pub(crate) fn new(http: Arc<HttpClient>, tokens: Arc<TokenCache>) -> Self {
        Self { http, tokens }
    }

    async fn token(&self, shop_id: u64) -> Result<String, ShopeeError> {
        Ok(self.tokens.get_valid_token(EntityKind::Shop, shop_id).await?)
    }

    /// Gets the category tree for a shop, optionally localized.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_categories(
        &self,
        shop_id: u64,
        language: Option<&str>,
    ) -> Result<Vec<CategoryInfo>, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push_opt("language", language);

        let response: CategoryResponse = self
            .http
            .get(
                paths::GET_CATEGORY,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(response.category_list)
    }

    /// Gets one page of items (ids and status only). Use
    /// [`ProductModule::get_item_base_info`] for details.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn list_items(
        &self,
        shop_id: u64,
        options: &ItemListOptions,
    ) -> Result<ItemListResponse, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push_joined("item_status", &options.item_status);
        params.push("offset", options.offset.unwrap_or(0));
        params.push("page_size", options.page_size.unwrap_or(50));
        params.push_opt("update_time_from", options.update_time_from);
        params.push_opt("update_time_to", options.update_time_to);

        let page = self
            .http
            .get(
                paths::GET_ITEM_LIST,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(page)
    }

    /// Gets every item matching the options, following the offset paging
    /// until the platform reports no further pages.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] on the first failing page.
    pub async fn list_all_items(
        &self,
        shop_id: u64,
        options: &ItemListOptions,
    ) -> Result<Vec<ItemSummary>, ShopeeError> {
        let mut items = Vec::new();
        let mut offset = options.offset.unwrap_or(0);

        loop {
            let mut page_options = options.clone();
            page_options.offset = Some(offset);
            let page = self.list_items(shop_id, &page_options).await?;
            items.extend(page.item);
            if !page.has_next_page {
                return Ok(items);
            }
            offset = page.next_offset;
        }
    }

    /// Gets basic information for up to 50 items.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_item_base_info(
        &self,
        shop_id: u64,
        item_id_list: &[u64],
    ) -> Result<Vec<ItemBaseInfo>, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push_joined("item_id_list", item_id_list);

        let response: ItemBaseInfoResponse = self
            .http
            .get(
                paths::GET_ITEM_BASE_INFO,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(response.item_list)
    }
}
