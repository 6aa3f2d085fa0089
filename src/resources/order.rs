//! Order and package management endpoints.
//!
//! Listing endpoints are cursor-paginated; the `list_all_*` helpers follow
//! the cursor until the platform reports no further pages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::{EntityKind, Scope, TokenCache};
use crate::clients::{HttpClient, QueryParams};
use crate::config::paths;
use crate::error::ShopeeError;

/// Field used to bound an order-list query in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRangeField {
    CreateTime,
    UpdateTime,
}

impl fmt::Display for TimeRangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTime => write!(f, "create_time"),
            Self::UpdateTime => write!(f, "update_time"),
        }
    }
}

/// Order status values reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Unpaid,
    ReadyToShip,
    Processed,
    RetryShip,
    Shipped,
    ToConfirmReceive,
    InCancel,
    Cancelled,
    ToReturn,
    Completed,
    InvoicePending,
    /// Any status this SDK version does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unpaid => "UNPAID",
            Self::ReadyToShip => "READY_TO_SHIP",
            Self::Processed => "PROCESSED",
            Self::RetryShip => "RETRY_SHIP",
            Self::Shipped => "SHIPPED",
            Self::ToConfirmReceive => "TO_CONFIRM_RECEIVE",
            Self::InCancel => "IN_CANCEL",
            Self::Cancelled => "CANCELLED",
            Self::ToReturn => "TO_RETURN",
            Self::Completed => "COMPLETED",
            Self::InvoicePending => "INVOICE_PENDING",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Seller-initiated cancellation reasons accepted by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCancelReason {
    OutOfStock,
    UndeliverableArea,
}

/// Response to a buyer's cancellation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancellationOperation {
    Accept,
    Reject,
}

/// Options for [`OrderModule::list_orders`].
#[derive(Clone, Debug)]
pub struct ListOrdersOptions {
    pub time_range_field: TimeRangeField,
    /// Start of the time range (Unix seconds).
    pub time_from: i64,
    /// End of the time range (Unix seconds).
    pub time_to: i64,
    /// Orders per page (max 100, defaults to 50).
    pub page_size: Option<u32>,
    pub cursor: Option<String>,
    pub order_status: Option<OrderStatus>,
    pub response_optional_fields: Option<String>,
}

/// One page of the order list.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderListResponse {
    pub more: bool,
    pub next_cursor: String,
    pub order_list: Vec<OrderListItem>,
}

/// One entry of the order list.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderListItem {
    pub order_sn: String,
    pub order_status: OrderStatus,
}

/// Detailed order information.
///
/// The platform returns many more optional fields than are modeled here;
/// unknown fields are ignored and absent ones default.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderDetail {
    pub order_sn: String,
    pub order_status: Option<OrderStatus>,
    pub region: String,
    pub currency: String,
    pub cod: bool,
    pub total_amount: f64,
    pub shipping_carrier: String,
    pub payment_method: String,
    pub estimated_shipping_fee: f64,
    pub message_to_seller: String,
    pub create_time: i64,
    pub update_time: i64,
    pub days_to_ship: i64,
    pub ship_by_date: i64,
    pub buyer_user_id: u64,
    pub buyer_username: String,
    pub recipient_address: Option<RecipientAddress>,
    pub note: String,
    pub item_list: Vec<OrderItem>,
    pub pay_time: Option<i64>,
    pub cancel_by: String,
    pub cancel_reason: String,
    pub package_list: Vec<PackageInfo>,
}

/// Recipient address of an order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipientAddress {
    pub name: String,
    pub phone: String,
    pub town: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub region: String,
    pub zipcode: String,
    pub full_address: String,
}

/// One line item of an order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub item_id: u64,
    pub item_name: String,
    pub item_sku: String,
    pub model_id: u64,
    pub model_name: String,
    pub model_sku: String,
    pub model_quantity_purchased: u32,
    pub model_original_price: f64,
    pub model_discounted_price: f64,
    pub order_item_id: u64,
    pub promotion_group_id: u64,
}

/// One package of an order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackageInfo {
    pub package_number: String,
    pub logistics_status: String,
    pub shipping_carrier: String,
    pub item_list: Vec<PackageItem>,
}

/// One item reference inside a package.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PackageItem {
    pub item_id: u64,
    pub model_id: u64,
    pub order_item_id: u64,
    pub promotion_group_id: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrderDetailResponse {
    order_list: Vec<OrderDetail>,
}

/// Item reference for a seller-initiated cancellation.
#[derive(Clone, Debug, Serialize)]
pub struct CancelOrderItem {
    pub item_id: u64,
    pub model_id: u64,
}

/// Options for [`OrderModule::search_packages`].
#[derive(Clone, Debug, Default)]
pub struct SearchPackagesOptions {
    /// Package status filter: 0 all, 1 pending, 2 to-process, 3 processed.
    pub package_status: u8,
    /// Packages per page (max 50, defaults to 50).
    pub page_size: Option<u32>,
    pub cursor: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub create_time_from: Option<i64>,
    pub create_time_to: Option<i64>,
}

/// One page of the package search.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackageListResponse {
    pub more: bool,
    pub next_cursor: String,
    pub package_list: Vec<PackageListItem>,
}

/// One entry of the package search.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackageListItem {
    pub order_sn: String,
    pub package_number: String,
    pub logistics_status: String,
    pub shipping_carrier: String,
    pub channel_id: u64,
}

#[derive(Debug, Serialize)]
struct SplitOrderBody<'a> {
    order_sn: &'a str,
    package_list: &'a [SplitPackage],
}

/// One package of a split request.
#[derive(Clone, Debug, Serialize)]
pub struct SplitPackage {
    pub item_list: Vec<PackageItem>,
}

/// Order module for managing shop orders.
///
/// # Example
///
/// ```rust,ignore
/// use shopee_api::resources::order::{ListOrdersOptions, TimeRangeField};
///
/// let page = client
///     .order
///     .list_orders(14_701_711, &ListOrdersOptions {
///         time_range_field: TimeRangeField::CreateTime,
///         time_from: 1_609_459_200,
///         time_to: 1_609_545_600,
///         page_size: Some(50),
///         cursor: None,
///         order_status: None,
///         response_optional_fields: None,
///     })
///     .await?;
/// ```
#[derive(Debug)]
pub struct OrderModule {
    http: Arc<HttpClient>,
    tokens: Arc<TokenCache>,
}

impl OrderModule {
    pub(crate) fn new(http: Arc<HttpClient>, tokens: Arc<TokenCache>) -> Self {
        Self { http, tokens }
    }

    async fn token(&self, shop_id: u64) -> Result<String, ShopeeError> {
        Ok(self.tokens.get_valid_token(EntityKind::Shop, shop_id).await?)
    }

    /// Gets one page of orders for a shop.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn list_orders(
        &self,
        shop_id: u64,
        options: &ListOrdersOptions,
    ) -> Result<OrderListResponse, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push("time_range_field", options.time_range_field);
        params.push("time_from", options.time_from);
        params.push("time_to", options.time_to);
        params.push("page_size", options.page_size.unwrap_or(50));
        params.push_opt("cursor", options.cursor.as_deref());
        params.push_opt("order_status", options.order_status);
        params.push_opt(
            "response_optional_fields",
            options.response_optional_fields.as_deref(),
        );

        let page = self
            .http
            .get(
                paths::GET_ORDER_LIST,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(page)
    }

    /// Gets every order matching the options, following the cursor until
    /// the platform reports no further pages.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] on the first failing page.
    pub async fn list_all_orders(
        &self,
        shop_id: u64,
        options: &ListOrdersOptions,
    ) -> Result<Vec<OrderListItem>, ShopeeError> {
        let mut orders = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut page_options = options.clone();
            page_options.cursor = cursor;
            let page = self.list_orders(shop_id, &page_options).await?;
            orders.extend(page.order_list);
            if !page.more {
                return Ok(orders);
            }
            cursor = Some(page.next_cursor);
        }
    }

    /// Gets detailed information for up to 50 orders.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_order_details(
        &self,
        shop_id: u64,
        order_sn_list: &[&str],
        response_optional_fields: Option<&[&str]>,
    ) -> Result<Vec<OrderDetail>, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push_joined("order_sn_list", order_sn_list);
        if let Some(fields) = response_optional_fields {
            params.push_joined("response_optional_fields", fields);
        }

        let response: OrderDetailResponse = self
            .http
            .get(
                paths::GET_ORDER_DETAIL,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(response.order_list)
    }

    /// Cancels an order (seller initiated).
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn cancel_order(
        &self,
        shop_id: u64,
        order_sn: &str,
        cancel_reason: OrderCancelReason,
        item_list: Option<&[CancelOrderItem]>,
    ) -> Result<(), ShopeeError> {
        let token = self.token(shop_id).await?;

        #[derive(Serialize)]
        struct Body<'a> {
            order_sn: &'a str,
            cancel_reason: OrderCancelReason,
            #[serde(skip_serializing_if = "Option::is_none")]
            item_list: Option<&'a [CancelOrderItem]>,
        }

        let _: serde_json::Value = self
            .http
            .post(
                paths::CANCEL_ORDER,
                &Body {
                    order_sn,
                    cancel_reason,
                    item_list,
                },
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(())
    }

    /// Accepts or rejects a buyer's cancellation request.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn handle_buyer_cancellation(
        &self,
        shop_id: u64,
        order_sn: &str,
        operation: CancellationOperation,
    ) -> Result<(), ShopeeError> {
        let token = self.token(shop_id).await?;

        #[derive(Serialize)]
        struct Body<'a> {
            order_sn: &'a str,
            operation: CancellationOperation,
        }

        let _: serde_json::Value = self
            .http
            .post(
                paths::HANDLE_BUYER_CANCELLATION,
                &Body { order_sn, operation },
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(())
    }

    /// Splits an order into multiple packages. Only possible while the
    /// order is `READY_TO_SHIP`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn split_order(
        &self,
        shop_id: u64,
        order_sn: &str,
        package_list: &[SplitPackage],
    ) -> Result<(), ShopeeError> {
        let token = self.token(shop_id).await?;

        let _: serde_json::Value = self
            .http
            .post(
                paths::SPLIT_ORDER,
                &SplitOrderBody {
                    order_sn,
                    package_list,
                },
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(())
    }

    /// Undoes a split. The order must still be `READY_TO_SHIP` with no
    /// package shipped.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn unsplit_order(&self, shop_id: u64, order_sn: &str) -> Result<(), ShopeeError> {
        let token = self.token(shop_id).await?;

        #[derive(Serialize)]
        struct Body<'a> {
            order_sn: &'a str,
        }

        let _: serde_json::Value = self
            .http
            .post(
                paths::UNSPLIT_ORDER,
                &Body { order_sn },
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(())
    }

    /// Searches packages pending fulfillment.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn search_packages(
        &self,
        shop_id: u64,
        options: &SearchPackagesOptions,
    ) -> Result<PackageListResponse, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push("package_status", options.package_status);
        params.push("page_size", options.page_size.unwrap_or(50));
        params.push_opt("cursor", options.cursor.as_deref());
        params.push_opt("sort_by", options.sort_by.as_deref());
        params.push_opt("sort_direction", options.sort_direction.as_deref());
        params.push_opt("create_time_from", options.create_time_from);
        params.push_opt("create_time_to", options.create_time_to);

        let page = self
            .http
            .get(
                paths::SEARCH_PACKAGE_LIST,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(page)
    }

    /// Gets every package matching the options, following the cursor until
    /// the platform reports no further pages.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] on the first failing page.
    pub async fn list_all_packages(
        &self,
        shop_id: u64,
        options: &SearchPackagesOptions,
    ) -> Result<Vec<PackageListItem>, ShopeeError> {
        let mut packages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut page_options = options.clone();
            page_options.cursor = cursor;
            let page = self.search_packages(shop_id, &page_options).await?;
            packages.extend(page.package_list);
            if !page.more {
                return Ok(packages);
            }
            cursor = Some(page.next_cursor);
        }
    }

    /// Gets package details. The payload shape varies by fulfillment
    /// channel, so it is returned as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_package_detail(
        &self,
        shop_id: u64,
        order_sn: &str,
        package_number: Option<&str>,
    ) -> Result<serde_json::Value, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push("order_sn", order_sn);
        params.push_opt("package_number", package_number);

        let detail = self
            .http
            .get(
                paths::GET_PACKAGE_DETAIL,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_display_matches_wire_format() {
        assert_eq!(OrderStatus::ReadyToShip.to_string(), "READY_TO_SHIP");
        assert_eq!(OrderStatus::ToConfirmReceive.to_string(), "TO_CONFIRM_RECEIVE");
    }

    #[test]
    fn test_order_status_deserializes_unknown_values() {
        let status: OrderStatus = serde_json::from_str("\"SOME_FUTURE_STATUS\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }

    #[test]
    fn test_time_range_field_display() {
        assert_eq!(TimeRangeField::CreateTime.to_string(), "create_time");
        assert_eq!(TimeRangeField::UpdateTime.to_string(), "update_time");
    }

    #[test]
    fn test_order_detail_tolerates_sparse_payload() {
        let detail: OrderDetail = serde_json::from_value(serde_json::json!({
            "order_sn": "2401010001",
            "order_status": "COMPLETED"
        }))
        .unwrap();

        assert_eq!(detail.order_sn, "2401010001");
        assert_eq!(detail.order_status, Some(OrderStatus::Completed));
        assert!(detail.item_list.is_empty());
        assert!(detail.recipient_address.is_none());
    }

    #[test]
    fn test_split_order_body_shape() {
        let body = SplitOrderBody {
            order_sn: "2204215JYEEFW0",
            package_list: &[SplitPackage {
                item_list: vec![PackageItem {
                    item_id: 1_220_089_094,
                    model_id: 0,
                    order_item_id: 1_220_089_094,
                    promotion_group_id: 0,
                }],
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["order_sn"], "2204215JYEEFW0");
        assert_eq!(
            json["package_list"][0]["item_list"][0]["item_id"],
            1_220_089_094_u64
        );
    }

    #[test]
    fn test_cancellation_enums_serialize_screaming() {
        assert_eq!(
            serde_json::to_value(OrderCancelReason::OutOfStock).unwrap(),
            serde_json::json!("OUT_OF_STOCK")
        );
        assert_eq!(
            serde_json::to_value(CancellationOperation::Accept).unwrap(),
            serde_json::json!("ACCEPT")
        );
    }
}
