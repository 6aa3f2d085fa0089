//! Logistics and shipping endpoints.
//!
//! Arranging a shipment is a two-step flow: `get_shipping_parameter`
//! reports which methods (pickup, dropoff, non-integrated) are available
//! for an order, then `ship_order` commits one of them. Shipping documents
//! (air waybills) go through a create/poll/download cycle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{EntityKind, Scope, TokenCache};
use crate::clients::{HttpClient, QueryParams};
use crate::config::paths;
use crate::error::ShopeeError;

/// Available shipping methods and their required fields for an order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShippingParameter {
    pub info_needed: InfoNeeded,
    pub pickup: Option<PickupAddresses>,
    pub dropoff: Option<DropoffBranches>,
}

/// Which fields each shipping method requires.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct InfoNeeded {
    pub pickup: Vec<String>,
    pub dropoff: Vec<String>,
    pub non_integrated: Vec<String>,
}

/// Pickup addresses offered by the platform.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PickupAddresses {
    pub address_list: Vec<PickupAddress>,
}

/// One pickup address with its available time slots.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PickupAddress {
    pub address_id: u64,
    pub region: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub town: String,
    pub address: String,
    pub zipcode: String,
    pub address_flag: Vec<String>,
    pub time_slot_list: Vec<TimeSlot>,
}

/// One pickup time slot.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TimeSlot {
    pub date: i64,
    pub pickup_time_id: String,
}

/// Dropoff branches offered by the platform.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DropoffBranches {
    pub branch_list: Option<Vec<DropoffBranch>>,
}

/// One dropoff branch.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DropoffBranch {
    pub branch_id: u64,
    pub region: String,
    pub state: String,
    pub city: String,
    pub address: String,
    pub zipcode: String,
}

/// Pickup details for [`ShipOrderOptions`].
#[derive(Clone, Debug, Serialize)]
pub struct PickupDetail {
    pub address_id: u64,
    pub pickup_time_id: String,
}

/// Dropoff details for [`ShipOrderOptions`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct DropoffDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Non-integrated channel details for [`ShipOrderOptions`].
#[derive(Clone, Debug, Serialize)]
pub struct NonIntegratedDetail {
    pub tracking_number: String,
}

/// Options for [`LogisticsModule::ship_order`]. Exactly one of `pickup`,
/// `dropoff`, or `non_integrated` should be set, per the methods reported
/// by [`LogisticsModule::get_shipping_parameter`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ShipOrderOptions {
    pub order_sn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<PickupDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff: Option<DropoffDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_integrated: Option<NonIntegratedDetail>,
}

/// Tracking number of an order/package.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TrackingNumberResponse {
    pub tracking_number: String,
    pub plp_number: Option<String>,
    pub first_mile_tracking_number: Option<String>,
    pub last_mile_tracking_number: Option<String>,
    pub hint: Option<String>,
}

/// One logistics channel enabled for a shop.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogisticsChannel {
    pub logistics_channel_id: u64,
    pub logistics_channel_name: String,
    pub cod_enabled: bool,
    pub enabled: bool,
    pub fee_type: String,
    pub logistics_description: String,
    pub force_enable: bool,
    pub mask_channel_id: u64,
    pub preferred: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChannelListResponse {
    logistics_channel_list: Vec<LogisticsChannel>,
}

/// Shipping document (air waybill) formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingDocumentType {
    NormalAirWaybill,
    ThermalAirWaybill,
    NormalJobAirWaybill,
    ThermalJobAirWaybill,
}

/// One order/package reference for the shipping-document endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct DocumentOrder {
    pub order_sn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<ShippingDocumentType>,
}

#[derive(Debug, Serialize)]
struct DocumentOrderListBody<'a> {
    order_list: &'a [DocumentOrder],
}

/// Per-order status of a shipping-document task.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShippingDocumentResult {
    pub order_sn: String,
    pub package_number: Option<String>,
    pub status: String,
    pub fail_error: Option<String>,
    pub fail_message: Option<String>,
}

/// Result of polling a shipping-document task.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShippingDocumentResultResponse {
    pub result_list: Vec<ShippingDocumentResult>,
    pub warning: Vec<String>,
}

/// Logistics module for managing shipments.
#[derive(Debug)]
pub struct LogisticsModule {
    http: Arc<HttpClient>,
    tokens: Arc<TokenCache>,
}

impl LogisticsModule {
    pub(crate) fn new(http: Arc<HttpClient>, tokens: Arc<TokenCache>) -> Self {
        Self { http, tokens }
    }

    async fn token(&self, shop_id: u64) -> Result<String, ShopeeError> {
        Ok(self.tokens.get_valid_token(EntityKind::Shop, shop_id).await?)
    }

    async fn post_order_list<T: serde::de::DeserializeOwned>(
        &self,
        path: &'static str,
        shop_id: u64,
        order_list: &[DocumentOrder],
    ) -> Result<T, ShopeeError> {
        let token = self.token(shop_id).await?;
        let response = self
            .http
            .post(
                path,
                &DocumentOrderListBody { order_list },
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(response)
    }

    /// Reports the shipping methods available for an order.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_shipping_parameter(
        &self,
        shop_id: u64,
        order_sn: &str,
        package_number: Option<&str>,
    ) -> Result<ShippingParameter, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push("order_sn", order_sn);
        params.push_opt("package_number", package_number);

        let parameter = self
            .http
            .get(
                paths::GET_SHIPPING_PARAMETER,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(parameter)
    }

    /// Arranges shipment for an order/package.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn ship_order(
        &self,
        shop_id: u64,
        options: &ShipOrderOptions,
    ) -> Result<(), ShopeeError> {
        let token = self.token(shop_id).await?;
        let _: serde_json::Value = self
            .http
            .post(
                paths::SHIP_ORDER,
                options,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(())
    }

    /// Updates the pickup arrangement of a shipped order.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn update_shipping_order(
        &self,
        shop_id: u64,
        order_sn: &str,
        package_number: Option<&str>,
        pickup: Option<&PickupDetail>,
    ) -> Result<(), ShopeeError> {
        let token = self.token(shop_id).await?;

        #[derive(Serialize)]
        struct Body<'a> {
            order_sn: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            package_number: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pickup: Option<&'a PickupDetail>,
        }

        let _: serde_json::Value = self
            .http
            .post(
                paths::UPDATE_SHIPPING_ORDER,
                &Body {
                    order_sn,
                    package_number,
                    pickup,
                },
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(())
    }

    /// Gets the tracking number of an order/package.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_tracking_number(
        &self,
        shop_id: u64,
        order_sn: &str,
        package_number: Option<&str>,
        response_optional_fields: Option<&[&str]>,
    ) -> Result<TrackingNumberResponse, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push("order_sn", order_sn);
        params.push_opt("package_number", package_number);
        if let Some(fields) = response_optional_fields {
            params.push_joined("response_optional_fields", fields);
        }

        let tracking = self
            .http
            .get(
                paths::GET_TRACKING_NUMBER,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(tracking)
    }

    /// Gets the tracking history of an order. The event shape varies by
    /// carrier, so it is returned as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_tracking_info(
        &self,
        shop_id: u64,
        order_sn: &str,
        package_number: Option<&str>,
    ) -> Result<serde_json::Value, ShopeeError> {
        let token = self.token(shop_id).await?;

        let mut params = QueryParams::new();
        params.push("order_sn", order_sn);
        params.push_opt("package_number", package_number);

        let info = self
            .http
            .get(
                paths::GET_TRACKING_INFO,
                &params,
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(info)
    }

    /// Gets the logistics channels enabled for a shop.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_channel_list(
        &self,
        shop_id: u64,
    ) -> Result<Vec<LogisticsChannel>, ShopeeError> {
        let token = self.token(shop_id).await?;

        let response: ChannelListResponse = self
            .http
            .get(
                paths::GET_CHANNEL_LIST,
                &QueryParams::new(),
                &Scope::Shop { shop_id },
                Some(&token),
            )
            .await?;
        Ok(response.logistics_channel_list)
    }

    /// Gets the document parameters for a batch of orders.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_shipping_document_parameter(
        &self,
        shop_id: u64,
        order_list: &[DocumentOrder],
    ) -> Result<serde_json::Value, ShopeeError> {
        self.post_order_list(paths::GET_SHIPPING_DOCUMENT_PARAMETER, shop_id, order_list)
            .await
    }

    /// Starts a shipping-document generation task.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn create_shipping_document(
        &self,
        shop_id: u64,
        order_list: &[DocumentOrder],
    ) -> Result<(), ShopeeError> {
        let _: serde_json::Value = self
            .post_order_list(paths::CREATE_SHIPPING_DOCUMENT, shop_id, order_list)
            .await?;
        Ok(())
    }

    /// Polls a shipping-document generation task.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_shipping_document_result(
        &self,
        shop_id: u64,
        order_list: &[DocumentOrder],
    ) -> Result<ShippingDocumentResultResponse, ShopeeError> {
        self.post_order_list(paths::GET_SHIPPING_DOCUMENT_RESULT, shop_id, order_list)
            .await
    }

    /// Downloads generated shipping documents.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn download_shipping_document(
        &self,
        shop_id: u64,
        order_list: &[DocumentOrder],
    ) -> Result<serde_json::Value, ShopeeError> {
        self.post_order_list(paths::DOWNLOAD_SHIPPING_DOCUMENT, shop_id, order_list)
            .await
    }

    /// Gets shipping-document data for self-printing.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn get_shipping_document_data_info(
        &self,
        shop_id: u64,
        order_list: &[DocumentOrder],
    ) -> Result<serde_json::Value, ShopeeError> {
        self.post_order_list(paths::GET_SHIPPING_DOCUMENT_DATA_INFO, shop_id, order_list)
            .await
    }

    /// Batch-gets tracking numbers for multiple orders.
    ///
    /// # Errors
    ///
    /// Returns [`ShopeeError`] when the shop is not authorized or the call
    /// fails.
    pub async fn batch_get_tracking_number(
        &self,
        shop_id: u64,
        order_list: &[DocumentOrder],
    ) -> Result<serde_json::Value, ShopeeError> {
        self.post_order_list(paths::GET_MASS_TRACKING_NUMBER, shop_id, order_list)
            .await
    }
}
