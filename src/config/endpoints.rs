//! API hosts and endpoint paths for the Shopee Open Platform.
//!
//! Hosts are resolved from the configured [`Environment`] and [`Region`].
//! Endpoint paths are fixed strings that form part of the platform contract;
//! they also participate in the request signature, so they must never be
//! altered or normalized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The Shopee API environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live platform.
    Production,
    /// Sandbox platform for integration testing.
    #[default]
    Sandbox,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Region for production API calls.
///
/// The sandbox environment ignores the region except for `Cn`, which has
/// its own sandbox host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Singapore (also serves most other markets).
    #[default]
    Sg,
    /// Mainland China.
    Cn,
    /// Brazil.
    Br,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sg => write!(f, "sg"),
            Self::Cn => write!(f, "cn"),
            Self::Br => write!(f, "br"),
        }
    }
}

/// Returns the API host URL for the given environment and region.
///
/// # Example
///
/// ```rust
/// use shopee_api::config::{api_host, Environment, Region};
///
/// assert_eq!(
///     api_host(Environment::Production, Region::Sg),
///     "https://partner.shopeemobile.com"
/// );
/// ```
#[must_use]
pub const fn api_host(environment: Environment, region: Region) -> &'static str {
    match environment {
        Environment::Sandbox => match region {
            Region::Cn => "https://openplatform.sandbox.test-stable.shopee.cn",
            Region::Sg | Region::Br => "https://openplatform.sandbox.test-stable.shopee.sg",
        },
        Environment::Production => match region {
            // sg and br share a host
            Region::Sg | Region::Br => "https://partner.shopeemobile.com",
            Region::Cn => "https://openplatform.shopee.cn",
        },
    }
}

/// Fixed endpoint paths for Shopee Open Platform API v2.
///
/// Each path is a stable contract with the platform and participates in
/// the request signature.
pub mod paths {
    // Auth
    pub const AUTH_PARTNER: &str = "/api/v2/shop/auth_partner";
    pub const GET_ACCESS_TOKEN: &str = "/api/v2/auth/token/get";
    pub const REFRESH_ACCESS_TOKEN: &str = "/api/v2/auth/access_token/get";

    // Shop
    pub const GET_SHOP_INFO: &str = "/api/v2/shop/get_shop_info";
    pub const UPDATE_SHOP_PROFILE: &str = "/api/v2/shop/update_profile";

    // Product
    pub const GET_CATEGORY: &str = "/api/v2/product/get_category";
    pub const GET_ITEM_LIST: &str = "/api/v2/product/get_item_list";
    pub const GET_ITEM_BASE_INFO: &str = "/api/v2/product/get_item_base_info";

    // Order
    pub const GET_ORDER_LIST: &str = "/api/v2/order/get_order_list";
    pub const GET_ORDER_DETAIL: &str = "/api/v2/order/get_order_detail";
    pub const SPLIT_ORDER: &str = "/api/v2/order/split_order";
    pub const UNSPLIT_ORDER: &str = "/api/v2/order/unsplit_order";
    pub const CANCEL_ORDER: &str = "/api/v2/order/cancel_order";
    pub const HANDLE_BUYER_CANCELLATION: &str = "/api/v2/order/handle_buyer_cancellation";
    pub const SEARCH_PACKAGE_LIST: &str = "/api/v2/order/search_package_list";
    pub const GET_PACKAGE_DETAIL: &str = "/api/v2/order/get_package_detail";

    // Logistics
    pub const GET_SHIPPING_PARAMETER: &str = "/api/v2/logistics/get_shipping_parameter";
    pub const GET_TRACKING_NUMBER: &str = "/api/v2/logistics/get_tracking_number";
    pub const GET_MASS_TRACKING_NUMBER: &str = "/api/v2/logistics/get_mass_tracking_number";
    pub const SHIP_ORDER: &str = "/api/v2/logistics/ship_order";
    pub const UPDATE_SHIPPING_ORDER: &str = "/api/v2/logistics/update_shipping_order";
    pub const GET_CHANNEL_LIST: &str = "/api/v2/logistics/get_channel_list";
    pub const GET_TRACKING_INFO: &str = "/api/v2/logistics/get_tracking_info";
    pub const GET_SHIPPING_DOCUMENT_PARAMETER: &str =
        "/api/v2/logistics/get_shipping_document_parameter";
    pub const CREATE_SHIPPING_DOCUMENT: &str = "/api/v2/logistics/create_shipping_document";
    pub const GET_SHIPPING_DOCUMENT_RESULT: &str =
        "/api/v2/logistics/get_shipping_document_result";
    pub const DOWNLOAD_SHIPPING_DOCUMENT: &str = "/api/v2/logistics/download_shipping_document";
    pub const GET_SHIPPING_DOCUMENT_DATA_INFO: &str =
        "/api/v2/logistics/get_shipping_document_data_info";

    // Public
    pub const GET_SHOPS_BY_PARTNER: &str = "/api/v2/public/get_shops_by_partner";
    pub const GET_MERCHANTS_BY_PARTNER: &str = "/api/v2/public/get_merchant_by_partner";

    // Marketing (Ads)
    pub const GET_AD_LIST: &str = "/api/v2/ads/get_ad_list";
    pub const GET_SHOP_ADS_DAILY_REPORT: &str = "/api/v2/ads/get_shop_ads_daily_report";
    pub const MUTATE_ADS: &str = "/api/v2/ads/mutate_ads";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_host_for_cn_region() {
        assert_eq!(
            api_host(Environment::Sandbox, Region::Cn),
            "https://openplatform.sandbox.test-stable.shopee.cn"
        );
    }

    #[test]
    fn test_sandbox_host_for_other_regions() {
        assert_eq!(
            api_host(Environment::Sandbox, Region::Sg),
            "https://openplatform.sandbox.test-stable.shopee.sg"
        );
        assert_eq!(
            api_host(Environment::Sandbox, Region::Br),
            "https://openplatform.sandbox.test-stable.shopee.sg"
        );
    }

    #[test]
    fn test_production_hosts_by_region() {
        assert_eq!(
            api_host(Environment::Production, Region::Sg),
            "https://partner.shopeemobile.com"
        );
        assert_eq!(
            api_host(Environment::Production, Region::Br),
            "https://partner.shopeemobile.com"
        );
        assert_eq!(
            api_host(Environment::Production, Region::Cn),
            "https://openplatform.shopee.cn"
        );
    }

    #[test]
    fn test_defaults_are_sandbox_sg() {
        assert_eq!(Environment::default(), Environment::Sandbox);
        assert_eq!(Region::default(), Region::Sg);
    }

    #[test]
    fn test_auth_paths_are_exact() {
        assert_eq!(paths::GET_ACCESS_TOKEN, "/api/v2/auth/token/get");
        assert_eq!(paths::REFRESH_ACCESS_TOKEN, "/api/v2/auth/access_token/get");
        assert_eq!(paths::AUTH_PARTNER, "/api/v2/shop/auth_partner");
    }
}
