//! Push-message types.

use serde::Deserialize;

/// The kind of event a push message reports.
///
/// Codes this SDK version does not know about deserialize to
/// [`PushCode::Unknown`] with the raw code preserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "u32")]
pub enum PushCode {
    ShopAuthorization,
    ShopAuthorizationCanceled,
    OrderStatusUpdate,
    OrderTrackingNo,
    ShopeeUpdates,
    BannedItem,
    ItemPromotion,
    ReservedStockChange,
    PromotionUpdate,
    Webchat,
    VideoUpload,
    OpenApiAuthorizationExpiry,
    BrandRegisterResult,
    ShippingDocumentStatus,
    /// A code not yet modeled by this SDK version.
    Unknown(u32),
}

impl From<u32> for PushCode {
    fn from(code: u32) -> Self {
        match code {
            1 => Self::ShopAuthorization,
            2 => Self::ShopAuthorizationCanceled,
            3 => Self::OrderStatusUpdate,
            4 => Self::OrderTrackingNo,
            5 => Self::ShopeeUpdates,
            6 => Self::BannedItem,
            7 => Self::ItemPromotion,
            8 => Self::ReservedStockChange,
            9 => Self::PromotionUpdate,
            10 => Self::Webchat,
            11 => Self::VideoUpload,
            12 => Self::OpenApiAuthorizationExpiry,
            13 => Self::BrandRegisterResult,
            15 => Self::ShippingDocumentStatus,
            other => Self::Unknown(other),
        }
    }
}

/// One push delivery from the platform.
#[derive(Clone, Debug, Deserialize)]
pub struct PushMessage {
    /// The shop the event belongs to (0 for partner-level events).
    #[serde(default)]
    pub shop_id: u64,
    /// What kind of event this is.
    pub code: PushCode,
    /// Free-form context some event kinds attach.
    #[serde(default)]
    pub extra: String,
    /// The event payload; its shape depends on [`PushMessage::code`].
    #[serde(default)]
    pub data: serde_json::Value,
    /// When the platform emitted the event (Unix seconds).
    #[serde(default)]
    pub timestamp: i64,
}
