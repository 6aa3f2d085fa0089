//! The platform's uniform response envelope.
//!
//! Every response from the platform, success or failure, arrives wrapped
//! in the same JSON envelope. A non-empty `error` field signals a business
//! failure; the business payload, when present, lives under `response`.
//! Auth endpoints return their fields at the envelope's top level instead.

use serde::{Deserialize, Serialize};

/// The generic response envelope returned by every endpoint.
///
/// All fields are lenient so that an envelope can be extracted from any
/// JSON object the platform returns; the raw body is kept separately for
/// diagnostics.
///
/// # Example
///
/// ```rust
/// use shopee_api::clients::ApiEnvelope;
///
/// let envelope: ApiEnvelope = serde_json::from_str(
///     r#"{"request_id":"abc","error":"","message":"","response":{"x":1}}"#,
/// )
/// .unwrap();
/// assert!(envelope.is_ok());
/// assert!(envelope.response.is_some());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ApiEnvelope {
    /// The platform's id for this request.
    #[serde(default)]
    pub request_id: String,
    /// Error code string; empty means success.
    #[serde(default)]
    pub error: String,
    /// Human-readable message accompanying the error code.
    #[serde(default)]
    pub message: String,
    /// Optional warning, returned alongside otherwise-successful calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// The business payload; absent on auth endpoints, which return their
    /// fields at the top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

impl ApiEnvelope {
    /// Returns `true` if the envelope does not signal a business failure.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_response_payload() {
        let envelope: ApiEnvelope = serde_json::from_value(serde_json::json!({
            "request_id": "req-1",
            "error": "",
            "message": "",
            "response": {"shop_name": "My Shop"}
        }))
        .unwrap();

        assert!(envelope.is_ok());
        assert_eq!(
            envelope.response.unwrap()["shop_name"],
            serde_json::json!("My Shop")
        );
    }

    #[test]
    fn test_envelope_without_response_key() {
        // Auth endpoints return fields at the top level.
        let envelope: ApiEnvelope = serde_json::from_value(serde_json::json!({
            "request_id": "req-2",
            "error": "",
            "message": "",
            "access_token": "token",
            "expire_in": 14_400
        }))
        .unwrap();

        assert!(envelope.is_ok());
        assert!(envelope.response.is_none());
    }

    #[test]
    fn test_envelope_with_business_error() {
        let envelope: ApiEnvelope = serde_json::from_value(serde_json::json!({
            "request_id": "req-3",
            "error": "item_not_found",
            "message": "Item 42 does not exist"
        }))
        .unwrap();

        assert!(!envelope.is_ok());
        assert_eq!(envelope.error, "item_not_found");
        assert_eq!(envelope.message, "Item 42 does not exist");
    }

    #[test]
    fn test_envelope_tolerates_missing_fields() {
        let envelope: ApiEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();

        assert!(envelope.is_ok());
        assert!(envelope.request_id.is_empty());
        assert!(envelope.warning.is_none());
    }
}
