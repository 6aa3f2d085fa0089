//! Error types for the request dispatcher.
//!
//! Every failure mode of an API call surfaces as an [`ApiError`] variant:
//! signing preconditions, transport failures (including the per-call
//! timeout), undecodable response bodies, business errors signaled through
//! the response envelope, and bare non-success HTTP statuses.
//!
//! No error is swallowed at this layer and no retries are performed; the
//! host application decides how to react.

use crate::auth::error::SignatureError;
use thiserror::Error;

/// Errors that can occur while dispatching an API call.
///
/// # Thread Safety
///
/// `ApiError` is `Send + Sync`, making it safe to use across async
/// boundaries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The signing preconditions for the request's scope were not met.
    ///
    /// Always a programming error on the caller's side; never retried.
    #[error("cannot sign request to {path}: {source}")]
    Signature {
        /// The endpoint path being signed.
        path: String,
        /// The underlying signing error.
        #[source]
        source: SignatureError,
    },

    /// A network failure or timeout while reaching the platform.
    #[error("network error calling {path}: {source}")]
    Network {
        /// The endpoint path being called.
        path: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded.
    ///
    /// Raised both when the body is not valid JSON and when valid JSON
    /// does not match the expected payload shape.
    #[error("response from {path} could not be decoded (HTTP {status})")]
    MalformedResponse {
        /// The endpoint path that was called.
        path: String,
        /// The raw HTTP status of the response.
        status: u16,
    },

    /// The platform signaled a business failure through the envelope's
    /// `error` field.
    #[error("platform error '{code}' calling {path}: {message}")]
    Business {
        /// The endpoint path that was called.
        path: String,
        /// The platform's raw error code string.
        code: String,
        /// The platform's message string.
        message: String,
        /// The platform's request id for this call.
        request_id: String,
        /// The full raw envelope, kept for diagnostics.
        envelope: serde_json::Value,
    },

    /// The transport returned a non-success status with a clean envelope.
    #[error("HTTP {status} from {path}")]
    HttpStatus {
        /// The endpoint path that was called.
        path: String,
        /// The HTTP status code returned.
        status: u16,
        /// The platform's request id, when the envelope carried one.
        request_id: Option<String>,
    },
}

impl ApiError {
    /// Returns `true` if this error is the per-call timeout firing.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { source, .. } if source.is_timeout())
    }

    /// Returns `true` if the platform signaled a business failure.
    #[must_use]
    pub const fn is_business(&self) -> bool {
        matches!(self, Self::Business { .. })
    }

    /// Returns the platform request id, when this error carries one.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Business { request_id, .. } => Some(request_id),
            Self::HttpStatus { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_error_formats_code_and_message() {
        let error = ApiError::Business {
            path: "/api/v2/order/get_order_list".to_string(),
            code: "error_param".to_string(),
            message: "Invalid time range".to_string(),
            request_id: "abc123".to_string(),
            envelope: serde_json::json!({"error": "error_param"}),
        };
        let message = error.to_string();
        assert!(message.contains("error_param"));
        assert!(message.contains("Invalid time range"));
        assert!(message.contains("/api/v2/order/get_order_list"));
    }

    #[test]
    fn test_malformed_response_includes_status() {
        let error = ApiError::MalformedResponse {
            path: "/api/v2/shop/get_shop_info".to_string(),
            status: 502,
        };
        assert!(error.to_string().contains("502"));
    }

    #[test]
    fn test_request_id_accessor() {
        let business = ApiError::Business {
            path: "/p".to_string(),
            code: "c".to_string(),
            message: "m".to_string(),
            request_id: "req-1".to_string(),
            envelope: serde_json::Value::Null,
        };
        assert_eq!(business.request_id(), Some("req-1"));

        let status = ApiError::HttpStatus {
            path: "/p".to_string(),
            status: 503,
            request_id: None,
        };
        assert_eq!(status.request_id(), None);

        let malformed = ApiError::MalformedResponse {
            path: "/p".to_string(),
            status: 200,
        };
        assert_eq!(malformed.request_id(), None);
    }

    #[test]
    fn test_is_business_classification() {
        let business = ApiError::Business {
            path: "/p".to_string(),
            code: "c".to_string(),
            message: "m".to_string(),
            request_id: String::new(),
            envelope: serde_json::Value::Null,
        };
        assert!(business.is_business());

        let signature = ApiError::Signature {
            path: "/p".to_string(),
            source: SignatureError::MissingShopToken,
        };
        assert!(!signature.is_business());
        assert!(!signature.is_timeout());
    }

    #[test]
    fn test_api_error_implements_std_error() {
        let error: &dyn std::error::Error = &ApiError::HttpStatus {
            path: "/p".to_string(),
            status: 500,
            request_id: None,
        };
        assert!(error.source().is_none());
    }
}
