//! Push-message (webhook) handling.
//!
//! The platform delivers push messages (order status updates, shop
//! authorizations, tracking numbers) to a partner-configured callback
//! URL. Each delivery carries an `Authorization` header holding an
//! HMAC-SHA256 digest of `url|request_body`, keyed with the partner key.
//!
//! This module verifies that digest in constant time and parses the
//! message body into a typed [`PushMessage`].
//!
//! # Example
//!
//! ```rust
//! use shopee_api::webhooks::{parse_push_message, verify_push_signature, compute_push_signature};
//! use shopee_api::PartnerKey;
//!
//! let key = PartnerKey::new("partner-key").unwrap();
//! let url = "https://my-app.example.com/shopee/push";
//! let body = br#"{"shop_id":14701711,"code":3,"timestamp":1700000000,"data":{}}"#;
//!
//! let authorization = compute_push_signature(url, body, &key);
//! assert!(verify_push_signature(url, body, &key, &authorization));
//!
//! let message = parse_push_message(body).unwrap();
//! assert_eq!(message.shop_id, 14_701_711);
//! ```

mod errors;
mod types;
mod verification;

pub use errors::WebhookError;
pub use types::{PushCode, PushMessage};
pub use verification::{compute_push_signature, parse_push_message, verify_push_signature};
