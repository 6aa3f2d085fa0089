//! Push-message signature verification.
//!
//! # Security
//!
//! Signature comparison uses constant-time equality to prevent timing
//! attacks on the partner key.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::PartnerKey;
use crate::webhooks::errors::WebhookError;
use crate::webhooks::types::PushMessage;

type HmacSha256 = Hmac<Sha256>;

/// Computes the expected push signature for a delivery.
///
/// The signed message is the callback URL and the raw request body joined
/// with `|`; the digest is HMAC-SHA256 keyed with the partner key,
/// lowercase hex.
///
/// # Note
///
/// This function uses `expect()` internally but this will never panic
/// because HMAC-SHA256 accepts keys of any length.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_push_signature(url: &str, body: &[u8], partner_key: &PartnerKey) -> String {
    let mut mac = HmacSha256::new_from_slice(partner_key.as_ref().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(url.as_bytes());
    mac.update(b"|");
    mac.update(body);
    let result = mac.finalize();
    hex_encode(&result.into_bytes())
}

/// Validates the `Authorization` header of a push delivery.
///
/// Returns `true` when the received signature matches the one computed
/// over `url|body` with the partner key. Comparison is constant-time.
#[must_use]
pub fn verify_push_signature(
    url: &str,
    body: &[u8],
    partner_key: &PartnerKey,
    authorization: &str,
) -> bool {
    let computed = compute_push_signature(url, body, partner_key);
    computed.as_bytes().ct_eq(authorization.as_bytes()).into()
}

/// Parses a push body into a typed [`PushMessage`].
///
/// Verify the signature with [`verify_push_signature`] before trusting the
/// parsed contents.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidPayload`] when the body is not a valid
/// push-message document.
pub fn parse_push_message(body: &[u8]) -> Result<PushMessage, WebhookError> {
    serde_json::from_slice(body).map_err(|source| WebhookError::InvalidPayload { source })
}

fn hex_encode(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
    let mut result = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        result.push(HEX_CHARS[(byte >> 4) as usize] as char);
        result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
    }
    result
}
