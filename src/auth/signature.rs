//! Request signing for Shopee Open Platform API v2.
//!
//! Every API call carries an HMAC-SHA256 signature computed over a base
//! string whose composition depends on the call's [`Scope`]:
//!
//! - Shop API: `partner_id + path + timestamp + access_token + shop_id`
//! - Merchant API: `partner_id + path + timestamp + access_token + merchant_id`
//! - Public API: `partner_id + path + timestamp`
//!
//! The digest is keyed with the partner key and hex-encoded in lowercase.
//! Signing is pure and deterministic; it performs no I/O and fails only
//! when a shop- or merchant-scope base string is requested without an
//! access token.
//!
//! # Example
//!
//! ```rust
//! use shopee_api::auth::signature::{base_string, sign, Scope};
//! use shopee_api::{PartnerId, PartnerKey};
//!
//! let partner_id = PartnerId::new(2_001_887).unwrap();
//! let base = base_string(
//!     partner_id,
//!     "/api/v2/public/get_shops_by_partner",
//!     1_655_714_431,
//!     &Scope::Public,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(base, "2001887/api/v2/public/get_shops_by_partner1655714431");
//!
//! let key = PartnerKey::new("test-partner-key").unwrap();
//! let digest = sign(&base, &key);
//! assert_eq!(digest.len(), 64);
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::error::SignatureError;
use crate::config::{PartnerId, PartnerKey};

type HmacSha256 = Hmac<Sha256>;

/// The authorization scope of an API call.
///
/// The scope determines which fields participate in the signing base
/// string and which identifying field is attached to the outgoing request.
/// Modeling the entity id inside the variant makes it impossible to sign a
/// shop call without a shop id; only the access token remains a runtime
/// precondition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Public APIs: token exchange, partner-level listings.
    Public,
    /// Shop APIs, authorized per shop.
    Shop {
        /// The shop the call operates on.
        shop_id: u64,
    },
    /// Merchant APIs, authorized per merchant (main account).
    Merchant {
        /// The merchant the call operates on.
        merchant_id: u64,
    },
}

impl Scope {
    /// Returns the shop or merchant id for entity scopes, `None` for public.
    #[must_use]
    pub const fn entity_id(&self) -> Option<u64> {
        match self {
            Self::Public => None,
            Self::Shop { shop_id } => Some(*shop_id),
            Self::Merchant { merchant_id } => Some(*merchant_id),
        }
    }
}

/// Builds the signing base string for an API call.
///
/// The base string is the exact concatenation, with no separators, of the
/// decimal partner id, the endpoint path, the decimal timestamp, and, for
/// shop and merchant scopes, the access token and the decimal entity id.
///
/// # Errors
///
/// Returns [`SignatureError::MissingShopToken`] or
/// [`SignatureError::MissingMerchantToken`] when an entity scope is used
/// without an access token. Public scope never fails.
pub fn base_string(
    partner_id: PartnerId,
    path: &str,
    timestamp: i64,
    scope: &Scope,
    access_token: Option<&str>,
) -> Result<String, SignatureError> {
    match scope {
        Scope::Public => Ok(format!("{partner_id}{path}{timestamp}")),
        Scope::Shop { shop_id } => {
            let token = access_token.ok_or(SignatureError::MissingShopToken)?;
            Ok(format!("{partner_id}{path}{timestamp}{token}{shop_id}"))
        }
        Scope::Merchant { merchant_id } => {
            let token = access_token.ok_or(SignatureError::MissingMerchantToken)?;
            Ok(format!("{partner_id}{path}{timestamp}{token}{merchant_id}"))
        }
    }
}

/// Computes the HMAC-SHA256 signature for a base string.
///
/// The signature is returned as a lowercase hexadecimal string, always
/// 64 characters. Identical inputs always yield an identical digest.
///
/// # Note
///
/// This function uses `expect()` internally but this will never panic
/// because HMAC-SHA256 accepts keys of any length.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn sign(base_string: &str, partner_key: &PartnerKey) -> String {
    let mut mac = HmacSha256::new_from_slice(partner_key.as_ref().as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Builds the base string for an API call and signs it in one step.
///
/// # Errors
///
/// Propagates [`SignatureError`] from [`base_string`] when an entity scope
/// is missing its access token.
pub fn signature(
    partner_id: PartnerId,
    partner_key: &PartnerKey,
    path: &str,
    timestamp: i64,
    scope: &Scope,
    access_token: Option<&str>,
) -> Result<String, SignatureError> {
    let base = base_string(partner_id, path, timestamp, scope, access_token)?;
    Ok(sign(&base, partner_key))
}

/// Signs a public-scope call, which has no preconditions.
#[must_use]
pub fn sign_public(
    partner_id: PartnerId,
    partner_key: &PartnerKey,
    path: &str,
    timestamp: i64,
) -> String {
    sign(
        &format!("{partner_id}{path}{timestamp}"),
        partner_key,
    )
}

/// Returns the current Unix timestamp in whole seconds.
#[must_use]
pub fn timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}
