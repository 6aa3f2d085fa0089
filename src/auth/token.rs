//! Token records and expiry tracking.
//!
//! The platform issues an access/refresh token pair per authorized shop or
//! merchant. A [`TokenRecord`] captures one pair together with its absolute
//! expiry instant, computed when the record is stored. Records are owned by
//! the [`TokenCache`](crate::auth::TokenCache); callers always receive
//! values, never mutable handles.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Safety margin before actual expiry at which a proactive refresh is
/// triggered.
pub const REFRESH_SKEW_SECS: i64 = 300;

/// The two kinds of entities the platform issues tokens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A single shop.
    Shop,
    /// A merchant (main account), which may own several shops.
    Merchant,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shop => write!(f, "shop"),
            Self::Merchant => write!(f, "merchant"),
        }
    }
}

/// One access/refresh token pair for a shop or merchant.
///
/// `expires_at` is always the instant the record was stored plus
/// `expire_in` seconds. A record is refreshed in place; it is never
/// partially updated.
///
/// # Example
///
/// ```rust
/// use shopee_api::auth::TokenRecord;
///
/// let record = TokenRecord::new(
///     14_701_711,
///     "access".to_string(),
///     "refresh".to_string(),
///     14_400,
/// );
/// assert!(!record.due_for_refresh());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The shop or merchant id this record belongs to.
    pub entity_id: u64,
    /// The current access token.
    pub access_token: String,
    /// The refresh token used to obtain the next access token.
    pub refresh_token: String,
    /// Validity in seconds, as issued by the platform.
    pub expire_in: u64,
    /// Absolute instant at which the access token expires.
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Creates a record stored now, expiring `expire_in` seconds from now.
    #[must_use]
    pub fn new(entity_id: u64, access_token: String, refresh_token: String, expire_in: u64) -> Self {
        Self::stored_at(entity_id, access_token, refresh_token, expire_in, Utc::now())
    }

    /// Creates a record as if stored at the given instant.
    #[must_use]
    pub fn stored_at(
        entity_id: u64,
        access_token: String,
        refresh_token: String,
        expire_in: u64,
        stored_at: DateTime<Utc>,
    ) -> Self {
        // Clamp to ~136 years; chrono durations reject values near i64::MAX.
        let secs = i64::try_from(expire_in.min(u64::from(u32::MAX)))
            .unwrap_or_else(|_| i64::from(u32::MAX));
        let expires_at = stored_at + Duration::seconds(secs);
        Self {
            entity_id,
            access_token,
            refresh_token,
            expire_in,
            expires_at,
        }
    }

    /// Returns `true` if the record is due for a proactive refresh at the
    /// given instant, i.e. within [`REFRESH_SKEW_SECS`] of expiry.
    #[must_use]
    pub fn due_for_refresh_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at - Duration::seconds(REFRESH_SKEW_SECS)
    }

    /// Returns `true` if the record is due for a proactive refresh now.
    #[must_use]
    pub fn due_for_refresh(&self) -> bool {
        self.due_for_refresh_at(Utc::now())
    }
}

// Verify the token types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityKind>();
    assert_send_sync::<TokenRecord>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn record_expiring_in(secs_from_now: i64) -> TokenRecord {
        // expire_in is chosen so that expires_at lands secs_from_now ahead
        let stored_at = Utc::now();
        let mut record = TokenRecord::stored_at(
            1,
            "access".to_string(),
            "refresh".to_string(),
            0,
            stored_at,
        );
        record.expires_at = stored_at + Duration::seconds(secs_from_now);
        record
    }

    #[test]
    fn test_expires_at_is_stored_at_plus_expire_in() {
        let stored_at = Utc::now();
        let record = TokenRecord::stored_at(
            1,
            "a".to_string(),
            "r".to_string(),
            14_400,
            stored_at,
        );

        assert_eq!(record.expires_at, stored_at + Duration::seconds(14_400));
    }

    #[test]
    fn test_record_just_inside_skew_is_due() {
        let record = record_expiring_in(REFRESH_SKEW_SECS - 1);
        assert!(record.due_for_refresh());
    }

    #[test]
    fn test_record_just_outside_skew_is_not_due() {
        let record = record_expiring_in(REFRESH_SKEW_SECS + 1);
        assert!(!record.due_for_refresh());
    }

    #[test]
    fn test_expired_record_is_due() {
        let record = record_expiring_in(-60);
        assert!(record.due_for_refresh());
    }

    #[test]
    fn test_due_for_refresh_at_boundary() {
        let stored_at = Utc::now();
        let record = TokenRecord::stored_at(
            1,
            "a".to_string(),
            "r".to_string(),
            14_400,
            stored_at,
        );
        let boundary = record.expires_at - Duration::seconds(REFRESH_SKEW_SECS);

        assert!(record.due_for_refresh_at(boundary));
        assert!(!record.due_for_refresh_at(boundary - Duration::seconds(1)));
        assert!(record.due_for_refresh_at(boundary + Duration::seconds(1)));
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Shop.to_string(), "shop");
        assert_eq!(EntityKind::Merchant.to_string(), "merchant");
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = TokenRecord::new(7, "a".to_string(), "r".to_string(), 3600);
        let json = serde_json::to_string(&record).unwrap();
        let back: TokenRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
