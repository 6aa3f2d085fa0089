//! Stateful token cache with refresh-on-demand.
//!
//! The [`TokenCache`] owns one [`TokenRecord`] per authorized shop and per
//! authorized merchant. It exchanges authorization codes for initial
//! tokens, hands out currently-valid access tokens, and transparently
//! refreshes a record that is within the refresh skew of expiry, without
//! ever issuing duplicate refresh requests for the same entity.
//!
//! The cache does no background work: freshness is checked on every
//! [`TokenCache::get_valid_token`] call. Persistence is the host
//! application's job, wired in through the [`TokenObserver`] hook and the
//! manual accessors ([`TokenCache::set_token`],
//! [`TokenCache::get_token_data`], ...).
//!
//! # Concurrency
//!
//! Record storage sits behind a `std::sync::Mutex` that is never held
//! across an await. Refreshes are serialized per `(kind, entity id)` by a
//! dedicated async mutex: a caller that finds a stale record acquires the
//! entity's refresh lock, re-checks freshness (another caller may have
//! just refreshed), and only then calls the platform. Different entities
//! refresh independently and never block each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::error::TokenError;
use crate::auth::signature::Scope;
use crate::auth::token::{EntityKind, TokenRecord};
use crate::clients::{ApiError, HttpClient};
use crate::config::paths;

type EntityKey = (EntityKind, u64);

/// Host-supplied hook invoked with every refreshed token record.
///
/// The cache awaits `persist` before the refreshed token is returned to
/// any caller, so the host can write the record to durable storage
/// atomically relative to its first use.
///
/// # Example
///
/// ```rust,ignore
/// struct DatabaseObserver { pool: PgPool }
///
/// #[async_trait::async_trait]
/// impl TokenObserver for DatabaseObserver {
///     async fn persist(&self, kind: EntityKind, record: &TokenRecord) {
///         save_token(&self.pool, kind, record).await;
///     }
/// }
/// ```
#[async_trait]
pub trait TokenObserver: Send + Sync {
    /// Called after a refresh has replaced the stored record.
    async fn persist(&self, kind: EntityKind, record: &TokenRecord);
}

/// Request body for the authorization-code exchange.
#[derive(Debug, Serialize)]
struct ExchangeCodeRequest<'a> {
    code: &'a str,
    partner_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    shop_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_account_id: Option<u64>,
}

/// Request body for the token refresh.
#[derive(Debug, Serialize)]
struct RefreshTokenRequest<'a> {
    partner_id: u64,
    refresh_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    shop_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_id: Option<u64>,
}

/// Successful response from the code-exchange endpoint.
///
/// A main-account authorization returns id lists; a single-shop
/// authorization returns just the token pair.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    refresh_token: String,
    expire_in: u64,
    #[serde(default)]
    shop_id_list: Vec<u64>,
    #[serde(default)]
    merchant_id_list: Vec<u64>,
}

/// Successful response from the refresh endpoint.
#[derive(Debug, Deserialize)]
struct RefreshAccessTokenResponse {
    access_token: String,
    refresh_token: String,
    expire_in: u64,
}

/// In-memory store of token records per shop id and per merchant id.
///
/// See the [module documentation](self) for the concurrency model.
///
/// # Example
///
/// ```rust,ignore
/// let cache = TokenCache::new(http);
/// let records = cache.exchange_code("auth-code", Some(14_701_711), None).await?;
/// let token = cache.get_valid_token(EntityKind::Shop, 14_701_711).await?;
/// ```
pub struct TokenCache {
    http: Arc<HttpClient>,
    records: Mutex<HashMap<EntityKey, TokenRecord>>,
    refresh_locks: Mutex<HashMap<EntityKey, Arc<tokio::sync::Mutex<()>>>>,
    observer: Option<Arc<dyn TokenObserver>>,
}

// Verify TokenCache is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenCache>();
};

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("records", &self.lock_records().len())
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl TokenCache {
    /// Creates an empty cache without a persistence hook.
    #[must_use]
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            records: Mutex::new(HashMap::new()),
            refresh_locks: Mutex::new(HashMap::new()),
            observer: None,
        }
    }

    /// Creates an empty cache that notifies `observer` on every refresh.
    #[must_use]
    pub fn with_observer(http: Arc<HttpClient>, observer: Arc<dyn TokenObserver>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new(http)
        }
    }

    /// Exchanges an authorization code for initial token records.
    ///
    /// Stores one record per shop id and per merchant id returned by the
    /// platform (a main-account authorization can grant several). When a
    /// single `shop_id` was supplied and the platform returns no id lists,
    /// exactly that shop's record is stored. Returns the stored records.
    ///
    /// # Errors
    ///
    /// - [`TokenError::ExchangeRejected`] when the platform rejects the code
    /// - [`TokenError::Api`] on transport or decoding failures
    pub async fn exchange_code(
        &self,
        code: &str,
        shop_id: Option<u64>,
        main_account_id: Option<u64>,
    ) -> Result<Vec<TokenRecord>, TokenError> {
        let body = ExchangeCodeRequest {
            code,
            partner_id: self.http.config().partner_id().get(),
            shop_id,
            main_account_id,
        };

        let response: AccessTokenResponse = self
            .http
            .post(paths::GET_ACCESS_TOKEN, &body, &Scope::Public, None)
            .await
            .map_err(classify_exchange)?;

        let mut stored = Vec::new();
        for id in &response.shop_id_list {
            stored.push((
                EntityKind::Shop,
                TokenRecord::new(
                    *id,
                    response.access_token.clone(),
                    response.refresh_token.clone(),
                    response.expire_in,
                ),
            ));
        }
        for id in &response.merchant_id_list {
            stored.push((
                EntityKind::Merchant,
                TokenRecord::new(
                    *id,
                    response.access_token.clone(),
                    response.refresh_token.clone(),
                    response.expire_in,
                ),
            ));
        }
        if stored.is_empty() {
            if let Some(id) = shop_id {
                stored.push((
                    EntityKind::Shop,
                    TokenRecord::new(
                        id,
                        response.access_token,
                        response.refresh_token,
                        response.expire_in,
                    ),
                ));
            }
        }

        let mut records = self.lock_records();
        for (kind, record) in &stored {
            records.insert((*kind, record.entity_id), record.clone());
        }
        drop(records);

        Ok(stored.into_iter().map(|(_, record)| record).collect())
    }

    /// Returns a currently-valid access token for the entity, refreshing
    /// first when the stored record is within the refresh skew of expiry.
    ///
    /// Concurrent calls for the same entity coalesce onto a single
    /// upstream refresh; concurrent calls for different entities proceed
    /// independently.
    ///
    /// # Errors
    ///
    /// - [`TokenError::NotAuthorized`] when no record exists for the entity
    /// - [`TokenError::RefreshRejected`] when the platform rejects the
    ///   stored refresh token (the record is left untouched)
    /// - [`TokenError::Api`] on transport or decoding failures
    pub async fn get_valid_token(
        &self,
        kind: EntityKind,
        entity_id: u64,
    ) -> Result<String, TokenError> {
        // Fast path: fresh record, no refresh lock needed.
        {
            let records = self.lock_records();
            match records.get(&(kind, entity_id)) {
                None => return Err(TokenError::NotAuthorized { kind, entity_id }),
                Some(record) if !record.due_for_refresh() => {
                    return Ok(record.access_token.clone())
                }
                Some(_) => {}
            }
        }

        let entity_lock = self.refresh_lock(kind, entity_id);
        let _guard = entity_lock.lock().await;

        // Re-check under the entity lock: a concurrent caller may have
        // completed the refresh while we waited.
        if let Some(record) = self.get_token_data(kind, entity_id) {
            if !record.due_for_refresh() {
                return Ok(record.access_token);
            }
        }

        let record = self.refresh_locked(kind, entity_id).await?;
        Ok(record.access_token)
    }

    /// Refreshes the entity's token record now, replacing the stored one.
    ///
    /// The configured [`TokenObserver`] is awaited before this returns.
    /// Serialized against concurrent refreshes for the same entity.
    ///
    /// # Errors
    ///
    /// - [`TokenError::NotAuthorized`] when no record exists for the entity
    /// - [`TokenError::RefreshRejected`] when the platform rejects the
    ///   stored refresh token (the record is left untouched)
    /// - [`TokenError::Api`] on transport or decoding failures
    pub async fn refresh(
        &self,
        kind: EntityKind,
        entity_id: u64,
    ) -> Result<TokenRecord, TokenError> {
        let entity_lock = self.refresh_lock(kind, entity_id);
        let _guard = entity_lock.lock().await;
        self.refresh_locked(kind, entity_id).await
    }

    /// Performs the upstream refresh. Callers must hold the entity's
    /// refresh lock.
    async fn refresh_locked(
        &self,
        kind: EntityKind,
        entity_id: u64,
    ) -> Result<TokenRecord, TokenError> {
        let refresh_token = self
            .get_token_data(kind, entity_id)
            .ok_or(TokenError::NotAuthorized { kind, entity_id })?
            .refresh_token;

        let body = RefreshTokenRequest {
            partner_id: self.http.config().partner_id().get(),
            refresh_token: &refresh_token,
            shop_id: (kind == EntityKind::Shop).then_some(entity_id),
            merchant_id: (kind == EntityKind::Merchant).then_some(entity_id),
        };

        let response: RefreshAccessTokenResponse = self
            .http
            .post(paths::REFRESH_ACCESS_TOKEN, &body, &Scope::Public, None)
            .await
            .map_err(|source| classify_refresh(kind, entity_id, source))?;

        let record = TokenRecord::new(
            entity_id,
            response.access_token,
            response.refresh_token,
            response.expire_in,
        );
        self.lock_records().insert((kind, entity_id), record.clone());

        if let Some(observer) = &self.observer {
            observer.persist(kind, &record).await;
        }

        Ok(record)
    }

    /// Stores a record directly, replacing any existing one for the
    /// entity. No network calls, no validation beyond shape.
    pub fn set_token(&self, kind: EntityKind, record: TokenRecord) {
        self.lock_records().insert((kind, record.entity_id), record);
    }

    /// Returns a copy of the stored record for the entity, if any.
    #[must_use]
    pub fn get_token_data(&self, kind: EntityKind, entity_id: u64) -> Option<TokenRecord> {
        self.lock_records().get(&(kind, entity_id)).cloned()
    }

    /// Returns `true` if a record is stored for the entity.
    #[must_use]
    pub fn has_token(&self, kind: EntityKind, entity_id: u64) -> bool {
        self.lock_records().contains_key(&(kind, entity_id))
    }

    /// Removes and returns the stored record for the entity, if any.
    pub fn remove_token(&self, kind: EntityKind, entity_id: u64) -> Option<TokenRecord> {
        self.lock_records().remove(&(kind, entity_id))
    }

    /// Returns the ids of all entities of the given kind with a stored
    /// record, in ascending order.
    #[must_use]
    pub fn authorized_entity_ids(&self, kind: EntityKind) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .lock_records()
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, id)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, HashMap<EntityKey, TokenRecord>> {
        self.records.lock().expect("token record lock poisoned")
    }

    /// Returns the entity's refresh lock, creating it on first use.
    fn refresh_lock(&self, kind: EntityKind, entity_id: u64) -> Arc<tokio::sync::Mutex<()>> {
        self.refresh_locks
            .lock()
            .expect("refresh lock map poisoned")
            .entry((kind, entity_id))
            .or_default()
            .clone()
    }
}

/// Maps a code-exchange failure: business rejections become
/// [`TokenError::ExchangeRejected`], everything else passes through.
fn classify_exchange(source: ApiError) -> TokenError {
    if source.is_business() {
        TokenError::ExchangeRejected(source)
    } else {
        TokenError::Api(source)
    }
}

fn classify_refresh(kind: EntityKind, entity_id: u64, source: ApiError) -> TokenError {
    if source.is_business() {
        TokenError::RefreshRejected {
            kind,
            entity_id,
            source,
        }
    } else {
        TokenError::Api(source)
    }
}
