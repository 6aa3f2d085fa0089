//! Integration tests for the token cache against a mock platform.
//!
//! These tests cover the code-exchange fan-out, refresh-on-demand around
//! the freshness boundary, single-flight coalescing of concurrent
//! refreshes, failure isolation, and the persistence observer.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use shopee_api::auth::{EntityKind, TokenCache, TokenError, TokenObserver, TokenRecord};
use shopee_api::clients::HttpClient;
use shopee_api::{PartnerId, PartnerKey, ShopeeConfig};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_for(server: &MockServer) -> Arc<HttpClient> {
    let config = ShopeeConfig::builder()
        .partner_id(PartnerId::new(2_001_887).unwrap())
        .partner_key(PartnerKey::new("test-partner-key").unwrap())
        .base_url(server.uri())
        .build()
        .unwrap();
    Arc::new(HttpClient::new(config))
}

/// A record whose expiry lands `secs_from_now` seconds in the future.
fn record_expiring_in(entity_id: u64, secs_from_now: i64) -> TokenRecord {
    let stored_at = Utc::now() - chrono::Duration::seconds(14_400 - secs_from_now);
    TokenRecord::stored_at(
        entity_id,
        "old-access-token".to_string(),
        "old-refresh-token".to_string(),
        14_400,
        stored_at,
    )
}

fn refresh_success(access: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "request_id": "refresh-req",
        "error": "",
        "message": "",
        "access_token": access,
        "refresh_token": "next-refresh-token",
        "expire_in": 14_400
    }))
}

#[tokio::test]
async fn test_exchange_code_stores_single_shop_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/token/get"))
        .and(body_partial_json(json!({
            "code": "auth-code",
            "partner_id": 2_001_887,
            "shop_id": 14_701_711
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "exchange-req",
            "error": "",
            "message": "",
            "access_token": "initial-access",
            "refresh_token": "initial-refresh",
            "expire_in": 14_400
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TokenCache::new(http_for(&server));
    let records = cache
        .exchange_code("auth-code", Some(14_701_711), None)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].entity_id, 14_701_711);
    assert_eq!(records[0].access_token, "initial-access");

    let stored = cache.get_token_data(EntityKind::Shop, 14_701_711).unwrap();
    assert_eq!(stored, records[0]);
}

#[tokio::test]
async fn test_exchange_code_fans_out_main_account_grants() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "exchange-req",
            "error": "",
            "message": "",
            "access_token": "main-access",
            "refresh_token": "main-refresh",
            "expire_in": 14_400,
            "shop_id_list": [101, 102],
            "merchant_id_list": [900]
        })))
        .mount(&server)
        .await;

    let cache = TokenCache::new(http_for(&server));
    let records = cache
        .exchange_code("auth-code", None, Some(555))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(cache.authorized_entity_ids(EntityKind::Shop), vec![101, 102]);
    assert_eq!(cache.authorized_entity_ids(EntityKind::Merchant), vec![900]);
    assert_eq!(
        cache
            .get_token_data(EntityKind::Merchant, 900)
            .unwrap()
            .access_token,
        "main-access"
    );
}

#[tokio::test]
async fn test_exchange_code_rejection_is_exchange_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "exchange-req",
            "error": "error_auth",
            "message": "Invalid code"
        })))
        .mount(&server)
        .await;

    let cache = TokenCache::new(http_for(&server));
    let result = cache.exchange_code("bad-code", Some(1), None).await;

    assert!(matches!(result, Err(TokenError::ExchangeRejected(_))));
    assert!(!cache.has_token(EntityKind::Shop, 1));
}

#[tokio::test]
async fn test_fresh_token_is_returned_without_upstream_call() {
    let server = MockServer::start().await;
    // No refresh mock: any upstream call would fail the test via expect(0).
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(refresh_success("unexpected"))
        .expect(0)
        .mount(&server)
        .await;

    let cache = TokenCache::new(http_for(&server));
    // Expires well outside the 5-minute skew.
    cache.set_token(EntityKind::Shop, record_expiring_in(7, 3600));

    let token = cache.get_valid_token(EntityKind::Shop, 7).await.unwrap();
    assert_eq!(token, "old-access-token");
}

#[tokio::test]
async fn test_token_inside_skew_triggers_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .and(body_partial_json(json!({
            "partner_id": 2_001_887,
            "refresh_token": "old-refresh-token",
            "shop_id": 7
        })))
        .respond_with(refresh_success("fresh-access"))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TokenCache::new(http_for(&server));
    // Expires 1 second inside the 5-minute skew: due for refresh.
    cache.set_token(EntityKind::Shop, record_expiring_in(7, 299));

    let token = cache.get_valid_token(EntityKind::Shop, 7).await.unwrap();
    assert_eq!(token, "fresh-access");

    let stored = cache.get_token_data(EntityKind::Shop, 7).unwrap();
    assert_eq!(stored.access_token, "fresh-access");
    assert_eq!(stored.refresh_token, "next-refresh-token");
}

#[tokio::test]
async fn test_token_outside_skew_is_not_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(refresh_success("unexpected"))
        .expect(0)
        .mount(&server)
        .await;

    let cache = TokenCache::new(http_for(&server));
    // Expires 1 second outside the 5-minute skew: still fresh.
    cache.set_token(EntityKind::Shop, record_expiring_in(7, 301));

    let token = cache.get_valid_token(EntityKind::Shop, 7).await.unwrap();
    assert_eq!(token, "old-access-token");
}

#[tokio::test]
async fn test_concurrent_get_valid_token_coalesces_to_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(
            refresh_success("coalesced-access").set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(TokenCache::new(http_for(&server)));
    cache.set_token(EntityKind::Shop, record_expiring_in(7, 60));

    let first = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get_valid_token(EntityKind::Shop, 7).await })
    };
    let second = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get_valid_token(EntityKind::Shop, 7).await })
    };

    let (first, second) = tokio::join!(first, second);
    let first = first.unwrap().unwrap();
    let second = second.unwrap().unwrap();

    assert_eq!(first, "coalesced-access");
    assert_eq!(second, "coalesced-access");
    // The mock's expect(1) verifies exactly one upstream refresh on drop.
}

#[tokio::test]
async fn test_refreshes_for_different_entities_run_independently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .and(body_partial_json(json!({"shop_id": 1})))
        .respond_with(refresh_success("shop-1-access"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .and(body_partial_json(json!({"merchant_id": 2})))
        .respond_with(refresh_success("merchant-2-access"))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(TokenCache::new(http_for(&server)));
    cache.set_token(EntityKind::Shop, record_expiring_in(1, 10));
    cache.set_token(EntityKind::Merchant, record_expiring_in(2, 10));

    let (shop_token, merchant_token) = tokio::join!(
        cache.get_valid_token(EntityKind::Shop, 1),
        cache.get_valid_token(EntityKind::Merchant, 2),
    );

    assert_eq!(shop_token.unwrap(), "shop-1-access");
    assert_eq!(merchant_token.unwrap(), "merchant-2-access");
}

#[tokio::test]
async fn test_rejected_refresh_keeps_previous_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "refresh-req",
            "error": "error_auth",
            "message": "refresh token expired"
        })))
        .mount(&server)
        .await;

    let cache = TokenCache::new(http_for(&server));
    let stale = record_expiring_in(7, 60);
    cache.set_token(EntityKind::Shop, stale.clone());

    let result = cache.refresh(EntityKind::Shop, 7).await;

    match result {
        Err(TokenError::RefreshRejected {
            kind, entity_id, ..
        }) => {
            assert_eq!(kind, EntityKind::Shop);
            assert_eq!(entity_id, 7);
        }
        other => panic!("Expected RefreshRejected, got {other:?}"),
    }

    // The stored record is untouched by the failed refresh.
    assert_eq!(cache.get_token_data(EntityKind::Shop, 7).unwrap(), stale);
}

#[tokio::test]
async fn test_get_valid_token_for_unknown_entity_is_not_authorized() {
    let server = MockServer::start().await;
    let cache = TokenCache::new(http_for(&server));

    let result = cache.get_valid_token(EntityKind::Merchant, 404).await;

    assert!(matches!(
        result,
        Err(TokenError::NotAuthorized {
            kind: EntityKind::Merchant,
            entity_id: 404
        })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// Records every persisted token so tests can assert ordering.
#[derive(Default)]
struct RecordingObserver {
    persisted: std::sync::Mutex<Vec<(EntityKind, u64, String)>>,
}

#[async_trait::async_trait]
impl TokenObserver for RecordingObserver {
    async fn persist(&self, kind: EntityKind, record: &TokenRecord) {
        // Yield once so a fire-and-forget implementation would lose the race.
        tokio::task::yield_now().await;
        self.persisted.lock().unwrap().push((
            kind,
            record.entity_id,
            record.access_token.clone(),
        ));
    }
}

#[tokio::test]
async fn test_observer_is_awaited_before_refresh_returns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .respond_with(refresh_success("observed-access"))
        .mount(&server)
        .await;

    let observer = Arc::new(RecordingObserver::default());
    let cache = TokenCache::with_observer(
        http_for(&server),
        Arc::clone(&observer) as Arc<dyn TokenObserver>,
    );
    cache.set_token(EntityKind::Shop, record_expiring_in(7, 60));

    let record = cache.refresh(EntityKind::Shop, 7).await.unwrap();

    // The observer ran to completion before refresh() returned.
    let persisted = observer.persisted.lock().unwrap();
    assert_eq!(
        persisted.as_slice(),
        &[(EntityKind::Shop, 7, "observed-access".to_string())]
    );
    assert_eq!(record.access_token, "observed-access");
}
