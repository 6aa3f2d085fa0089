//! End-to-end flow tests: authorize, exchange, call, refresh.

use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use shopee_api::auth::{EntityKind, TokenRecord};
use shopee_api::{Environment, PartnerId, PartnerKey, Region, ShopeeClient, ShopeeConfig};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHOP_ID: u64 = 14_701_711;

fn client_for(server: &MockServer) -> ShopeeClient {
    let config = ShopeeConfig::builder()
        .partner_id(PartnerId::new(2_001_887).unwrap())
        .partner_key(PartnerKey::new("test-partner-key").unwrap())
        .base_url(server.uri())
        .build()
        .unwrap();
    ShopeeClient::new(config)
}

fn envelope(response: serde_json::Value) -> serde_json::Value {
    json!({
        "request_id": "test-request-id",
        "error": "",
        "message": "",
        "response": response
    })
}

#[tokio::test]
async fn test_exchange_then_call_uses_the_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "exchange-req",
            "error": "",
            "message": "",
            "access_token": "exchanged-access",
            "refresh_token": "exchanged-refresh",
            "expire_in": 14_400
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/shop/get_shop_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "shop_id": SHOP_ID,
            "shop_name": "Exchanged Shop"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client
        .auth
        .get_access_token("auth-code", Some(SHOP_ID), None)
        .await
        .unwrap();
    assert_eq!(records[0].access_token, "exchanged-access");

    let info = client.shop.get_shop_info(SHOP_ID).await.unwrap();
    assert_eq!(info.shop_name, "Exchanged Shop");

    // The shop call carried the exchanged token.
    let requests = server.received_requests().await.unwrap();
    let shop_call = requests
        .iter()
        .find(|r| r.url.path() == "/api/v2/shop/get_shop_info")
        .unwrap();
    assert!(shop_call
        .url
        .query()
        .unwrap()
        .contains("access_token=exchanged-access"));
}

#[tokio::test]
async fn test_stale_token_refreshes_transparently_before_a_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/access_token/get"))
        .and(body_partial_json(json!({
            "refresh_token": "stale-refresh",
            "shop_id": SHOP_ID
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "refresh-req",
            "error": "",
            "message": "",
            "access_token": "rotated-access",
            "refresh_token": "rotated-refresh",
            "expire_in": 14_400
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/shop/get_shop_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "shop_id": SHOP_ID,
            "shop_name": "Refreshed Shop"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // A record stored long enough ago that it sits inside the refresh skew.
    client.token_cache().set_token(
        EntityKind::Shop,
        TokenRecord::stored_at(
            SHOP_ID,
            "stale-access".to_string(),
            "stale-refresh".to_string(),
            14_400,
            Utc::now() - chrono::Duration::seconds(14_400 - 60),
        ),
    );

    let info = client.shop.get_shop_info(SHOP_ID).await.unwrap();
    assert_eq!(info.shop_name, "Refreshed Shop");

    // The shop call used the rotated token, never the stale one.
    let requests = server.received_requests().await.unwrap();
    let shop_call = requests
        .iter()
        .find(|r| r.url.path() == "/api/v2/shop/get_shop_info")
        .unwrap();
    assert!(shop_call
        .url
        .query()
        .unwrap()
        .contains("access_token=rotated-access"));
}

#[tokio::test]
async fn test_auth_url_points_at_resolved_host() {
    let config = ShopeeConfig::builder()
        .partner_id(PartnerId::new(2_001_887).unwrap())
        .partner_key(PartnerKey::new("test-partner-key").unwrap())
        .environment(Environment::Production)
        .region(Region::Br)
        .build()
        .unwrap();
    let client = ShopeeClient::new(config);

    let url = client.auth.auth_url("https://app.example.com/cb");

    assert!(url.starts_with("https://partner.shopeemobile.com/api/v2/shop/auth_partner?"));
    assert!(url.contains("redirect=https%3A%2F%2Fapp.example.com%2Fcb"));
}

#[tokio::test]
async fn test_manual_persistence_round_trip_survives_restart() {
    let server = MockServer::start().await;
    let first = client_for(&server);
    let record = TokenRecord::new(
        SHOP_ID,
        "persisted-access".to_string(),
        "persisted-refresh".to_string(),
        14_400,
    );
    first.token_cache().set_token(EntityKind::Shop, record);

    // "Persist" and "reload" into a second client instance.
    let exported = first
        .token_cache()
        .get_token_data(EntityKind::Shop, SHOP_ID)
        .unwrap();
    let serialized = serde_json::to_string(&exported).unwrap();

    let second = client_for(&server);
    let restored: TokenRecord = serde_json::from_str(&serialized).unwrap();
    second.token_cache().set_token(EntityKind::Shop, restored);

    assert_eq!(
        second
            .token_cache()
            .get_token_data(EntityKind::Shop, SHOP_ID)
            .unwrap(),
        exported
    );
}

#[tokio::test]
async fn test_per_call_timeout_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({})))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ShopeeConfig::builder()
        .partner_id(PartnerId::new(2_001_887).unwrap())
        .partner_key(PartnerKey::new("test-partner-key").unwrap())
        .base_url(server.uri())
        .timeout(Duration::from_millis(150))
        .build()
        .unwrap();
    let client = ShopeeClient::new(config);
    client.token_cache().set_token(
        EntityKind::Shop,
        TokenRecord::new(SHOP_ID, "t".to_string(), "r".to_string(), 14_400),
    );

    let result = client.shop.get_shop_info(SHOP_ID).await;
    assert!(result.is_err());
}
