//! # Shopee API Rust SDK
//!
//! A Rust SDK for the Shopee Open Platform API v2, providing type-safe
//! configuration, request signing, token lifecycle management, and typed
//! convenience methods over the platform's resource endpoints.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ShopeeConfig`] and [`ShopeeConfigBuilder`]
//! - Validated newtypes for partner credentials
//! - Deterministic HMAC-SHA256 request signing per call scope via
//!   [`auth::signature`]
//! - A stateful [`TokenCache`](auth::TokenCache) with refresh-on-demand and
//!   per-entity single-flight coalescing
//! - An async HTTP dispatcher that unwraps the platform's uniform response
//!   envelope via [`clients::HttpClient`]
//! - Typed resource modules (shop, orders, products, logistics, marketing)
//!   via [`ShopeeClient`]
//! - Push-message signature verification via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopee_api::{Environment, PartnerId, PartnerKey, Region, ShopeeClient, ShopeeConfig};
//!
//! // Create configuration using the builder pattern
//! let config = ShopeeConfig::builder()
//!     .partner_id(PartnerId::new(2_001_887).unwrap())
//!     .partner_key(PartnerKey::new("your-partner-key").unwrap())
//!     .environment(Environment::Sandbox)
//!     .region(Region::Sg)
//!     .build()
//!     .unwrap();
//!
//! let client = ShopeeClient::new(config);
//! ```
//!
//! ## Authorization
//!
//! Shops authorize the partner application through an authorization link;
//! the platform redirects back with a one-time code:
//!
//! ```rust,ignore
//! // Step 1: redirect the shop owner to the authorization link
//! let url = client.auth.auth_url("https://your-app.example.com/callback");
//!
//! // Step 2: the callback arrives with ?code=...&shop_id=...
//! let records = client
//!     .auth
//!     .get_access_token("authorization-code", Some(shop_id), None)
//!     .await?;
//!
//! // Step 3: make API calls; tokens refresh transparently from here on
//! let info = client.shop.get_shop_info(shop_id).await?;
//! ```
//!
//! ## Token Persistence
//!
//! The cache keeps tokens in memory only. To persist rotated tokens,
//! supply a [`TokenObserver`](auth::TokenObserver); it is awaited on every
//! refresh before the new token is first used:
//!
//! ```rust,ignore
//! struct SaveToDb;
//!
//! #[async_trait::async_trait]
//! impl shopee_api::auth::TokenObserver for SaveToDb {
//!     async fn persist(&self, kind: EntityKind, record: &TokenRecord) {
//!         // write the record to your database
//!     }
//! }
//!
//! let client = ShopeeClient::with_observer(config, Arc::new(SaveToDb));
//!
//! // On startup, load persisted records back:
//! client.token_cache().set_token(EntityKind::Shop, stored_record);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Credentials validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No hidden retries**: Every failure propagates to the caller unmodified

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod webhooks;

mod client;

// Re-export public types at crate root for convenience
pub use client::ShopeeClient;
pub use config::{
    Environment, PartnerId, PartnerKey, Region, ShopeeConfig, ShopeeConfigBuilder,
};
pub use error::{ConfigError, ShopeeError};

// Re-export the auth core types
pub use auth::{EntityKind, Scope, SignatureError, TokenCache, TokenError, TokenObserver, TokenRecord};

// Re-export HTTP dispatch types
pub use clients::{ApiEnvelope, ApiError, HttpClient, HttpMethod, QueryParams};
