//! The main client facade.

use std::sync::Arc;

use crate::auth::{TokenCache, TokenObserver};
use crate::clients::HttpClient;
use crate::config::ShopeeConfig;
use crate::resources::{
    AuthModule, LogisticsModule, MarketingModule, OrderModule, ProductModule, PublicModule,
    ShopModule,
};

/// The main entry point for interacting with the Shopee Open Platform API.
///
/// A client owns one [`HttpClient`] and one [`TokenCache`] and exposes the
/// per-domain resource modules as public fields. It is cheap to share by
/// reference across tasks; all internal state is behind `Arc`s.
///
/// # Example
///
/// ```rust
/// use shopee_api::{Environment, PartnerId, PartnerKey, Region, ShopeeClient, ShopeeConfig};
///
/// let config = ShopeeConfig::builder()
///     .partner_id(PartnerId::new(2_001_887).unwrap())
///     .partner_key(PartnerKey::new("partner-key").unwrap())
///     .environment(Environment::Sandbox)
///     .region(Region::Sg)
///     .build()
///     .unwrap();
///
/// let client = ShopeeClient::new(config);
/// let auth_url = client.auth.auth_url("https://my-app.example.com/callback");
/// assert!(auth_url.contains("auth_partner"));
/// ```
///
/// ```rust,ignore
/// // After the OAuth callback:
/// client.auth.get_access_token("auth-code", Some(14_701_711), None).await?;
///
/// // Tokens now resolve (and refresh) transparently:
/// let info = client.shop.get_shop_info(14_701_711).await?;
/// let orders = client.order.list_orders(14_701_711, &options).await?;
/// ```
#[derive(Debug)]
pub struct ShopeeClient {
    http: Arc<HttpClient>,
    tokens: Arc<TokenCache>,

    /// Authorization links, code exchange, and explicit refresh.
    pub auth: AuthModule,
    /// Shop profile endpoints.
    pub shop: ShopModule,
    /// Order and package management endpoints.
    pub order: OrderModule,
    /// Product catalog endpoints.
    pub product: ProductModule,
    /// Logistics and shipping endpoints.
    pub logistics: LogisticsModule,
    /// Marketing (ads) endpoints.
    pub marketing: MarketingModule,
    /// Partner-level public endpoints.
    pub public_api: PublicModule,
}

impl ShopeeClient {
    /// Creates a new client without a token-persistence hook.
    #[must_use]
    pub fn new(config: ShopeeConfig) -> Self {
        let http = Arc::new(HttpClient::new(config));
        let tokens = Arc::new(TokenCache::new(Arc::clone(&http)));
        Self::from_parts(http, tokens)
    }

    /// Creates a new client whose token cache notifies `observer` on
    /// every refresh, so the host can persist rotated tokens.
    #[must_use]
    pub fn with_observer(config: ShopeeConfig, observer: Arc<dyn TokenObserver>) -> Self {
        let http = Arc::new(HttpClient::new(config));
        let tokens = Arc::new(TokenCache::with_observer(Arc::clone(&http), observer));
        Self::from_parts(http, tokens)
    }

    fn from_parts(http: Arc<HttpClient>, tokens: Arc<TokenCache>) -> Self {
        Self {
            auth: AuthModule::new(Arc::clone(&http), Arc::clone(&tokens)),
            shop: ShopModule::new(Arc::clone(&http), Arc::clone(&tokens)),
            order: OrderModule::new(Arc::clone(&http), Arc::clone(&tokens)),
            product: ProductModule::new(Arc::clone(&http), Arc::clone(&tokens)),
            logistics: LogisticsModule::new(Arc::clone(&http), Arc::clone(&tokens)),
            marketing: MarketingModule::new(Arc::clone(&http), Arc::clone(&tokens)),
            public_api: PublicModule::new(Arc::clone(&http)),
            http,
            tokens,
        }
    }

    /// Returns the underlying HTTP client, for custom API calls.
    #[must_use]
    pub fn http_client(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Returns the token cache, for manual persistence round-trips.
    #[must_use]
    pub fn token_cache(&self) -> &Arc<TokenCache> {
        &self.tokens
    }
}
