//! Configuration types for the Shopee API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with the Shopee Open Platform.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ShopeeConfig`]: The main configuration struct holding all SDK settings
//! - [`ShopeeConfigBuilder`]: A builder for constructing [`ShopeeConfig`] instances
//! - [`PartnerId`]: A validated partner id newtype
//! - [`PartnerKey`]: A validated partner key newtype with masked debug output
//! - [`Environment`] / [`Region`]: host selection for API calls
//!
//! # Example
//!
//! ```rust
//! use shopee_api::{ShopeeConfig, PartnerId, PartnerKey, Environment, Region};
//!
//! let config = ShopeeConfig::builder()
//!     .partner_id(PartnerId::new(2_001_887).unwrap())
//!     .partner_key(PartnerKey::new("my-partner-key").unwrap())
//!     .environment(Environment::Production)
//!     .region(Region::Sg)
//!     .build()
//!     .unwrap();
//! ```

mod endpoints;
mod newtypes;

pub use endpoints::{api_host, paths, Environment, Region};
pub use newtypes::{PartnerId, PartnerKey};

use crate::error::ConfigError;
use std::time::Duration;

/// Default request timeout applied when the builder leaves it unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Shopee API SDK.
///
/// This struct holds all configuration needed for SDK operations, including
/// partner credentials, host selection, and request behavior. It is created
/// once at startup and lives for the process.
///
/// # Thread Safety
///
/// `ShopeeConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks. It is immutable after construction.
///
/// # Example
///
/// ```rust
/// use shopee_api::{ShopeeConfig, PartnerId, PartnerKey};
///
/// let config = ShopeeConfig::builder()
///     .partner_id(PartnerId::new(123_456).unwrap())
///     .partner_key(PartnerKey::new("secret").unwrap())
///     .debug(true)
///     .build()
///     .unwrap();
///
/// assert!(config.debug());
/// ```
#[derive(Clone, Debug)]
pub struct ShopeeConfig {
    partner_id: PartnerId,
    partner_key: PartnerKey,
    environment: Environment,
    region: Region,
    timeout: Duration,
    base_url: Option<String>,
    debug: bool,
}

impl ShopeeConfig {
    /// Creates a new builder for constructing a `ShopeeConfig`.
    #[must_use]
    pub fn builder() -> ShopeeConfigBuilder {
        ShopeeConfigBuilder::new()
    }

    /// Returns the partner id.
    #[must_use]
    pub const fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    /// Returns the partner key.
    #[must_use]
    pub const fn partner_key(&self) -> &PartnerKey {
        &self.partner_key
    }

    /// Returns the configured environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the configured region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether debug logging of requests and responses is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the base URL all requests are sent to.
    ///
    /// This is the explicit override when one was configured (useful for
    /// proxying), otherwise the host resolved from environment and region.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| api_host(self.environment, self.region))
    }
}

// Verify ShopeeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopeeConfig>();
};

/// Builder for constructing [`ShopeeConfig`] instances.
///
/// Required fields are `partner_id` and `partner_key`. All other fields
/// have sensible defaults.
///
/// # Defaults
///
/// - `environment`: [`Environment::Sandbox`]
/// - `region`: [`Region::Sg`]
/// - `timeout`: 30 seconds
/// - `base_url`: resolved from environment and region
/// - `debug`: `false`
///
/// # Example
///
/// ```rust
/// use shopee_api::{ShopeeConfig, PartnerId, PartnerKey, Environment};
/// use std::time::Duration;
///
/// let config = ShopeeConfig::builder()
///     .partner_id(PartnerId::new(123_456).unwrap())
///     .partner_key(PartnerKey::new("secret").unwrap())
///     .environment(Environment::Production)
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ShopeeConfigBuilder {
    partner_id: Option<PartnerId>,
    partner_key: Option<PartnerKey>,
    environment: Option<Environment>,
    region: Option<Region>,
    timeout: Option<Duration>,
    base_url: Option<String>,
    debug: Option<bool>,
}

impl ShopeeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partner id (required).
    #[must_use]
    pub const fn partner_id(mut self, id: PartnerId) -> Self {
        self.partner_id = Some(id);
        self
    }

    /// Sets the partner key (required).
    #[must_use]
    pub fn partner_key(mut self, key: PartnerKey) -> Self {
        self.partner_key = Some(key);
        self
    }

    /// Sets the API environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the region for production API calls.
    #[must_use]
    pub const fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets an explicit base URL, bypassing host resolution.
    ///
    /// Useful when requests are routed through a local proxy.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Enables or disables debug logging of outgoing requests and
    /// incoming responses.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `partner_id` or
    /// `partner_key` was not set.
    pub fn build(self) -> Result<ShopeeConfig, ConfigError> {
        let partner_id = self.partner_id.ok_or(ConfigError::MissingRequiredField {
            field: "partner_id",
        })?;
        let partner_key = self.partner_key.ok_or(ConfigError::MissingRequiredField {
            field: "partner_key",
        })?;

        Ok(ShopeeConfig {
            partner_id,
            partner_key,
            environment: self.environment.unwrap_or_default(),
            region: self.region.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            base_url: self.base_url,
            debug: self.debug.unwrap_or(false),
        })
    }
}
