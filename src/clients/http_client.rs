//! HTTP request dispatcher for Shopee API communication.
//!
//! This module provides the [`HttpClient`] type, which composes the
//! signature engine's output with the endpoint path, caller parameters,
//! and the common identifying fields into one outbound call, then parses
//! the generic response envelope.
//!
//! The common fields (`partner_id`, `timestamp`, `sign`, and, for shop
//! and merchant scopes, the entity id and access token) always travel in
//! the query string, even for POST requests; the body carries only
//! business fields. No retries are performed at this layer.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::signature::{self, Scope};
use crate::clients::errors::ApiError;
use crate::clients::request::{HttpMethod, QueryParams};
use crate::clients::response::ApiEnvelope;
use crate::config::ShopeeConfig;

/// HTTP client for making signed requests to the Shopee API.
///
/// The client handles:
/// - Signature computation per call via the signing engine
/// - Common identifying query parameters on every request
/// - Envelope parsing and business-error detection
/// - A fixed per-call timeout from the configuration
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async
/// tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopee_api::auth::signature::Scope;
/// use shopee_api::clients::{HttpClient, QueryParams};
///
/// let client = HttpClient::new(config);
/// let info: ShopInfo = client
///     .get(
///         "/api/v2/shop/get_shop_info",
///         &QueryParams::new(),
///         &Scope::Shop { shop_id: 14_701_711 },
///         Some("access-token"),
///     )
///     .await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client, carrying the per-call timeout.
    client: reqwest::Client,
    config: ShopeeConfig,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: ShopeeConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ShopeeConfig {
        &self.config
    }

    /// Sends a GET request and unwraps the response envelope.
    ///
    /// Caller-supplied `params` are serialized into the query string after
    /// the common identifying fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on signing, transport, decoding, or
    /// platform-signaled failures.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &'static str,
        params: &QueryParams,
        scope: &Scope,
        access_token: Option<&str>,
    ) -> Result<T, ApiError> {
        let builder = self.prepare(HttpMethod::Get, path, Some(params), scope, access_token)?;
        self.dispatch(path, builder).await
    }

    /// Sends a POST request with a JSON body and unwraps the response
    /// envelope.
    ///
    /// The body carries only business fields; the identifying fields stay
    /// in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on signing, transport, decoding, or
    /// platform-signaled failures.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &'static str,
        body: &B,
        scope: &Scope,
        access_token: Option<&str>,
    ) -> Result<T, ApiError> {
        if self.config.debug() {
            if let Ok(body_json) = serde_json::to_string(body) {
                tracing::debug!(path, body = %body_json, "request body");
            }
        }

        let builder = self
            .prepare(HttpMethod::Post, path, None, scope, access_token)?
            .json(body);
        self.dispatch(path, builder).await
    }

    /// Computes the signature and assembles the outgoing request with its
    /// common identifying query parameters.
    fn prepare(
        &self,
        method: HttpMethod,
        path: &'static str,
        params: Option<&QueryParams>,
        scope: &Scope,
        access_token: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let timestamp = signature::timestamp();
        let sign = signature::signature(
            self.config.partner_id(),
            self.config.partner_key(),
            path,
            timestamp,
            scope,
            access_token,
        )
        .map_err(|source| ApiError::Signature {
            path: path.to_string(),
            source,
        })?;

        let mut query: Vec<(String, String)> = vec![
            ("partner_id".to_string(), self.config.partner_id().to_string()),
            ("timestamp".to_string(), timestamp.to_string()),
            ("sign".to_string(), sign),
        ];
        if let Some(token) = access_token {
            query.push(("access_token".to_string(), token.to_string()));
        }
        match scope {
            Scope::Public => {}
            Scope::Shop { shop_id } => {
                query.push(("shop_id".to_string(), shop_id.to_string()));
            }
            Scope::Merchant { merchant_id } => {
                query.push(("merchant_id".to_string(), merchant_id.to_string()));
            }
        }
        if let Some(params) = params {
            for (key, value) in params.pairs() {
                query.push((key.clone(), value.clone()));
            }
        }

        let url = format!("{}{}", self.config.base_url(), path);
        if self.config.debug() {
            tracing::debug!(%method, %url, "dispatching request");
        }

        let builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        Ok(builder.query(&query).header("Accept", "application/json"))
    }

    /// Sends the request and unwraps the platform envelope.
    ///
    /// Business errors in the envelope take precedence over the raw HTTP
    /// status; a non-success status with a clean envelope surfaces as
    /// [`ApiError::HttpStatus`].
    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &'static str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|source| ApiError::Network {
            path: path.to_string(),
            source,
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|source| ApiError::Network {
            path: path.to_string(),
            source,
        })?;

        if self.config.debug() {
            tracing::debug!(path, status, body = %text, "received response");
        }

        let raw: serde_json::Value =
            serde_json::from_str(&text).map_err(|_| ApiError::MalformedResponse {
                path: path.to_string(),
                status,
            })?;
        let envelope: ApiEnvelope =
            serde_json::from_value(raw.clone()).map_err(|_| ApiError::MalformedResponse {
                path: path.to_string(),
                status,
            })?;

        if let Some(warning) = &envelope.warning {
            tracing::warn!(path, %warning, "platform returned a warning");
        }

        if !envelope.is_ok() {
            return Err(ApiError::Business {
                path: path.to_string(),
                code: envelope.error,
                message: envelope.message,
                request_id: envelope.request_id,
                envelope: raw,
            });
        }

        if !(200..300).contains(&status) {
            let request_id = (!envelope.request_id.is_empty()).then_some(envelope.request_id);
            return Err(ApiError::HttpStatus {
                path: path.to_string(),
                status,
                request_id,
            });
        }

        // Business APIs return data inside the envelope's `response`
        // field; auth and some public APIs return data at the top level.
        let payload = envelope.response.unwrap_or(raw);
        serde_json::from_value(payload).map_err(|_| ApiError::MalformedResponse {
            path: path.to_string(),
            status,
        })
    }
}
