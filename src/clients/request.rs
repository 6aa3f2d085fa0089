//! Request building blocks for the dispatcher.
//!
//! This module provides the [`HttpMethod`] enum and the [`QueryParams`]
//! collector used by resource modules to pass endpoint parameters. Array
//! values are joined with commas, matching how the platform expects
//! list-valued query parameters.

use std::fmt;

/// HTTP methods used by the Shopee Open Platform API.
///
/// The platform exposes read endpoints over GET and write endpoints over
/// POST; no other methods are used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for read endpoints.
    Get,
    /// HTTP POST method for write endpoints.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Caller-supplied query parameters for a GET endpoint.
///
/// Values are stringified on insertion; list values are joined with
/// commas. Keys keep their insertion order.
///
/// # Example
///
/// ```rust
/// use shopee_api::clients::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.push("page_size", 50);
/// params.push_opt("cursor", None::<&str>);
/// params.push_joined("order_sn_list", &["2401010001", "2401010002"]);
///
/// assert_eq!(
///     params.pairs(),
///     &[
///         ("page_size".to_string(), "50".to_string()),
///         ("order_sn_list".to_string(), "2401010001,2401010002".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends one parameter.
    pub fn push(&mut self, key: &str, value: impl fmt::Display) {
        self.0.push((key.to_string(), value.to_string()));
    }

    /// Appends one parameter when the value is present.
    pub fn push_opt(&mut self, key: &str, value: Option<impl fmt::Display>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Appends a list-valued parameter, joining the values with commas.
    ///
    /// An empty list appends nothing.
    pub fn push_joined(&mut self, key: &str, values: &[impl fmt::Display]) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.0.push((key.to_string(), joined));
    }

    /// Returns the collected `(key, value)` pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Returns `true` if no parameters were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_stringifies_values() {
        let mut params = QueryParams::new();
        params.push("offset", 0);
        params.push("time_range_field", "create_time");

        assert_eq!(
            params.pairs(),
            &[
                ("offset".to_string(), "0".to_string()),
                ("time_range_field".to_string(), "create_time".to_string()),
            ]
        );
    }

    #[test]
    fn test_push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("cursor", None::<&str>);
        params.push_opt("page_size", Some(25));

        assert_eq!(
            params.pairs(),
            &[("page_size".to_string(), "25".to_string())]
        );
    }

    #[test]
    fn test_push_joined_uses_commas() {
        let mut params = QueryParams::new();
        params.push_joined("item_id_list", &[100_001_u64, 100_002, 100_003]);

        assert_eq!(
            params.pairs(),
            &[("item_id_list".to_string(), "100001,100002,100003".to_string())]
        );
    }

    #[test]
    fn test_push_joined_skips_empty_list() {
        let mut params = QueryParams::new();
        params.push_joined("item_id_list", &[] as &[u64]);

        assert!(params.is_empty());
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
