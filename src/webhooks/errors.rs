//! Error types for push-message handling.

use thiserror::Error;

/// Errors that can occur while handling a push message.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The push body is not a valid push-message JSON document.
    #[error("push message body could not be parsed: {source}")]
    InvalidPayload {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
