//! Request signing and token lifecycle.
//!
//! This module contains the two stateless and stateful halves of the
//! crate's auth core:
//!
//! - [`signature`]: deterministic base-string construction and HMAC-SHA256
//!   signing per call [`Scope`](signature::Scope)
//! - [`TokenCache`]: per-shop and per-merchant token records with
//!   refresh-on-demand and single-flight coalescing
//!
//! See the module docs of each for details.

pub mod cache;
pub mod error;
pub mod signature;
pub mod token;

pub use cache::{TokenCache, TokenObserver};
pub use error::{SignatureError, TokenError};
pub use signature::Scope;
pub use token::{EntityKind, TokenRecord, REFRESH_SKEW_SECS};
