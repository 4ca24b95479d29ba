//! Transport contract for delivering payloads over HTTP.
//!
//! A [`Transport`] performs exactly one blocking HTTP POST per call and
//! returns the response body. The trait is the crate's single extension
//! point: callers may substitute mocks, alternate HTTP stacks, or
//! retry/backoff decorators without the shipper knowing.

use std::collections::HashMap;

use crate::error::TransportError;

mod http;


pub use http::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, HttpTransport, OPTION_TIMEOUT_MS};

/// Opaque transport tuning map.
///
/// Keys are implementation-defined and applied uninterpreted by the caller;
/// each [`Transport`] implementation documents the keys it recognises and
/// ignores the rest.
pub type TransportOptions = HashMap<String, String>;

/// Capability performing one blocking network POST per invocation.
///
/// Implementors must be thread-safe (`Send + Sync`); a shipper shared across
/// threads relies on its transport's own guarantees.
pub trait Transport: Send + Sync {
    /// Issue a single HTTP POST to `url` with the given headers and body,
    /// returning the response body.
    ///
    /// `headers` are strings in `"Name: value"` form. `options` carries
    /// transport-specific tuning (see [`TransportOptions`]).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be established or
    /// completed. Implementations never retry.
    fn send(
        &self,
        url: &str,
        headers: &[String],
        body: &str,
        options: &TransportOptions,
    ) -> Result<String, TransportError>;
}
