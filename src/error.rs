//! Error taxonomy shared across the crate.

use std::io;

use thiserror::Error;

/// Failure to establish or complete a transport request.
///
/// Carries the request URL and the underlying cause from the HTTP stack.
/// Transports raise this for connection, timeout, and I/O level failures;
/// they never retry.
#[derive(Debug, Error)]
#[error("request to {url} failed")]
pub struct TransportError {
    url: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    /// Wrap an underlying transport failure for `url`.
    pub fn new(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }

    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Invalid or missing construction parameters.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Invalid user supplied configuration.
    #[error("invalid shipper configuration: {0}")]
    InvalidConfig(String),
}

/// Errors surfaced by [`Shipper`](crate::shipper::Shipper) operations.
#[derive(Debug, Error)]
pub enum ShipError {
    /// The transport failed; surfaced unchanged from the transport layer.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The formatter failed to serialise the payload.
    #[error("payload serialisation failed")]
    Format(#[from] io::Error),
}
