//! Shipper orchestrating formatting, filtering, and delivery.
//!
//! [`Shipper`] owns the stream identity and credentials for one ingestion
//! endpoint. It level-filters and formats records, builds the request, and
//! delegates the network call to an injected [`Transport`]. The shipper
//! holds no mutable state: each [`Shipper::handle`] or
//! [`Shipper::handle_batch`] call performs at most one blocking network
//! call and returns before the next proceeds. Callers wanting buffered or
//! asynchronous delivery wrap the shipper; callers sharing one instance
//! across threads rely on the injected transport's own thread-safety.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use log::debug;

use crate::error::{ConfigurationError, ShipError};
use crate::formatter::{Formatter, JsonFormatter};
use crate::level::Level;
use crate::log_record::LogRecord;
use crate::transport::{HttpTransport, Transport, TransportOptions};


/// Fixed ingestion path on the remote endpoint.
const INGEST_PATH: &str = "/api/v1/ingest";

/// Default ingestion port.
pub const DEFAULT_PORT: u16 = 8000;

/// Ships log records to a remote ingestion endpoint.
///
/// Configuration is fixed at construction via [`ShipperBuilder`] and
/// immutable for the shipper's lifetime.
pub struct Shipper {
    host: String,
    port: u16,
    stream: String,
    username: String,
    password: String,
    min_level: Level,
    bubble: bool,
    transport: Box<dyn Transport>,
    formatter: Box<dyn Formatter>,
    transport_options: TransportOptions,
}

impl Shipper {
    /// Start building a shipper.
    pub fn builder() -> ShipperBuilder {
        ShipperBuilder::new()
    }

    /// Endpoint host with trailing slashes stripped.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Endpoint port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Name of the target stream.
    pub fn stream(&self) -> &str {
        &self.stream
    }

    /// Minimum level below which records are dropped.
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Whether records should propagate to further handlers.
    ///
    /// The shipper has no handler-chain machinery of its own; callers
    /// composing several sinks read this flag to decide propagation.
    pub fn bubble(&self) -> bool {
        self.bubble
    }

    /// Ship a single record.
    ///
    /// Records below the minimum level are dropped without invoking the
    /// formatter or the transport; dropping is a successful no-op.
    ///
    /// # Errors
    ///
    /// Propagates formatter failures and [`TransportError`]s unchanged.
    ///
    /// [`TransportError`]: crate::error::TransportError
    pub fn handle(&self, record: &LogRecord) -> Result<(), ShipError> {
        if record.level < self.min_level {
            return Ok(());
        }
        let payload = self.formatter.format(record)?;
        self.deliver(&payload)
    }

    /// Ship an ordered batch of records in one request.
    ///
    /// Records below the minimum level are dropped; the relative order of
    /// the remainder is preserved. An empty remainder makes no formatter
    /// and no network call at all.
    ///
    /// # Errors
    ///
    /// Propagates formatter failures and [`TransportError`]s unchanged.
    ///
    /// [`TransportError`]: crate::error::TransportError
    pub fn handle_batch(&self, records: &[LogRecord]) -> Result<(), ShipError> {
        let kept: Vec<&LogRecord> = records
            .iter()
            .filter(|record| record.level >= self.min_level)
            .collect();
        if kept.is_empty() {
            return Ok(());
        }
        let payload = self.formatter.format_batch(&kept)?;
        self.deliver(&payload)
    }

    /// Build the ingestion request and hand it to the transport.
    ///
    /// The response body is discarded; delivery is fire-and-forget from the
    /// shipper's perspective.
    fn deliver(&self, payload: &str) -> Result<(), ShipError> {
        let url = format!("{}:{}{INGEST_PATH}", self.host, self.port);
        let credentials = format!("{}:{}", self.username, self.password);
        let headers = vec![
            "Content-Type: application/json".to_string(),
            format!("X-P-Stream: {}", self.stream),
            format!("Authorization: Basic {}", BASE64_STANDARD.encode(credentials)),
        ];
        debug!("shipping {} bytes to {url}", payload.len());
        self.transport
            .send(&url, &headers, payload, &self.transport_options)?;
        Ok(())
    }
}

impl std::fmt::Debug for Shipper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shipper")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("stream", &self.stream)
            .field("min_level", &self.min_level)
            .field("bubble", &self.bubble)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Shipper`] instances.
///
/// `host` and `stream` are required; everything else has a default. The
/// transport defaults to [`HttpTransport`] and the formatter to
/// [`JsonFormatter`] when not injected.
#[derive(Default)]
pub struct ShipperBuilder {
    host: Option<String>,
    port: Option<u16>,
    stream: Option<String>,
    username: String,
    password: String,
    min_level: Level,
    bubble: Option<bool>,
    transport: Option<Box<dyn Transport>>,
    formatter: Option<Box<dyn Formatter>>,
    transport_options: TransportOptions,
}

impl ShipperBuilder {
    /// Create a builder with no endpoint configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint host (required). Trailing slashes are stripped.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the endpoint port. Defaults to [`DEFAULT_PORT`].
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the target stream name (required).
    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Set the basic-auth credentials. Default is empty credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the minimum level below which records are dropped.
    /// Defaults to [`Level::Debug`] (ship everything).
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Set the propagation flag. Defaults to `true`.
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = Some(bubble);
        self
    }

    /// Inject a transport. Defaults to [`HttpTransport`].
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Inject a formatter. Defaults to [`JsonFormatter`].
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Add one transport option passed through to every send.
    pub fn with_transport_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.transport_options.insert(key.into(), value.into());
        self
    }

    /// Build the shipper.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidConfig`] when `host` or
    /// `stream` is missing or empty.
    pub fn build(self) -> Result<Shipper, ConfigurationError> {
        let host = self
            .host
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ConfigurationError::InvalidConfig("host must not be empty".into()))?;
        let stream = self
            .stream
            .filter(|stream| !stream.is_empty())
            .ok_or_else(|| ConfigurationError::InvalidConfig("stream must not be empty".into()))?;

        Ok(Shipper {
            host: host.trim_end_matches('/').to_string(),
            port: self.port.unwrap_or(DEFAULT_PORT),
            stream,
            username: self.username,
            password: self.password,
            min_level: self.min_level,
            bubble: self.bubble.unwrap_or(true),
            transport: self
                .transport
                .unwrap_or_else(|| Box::new(HttpTransport::new())),
            formatter: self.formatter.unwrap_or_else(|| Box::new(JsonFormatter)),
            transport_options: self.transport_options,
        })
    }
}
