//! Default transport backed by a blocking `ureq` agent.

use std::time::Duration;

use log::warn;
use ureq::{Agent, AgentBuilder};

use super::{Transport, TransportOptions};
use crate::error::TransportError;

/// Default connection timeout applied when establishing HTTP connections.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default overall timeout applied to HTTP requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Option key recognised by [`HttpTransport`]: per-request overall timeout
/// override, in milliseconds.
pub const OPTION_TIMEOUT_MS: &str = "timeout_ms";

/// Standard [`Transport`] implementation using a pooled [`ureq::Agent`].
///
/// Non-2xx responses are treated as completed requests: the response body is
/// returned and a warning is logged for statuses of 400 and above. Only
/// connection, timeout, and I/O level failures become [`TransportError`].
pub struct HttpTransport {
    agent: Agent,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport with the default connect and request timeouts.
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a transport with explicit connect and request timeouts.
    pub fn with_timeouts(connect: Duration, request: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(connect)
            .timeout(request)
            .build();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the per-request timeout override, ignoring unparseable values.
fn timeout_override(options: &TransportOptions) -> Option<Duration> {
    let raw = options.get(OPTION_TIMEOUT_MS)?;
    match raw.parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            warn!("HttpTransport: ignoring unparseable {OPTION_TIMEOUT_MS} value {raw:?}");
            None
        }
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        url: &str,
        headers: &[String],
        body: &str,
        options: &TransportOptions,
    ) -> Result<String, TransportError> {
        let mut request = self.agent.post(url);
        for header in headers {
            match header.split_once(':') {
                Some((name, value)) => request = request.set(name.trim(), value.trim()),
                None => warn!("HttpTransport: skipping malformed header {header:?}"),
            }
        }
        if let Some(timeout) = timeout_override(options) {
            request = request.timeout(timeout);
        }

        let response = match request.send_string(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                warn!("HttpTransport: POST {url} returned status {code}");
                response
            }
            Err(ureq::Error::Transport(err)) => return Err(TransportError::new(url, err)),
        };
        response
            .into_string()
            .map_err(|err| TransportError::new(url, err))
    }
}
