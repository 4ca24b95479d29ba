//! Ship structured log records to a Parseable HTTP ingestion endpoint.
//!
//! The crate has two components composed by delegation: a [`Transport`]
//! performing one blocking HTTP POST per call, and a [`Shipper`] owning the
//! stream identity and credentials, which filters and formats records and
//! builds the ingestion request. Both sit behind narrow traits so callers
//! can inject test doubles or wrap delivery in retry/backoff decorators.
//!
//! Delivery is synchronous and fire-and-forget: the server's response body
//! is discarded and transport failures propagate to the caller unchanged.
//!
//! ```no_run
//! use parseable_shipper::{Level, LogRecord, Shipper};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let shipper = Shipper::builder()
//!     .with_host("https://logs.example.com")
//!     .with_port(8000)
//!     .with_stream("app")
//!     .with_credentials("admin", "admin")
//!     .with_min_level(Level::Info)
//!     .build()?;
//!
//! shipper.handle(&LogRecord::new("app", Level::Error, "disk write failed"))?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod formatter;
pub mod level;
pub mod log_record;
pub mod shipper;
pub mod transport;

pub use error::{ConfigurationError, ShipError, TransportError};
pub use formatter::{Formatter, JsonFormatter};
pub use level::Level;
pub use log_record::LogRecord;
pub use shipper::{DEFAULT_PORT, Shipper, ShipperBuilder};
pub use transport::{HttpTransport, Transport, TransportOptions};
