//! Log record representation consumed by the shipper.
//!
//! This module defines the `LogRecord` struct that captures a single log
//! event together with its structured context and the time it was created.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::level::Level;

/// A single structured log event.
///
/// Records are immutable once constructed; the chainable `with_*` helpers
/// attach structured data before the record is handed to a shipper.
#[derive(Clone, Debug)]
pub struct LogRecord {
    /// Name of the channel (logical source) that produced this record.
    pub channel: String,
    /// Severity of the record.
    pub level: Level,
    /// The log message content.
    pub message: String,
    /// Structured key-value pairs describing the logged event.
    pub context: BTreeMap<String, Value>,
    /// Structured key-value pairs attached by the environment.
    pub extra: BTreeMap<String, Value>,
    /// Time the record was created.
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Construct a new log record from `channel`, `level`, and `message`,
    /// stamping it with the current time.
    pub fn new(channel: &str, level: Level, message: &str) -> Self {
        Self {
            channel: channel.to_owned(),
            level,
            message: message.to_owned(),
            context: BTreeMap::new(),
            extra: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach structured context to the record.
    pub fn with_context(mut self, context: BTreeMap<String, Value>) -> Self {
        self.context = context;
        self
    }

    /// Attach extra metadata to the record.
    pub fn with_extra(mut self, extra: BTreeMap<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.message)
    }
}
