//! Serialization of log records into ingestion payloads.
//!
//! [`Formatter`] is the seam between record values and the bytes put on the
//! wire. The default [`JsonFormatter`] produces single-line JSON objects and
//! JSON-array batch envelopes.

use std::collections::BTreeMap;
use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::log_record::LogRecord;

/// Trait for serializing log records into payload strings.
///
/// Implementors must be thread-safe (`Send + Sync`) so a formatter can be
/// shared by shippers used across threads.
pub trait Formatter: Send + Sync {
    /// Serialise a single record into one payload line.
    fn format(&self, record: &LogRecord) -> io::Result<String>;

    /// Serialise an ordered, already-filtered batch into one payload.
    fn format_batch(&self, records: &[&LogRecord]) -> io::Result<String>;
}

/// Serializable view borrowing from a record to avoid allocations for
/// string fields during serialization.
#[derive(Serialize)]
struct RecordView<'a> {
    message: &'a str,
    context: &'a BTreeMap<String, Value>,
    level: u16,
    level_name: &'static str,
    channel: &'a str,
    datetime: &'a DateTime<Utc>,
    extra: &'a BTreeMap<String, Value>,
}

impl<'a> From<&'a LogRecord> for RecordView<'a> {
    fn from(record: &'a LogRecord) -> Self {
        Self {
            message: &record.message,
            context: &record.context,
            level: record.level.rank(),
            level_name: record.level.as_str(),
            channel: &record.channel,
            datetime: &record.timestamp,
            extra: &record.extra,
        }
    }
}

/// Default formatter emitting single-line JSON.
///
/// A single record becomes an object with `message`, `context`, `level`
/// (numeric rank), `level_name`, `channel`, `datetime` (RFC 3339, UTC), and
/// `extra` fields. A batch becomes a JSON array of those objects in order.
#[derive(Copy, Clone, Debug, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> io::Result<String> {
        serde_json::to_string(&RecordView::from(record)).map_err(io::Error::other)
    }

    fn format_batch(&self, records: &[&LogRecord]) -> io::Result<String> {
        let views: Vec<RecordView<'_>> = records.iter().map(|r| RecordView::from(*r)).collect();
        serde_json::to_string(&views).map_err(io::Error::other)
    }
}
