use std::collections::BTreeMap;

use chrono::Utc;
use parseable_shipper::{Level, LogRecord};
use serde_json::json;

#[test]
fn new_populates_fields_and_timestamp() {
    let before = Utc::now();
    let record = LogRecord::new("core", Level::Info, "hello");
    let after = Utc::now();

    assert_eq!(record.channel, "core");
    assert_eq!(record.level, Level::Info);
    assert_eq!(record.message, "hello");
    assert!(record.context.is_empty());
    assert!(record.extra.is_empty());
    assert!(record.timestamp >= before, "timestamp too far in the past");
    assert!(record.timestamp <= after, "timestamp is in the future");
}

#[test]
fn with_context_and_extra_attach_maps() {
    let mut context = BTreeMap::new();
    context.insert("user".to_string(), json!("alice"));
    let mut extra = BTreeMap::new();
    extra.insert("request_id".to_string(), json!(42));

    let record = LogRecord::new("core", Level::Error, "fail")
        .with_context(context.clone())
        .with_extra(extra.clone());

    assert_eq!(record.context, context);
    assert_eq!(record.extra, extra);
}

#[test]
fn display_renders_level_and_message() {
    let record = LogRecord::new("core", Level::Warning, "careful");
    assert_eq!(record.to_string(), "WARNING - careful");
}
