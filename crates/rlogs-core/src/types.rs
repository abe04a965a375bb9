//! Record types produced by the pipeline.
//!
//! A successful parse yields one [`LogRecord`]; every chunk a loader serves
//! is delivered to the caller as exactly one [`ReadResult`].

use serde::Serialize;

use crate::error::ReadError;

/// A structured log record decoded from one raw chunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Label of the rule that produced the record. Comes from parser
    /// configuration, never from the record content.
    pub tag: String,
    /// Parsed event time. `None` when the parser has no timestamp field
    /// configured.
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    /// Every top-level field of the decoded document, unmodified. The
    /// timestamp field stays in here even after it populated `timestamp`.
    pub values: serde_json::Map<String, serde_json::Value>,
}

impl LogRecord {
    /// Look up a decoded field by name.
    pub fn value(&self, field: &str) -> Option<&serde_json::Value> {
        self.values.get(field)
    }
}

/// One unit of pipeline output: either a record or the reason there is none.
pub type ReadResult = Result<LogRecord, ReadError>;
