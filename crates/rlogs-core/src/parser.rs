//! The parser capability and the reference JSON parser.
//!
//! A [`Parser`] turns one raw chunk into one [`LogRecord`]. [`JsonParser`]
//! decodes the chunk as a JSON object, keeps every field in
//! [`LogRecord::values`], and optionally lifts one string field into
//! [`LogRecord::timestamp`] using a `strftime` layout.

use chrono::format::ParseErrorKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::JsonParserConfig;
use crate::error::ParseError;
use crate::types::LogRecord;

/// Parser trait — decodes a single raw chunk.
///
/// Called once per chunk; a failure affects only that chunk.
pub trait Parser: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    fn parse(&self, chunk: &[u8]) -> Result<LogRecord, ParseError>;
}

/// Parses JSON object chunks into tagged, timestamped records.
#[derive(Debug, Clone)]
pub struct JsonParser {
    tag: String,
    timestamp_field: Option<String>,
    timestamp_format: Option<String>,
}

impl JsonParser {
    /// A parser that tags records with `tag` and leaves `timestamp` unset.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            timestamp_field: None,
            timestamp_format: None,
        }
    }

    /// Read the record time from `field`. With no `format`, the value must be
    /// RFC 3339.
    pub fn with_timestamp(mut self, field: impl Into<String>, format: Option<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self.timestamp_format = format;
        self
    }

    pub fn from_config(config: &JsonParserConfig) -> Self {
        Self {
            tag: config.tag.clone(),
            timestamp_field: config.timestamp_field.clone(),
            timestamp_format: config.timestamp_format.clone(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn extract_timestamp(
        &self,
        values: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Option<DateTime<Utc>>, ParseError> {
        let Some(field) = &self.timestamp_field else {
            return Ok(None);
        };

        let raw = match values.get(field) {
            Some(serde_json::Value::String(s)) => s,
            Some(_) => return Err(ParseError::TimestampNotString { field: field.clone() }),
            None => return Err(ParseError::MissingTimestamp { field: field.clone() }),
        };

        match &self.timestamp_format {
            Some(format) => parse_with_format(raw, format).map(Some),
            None => DateTime::parse_from_rfc3339(raw)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(|source| ParseError::TimestampFormat {
                    value: raw.clone(),
                    format: "RFC 3339".to_string(),
                    source,
                }),
        }
    }
}

impl Parser for JsonParser {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, chunk: &[u8]) -> Result<LogRecord, ParseError> {
        let values = match serde_json::from_slice::<serde_json::Value>(chunk)? {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(ParseError::NotAnObject {
                    found: json_kind(&other),
                })
            }
        };

        let timestamp = self.extract_timestamp(&values)?;

        Ok(LogRecord {
            tag: self.tag.clone(),
            timestamp,
            values,
        })
    }
}

/// Parse `raw` with a `strftime` layout. Layouts carrying an offset are
/// honoured; layouts without one are read as UTC. A date-only layout means
/// midnight UTC.
fn parse_with_format(raw: &str, format: &str) -> Result<DateTime<Utc>, ParseError> {
    if let Ok(ts) = DateTime::parse_from_str(raw, format) {
        return Ok(ts.with_timezone(&Utc));
    }
    let source = match NaiveDateTime::parse_from_str(raw, format) {
        Ok(naive) => return Ok(naive.and_utc()),
        Err(err) => err,
    };
    if source.kind() == ParseErrorKind::NotEnough {
        let midnight = NaiveDate::parse_from_str(raw, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0));
        if let Some(naive) = midnight {
            return Ok(naive.and_utc());
        }
    }
    Err(ParseError::TimestampFormat {
        value: raw.to_string(),
        format: format.to_string(),
        source,
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
