//! Test builders — ergonomic constructors for entries, readers and targets.
//!
//! These panic on invalid input rather than returning `Result`.

use std::sync::Arc;

use futures::StreamExt;
use rlogs::loaders::{LineLoader, ObjectFetcher};
use rlogs::{JsonParser, LogEntry, LogRecord, ReadError, ReadResult, Reader, SourceDescriptor};

use super::fixtures::{BUCKET, REGION, TS_LAYOUT};

/// A target (or pattern) under the fixture region and bucket.
pub fn target(key: &str) -> SourceDescriptor {
    SourceDescriptor::new(REGION, BUCKET, key)
}

/// A line-loaded JSON rule for keys under `prefix`, timestamped from `ts`.
pub fn json_entry(fetcher: Arc<dyn ObjectFetcher>, prefix: &str, tag: &str) -> Arc<LogEntry> {
    Arc::new(LogEntry::new(
        target(prefix),
        Arc::new(LineLoader::new(fetcher)),
        Arc::new(JsonParser::new(tag).with_timestamp("ts", Some(TS_LAYOUT.to_string()))),
    ))
}

/// A reader with a single [`json_entry`].
pub fn single_rule_reader(fetcher: Arc<dyn ObjectFetcher>, prefix: &str, tag: &str) -> Reader {
    Reader::new([json_entry(fetcher, prefix, tag)])
}

/// Drain a read to completion.
pub async fn read_all(reader: &Reader, key: &str) -> Vec<ReadResult> {
    reader.read(&target(key)).collect().await
}

/// Split drained results into records and errors, keeping order within each.
pub fn partition(results: Vec<ReadResult>) -> (Vec<LogRecord>, Vec<ReadError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(err) => errors.push(err),
        }
    }
    (records, errors)
}

pub fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::DateTime<chrono::Utc> {
    use chrono::TimeZone;
    chrono::Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}
