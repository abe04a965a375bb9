//! rlogs — pluggable log ingestion.
//!
//! Given a concrete object location, the [`Reader`] picks every configured
//! [`LogEntry`] whose source pattern covers it, loads the object through the
//! entry's loader, parses each chunk with the entry's parser, and streams one
//! [`ReadResult`] per chunk back to the caller.
//!
//! # Architecture
//!
//! ```text
//! Reader::read(target)
//!    │ match entries (prefix on key, same region/bucket)
//!    ├──► Loader::load(target) ──► chunks ──► Parser::parse(chunk)
//!    └──► ...one task per matching entry...
//!                                     │
//!                                     ▼
//!                           ReadStream (merged)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use rlogs::{JsonParser, LogEntry, Reader, SourceDescriptor};
//! use rlogs::loaders::{InMemoryStore, LineLoader};
//!
//! # async fn run() {
//! let store = Arc::new(InMemoryStore::new().with_object(
//!     "some-bucket",
//!     "http/log.json",
//!     r#"{"ts":"2019-10-10T10:00:00","path":"/hello"}"#,
//! ));
//! let entry = LogEntry::new(
//!     SourceDescriptor::new("some-region", "some-bucket", "http/"),
//!     Arc::new(LineLoader::new(store)),
//!     Arc::new(JsonParser::new("http").with_timestamp("ts", Some("%Y-%m-%dT%H:%M:%S".into()))),
//! );
//! let reader = Reader::new([Arc::new(entry)]);
//!
//! let mut results = reader.read(&SourceDescriptor::new("some-region", "some-bucket", "http/log.json"));
//! while let Some(result) = results.next().await {
//!     match result {
//!         Ok(record) => println!("{} {:?} {:?}", record.tag, record.timestamp, record.values),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! # }
//! ```

pub mod reader;
pub mod rules;

use std::sync::Arc;

pub use reader::{ReadStream, Reader};
pub use rlogs_core::config;
pub use rlogs_core::{
    ChunkStream, JsonParser, LoadError, Loader, LogRecord, ParseError, Parser, ReadError,
    ReadResult, SourceDescriptor,
};
pub use rlogs_loaders as loaders;

/// One ingestion rule: objects matching `source` are loaded by `loader` and
/// decoded by `parser`.
///
/// Entries are shared read-only between concurrent reads.
#[derive(Clone)]
pub struct LogEntry {
    pub source: SourceDescriptor,
    pub loader: Arc<dyn Loader>,
    pub parser: Arc<dyn Parser>,
}

impl LogEntry {
    pub fn new(source: SourceDescriptor, loader: Arc<dyn Loader>, parser: Arc<dyn Parser>) -> Self {
        Self {
            source,
            loader,
            parser,
        }
    }
}

impl std::fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogEntry")
            .field("source", &self.source)
            .field("loader", &self.loader.name())
            .field("parser", &self.parser.name())
            .finish()
    }
}
