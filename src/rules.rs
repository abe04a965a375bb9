//! Builds the rule set from configuration.

use std::sync::Arc;

use rlogs_core::config::{Config, EntryConfig, LoaderKind, ParserConfig, ReaderConfig};
use rlogs_core::{JsonParser, Loader, Parser};
use rlogs_loaders::{LineLoader, ObjectFetcher, ObjectLoader};

use crate::{LogEntry, Reader};

/// Turn `[[entries]]` into log entries, all fetching through `fetcher`.
pub fn entries_from_config(
    entries: &[EntryConfig],
    reader: &ReaderConfig,
    fetcher: Arc<dyn ObjectFetcher>,
) -> Vec<Arc<LogEntry>> {
    entries
        .iter()
        .map(|cfg| {
            let loader: Arc<dyn Loader> = match cfg.loader {
                LoaderKind::Lines => Arc::new(
                    LineLoader::new(fetcher.clone()).with_max_line_bytes(reader.max_line_bytes),
                ),
                LoaderKind::Object => Arc::new(ObjectLoader::new(fetcher.clone())),
            };
            let parser: Arc<dyn Parser> = match &cfg.parser {
                ParserConfig::Json(json) => Arc::new(JsonParser::from_config(json)),
            };
            Arc::new(LogEntry::new(cfg.source.clone(), loader, parser))
        })
        .collect()
}

impl Reader {
    /// A reader over every configured entry, with the configured channel
    /// capacity.
    pub fn from_config(config: &Config, fetcher: Arc<dyn ObjectFetcher>) -> Self {
        Reader::new(entries_from_config(&config.entries, &config.reader, fetcher))
            .with_channel_capacity(config.reader.channel_capacity)
    }
}
