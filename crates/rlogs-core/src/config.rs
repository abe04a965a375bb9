//! Configuration types for rlogs.
//!
//! [`Config::load`] reads a TOML rule file layered on top of the built-in
//! defaults. [`Config::defaults`] and [`Config::from_toml_str`] do the same
//! without touching the filesystem (useful in tests).
//!
//! ```toml
//! [reader]
//! channel_capacity = 64
//! max_line_bytes   = 1048576
//!
//! [store]
//! root = "/var/lib/rlogs/objects"
//!
//! [[entries]]
//! loader = "lines"
//!
//! [entries.source]
//! region = "ap-northeast-1"
//! bucket = "some-bucket"
//! key    = "http/"
//!
//! [entries.parser]
//! kind             = "json"
//! tag              = "http"
//! timestamp_field  = "ts"
//! timestamp_format = "%Y-%m-%dT%H:%M:%S"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::source::SourceDescriptor;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[reader]
channel_capacity = 64
max_line_bytes = 1048576

[store]
root = "."
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration: reader tuning, the object store, and the ordered
/// rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub store: StoreConfig,
    /// Ingestion rules, in the order they were written.
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

/// `[reader]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// Results buffered between producers and the consumer before producers
    /// wait.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Longest line a `lines` rule serves before giving up on the object.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

fn default_channel_capacity() -> usize { 64 }
fn default_max_line_bytes() -> usize { 1024 * 1024 }

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

/// `[store]` section: the directory served by the filesystem object store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

fn default_store_root() -> PathBuf { PathBuf::from(".") }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

/// One `[[entries]]` rule.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryConfig {
    /// Pattern matched against read targets.
    pub source: SourceDescriptor,
    #[serde(default)]
    pub loader: LoaderKind,
    pub parser: ParserConfig,
}

/// How an entry splits an object into chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderKind {
    /// One chunk per line.
    #[default]
    Lines,
    /// The whole object as a single chunk.
    Object,
}

/// Parser selection plus its options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParserConfig {
    Json(JsonParserConfig),
}

/// Options for [`JsonParser`](crate::parser::JsonParser).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonParserConfig {
    pub tag: String,
    #[serde(default)]
    pub timestamp_field: Option<String>,
    /// `strftime` layout, e.g. `%Y-%m-%dT%H:%M:%S`. RFC 3339 when absent.
    #[serde(default)]
    pub timestamp_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the rule file at `path`, layered on top of the built-in defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()
    }

    /// Parse rules from a TOML string, layered on top of the defaults.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()
    }

    /// Return the built-in defaults (no rules) without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.reader.channel_capacity == 0 {
            anyhow::bail!("reader.channel_capacity must be greater than zero");
        }
        if self.reader.max_line_bytes == 0 {
            anyhow::bail!("reader.max_line_bytes must be greater than zero");
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
