//! rlogs-core — shared types and capability contracts.
//!
//! This crate defines the three pluggable stages of the ingestion pipeline
//! and the values that flow between them.
//!
//! # Architecture
//!
//! ```text
//! SourceDescriptor ──► Loader ──► chunk stream ──► Parser ──► ReadResult
//!   (match/target)    (fetch+split)                (decode)
//! ```
//!
//! Concrete loaders live in `rlogs-loaders`; the orchestrating `Reader` lives
//! in the `rlogs` crate.

pub mod config;
pub mod error;
pub mod loader;
pub mod parser;
pub mod source;
pub mod types;

pub use error::{LoadError, ParseError, ReadError};
pub use loader::{ChunkStream, Loader};
pub use parser::{JsonParser, Parser};
pub use source::SourceDescriptor;
pub use types::{LogRecord, ReadResult};
