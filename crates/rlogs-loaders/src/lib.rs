//! rlogs-loaders — object fetchers and chunk loaders for rlogs.
//!
//! An [`ObjectFetcher`] opens an object in a store; a
//! [`Loader`](rlogs_core::Loader) built on top of one splits the body into raw
//! chunks for the parser.
//!
//! # Fetchers
//!
//! - [`InMemoryStore`] - fixed objects held in memory (test double)
//! - [`FsStore`] - objects under `<root>/<bucket>/<key>` on local disk
//!
//! # Loaders
//!
//! - [`LineLoader`] - one chunk per line, streamed
//! - [`ObjectLoader`] - the whole object as one chunk

pub mod fetch;
pub mod fs;
pub mod line;
pub mod memory;
pub mod object;

pub use fetch::{ObjectBody, ObjectFetcher};
pub use fs::FsStore;
pub use line::{LineLoader, DEFAULT_MAX_LINE_BYTES};
pub use memory::InMemoryStore;
pub use object::ObjectLoader;
