//! The fetch capability — the only way loaders reach an object store.
//!
//! Loaders hold an `Arc<dyn ObjectFetcher>` handed to them at construction,
//! so a test can swap the real store for [`InMemoryStore`](crate::InMemoryStore)
//! or any other double.

use std::pin::Pin;

use async_trait::async_trait;
use rlogs_core::{LoadError, SourceDescriptor};
use tokio::io::AsyncRead;

/// An open object body. Dropping it releases the underlying connection or
/// file handle.
pub type ObjectBody = Pin<Box<dyn AsyncRead + Send>>;

/// Opens objects by region, bucket and key.
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Open the object at `target` for streaming.
    ///
    /// # Errors
    /// - `LoadError::NotFound` - no object at that key
    /// - `LoadError::AccessDenied` - the caller may not read it
    /// - `LoadError::Transport` - anything else
    async fn get_object(&self, target: &SourceDescriptor) -> Result<ObjectBody, LoadError>;
}
