//! The loader capability: turn a concrete target into a stream of raw chunks.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::LoadError;
use crate::source::SourceDescriptor;

/// Lazily produced raw chunks of one object.
///
/// An `Err` item reports a mid-stream transport failure; consumers treat it as
/// the end of the stream.
pub type ChunkStream = BoxStream<'static, Result<Bytes, LoadError>>;

/// Fetches a target and splits it into chunks.
///
/// `load` either fails up front (nothing was served) or returns a stream that
/// owns the underlying object body. Dropping the stream releases the body.
///
/// # Implementing a Loader
///
/// ```ignore
/// use rlogs_core::{ChunkStream, LoadError, Loader, SourceDescriptor};
///
/// struct StaticLoader(&'static [&'static str]);
///
/// #[async_trait::async_trait]
/// impl Loader for StaticLoader {
///     fn name(&self) -> &'static str {
///         "static"
///     }
///
///     async fn load(&self, _target: &SourceDescriptor) -> Result<ChunkStream, LoadError> {
///         let chunks = self.0.iter().map(|s| Ok(bytes::Bytes::from_static(s.as_bytes())));
///         Ok(Box::pin(futures::stream::iter(chunks)))
///     }
/// }
/// ```
#[async_trait]
pub trait Loader: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    async fn load(&self, target: &SourceDescriptor) -> Result<ChunkStream, LoadError>;
}
