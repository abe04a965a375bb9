//! Object loader — the whole object as one chunk.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use rlogs_core::{ChunkStream, LoadError, Loader, SourceDescriptor};
use tokio::io::AsyncReadExt;

use crate::fetch::ObjectFetcher;

/// Serves each object as a single chunk, for sources that hold one document
/// per object. The body is read fully inside `load`, so read failures are
/// load failures. An empty object yields no chunks.
#[derive(Clone)]
pub struct ObjectLoader {
    fetcher: Arc<dyn ObjectFetcher>,
}

impl ObjectLoader {
    pub fn new(fetcher: Arc<dyn ObjectFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Loader for ObjectLoader {
    fn name(&self) -> &'static str {
        "object"
    }

    async fn load(&self, target: &SourceDescriptor) -> Result<ChunkStream, LoadError> {
        let mut body = self.fetcher.get_object(target).await?;
        let mut buf = Vec::new();
        body.read_to_end(&mut buf)
            .await
            .map_err(|e| LoadError::from_io(target, e))?;
        tracing::debug!(object = %target, bytes = buf.len(), "object loaded");

        let chunk: Option<Result<Bytes, LoadError>> = (!buf.is_empty()).then(|| Ok(Bytes::from(buf)));
        Ok(Box::pin(futures::stream::iter(chunk)))
    }
}
