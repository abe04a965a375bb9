//! Directory-backed object store: `<root>/<bucket>/<key>`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use rlogs_core::{LoadError, SourceDescriptor};

use crate::fetch::{ObjectBody, ObjectFetcher};

/// Serves objects from a local directory tree, one sub-directory per bucket.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a target to a path, refusing anything that would leave the
    /// bucket directory.
    fn resolve(&self, target: &SourceDescriptor) -> Option<PathBuf> {
        let bucket = Path::new(target.bucket());
        let key = Path::new(target.key());
        let plain = |p: &Path| p.components().all(|c| matches!(c, Component::Normal(_)));
        if target.bucket().is_empty() || !plain(bucket) || !plain(key) {
            return None;
        }
        Some(self.root.join(bucket).join(key))
    }
}

#[async_trait]
impl ObjectFetcher for FsStore {
    async fn get_object(&self, target: &SourceDescriptor) -> Result<ObjectBody, LoadError> {
        let Some(path) = self.resolve(target) else {
            return Err(LoadError::AccessDenied {
                target: target.clone(),
            });
        };

        tracing::debug!(path = %path.display(), "opening object");
        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| LoadError::from_io(target, e))?;

        // Opening a directory succeeds on some platforms; it is not an object.
        let meta = file
            .metadata()
            .await
            .map_err(|e| LoadError::from_io(target, e))?;
        if !meta.is_file() {
            return Err(LoadError::NotFound {
                target: target.clone(),
            });
        }

        Ok(Box::pin(file))
    }
}
