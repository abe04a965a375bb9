//! In-memory object store, used as the fetch test double.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use async_trait::async_trait;
use bytes::Bytes;
use rlogs_core::{LoadError, SourceDescriptor};

use crate::fetch::{ObjectBody, ObjectFetcher};

/// Immutable map of `(bucket, key)` to object bodies.
///
/// Region is not part of an object's identity here, the same as a real store
/// where a bucket lives in exactly one region.
///
/// ```ignore
/// let store = InMemoryStore::new()
///     .with_object("some-bucket", "http/log.json", "{\"a\":1}\n")
///     .deny_bucket("private");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    objects: HashMap<(String, String), Bytes>,
    denied: HashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(
        mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        self.objects.insert((bucket.into(), key.into()), body.into());
        self
    }

    /// Every read from `bucket` fails with `AccessDenied`.
    pub fn deny_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.denied.insert(bucket.into());
        self
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectFetcher for InMemoryStore {
    async fn get_object(&self, target: &SourceDescriptor) -> Result<ObjectBody, LoadError> {
        if self.denied.contains(target.bucket()) {
            return Err(LoadError::AccessDenied {
                target: target.clone(),
            });
        }

        let id = (target.bucket().to_string(), target.key().to_string());
        match self.objects.get(&id) {
            Some(body) => Ok(Box::pin(Cursor::new(body.clone()))),
            None => Err(LoadError::NotFound {
                target: target.clone(),
            }),
        }
    }
}
