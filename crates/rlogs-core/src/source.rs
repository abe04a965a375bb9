//! Source descriptors — where log data lives.
//!
//! The same [`SourceDescriptor`] type plays two roles: as the `source` of a
//! configured rule it is a *pattern*, and as the argument to a read it is a
//! concrete *target*. [`SourceDescriptor::matches`] relates the two.

use serde::Deserialize;

/// Identifies a log location in an object store: region, bucket (container)
/// and key (path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct SourceDescriptor {
    region: String,
    bucket: String,
    #[serde(default)]
    key: String,
}

impl SourceDescriptor {
    pub fn new(region: impl Into<String>, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns `true` when `self`, read as a pattern, covers `target`.
    ///
    /// Region and bucket must be equal and the target key must start with the
    /// pattern key. An empty pattern key therefore covers the whole bucket.
    pub fn matches(&self, target: &SourceDescriptor) -> bool {
        self.region == target.region
            && self.bucket == target.bucket
            && target.key.starts_with(&self.key)
    }
}

impl std::fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}", self.region, self.bucket, self.key)
    }
}
