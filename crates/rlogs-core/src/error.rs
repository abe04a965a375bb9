//! Error taxonomy for rlogs.
//!
//! Matching never fails, so there are two failure families: [`LoadError`]
//! ends one rule's contribution to a read, [`ParseError`] fails one chunk.
//! Both reach the caller wrapped in [`ReadError`].

use thiserror::Error;

use crate::source::SourceDescriptor;

/// Fetching or streaming an object failed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("object not found: {target}")]
    NotFound { target: SourceDescriptor },

    #[error("access denied: {target}")]
    AccessDenied { target: SourceDescriptor },

    #[error("transport error on {target}: {source}")]
    Transport {
        target: SourceDescriptor,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Map an I/O error to the matching load failure for `target`.
    pub fn from_io(target: &SourceDescriptor, err: std::io::Error) -> Self {
        let target = target.clone();
        match err.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound { target },
            std::io::ErrorKind::PermissionDenied => LoadError::AccessDenied { target },
            _ => LoadError::Transport { target, source: err },
        }
    }

    /// The object the failed load was for.
    pub fn target(&self) -> &SourceDescriptor {
        match self {
            LoadError::NotFound { target }
            | LoadError::AccessDenied { target }
            | LoadError::Transport { target, .. } => target,
        }
    }
}

/// Decoding one chunk failed.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("timestamp field {field:?} is missing")]
    MissingTimestamp { field: String },

    #[error("timestamp field {field:?} is not a string")]
    TimestampNotString { field: String },

    #[error("timestamp {value:?} does not match format {format:?}: {source}")]
    TimestampFormat {
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// The failure side of a [`ReadResult`](crate::ReadResult).
#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ReadError {
    pub fn is_load(&self) -> bool {
        matches!(self, ReadError::Load(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ReadError::Parse(_))
    }
}
