//! Fake fetchers for failure and cancellation scenarios.
//!
//! - [`FlakyStore`] serves a few bytes then fails the connection.
//! - [`ProbeStore`] serves a body that never reaches EOF and records when it
//!   is dropped.
//! - [`StallingStore`] never answers `get_object` and records when the
//!   pending request is abandoned.

use std::io::Cursor;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use rlogs::loaders::{ObjectBody, ObjectFetcher};
use rlogs::{LoadError, SourceDescriptor};
use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::Notify;

// ---------------------------------------------------------------------------
// FlakyStore
// ---------------------------------------------------------------------------

/// Every object is `prefix` followed by a connection reset.
pub struct FlakyStore {
    prefix: Bytes,
}

impl FlakyStore {
    pub fn new(prefix: impl Into<Bytes>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl ObjectFetcher for FlakyStore {
    async fn get_object(&self, _target: &SourceDescriptor) -> Result<ObjectBody, LoadError> {
        let parts: Vec<std::io::Result<Bytes>> = vec![
            Ok(self.prefix.clone()),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )),
        ];
        Ok(Box::pin(tokio_util::io::StreamReader::new(
            futures::stream::iter(parts),
        )))
    }
}

// ---------------------------------------------------------------------------
// ProbeStore
// ---------------------------------------------------------------------------

/// Serves `prefix`, then blocks forever. `released()` turns true once the
/// body handed out has been dropped.
pub struct ProbeStore {
    prefix: Bytes,
    released: Arc<AtomicBool>,
}

impl ProbeStore {
    pub fn new(prefix: impl Into<Bytes>) -> Self {
        Self {
            prefix: prefix.into(),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn released(&self) -> Arc<AtomicBool> {
        self.released.clone()
    }
}

#[async_trait]
impl ObjectFetcher for ProbeStore {
    async fn get_object(&self, _target: &SourceDescriptor) -> Result<ObjectBody, LoadError> {
        Ok(Box::pin(ProbeBody {
            data: Cursor::new(self.prefix.clone()),
            released: self.released.clone(),
        }))
    }
}

struct ProbeBody {
    data: Cursor<Bytes>,
    released: Arc<AtomicBool>,
}

impl AsyncRead for ProbeBody {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        if (self.data.position() as usize) < self.data.get_ref().len() {
            Pin::new(&mut self.data).poll_read(cx, buf)
        } else {
            Poll::Pending
        }
    }
}

impl Drop for ProbeBody {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// StallingStore
// ---------------------------------------------------------------------------

/// `get_object` never completes. `started` is notified when a request is
/// in flight; `abandoned()` turns true once that request was dropped.
pub struct StallingStore {
    pub started: Arc<Notify>,
    abandoned: Arc<AtomicBool>,
}

impl StallingStore {
    pub fn new() -> Self {
        Self {
            started: Arc::new(Notify::new()),
            abandoned: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn abandoned(&self) -> Arc<AtomicBool> {
        self.abandoned.clone()
    }
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectFetcher for StallingStore {
    async fn get_object(&self, _target: &SourceDescriptor) -> Result<ObjectBody, LoadError> {
        let _guard = SetOnDrop(self.abandoned.clone());
        self.started.notify_one();
        std::future::pending::<()>().await;
        unreachable!("pending never resolves")
    }
}

/// Poll `flag` until it is set, failing the test after a second.
pub async fn wait_for(flag: &AtomicBool) {
    tokio::time::timeout(std::time::Duration::from_secs(1), async {
        while !flag.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("flag was not set within a second");
}
