//! Reader — fans a read out to every matching rule and merges the results.
//!
//! ```text
//!                     ┌─► entry A: load ─► chunks ─► parse ─┐
//! read(target) ─match─┤                                     ├─► ReadStream
//!                     └─► entry B: load ─► chunks ─► parse ─┘
//! ```
//!
//! Each matching [`LogEntry`] gets its own tokio task. Tasks share one
//! bounded channel; the stream ends once every task has dropped its sender.
//! Results of one entry arrive in chunk order, results of different entries
//! interleave freely.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use rlogs_core::{ReadError, ReadResult, SourceDescriptor};
use tokio::sync::mpsc;

use crate::LogEntry;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Holds the configured rules and serves reads against them.
#[derive(Clone)]
pub struct Reader {
    entries: Vec<Arc<LogEntry>>,
    channel_capacity: usize,
}

impl Reader {
    /// Build a reader over `entries`, kept in the given order.
    pub fn new(entries: impl IntoIterator<Item = Arc<LogEntry>>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Bound on results buffered ahead of the consumer. Clamped to at least 1.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn entries(&self) -> &[Arc<LogEntry>] {
        &self.entries
    }

    /// Start reading `target` through every entry whose pattern matches it.
    ///
    /// Returns immediately; the work happens on spawned tasks. With no
    /// matching entry the stream is already closed.
    ///
    /// Dropping the returned stream cancels the read: producers notice the
    /// closed channel, stop, and release any open object body.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn read(&self, target: &SourceDescriptor) -> ReadStream {
        let (tx, rx) = mpsc::channel(self.channel_capacity);

        let matched: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.source.matches(target))
            .cloned()
            .collect();
        tracing::debug!(object = %target, matched = matched.len(), "dispatching read");

        for entry in matched {
            tokio::spawn(produce(entry, target.clone(), tx.clone()));
        }

        ReadStream { rx }
    }
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("entries", &self.entries.len())
            .field("channel_capacity", &self.channel_capacity)
            .finish()
    }
}

/// One entry's contribution: load, then one result per chunk.
async fn produce(entry: Arc<LogEntry>, target: SourceDescriptor, tx: mpsc::Sender<ReadResult>) {
    let loader = entry.loader.name();
    let parser = entry.parser.name();

    let loaded = tokio::select! {
        loaded = entry.loader.load(&target) => loaded,
        _ = tx.closed() => {
            tracing::debug!(object = %target, loader, "consumer gone during load");
            return;
        }
    };

    let mut chunks = match loaded {
        Ok(chunks) => chunks,
        Err(err) => {
            tracing::warn!(object = %target, loader, error = %err, "load failed");
            let _ = tx.send(Err(ReadError::Load(err))).await;
            return;
        }
    };

    let mut served = 0usize;
    let mut failed = 0usize;
    loop {
        let next = tokio::select! {
            next = chunks.next() => next,
            _ = tx.closed() => {
                tracing::debug!(object = %target, loader, served, "consumer gone, abandoning object");
                return;
            }
        };

        let result = match next {
            Some(Ok(chunk)) => entry.parser.parse(&chunk).map_err(ReadError::from),
            Some(Err(err)) => {
                tracing::warn!(object = %target, loader, served, error = %err, "chunk stream failed");
                let _ = tx.send(Err(ReadError::Load(err))).await;
                return;
            }
            None => break,
        };

        served += 1;
        if result.is_err() {
            failed += 1;
        }
        if tx.send(result).await.is_err() {
            tracing::debug!(object = %target, loader, served, "consumer gone, abandoning object");
            return;
        }
    }

    tracing::debug!(object = %target, loader, parser, served, failed, "entry finished");
}

/// Merged results of one [`Reader::read`] call.
///
/// Ends once every matching entry has finished. Implements [`Stream`]; use
/// [`ReadStream::recv`] for a plain async loop.
#[derive(Debug)]
pub struct ReadStream {
    rx: mpsc::Receiver<ReadResult>,
}

impl ReadStream {
    /// Next result, or `None` once every producer is done.
    pub async fn recv(&mut self) -> Option<ReadResult> {
        self.rx.recv().await
    }
}

impl Stream for ReadStream {
    type Item = ReadResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
