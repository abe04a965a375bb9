//! Line loader — one chunk per `\n`-delimited line.
//!
//! The object body is decoded incrementally through a [`FramedRead`], so only
//! the current line is buffered, up to [`DEFAULT_MAX_LINE_BYTES`] or the
//! configured limit. A trailing `\r` is stripped. Blank lines in the middle of
//! an object are served as empty chunks; blank lines at the end are dropped.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use rlogs_core::{ChunkStream, LoadError, Loader, SourceDescriptor};
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead};

use crate::fetch::{ObjectBody, ObjectFetcher};

/// Longest line served before the object is abandoned with a transport error.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Splits objects into lines.
#[derive(Clone)]
pub struct LineLoader {
    fetcher: Arc<dyn ObjectFetcher>,
    max_line_bytes: usize,
}

impl LineLoader {
    pub fn new(fetcher: Arc<dyn ObjectFetcher>) -> Self {
        Self {
            fetcher,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    /// Cap the length of a single line, `\r` included. Clamped to at least 1.
    pub fn with_max_line_bytes(mut self, max: usize) -> Self {
        self.max_line_bytes = max.max(1);
        self
    }
}

#[async_trait]
impl Loader for LineLoader {
    fn name(&self) -> &'static str {
        "lines"
    }

    async fn load(&self, target: &SourceDescriptor) -> Result<ChunkStream, LoadError> {
        let body = self.fetcher.get_object(target).await?;
        tracing::debug!(object = %target, max_line_bytes = self.max_line_bytes, "streaming lines");
        Ok(Box::pin(Lines::new(body, target.clone(), self.max_line_bytes)))
    }
}

fn strip_cr(line: Bytes) -> Bytes {
    if line.ends_with(b"\r") {
        line.slice(..line.len() - 1)
    } else {
        line
    }
}

fn codec_error(target: &SourceDescriptor, err: AnyDelimiterCodecError, max: usize) -> LoadError {
    match err {
        AnyDelimiterCodecError::Io(err) => LoadError::from_io(target, err),
        AnyDelimiterCodecError::MaxChunkLengthExceeded => LoadError::Transport {
            target: target.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("line longer than {max} bytes"),
            ),
        },
    }
}

// ---------------------------------------------------------------------------
// Stream
// ---------------------------------------------------------------------------

/// Line chunks of one object, holding back blank lines until something after
/// them proves they are not trailing. A failure counts as such a proof.
struct Lines {
    frames: FramedRead<ObjectBody, AnyDelimiterCodec>,
    target: SourceDescriptor,
    max_line_bytes: usize,
    held_blanks: usize,
    held: Option<Result<Bytes, LoadError>>,
    done: bool,
}

impl Lines {
    fn new(body: ObjectBody, target: SourceDescriptor, max_line_bytes: usize) -> Self {
        let codec = AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), Vec::new(), max_line_bytes);
        Self {
            frames: FramedRead::new(body, codec),
            target,
            max_line_bytes,
            held_blanks: 0,
            held: None,
            done: false,
        }
    }

    /// Serve `item` now, or queue it behind the held blank lines.
    fn release(&mut self, item: Result<Bytes, LoadError>) -> Poll<Option<Result<Bytes, LoadError>>> {
        if self.held_blanks == 0 {
            return Poll::Ready(Some(item));
        }
        self.held_blanks -= 1;
        self.held = Some(item);
        Poll::Ready(Some(Ok(Bytes::new())))
    }
}

impl Stream for Lines {
    type Item = Result<Bytes, LoadError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        if this.held.is_some() {
            if this.held_blanks > 0 {
                this.held_blanks -= 1;
                return Poll::Ready(Some(Ok(Bytes::new())));
            }
            return Poll::Ready(this.held.take());
        }

        if this.done {
            return Poll::Ready(None);
        }

        loop {
            match Pin::new(&mut this.frames).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(line))) => {
                    let line = strip_cr(line);
                    if line.is_empty() {
                        this.held_blanks += 1;
                        continue;
                    }
                    return this.release(Ok(line));
                }
                Poll::Ready(Some(Err(err))) => {
                    this.done = true;
                    let err = codec_error(&this.target, err, this.max_line_bytes);
                    tracing::warn!(object = %this.target, error = %err, "line stream failed");
                    return this.release(Err(err));
                }
                Poll::Ready(None) => {
                    this.done = true;
                    if this.held_blanks > 0 {
                        tracing::trace!(object = %this.target, dropped = this.held_blanks, "trailing blank lines");
                    }
                    return Poll::Ready(None);
                }
            }
        }
    }
}
