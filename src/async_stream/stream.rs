//! Async reader over a stream of chunks.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::{io::AsyncReadExt, stream};
//! use chunkio::AsyncChunkReader;
//!
//! async fn demo() -> std::io::Result<()> {
//!     let chunks = stream::iter(vec![Ok::<_, std::io::Error>(&b"ab"[..]), Ok(&b"cd"[..])]);
//!     let mut reader = AsyncChunkReader::new(chunks);
//!
//!     let mut out = Vec::new();
//!     reader.read_to_end(&mut out).await?;
//!     assert_eq!(out, b"abcd");
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::{Buf, Bytes};
use futures_core::Stream;
use futures_io::{AsyncBufRead, AsyncRead};
use pin_project_lite::pin_project;
use tracing::{debug, trace};

use crate::chunk::Chunk;
use crate::error::{BoxError, IterError};

pin_project! {
    /// Binary-mode reader over a [`Stream`] of fallible chunks.
    ///
    /// Implements `futures_io::AsyncRead` and `AsyncBufRead`, so it works
    /// with any futures-compatible runtime. Text chunks are read as their
    /// UTF-8 bytes. Stream errors surface as `io::Error`; an `io::Error`
    /// from the stream is passed through unchanged.
    ///
    /// Only one chunk is held at a time.
    #[derive(Debug)]
    pub struct AsyncChunkReader<St> {
        #[pin]
        stream: St,
        current: Bytes,
        position: u64,
        exhausted: bool,
    }
}

impl<St> AsyncChunkReader<St> {
    /// Creates a reader over `stream`.
    pub fn new(stream: St) -> Self {
        Self {
            stream,
            current: Bytes::new(),
            position: 0,
            exhausted: false,
        }
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns true once the stream ended and the current chunk is drained.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.current.is_empty()
    }

    /// Consumes the reader, returning the stream. Buffered bytes are lost.
    pub fn into_inner(self) -> St {
        self.stream
    }
}

impl<St, T, E> AsyncBufRead for AsyncChunkReader<St>
where
    St: Stream<Item = Result<T, E>>,
    T: Into<Chunk>,
    E: Into<BoxError>,
{
    fn poll_fill_buf(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        let mut this = self.project();

        while this.current.is_empty() && !*this.exhausted {
            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(Ok(chunk)) => {
                    let bytes = chunk.into().into_bytes();
                    trace!(len = bytes.len(), "pulled chunk");
                    *this.current = bytes;
                }
                Some(Err(e)) => {
                    return Poll::Ready(Err(IterError::from_source(e).into()));
                }
                None => {
                    debug!(position = *this.position, "chunk stream exhausted");
                    *this.exhausted = true;
                }
            }
        }

        Poll::Ready(Ok(&this.current[..]))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        let this = self.project();
        let amt = amt.min(this.current.len());
        this.current.advance(amt);
        *this.position += amt as u64;
    }
}

impl<St, T, E> AsyncRead for AsyncChunkReader<St>
where
    St: Stream<Item = Result<T, E>>,
    T: Into<Chunk>,
    E: Into<BoxError>,
{
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        if buf.is_empty() {
            return Poll::Ready(Ok(0));
        }
        let available = ready!(self.as_mut().poll_fill_buf(cx))?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Poll::Ready(Ok(n))
    }
}

/// Creates an async reader over a stream of chunks.
///
/// For tokio users, `tokio_util::compat` converts the result into a
/// `tokio::io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::FuturesAsyncReadCompatExt;
///
/// let reader = chunkio::read_async(chunks).compat();
/// ```
pub fn read_async<St>(stream: St) -> AsyncChunkReader<St> {
    AsyncChunkReader::new(stream)
}
