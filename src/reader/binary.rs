//! Binary reader - chunks in, bytes out.

use std::io::{self, BufRead, Read};

use bytes::Bytes;

use crate::config::{BinaryIteration, Mode, OpenOptions};
use crate::error::{IterError, Result};
use crate::newline::LineBoundary;
use crate::reader::core::Core;
use crate::reader::items::{Items, ReadItem};
use crate::reader::upstream::ByteUpstream;
use crate::source::ChunkSource;

/// Reads the bytes of a chunk source.
///
/// Implements [`Read`] and [`BufRead`], so it can be handed to anything that
/// consumes a byte stream. The inherent methods mirror a file handle:
/// bounded reads, `\n`-terminated lines and iteration.
///
/// # Example
///
/// ```
/// use chunkio::{ByteReader, IterSource};
///
/// let source = IterSource::new(vec![&b"ab"[..], &b"cd"[..], &b"ef"[..]]);
/// let mut reader = ByteReader::new(source);
///
/// assert_eq!(&reader.read_up_to(3)?[..], b"abc");
/// assert_eq!(&reader.read_up_to(3)?[..], b"def");
/// assert!(reader.read_up_to(3)?.is_empty());
/// # Ok::<(), chunkio::IterError>(())
/// ```
#[derive(Debug)]
pub struct ByteReader<S: ChunkSource> {
    core: Core<ByteUpstream<S>>,
    iteration: BinaryIteration,
}

impl<S: ChunkSource> ByteReader<S> {
    /// Creates a reader that owns `source` and iterates by line.
    pub fn new(source: S) -> Self {
        Self::from_parts(source, true, BinaryIteration::default())
    }

    /// Creates a reader from validated binary-mode options.
    ///
    /// # Errors
    ///
    /// Returns [`IterError::InvalidArgument`] if the options are not binary
    /// mode or carry text settings.
    pub fn with_options(source: S, options: &OpenOptions) -> Result<Self> {
        if options.mode() != Mode::Binary {
            return Err(IterError::invalid("ByteReader requires binary mode"));
        }
        options.validate()?;
        Ok(Self::from_parts(
            source,
            options.owns_source(),
            options.binary_iteration(),
        ))
    }

    fn from_parts(source: S, owns_source: bool, iteration: BinaryIteration) -> Self {
        Self {
            core: Core::new(ByteUpstream::new(source, owns_source), LineBoundary::Lf),
            iteration,
        }
    }

    /// Reads up to `n` bytes. Fewer are returned only at end of stream; an
    /// empty result means the stream is exhausted. `read_up_to(0)` never
    /// pulls from the source.
    pub fn read_up_to(&mut self, n: usize) -> Result<Bytes> {
        self.core.read(n).map(|b| b.freeze())
    }

    /// Reads everything left in the stream.
    pub fn read_all(&mut self) -> Result<Bytes> {
        self.core.read_all().map(|b| b.freeze())
    }

    /// Reads the next line including its `\n`, the final unterminated line,
    /// or an empty result at end of stream.
    pub fn next_line(&mut self) -> Result<Bytes> {
        self.core.read_line(None).map(|b| b.freeze())
    }

    /// Like [`next_line`](Self::next_line), returning at most `limit` bytes.
    pub fn next_line_limited(&mut self, limit: usize) -> Result<Bytes> {
        self.core.read_line(Some(limit)).map(|b| b.freeze())
    }

    /// Reads all remaining lines.
    pub fn all_lines(&mut self) -> Result<Vec<Bytes>> {
        let mut lines = Vec::new();
        loop {
            let line = self.next_line()?;
            if line.is_empty() {
                return Ok(lines);
            }
            lines.push(line);
        }
    }

    /// Returns what is buffered, or the next chunk if nothing is.
    pub fn next_chunk(&mut self) -> Result<Bytes> {
        self.core.read_available().map(|b| b.freeze())
    }

    /// Iterates over lines or chunks, per the reader's [`BinaryIteration`].
    pub fn iter(&mut self) -> Items<&mut Self> {
        Items::new(self)
    }

    /// Returns the number of bytes delivered so far.
    pub fn position(&self) -> Result<u64> {
        self.core.position()
    }

    /// Returns the number of bytes pulled but not yet delivered.
    pub fn buffered(&self) -> usize {
        self.core.buffered()
    }

    /// Returns true once the source is exhausted and the buffer drained.
    pub fn is_exhausted(&self) -> bool {
        self.core.is_exhausted()
    }

    /// Releases buffered data and, if owned, closes the source. Idempotent.
    pub fn close(&mut self) {
        self.core.close();
    }

    /// Returns true after [`close`](Self::close).
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }
}

impl<S: ChunkSource> ReadItem for ByteReader<S> {
    type Item = Bytes;

    fn read_item(&mut self) -> Result<Option<Bytes>> {
        let item = match self.iteration {
            BinaryIteration::Lines => self.next_line()?,
            BinaryIteration::Chunks => self.next_chunk()?,
        };
        Ok((!item.is_empty()).then_some(item))
    }
}

impl<S: ChunkSource> IntoIterator for ByteReader<S> {
    type Item = Result<Bytes>;
    type IntoIter = Items<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Items::new(self)
    }
}

impl<'a, S: ChunkSource> IntoIterator for &'a mut ByteReader<S> {
    type Item = Result<Bytes>;
    type IntoIter = Items<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Items::new(self)
    }
}

impl<S: ChunkSource> Read for ByteReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = self.core.read(buf.len())?;
        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }
}

impl<S: ChunkSource> BufRead for ByteReader<S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.core.fill_buf()?)
    }

    fn consume(&mut self, amt: usize) {
        self.core.consume(amt);
    }
}
