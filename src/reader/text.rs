//! Text reader - chunks in, decoded lines out.

use crate::config::{Mode, OpenOptions};
use crate::decode::IncrementalDecoder;
use crate::error::{IterError, Result};
use crate::newline::NewlineNormalizer;
use crate::reader::core::Core;
use crate::reader::items::{Items, ReadItem};
use crate::reader::upstream::TextUpstream;
use crate::source::ChunkSource;

/// Reads the decoded text of a chunk source.
///
/// Byte chunks are decoded incrementally, so characters split across chunks
/// come out whole. Line endings follow the configured
/// [`Newline`](crate::Newline) policy. Sizes count chars.
///
/// # Example
///
/// ```
/// use chunkio::{IterSource, OpenOptions, TextReader};
///
/// let source = IterSource::new(vec![&b"He"[..], &b"llo\r\nWo"[..], &b"rld\n"[..]]);
/// let mut reader = TextReader::with_options(source, &OpenOptions::text())?;
///
/// assert_eq!(reader.next_line()?, "Hello\n");
/// assert_eq!(reader.next_line()?, "World\n");
/// assert_eq!(reader.next_line()?, "");
/// # Ok::<(), chunkio::IterError>(())
/// ```
#[derive(Debug)]
pub struct TextReader<S: ChunkSource> {
    core: Core<TextUpstream<S>>,
}

impl<S: ChunkSource> TextReader<S> {
    /// Creates a UTF-8, strict, universal-newline reader that owns `source`.
    pub fn new(source: S) -> Self {
        let options = OpenOptions::text();
        let decoder = IncrementalDecoder::new(encoding_rs::UTF_8, options.errors());
        Self::from_parts(source, &options, decoder)
    }

    /// Creates a reader from text-mode options.
    ///
    /// # Errors
    ///
    /// Returns [`IterError::InvalidArgument`] if the options are not text
    /// mode or name an unknown encoding.
    pub fn with_options(source: S, options: &OpenOptions) -> Result<Self> {
        if options.mode() != Mode::Text {
            return Err(IterError::invalid("TextReader requires text mode"));
        }
        let encoding = options
            .resolve_encoding()?
            .ok_or_else(|| IterError::invalid("text mode requires an encoding"))?;
        let decoder = IncrementalDecoder::new(encoding, options.errors());
        Ok(Self::from_parts(source, options, decoder))
    }

    fn from_parts(source: S, options: &OpenOptions, decoder: IncrementalDecoder) -> Self {
        let newline = options.newline();
        let upstream = TextUpstream::new(
            source,
            options.owns_source(),
            decoder,
            NewlineNormalizer::new(newline),
        );
        Self {
            core: Core::new(upstream, newline.boundary()),
        }
    }

    /// Reads up to `n` chars. Fewer are returned only at end of stream; an
    /// empty result means the stream is exhausted.
    pub fn read_up_to(&mut self, n: usize) -> Result<String> {
        self.core.read(n)
    }

    /// Reads everything left in the stream.
    pub fn read_all(&mut self) -> Result<String> {
        self.core.read_all()
    }

    /// Reads the next line including its terminator, the final unterminated
    /// line, or an empty string at end of stream.
    pub fn next_line(&mut self) -> Result<String> {
        self.core.read_line(None)
    }

    /// Like [`next_line`](Self::next_line), returning at most `limit` chars.
    pub fn next_line_limited(&mut self, limit: usize) -> Result<String> {
        self.core.read_line(Some(limit))
    }

    /// Reads all remaining lines.
    pub fn all_lines(&mut self) -> Result<Vec<String>> {
        self.iter().collect()
    }

    /// Iterates over lines.
    pub fn iter(&mut self) -> Items<&mut Self> {
        Items::new(self)
    }

    /// Returns the number of chars delivered so far.
    pub fn position(&self) -> Result<u64> {
        self.core.position()
    }

    /// Returns true once the source is exhausted and the buffer drained.
    pub fn is_exhausted(&self) -> bool {
        self.core.is_exhausted()
    }

    /// Releases buffered text and decoder state and, if owned, closes the
    /// source. Idempotent.
    pub fn close(&mut self) {
        self.core.close();
    }

    /// Returns true after [`close`](Self::close).
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }
}

impl<S: ChunkSource> ReadItem for TextReader<S> {
    type Item = String;

    fn read_item(&mut self) -> Result<Option<String>> {
        let line = self.next_line()?;
        Ok((!line.is_empty()).then_some(line))
    }
}

impl<S: ChunkSource> IntoIterator for TextReader<S> {
    type Item = Result<String>;
    type IntoIter = Items<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Items::new(self)
    }
}

impl<'a, S: ChunkSource> IntoIterator for &'a mut TextReader<S> {
    type Item = Result<String>;
    type IntoIter = Items<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Items::new(self)
    }
}
