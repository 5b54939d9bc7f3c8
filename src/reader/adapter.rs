//! The mode-dispatching stream object returned by [`open`].

use crate::chunk::Chunk;
use crate::config::{Mode, OpenOptions};
use crate::error::Result;
use crate::reader::binary::ByteReader;
use crate::reader::items::{Items, ReadItem};
use crate::reader::text::TextReader;
use crate::source::ChunkSource;

/// Opens a chunk source for reading with a file-like interface.
///
/// The options are validated up front; invalid combinations fail here rather
/// than on first read.
///
/// # Example
///
/// ```
/// use chunkio::{open, Chunk, IterSource, OpenOptions};
///
/// let source = IterSource::new(vec![&b"ab"[..], &b"cd"[..], &b"ef"[..]]);
/// let mut stream = open(source, OpenOptions::from_mode("rb")?)?;
///
/// assert_eq!(stream.read(3)?, Chunk::from(&b"abc"[..]));
/// assert_eq!(stream.read(-1)?, Chunk::from(&b"def"[..]));
/// assert!(stream.read(3)?.is_empty());
/// # Ok::<(), chunkio::IterError>(())
/// ```
pub fn open<S: ChunkSource>(source: S, options: OpenOptions) -> Result<StreamAdapter<S>> {
    options.validate()?;
    Ok(match options.mode() {
        Mode::Binary => StreamAdapter::Binary(ByteReader::with_options(source, &options)?),
        Mode::Text => StreamAdapter::Text(TextReader::with_options(source, &options)?),
    })
}

/// A file-like reader over a chunk source, in binary or text mode.
///
/// Reads return [`Chunk::Bytes`] in binary mode and [`Chunk::Text`] in text
/// mode. Sizes count bytes or chars accordingly.
#[derive(Debug)]
pub enum StreamAdapter<S: ChunkSource> {
    /// Binary mode.
    Binary(ByteReader<S>),

    /// Text mode.
    Text(TextReader<S>),
}

impl<S: ChunkSource> StreamAdapter<S> {
    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        match self {
            StreamAdapter::Binary(_) => Mode::Binary,
            StreamAdapter::Text(_) => Mode::Text,
        }
    }

    /// Reads up to `size` units; a negative size reads everything left.
    ///
    /// An empty result means end of stream. `read(0)` never pulls from the
    /// source.
    pub fn read(&mut self, size: i64) -> Result<Chunk> {
        let size = usize::try_from(size).ok();
        match self {
            StreamAdapter::Binary(r) => match size {
                Some(n) => r.read_up_to(n).map(Chunk::Bytes),
                None => r.read_all().map(Chunk::Bytes),
            },
            StreamAdapter::Text(r) => match size {
                Some(n) => r.read_up_to(n).map(Chunk::Text),
                None => r.read_all().map(Chunk::Text),
            },
        }
    }

    /// Reads everything left in the stream.
    pub fn read_all(&mut self) -> Result<Chunk> {
        self.read(-1)
    }

    /// Reads the next line including its terminator, the final unterminated
    /// line, or an empty chunk at end of stream.
    pub fn read_line(&mut self) -> Result<Chunk> {
        match self {
            StreamAdapter::Binary(r) => r.next_line().map(Chunk::Bytes),
            StreamAdapter::Text(r) => r.next_line().map(Chunk::Text),
        }
    }

    /// Like [`read_line`](Self::read_line), returning at most `limit` units.
    pub fn read_line_limited(&mut self, limit: usize) -> Result<Chunk> {
        match self {
            StreamAdapter::Binary(r) => r.next_line_limited(limit).map(Chunk::Bytes),
            StreamAdapter::Text(r) => r.next_line_limited(limit).map(Chunk::Text),
        }
    }

    /// Reads all remaining items, as iteration would yield them.
    pub fn read_lines(&mut self) -> Result<Vec<Chunk>> {
        self.iter().collect()
    }

    /// Iterates over the stream: lines in text mode; lines or chunks in
    /// binary mode, per [`BinaryIteration`](crate::BinaryIteration).
    pub fn iter(&mut self) -> Items<&mut Self> {
        Items::new(self)
    }

    /// Returns the number of units delivered so far.
    pub fn position(&self) -> Result<u64> {
        match self {
            StreamAdapter::Binary(r) => r.position(),
            StreamAdapter::Text(r) => r.position(),
        }
    }

    /// Releases buffers and decoder state and, if owned, closes the source.
    /// Closing twice is a no-op.
    pub fn close(&mut self) {
        match self {
            StreamAdapter::Binary(r) => r.close(),
            StreamAdapter::Text(r) => r.close(),
        }
    }

    /// Returns true after [`close`](Self::close).
    pub fn is_closed(&self) -> bool {
        match self {
            StreamAdapter::Binary(r) => r.is_closed(),
            StreamAdapter::Text(r) => r.is_closed(),
        }
    }

    /// Always true.
    pub fn readable(&self) -> bool {
        true
    }

    /// Always false; consumed data cannot be revisited.
    pub fn seekable(&self) -> bool {
        false
    }

    /// Always false.
    pub fn writable(&self) -> bool {
        false
    }

    /// Returns the binary reader, if in binary mode.
    pub fn as_binary_mut(&mut self) -> Option<&mut ByteReader<S>> {
        match self {
            StreamAdapter::Binary(r) => Some(r),
            StreamAdapter::Text(_) => None,
        }
    }

    /// Returns the text reader, if in text mode.
    pub fn as_text_mut(&mut self) -> Option<&mut TextReader<S>> {
        match self {
            StreamAdapter::Binary(_) => None,
            StreamAdapter::Text(r) => Some(r),
        }
    }

    /// Converts into the binary reader, if in binary mode.
    pub fn into_binary(self) -> Option<ByteReader<S>> {
        match self {
            StreamAdapter::Binary(r) => Some(r),
            StreamAdapter::Text(_) => None,
        }
    }

    /// Converts into the text reader, if in text mode.
    pub fn into_text(self) -> Option<TextReader<S>> {
        match self {
            StreamAdapter::Binary(_) => None,
            StreamAdapter::Text(r) => Some(r),
        }
    }
}

impl<S: ChunkSource> ReadItem for StreamAdapter<S> {
    type Item = Chunk;

    fn read_item(&mut self) -> Result<Option<Chunk>> {
        match self {
            StreamAdapter::Binary(r) => r.read_item().map(|item| item.map(Chunk::Bytes)),
            StreamAdapter::Text(r) => r.read_item().map(|item| item.map(Chunk::Text)),
        }
    }
}

impl<S: ChunkSource> IntoIterator for StreamAdapter<S> {
    type Item = Result<Chunk>;
    type IntoIter = Items<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Items::new(self)
    }
}

impl<'a, S: ChunkSource> IntoIterator for &'a mut StreamAdapter<S> {
    type Item = Result<Chunk>;
    type IntoIter = Items<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Items::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IterError;
    use crate::source::IterSource;

    fn source(parts: &[&'static [u8]]) -> IterSource<std::vec::IntoIter<&'static [u8]>> {
        IterSource::new(parts.to_vec())
    }

    #[test]
    fn test_open_dispatches_on_mode() {
        let stream = open(source(&[]), OpenOptions::from_mode("rb").unwrap()).unwrap();
        assert_eq!(stream.mode(), Mode::Binary);
        assert!(stream.into_binary().is_some());

        let stream = open(source(&[]), OpenOptions::from_mode("r").unwrap()).unwrap();
        assert_eq!(stream.mode(), Mode::Text);
        assert!(stream.into_text().is_some());
    }

    #[test]
    fn test_open_rejects_invalid_options() {
        let err = open(source(&[]), OpenOptions::binary().with_encoding("utf-8")).unwrap_err();
        assert!(matches!(err, IterError::InvalidArgument { .. }));

        let err = open(source(&[]), OpenOptions::text().with_encoding("bogus")).unwrap_err();
        assert!(matches!(err, IterError::InvalidArgument { .. }));
    }

    #[test]
    fn test_capabilities() {
        let stream = open(source(&[]), OpenOptions::binary()).unwrap();
        assert!(stream.readable());
        assert!(!stream.seekable());
        assert!(!stream.writable());
    }

    #[test]
    fn test_negative_size_reads_all() {
        let mut stream = open(source(&[b"ab", b"cd"]), OpenOptions::text()).unwrap();
        assert_eq!(stream.read(1).unwrap(), Chunk::from("a"));
        assert_eq!(stream.read(-5).unwrap(), Chunk::from("bcd"));
        assert!(stream.read(-1).unwrap().is_empty());
    }

    #[test]
    fn test_text_lines_equal_iteration() {
        let parts: &[&'static [u8]] = &[b"one\n", b"tw", b"o\nthree"];
        let lines = open(source(parts), OpenOptions::text())
            .unwrap()
            .read_lines()
            .unwrap();
        let iterated: Vec<Chunk> = open(source(parts), OpenOptions::text())
            .unwrap()
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lines, iterated);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_close_then_read_fails() {
        let mut stream = open(source(&[b"12345"]), OpenOptions::text()).unwrap();
        assert!(stream.read(0).unwrap().is_empty());
        assert_eq!(stream.read(1).unwrap(), Chunk::from("1"));
        assert!(!stream.is_closed());

        stream.close();
        assert!(stream.is_closed());
        assert!(stream.read(-1).unwrap_err().is_closed());
        assert!(stream.position().unwrap_err().is_closed());
        stream.close();
    }
}
