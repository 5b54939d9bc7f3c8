//! Chunk sources.
//!
//! A [`ChunkSource`] is anything that can hand out the next [`Chunk`] or say
//! that it has no more. Sources are finite and are not restarted once
//! partially consumed.
//!
//! - [`IterSource`] - wraps an iterator of chunk-like items
//! - [`TryIterSource`] - wraps an iterator of `Result`s; errors reach the reader's caller

use crate::chunk::Chunk;
use crate::error::{BoxError, IterError, Result};

/// A pull-based producer of chunks.
///
/// `next_chunk` returns `None` once the source is exhausted. Errors are
/// passed to the caller of the read that triggered the pull.
pub trait ChunkSource {
    /// Produces the next chunk, or `None` when there are no more.
    fn next_chunk(&mut self) -> Option<Result<Chunk>>;

    /// Releases the source. Called by a reader that owns its source when the
    /// reader is closed.
    fn close(&mut self) {}
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn next_chunk(&mut self) -> Option<Result<Chunk>> {
        (**self).next_chunk()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    fn next_chunk(&mut self) -> Option<Result<Chunk>> {
        (**self).next_chunk()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// A source over an iterator of chunk-like items.
///
/// # Example
///
/// ```
/// use chunkio::{ChunkSource, IterSource};
///
/// let mut source = IterSource::new(vec!["ab", "cd"]);
/// assert_eq!(source.next_chunk().unwrap().unwrap().as_str(), Some("ab"));
/// ```
#[derive(Debug)]
pub struct IterSource<I> {
    iter: Option<I>,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: Into<Chunk>,
{
    /// Creates a source from anything iterable.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: Some(iter.into_iter()),
        }
    }
}

impl<I> ChunkSource for IterSource<I>
where
    I: Iterator,
    I::Item: Into<Chunk>,
{
    fn next_chunk(&mut self) -> Option<Result<Chunk>> {
        let next = self.iter.as_mut()?.next();
        if next.is_none() {
            self.iter = None;
        }
        next.map(|item| Ok(item.into()))
    }

    fn close(&mut self) {
        self.iter = None;
    }
}

/// A source over an iterator of fallible items.
///
/// An `Err` item is handed to the caller of the read that pulled it; the
/// source itself is not advanced further by that read.
#[derive(Debug)]
pub struct TryIterSource<I> {
    iter: Option<I>,
}

impl<I, T, E> TryIterSource<I>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    T: Into<Chunk>,
    E: Into<BoxError>,
{
    /// Creates a source from anything iterable over `Result`s.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: Some(iter.into_iter()),
        }
    }
}

impl<I, T, E> ChunkSource for TryIterSource<I>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    T: Into<Chunk>,
    E: Into<BoxError>,
{
    fn next_chunk(&mut self) -> Option<Result<Chunk>> {
        let next = self.iter.as_mut()?.next();
        if next.is_none() {
            self.iter = None;
        }
        next.map(|item| item.map(Into::into).map_err(IterError::from_source))
    }

    fn close(&mut self) {
        self.iter = None;
    }
}
