//! Iteration over a reader.

use std::iter::FusedIterator;

use crate::error::Result;

/// A reader that can be stepped through one item at a time.
///
/// Text readers step by line. Binary readers step by line or by chunk,
/// depending on their [`BinaryIteration`](crate::BinaryIteration).
pub trait ReadItem {
    /// The item type.
    type Item;

    /// Returns the next item, or `None` at end of stream.
    fn read_item(&mut self) -> Result<Option<Self::Item>>;
}

impl<R: ReadItem + ?Sized> ReadItem for &mut R {
    type Item = R::Item;

    fn read_item(&mut self) -> Result<Option<Self::Item>> {
        (**self).read_item()
    }
}

/// Iterator over the items of a reader.
///
/// Ends at end of stream or after yielding the first error; iterating a
/// closed reader yields one [`IterError::Closed`](crate::IterError::Closed).
#[derive(Debug)]
pub struct Items<R> {
    reader: R,
    done: bool,
}

impl<R: ReadItem> Items<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    /// Consumes the iterator, returning the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: ReadItem> Iterator for Items<R> {
    type Item = Result<R::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_item() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: ReadItem> FusedIterator for Items<R> {}
