//! Unit types a [`Buffer`](super::Buffer) can hold.
//!
//! A [`Units`] value is a run of units as pulled from upstream and as handed
//! to callers. Its [`Units::Store`] accumulates runs between reads.

use bytes::BytesMut;

/// A run of units: bytes for binary streams, chars for text streams.
pub(crate) trait Units: Default {
    /// Accumulator for undelivered runs.
    type Store: UnitStore<Self>;

    /// Number of units held.
    fn unit_len(&self) -> usize;
}

/// Undelivered units, split at the front.
///
/// Byte offsets passed in are always on unit boundaries.
pub(crate) trait UnitStore<T>: Default {
    /// Undelivered bytes, for boundary scanning.
    fn as_bytes(&self) -> &[u8];

    /// Number of units in the first `at` undelivered bytes.
    fn units_before(&self, at: usize) -> usize;

    /// Appends `more` at the back.
    fn append(&mut self, more: T);

    /// Removes and returns the first `at` bytes.
    fn split_bytes(&mut self, at: usize) -> T;

    /// Removes and returns the first `n` units.
    fn split_units(&mut self, n: usize) -> T;
}

impl Units for BytesMut {
    type Store = BytesMut;

    fn unit_len(&self) -> usize {
        self.len()
    }
}

impl UnitStore<BytesMut> for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn units_before(&self, at: usize) -> usize {
        at
    }

    fn append(&mut self, more: BytesMut) {
        if self.is_empty() {
            *self = more;
        } else {
            self.unsplit(more);
        }
    }

    fn split_bytes(&mut self, at: usize) -> BytesMut {
        self.split_to(at)
    }

    fn split_units(&mut self, n: usize) -> BytesMut {
        self.split_to(n)
    }
}

impl Units for String {
    type Store = TextStore;

    fn unit_len(&self) -> usize {
        self.chars().count()
    }
}

/// Decoded text with a read cursor.
///
/// Delivered text stays in `text` before `start` until the next append
/// compacts it, so a split copies only the prefix it returns.
#[derive(Debug, Default)]
pub(crate) struct TextStore {
    text: String,
    start: usize,
}

impl TextStore {
    fn rest(&self) -> &str {
        &self.text[self.start..]
    }
}

impl UnitStore<String> for TextStore {
    fn as_bytes(&self) -> &[u8] {
        self.rest().as_bytes()
    }

    fn units_before(&self, at: usize) -> usize {
        self.rest()[..at].chars().count()
    }

    fn append(&mut self, more: String) {
        if self.start == self.text.len() {
            self.text = more;
            self.start = 0;
            return;
        }
        if self.start > 0 {
            self.text.drain(..self.start);
            self.start = 0;
        }
        self.text.push_str(&more);
    }

    fn split_bytes(&mut self, at: usize) -> String {
        let at = at.min(self.text.len() - self.start);
        if self.start == 0 && at == self.text.len() {
            return std::mem::take(&mut self.text);
        }

        let end = self.start + at;
        let out = self.text[self.start..end].to_owned();
        if end == self.text.len() {
            self.text.clear();
            self.start = 0;
        } else {
            self.start = end;
        }
        out
    }

    fn split_units(&mut self, n: usize) -> String {
        let rest = self.rest();
        let at = rest.char_indices().nth(n).map_or(rest.len(), |(i, _)| i);
        self.split_bytes(at)
    }
}
