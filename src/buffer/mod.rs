//! Internal accumulation of undelivered data.
//!
//! [`Buffer`] holds units that have been pulled from upstream but not yet
//! handed to the caller. The same code serves binary (`BytesMut`) and text
//! (`String`) streams. It is an implementation detail and not part of the
//! public API.

mod units;

pub(crate) use units::{UnitStore, Units};

use crate::error::Result;
use crate::newline::LineBoundary;

/// Something a [`Buffer`] can pull more units from.
pub(crate) trait Pull {
    /// The unit type delivered.
    type Unit: Units;

    /// Returns the next non-empty run of units, or `None` once exhausted.
    fn pull(&mut self) -> Result<Option<Self::Unit>>;
}

/// Undelivered units, always a contiguous prefix of the remaining stream.
pub(crate) struct Buffer<T: Units> {
    data: T::Store,
    /// Units held in `data`.
    units: usize,
    /// Bytes already scanned for a line boundary without finding one.
    scanned: usize,
    exhausted: bool,
}

impl<T: Units> Default for Buffer<T> {
    fn default() -> Self {
        Self {
            data: Default::default(),
            units: 0,
            scanned: 0,
            exhausted: false,
        }
    }
}

impl<T: Units> Buffer<T> {
    /// Number of buffered units.
    pub(crate) fn len(&self) -> usize {
        self.units
    }

    /// Returns true once upstream reported exhaustion.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Pulls one run of units. Returns false if upstream is exhausted.
    fn fill<P: Pull<Unit = T>>(&mut self, upstream: &mut P) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        match upstream.pull()? {
            Some(more) => {
                self.units += more.unit_len();
                self.data.append(more);
                Ok(true)
            }
            None => {
                self.exhausted = true;
                Ok(false)
            }
        }
    }

    /// Returns up to `n` units, pulling until that many are buffered or
    /// upstream is exhausted.
    pub(crate) fn take<P: Pull<Unit = T>>(&mut self, n: usize, upstream: &mut P) -> Result<T> {
        while self.units < n && self.fill(upstream)? {}
        Ok(self.split_units(n.min(self.units)))
    }

    /// Returns everything left in the stream.
    pub(crate) fn take_all<P: Pull<Unit = T>>(&mut self, upstream: &mut P) -> Result<T> {
        while self.fill(upstream)? {}
        Ok(self.split_units(self.units))
    }

    /// Returns the buffered units, or the next pulled run if none are buffered.
    pub(crate) fn take_available<P: Pull<Unit = T>>(&mut self, upstream: &mut P) -> Result<T> {
        while self.units == 0 && self.fill(upstream)? {}
        Ok(self.split_units(self.units))
    }

    /// Returns the next line including its terminator, or everything left if
    /// upstream runs out first. With a `limit`, at most `limit` units are
    /// returned.
    pub(crate) fn take_line<P: Pull<Unit = T>>(
        &mut self,
        boundary: LineBoundary,
        limit: Option<usize>,
        upstream: &mut P,
    ) -> Result<T> {
        loop {
            let from = self.scanned.saturating_sub(boundary.lookbehind());
            if let Some(end) = boundary.find(self.data.as_bytes(), from) {
                let units = self.data.units_before(end);
                return Ok(match limit {
                    Some(limit) if units > limit => self.split_units(limit),
                    _ => self.split_bytes(end, units),
                });
            }
            self.scanned = self.data.as_bytes().len();

            if let Some(limit) = limit {
                if self.units >= limit {
                    return Ok(self.split_units(limit));
                }
            }
            if !self.fill(upstream)? {
                return Ok(self.split_units(self.units));
            }
        }
    }

    /// Returns the buffered bytes, pulling once if the buffer is empty.
    pub(crate) fn fill_buf<P: Pull<Unit = T>>(&mut self, upstream: &mut P) -> Result<&[u8]> {
        while self.units == 0 && self.fill(upstream)? {}
        Ok(self.data.as_bytes())
    }

    /// Drops the first `n` units.
    pub(crate) fn consume(&mut self, n: usize) {
        self.split_units(n.min(self.units));
    }

    /// Drops all buffered data and forgets exhaustion.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    fn split_units(&mut self, n: usize) -> T {
        self.units -= n;
        self.scanned = 0;
        self.data.split_units(n)
    }

    fn split_bytes(&mut self, at: usize, units: usize) -> T {
        self.units -= units;
        self.scanned = 0;
        self.data.split_bytes(at)
    }
}
