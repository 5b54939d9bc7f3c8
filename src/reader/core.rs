//! State shared by the binary and text readers.

use std::fmt;

use tracing::debug;

use crate::buffer::{Buffer, Units};
use crate::error::{IterError, Result};
use crate::newline::LineBoundary;
use crate::reader::upstream::Upstream;

/// Buffer, upstream pipeline and lifecycle of one open stream.
///
/// Dropping the core closes it.
pub(crate) struct Core<P: Upstream> {
    buffer: Buffer<P::Unit>,
    upstream: P,
    boundary: LineBoundary,
    closed: bool,
    /// Units delivered so far.
    position: u64,
}

impl<P: Upstream> Core<P> {
    pub(crate) fn new(upstream: P, boundary: LineBoundary) -> Self {
        Self {
            buffer: Buffer::default(),
            upstream,
            boundary,
            closed: false,
            position: 0,
        }
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(IterError::Closed);
        }
        Ok(())
    }

    fn deliver(&mut self, out: P::Unit) -> P::Unit {
        self.position += out.unit_len() as u64;
        out
    }

    pub(crate) fn read(&mut self, n: usize) -> Result<P::Unit> {
        self.check_open()?;
        if n == 0 {
            return Ok(Default::default());
        }
        let out = self.buffer.take(n, &mut self.upstream)?;
        Ok(self.deliver(out))
    }

    pub(crate) fn read_all(&mut self) -> Result<P::Unit> {
        self.check_open()?;
        let out = self.buffer.take_all(&mut self.upstream)?;
        Ok(self.deliver(out))
    }

    pub(crate) fn read_line(&mut self, limit: Option<usize>) -> Result<P::Unit> {
        self.check_open()?;
        if limit == Some(0) {
            return Ok(Default::default());
        }
        let out = self
            .buffer
            .take_line(self.boundary, limit, &mut self.upstream)?;
        Ok(self.deliver(out))
    }

    pub(crate) fn read_available(&mut self) -> Result<P::Unit> {
        self.check_open()?;
        let out = self.buffer.take_available(&mut self.upstream)?;
        Ok(self.deliver(out))
    }

    pub(crate) fn fill_buf(&mut self) -> Result<&[u8]> {
        self.check_open()?;
        self.buffer.fill_buf(&mut self.upstream)
    }

    pub(crate) fn consume(&mut self, n: usize) {
        let n = n.min(self.buffer.len());
        self.buffer.consume(n);
        self.position += n as u64;
    }

    pub(crate) fn position(&self) -> Result<u64> {
        self.check_open()?;
        Ok(self.position)
    }

    pub(crate) fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.buffer.is_exhausted() && self.buffer.len() == 0
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.buffer.clear();
        self.upstream.release();
        debug!(position = self.position, "stream closed");
    }
}

impl<P: Upstream> fmt::Debug for Core<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("buffered", &self.buffer.len())
            .field("exhausted", &self.buffer.is_exhausted())
            .field("closed", &self.closed)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<P: Upstream> Drop for Core<P> {
    fn drop(&mut self) {
        self.close();
    }
}
