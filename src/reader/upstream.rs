//! Pipelines between a chunk source and a reader's buffer.
//!
//! - [`ByteUpstream`] - chunks as bytes
//! - [`TextUpstream`] - chunks decoded and newline-normalized

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::buffer::Pull;
use crate::chunk::Chunk;
use crate::decode::IncrementalDecoder;
use crate::error::Result;
use crate::newline::NewlineNormalizer;
use crate::source::ChunkSource;

/// A [`Pull`] that can release what it holds.
pub(crate) trait Upstream: Pull {
    /// Drops carried state and, if owned, closes the source.
    fn release(&mut self);
}

/// Delivers source chunks as bytes. Text chunks contribute their UTF-8 bytes.
#[derive(Debug)]
pub(crate) struct ByteUpstream<S> {
    source: S,
    owns_source: bool,
}

impl<S: ChunkSource> ByteUpstream<S> {
    pub(crate) fn new(source: S, owns_source: bool) -> Self {
        Self {
            source,
            owns_source,
        }
    }
}

impl<S: ChunkSource> Pull for ByteUpstream<S> {
    type Unit = BytesMut;

    fn pull(&mut self) -> Result<Option<BytesMut>> {
        loop {
            let Some(chunk) = self.source.next_chunk() else {
                debug!("chunk source exhausted");
                return Ok(None);
            };
            let bytes = chunk?.into_bytes();
            trace!(len = bytes.len(), "pulled chunk");
            if !bytes.is_empty() {
                return Ok(Some(into_mut(bytes)));
            }
        }
    }
}

/// Takes ownership of a uniquely held chunk; copies only shared ones.
fn into_mut(bytes: Bytes) -> BytesMut {
    bytes
        .try_into_mut()
        .unwrap_or_else(|shared| BytesMut::from(&shared[..]))
}

impl<S: ChunkSource> Upstream for ByteUpstream<S> {
    fn release(&mut self) {
        if self.owns_source {
            self.source.close();
        }
    }
}

/// Decodes source chunks to text and applies the newline policy.
///
/// A text chunk skips the decoder; any partial sequence the decoder holds is
/// flushed first.
#[derive(Debug)]
pub(crate) struct TextUpstream<S> {
    source: S,
    owns_source: bool,
    decoder: IncrementalDecoder,
    normalizer: NewlineNormalizer,
    done: bool,
}

impl<S: ChunkSource> TextUpstream<S> {
    pub(crate) fn new(
        source: S,
        owns_source: bool,
        decoder: IncrementalDecoder,
        normalizer: NewlineNormalizer,
    ) -> Self {
        Self {
            source,
            owns_source,
            decoder,
            normalizer,
            done: false,
        }
    }

    fn next_text(&mut self) -> Result<String> {
        let Some(chunk) = self.source.next_chunk() else {
            debug!(encoding = self.decoder.encoding(), "chunk source exhausted");
            self.done = true;
            let tail = self.decoder.finish()?;
            return Ok(self.normalizer.normalize(tail, true));
        };

        let text = match chunk? {
            Chunk::Bytes(bytes) => {
                trace!(len = bytes.len(), "pulled chunk");
                self.decoder.decode(&bytes)?
            }
            Chunk::Text(text) => {
                trace!(len = text.len(), "pulled text chunk");
                let mut flushed = self.decoder.finish()?;
                flushed.push_str(&text);
                flushed
            }
        };
        Ok(self.normalizer.normalize(text, false))
    }
}

impl<S: ChunkSource> Pull for TextUpstream<S> {
    type Unit = String;

    fn pull(&mut self) -> Result<Option<String>> {
        while !self.done {
            let text = self.next_text()?;
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}

impl<S: ChunkSource> Upstream for TextUpstream<S> {
    fn release(&mut self) {
        self.decoder.reset();
        self.normalizer.reset();
        self.done = true;
        if self.owns_source {
            self.source.close();
        }
    }
}
