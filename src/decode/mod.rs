//! Incremental text decoding.
//!
//! [`IncrementalDecoder`] wraps an [`encoding_rs::Decoder`] so byte chunks can
//! be decoded one at a time. A multi-byte sequence split across chunks is
//! carried inside the decoder until the rest of it arrives; [`finish`] flushes
//! whatever is left when the source ends.
//!
//! [`finish`]: IncrementalDecoder::finish

use encoding_rs::{CoderResult, Decoder, DecoderResult, Encoding};
use tracing::debug;

use crate::config::ErrorPolicy;
use crate::error::{IterError, Result};

/// Resolves an encoding label.
///
/// Labels follow the WHATWG Encoding Standard, so `"utf8"`, `"UTF-8"` and
/// `"unicode-1-1-utf-8"` all name UTF-8.
pub(crate) fn lookup(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| IterError::invalid(format!("unknown encoding: {label}")))
}

/// A stateful byte-to-text decoder.
pub struct IncrementalDecoder {
    encoding: &'static Encoding,
    decoder: Decoder,
    policy: ErrorPolicy,
    /// Bytes handed to the decoder so far.
    consumed: u64,
}

impl IncrementalDecoder {
    /// Creates a decoder for the given encoding and error policy.
    ///
    /// Byte order marks are neither sniffed nor stripped.
    pub fn new(encoding: &'static Encoding, policy: ErrorPolicy) -> Self {
        Self {
            encoding,
            decoder: encoding.new_decoder_without_bom_handling(),
            policy,
            consumed: 0,
        }
    }

    /// Creates a decoder from an encoding label.
    pub fn for_label(label: &str, policy: ErrorPolicy) -> Result<Self> {
        lookup(label).map(|encoding| Self::new(encoding, policy))
    }

    /// Returns the encoding name.
    pub fn encoding(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decodes the next chunk of bytes.
    ///
    /// A trailing incomplete sequence is kept for the next call.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<String> {
        self.run(bytes, false)
    }

    /// Flushes the decoder at end of input and resets it.
    ///
    /// Under [`ErrorPolicy::Strict`] an incomplete trailing sequence fails
    /// with a truncated [`IterError::Decoding`].
    pub fn finish(&mut self) -> Result<String> {
        let tail = self.run(&[], true);
        self.reset();
        tail
    }

    /// Discards carried-over state.
    pub fn reset(&mut self) {
        self.decoder = self.encoding.new_decoder_without_bom_handling();
    }

    fn run(&mut self, mut src: &[u8], last: bool) -> Result<String> {
        let mut out = String::new();

        loop {
            match self.policy {
                ErrorPolicy::Replace => {
                    let needed = self.decoder.max_utf8_buffer_length(src.len());
                    out.reserve(needed.unwrap_or(src.len() * 3 + 4));

                    let (result, read, _) = self.decoder.decode_to_string(src, &mut out, last);
                    src = &src[read..];
                    self.consumed += read as u64;
                    if let CoderResult::InputEmpty = result {
                        return Ok(out);
                    }
                }
                ErrorPolicy::Strict | ErrorPolicy::Ignore => {
                    let needed = self
                        .decoder
                        .max_utf8_buffer_length_without_replacement(src.len());
                    out.reserve(needed.unwrap_or(src.len() * 3 + 4));

                    let (result, read) =
                        self.decoder
                            .decode_to_string_without_replacement(src, &mut out, last);
                    src = &src[read..];
                    self.consumed += read as u64;

                    match result {
                        DecoderResult::InputEmpty => return Ok(out),
                        DecoderResult::OutputFull => {}
                        DecoderResult::Malformed(bad, after) => {
                            let offset = self.consumed.saturating_sub(u64::from(bad) + u64::from(after));
                            if self.policy == ErrorPolicy::Strict {
                                return Err(IterError::Decoding {
                                    encoding: self.encoding.name(),
                                    offset,
                                    truncated: last && src.is_empty() && after == 0,
                                });
                            }
                            debug!(
                                encoding = self.encoding.name(),
                                offset,
                                len = bad,
                                "dropped malformed byte sequence"
                            );
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for IncrementalDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalDecoder")
            .field("encoding", &self.encoding.name())
            .field("policy", &self.policy)
            .field("consumed", &self.consumed)
            .finish()
    }
}
