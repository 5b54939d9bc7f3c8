//! Line-ending policies.
//!
//! - [`Newline`] - Which line endings end a line, and whether they are translated
//! - [`NewlineNormalizer`] - Applies the policy to decoded text chunk by chunk
//! - [`LineBoundary`] - Finds the end of the next line in buffered data

use std::fmt;

use crate::error::{IterError, Result};

/// A single line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// `\n`
    Lf,
    /// `\r`
    Cr,
    /// `\r\n`
    CrLf,
}

impl Terminator {
    /// Returns the terminator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Terminator::Lf => "\n",
            Terminator::Cr => "\r",
            Terminator::CrLf => "\r\n",
        }
    }
}

/// Newline policy for text streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Newline {
    /// `\n`, `\r` and `\r\n` all end a line and are translated to `\n`.
    #[default]
    Universal,

    /// `\n`, `\r` and `\r\n` all end a line and are returned untranslated.
    AsIs,

    /// Only the given terminator ends a line; nothing is translated.
    Terminator(Terminator),
}

impl Newline {
    /// Parses the conventional `newline` argument.
    ///
    /// `None` is [`Newline::Universal`], `""` is [`Newline::AsIs`], and
    /// `"\n"`, `"\r"`, `"\r\n"` select a single terminator.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkio::{Newline, Terminator};
    ///
    /// assert_eq!(Newline::parse(None)?, Newline::Universal);
    /// assert_eq!(Newline::parse(Some(""))?, Newline::AsIs);
    /// assert_eq!(Newline::parse(Some("\r\n"))?, Newline::Terminator(Terminator::CrLf));
    /// assert!(Newline::parse(Some("\t")).is_err());
    /// # Ok::<(), chunkio::IterError>(())
    /// ```
    pub fn parse(newline: Option<&str>) -> Result<Self> {
        match newline {
            None => Ok(Newline::Universal),
            Some("") => Ok(Newline::AsIs),
            Some("\n") => Ok(Newline::Terminator(Terminator::Lf)),
            Some("\r") => Ok(Newline::Terminator(Terminator::Cr)),
            Some("\r\n") => Ok(Newline::Terminator(Terminator::CrLf)),
            Some(other) => Err(IterError::invalid(format!("illegal newline value: {other:?}"))),
        }
    }

    /// Returns the boundary used to split text under this policy.
    pub(crate) fn boundary(&self) -> LineBoundary {
        match self {
            Newline::Universal => LineBoundary::Lf,
            Newline::AsIs => LineBoundary::Any,
            Newline::Terminator(Terminator::Lf) => LineBoundary::Lf,
            Newline::Terminator(Terminator::Cr) => LineBoundary::Cr,
            Newline::Terminator(Terminator::CrLf) => LineBoundary::CrLf,
        }
    }
}

impl fmt::Display for Newline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Newline::Universal => f.write_str("universal"),
            Newline::AsIs => f.write_str("as-is"),
            Newline::Terminator(t) => write!(f, "{:?}", t.as_str()),
        }
    }
}

/// Applies a [`Newline`] policy to a sequence of decoded text chunks.
///
/// Under the universal and as-is policies a `\r` at the end of a chunk is
/// held back until the next chunk shows whether a `\n` follows, so a `\r\n`
/// split across chunks is one boundary. Downstream buffers therefore never
/// end in a lone `\r` unless the source is exhausted.
#[derive(Debug, Clone)]
pub struct NewlineNormalizer {
    policy: Newline,
    pending_cr: bool,
}

impl NewlineNormalizer {
    /// Creates a normalizer for the given policy.
    pub fn new(policy: Newline) -> Self {
        Self {
            policy,
            pending_cr: false,
        }
    }

    /// Normalizes the next chunk of text. Pass `last = true` for the final
    /// call so a held-back `\r` is released.
    pub fn normalize(&mut self, text: String, last: bool) -> String {
        if matches!(self.policy, Newline::Terminator(_)) {
            return text;
        }

        let mut text = if self.pending_cr {
            let mut joined = String::with_capacity(text.len() + 1);
            joined.push('\r');
            joined.push_str(&text);
            joined
        } else {
            text
        };

        self.pending_cr = !last && text.ends_with('\r');
        if self.pending_cr {
            text.pop();
        }

        if self.policy == Newline::Universal && text.contains('\r') {
            text = text.replace("\r\n", "\n").replace('\r', "\n");
        }
        text
    }

    /// Returns true if a `\r` is waiting for the next chunk.
    pub fn has_pending(&self) -> bool {
        self.pending_cr
    }

    /// Drops any held-back state.
    pub fn reset(&mut self) {
        self.pending_cr = false;
    }
}

/// Locates line ends in buffered data.
///
/// All terminators are ASCII, so scanning the UTF-8 bytes of text is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineBoundary {
    /// `\n` only.
    Lf,
    /// `\r` only.
    Cr,
    /// `\r\n` only.
    CrLf,
    /// Any of `\n`, `\r`, `\r\n`.
    Any,
}

impl LineBoundary {
    /// Bytes to rescan before the previous scan end, so a terminator split
    /// across two pulls is still found.
    pub(crate) fn lookbehind(&self) -> usize {
        match self {
            LineBoundary::CrLf => 1,
            _ => 0,
        }
    }

    /// Returns the end offset (exclusive, terminator included) of the first
    /// line ending at or after `from`.
    ///
    /// Under [`LineBoundary::Any`] a `\r` in the last byte is taken as a
    /// complete line end; callers guarantee that only happens at end of data.
    pub(crate) fn find(&self, haystack: &[u8], from: usize) -> Option<usize> {
        let tail = haystack.get(from..)?;
        match self {
            LineBoundary::Lf => tail.iter().position(|b| *b == b'\n').map(|i| from + i + 1),
            LineBoundary::Cr => tail.iter().position(|b| *b == b'\r').map(|i| from + i + 1),
            LineBoundary::CrLf => tail.windows(2).position(|w| w == b"\r\n").map(|i| from + i + 2),
            LineBoundary::Any => {
                let i = tail.iter().position(|b| *b == b'\n' || *b == b'\r')?;
                let at = from + i;
                if haystack[at] == b'\r' && haystack.get(at + 1) == Some(&b'\n') {
                    Some(at + 2)
                } else {
                    Some(at + 1)
                }
            }
        }
    }
}
