//! The Chunk type - one unit of bytes or text.

use bytes::{Bytes, BytesMut};
use std::fmt;

/// A unit of data produced by a chunk source or returned by a read.
///
/// Sources may yield either variant; a reader converts them to the unit type
/// of its mode.
///
/// # Example
///
/// ```
/// use chunkio::Chunk;
/// use bytes::Bytes;
///
/// let chunk = Chunk::from(&b"hello world"[..]);
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.as_bytes(), b"hello world");
///
/// let text = Chunk::from("héllo");
/// assert_eq!(text.len(), 5);
/// assert_eq!(text.as_str(), Some("héllo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Raw bytes.
    Bytes(Bytes),

    /// Decoded text.
    Text(String),
}

impl Chunk {
    /// Returns the length in units: bytes for [`Chunk::Bytes`], chars for
    /// [`Chunk::Text`].
    pub fn len(&self) -> usize {
        match self {
            Chunk::Bytes(b) => b.len(),
            Chunk::Text(s) => s.chars().count(),
        }
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        match self {
            Chunk::Bytes(b) => b.is_empty(),
            Chunk::Text(s) => s.is_empty(),
        }
    }

    /// Returns true for [`Chunk::Text`].
    pub fn is_text(&self) -> bool {
        matches!(self, Chunk::Text(_))
    }

    /// Returns the raw bytes; text is viewed as UTF-8.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Chunk::Bytes(b) => b,
            Chunk::Text(s) => s.as_bytes(),
        }
    }

    /// Returns the text, if this is a text chunk.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Chunk::Bytes(_) => None,
            Chunk::Text(s) => Some(s),
        }
    }

    /// Consumes the chunk and returns its bytes; text is encoded as UTF-8.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Chunk::Bytes(b) => b,
            Chunk::Text(s) => Bytes::from(s),
        }
    }

    /// Consumes the chunk and returns its text, if this is a text chunk.
    pub fn into_text(self) -> Option<String> {
        match self {
            Chunk::Bytes(_) => None,
            Chunk::Text(s) => Some(s),
        }
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Chunk::Bytes(Bytes::new())
    }
}

impl From<Bytes> for Chunk {
    fn from(data: Bytes) -> Self {
        Chunk::Bytes(data)
    }
}

impl From<BytesMut> for Chunk {
    fn from(data: BytesMut) -> Self {
        Chunk::Bytes(data.freeze())
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Chunk::Bytes(Bytes::from(data))
    }
}

impl From<&'static [u8]> for Chunk {
    fn from(data: &'static [u8]) -> Self {
        Chunk::Bytes(Bytes::from_static(data))
    }
}

impl<const N: usize> From<&'static [u8; N]> for Chunk {
    fn from(data: &'static [u8; N]) -> Self {
        Chunk::Bytes(Bytes::from_static(data))
    }
}

impl From<String> for Chunk {
    fn from(data: String) -> Self {
        Chunk::Text(data)
    }
}

impl From<&str> for Chunk {
    fn from(data: &str) -> Self {
        Chunk::Text(data.to_owned())
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chunk::Bytes(b) => write!(f, "Chunk({} bytes)", b.len()),
            Chunk::Text(s) => write!(f, "Chunk({} chars)", s.chars().count()),
        }
    }
}
