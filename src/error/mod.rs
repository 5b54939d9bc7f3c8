//! Error types for chunkio.

use std::io;

use thiserror::Error;

/// Boxed error raised by a chunk source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience type alias for results using [`IterError`].
pub type Result<T, E = IterError> = std::result::Result<T, E>;

/// Errors that can occur while opening or reading a chunk stream.
///
/// Running out of chunks is not an error: exhaustion is reported by an empty
/// read.
#[derive(Debug, Error)]
pub enum IterError {
    /// Invalid mode, encoding, error policy or newline configuration.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was invalid.
        message: String,
    },

    /// Invalid or truncated byte sequence under the strict error policy.
    #[error("{encoding} decoding failed at byte {offset}: {}", describe_sequence(.truncated))]
    Decoding {
        /// Name of the encoding in use.
        encoding: &'static str,
        /// Stream byte offset where the decoder stopped.
        offset: u64,
        /// Whether the sequence was cut short by the end of the stream.
        truncated: bool,
    },

    /// The reader was used after `close()`.
    #[error("I/O operation on closed stream")]
    Closed,

    /// The chunk source failed while being pulled.
    #[error("chunk source error: {0}")]
    Source(#[source] BoxError),
}

impl IterError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        IterError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wraps an error raised by a chunk source.
    pub fn from_source(err: impl Into<BoxError>) -> Self {
        IterError::Source(err.into())
    }

    /// Returns true if this error was produced by an operation on a closed reader.
    pub fn is_closed(&self) -> bool {
        matches!(self, IterError::Closed)
    }
}

fn describe_sequence(truncated: &bool) -> &'static str {
    if *truncated {
        "truncated sequence at end of stream"
    } else {
        "invalid byte sequence"
    }
}

impl From<IterError> for io::Error {
    fn from(err: IterError) -> Self {
        match err {
            IterError::InvalidArgument { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            IterError::Decoding { .. } => io::Error::new(io::ErrorKind::InvalidData, err),
            IterError::Closed => io::Error::other(err),
            IterError::Source(inner) => match inner.downcast::<io::Error>() {
                Ok(io_err) => *io_err,
                Err(inner) => io::Error::other(IterError::Source(inner)),
            },
        }
    }
}
