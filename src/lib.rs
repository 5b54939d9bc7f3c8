//! chunkio
//!
//! File-like reading over lazily produced chunks.
//!
//! `chunkio` takes a producer that yields chunks of bytes or text (an
//! iterator, a fallible iterator, an async stream) and exposes it
//! through a file-like interface: bounded reads, line reads and iteration.
//! It is designed as a small adapter for code that expects a reader but is
//! handed a sequence:
//!
//! - streaming HTTP or object-store downloads
//! - decompressors that emit blocks
//! - generated CSV or log output
//! - test fixtures that split data at awkward places
//!
//! The crate intentionally:
//! - does NOT seek or rewind
//! - does NOT write
//! - does NOT prefetch beyond what one read needs
//! - does NOT parse anything but line endings
//!
//! It only does one thing: **Chunks in → reads out**
//!
//! # Sync
//!
//! ```
//! use chunkio::{open, IterSource, OpenOptions};
//!
//! fn main() -> Result<(), chunkio::IterError> {
//!     let chunks = vec![&b"He"[..], &b"llo\nWo"[..], &b"rld\n"[..]];
//!     let mut stream = open(IterSource::new(chunks), OpenOptions::from_mode("r")?)?;
//!
//!     for line in stream.iter() {
//!         let line = line?;
//!         println!("line {:?}", line.as_str());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`ByteReader`] implements [`std::io::Read`] and [`std::io::BufRead`]:
//!
//! ```
//! use std::io::Read;
//! use chunkio::{ByteReader, IterSource};
//!
//! let mut reader = ByteReader::new(IterSource::new(vec![&b"ab"[..], &b"cd"[..]]));
//! let mut out = String::new();
//! reader.read_to_string(&mut out)?;
//! assert_eq!(out, "abcd");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::{io::AsyncReadExt, stream};
//! use chunkio::read_async;
//!
//! async fn demo() -> std::io::Result<()> {
//!     let chunks = stream::iter(vec![Ok::<_, std::io::Error>(&b"ab"[..])]);
//!     let mut reader = read_async(chunks);
//!
//!     let mut out = Vec::new();
//!     reader.read_to_end(&mut out).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod decode;
mod error;
mod newline;
mod reader;
mod source;

mod buffer; // internal accumulation of undelivered units

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use chunk::Chunk;
pub use config::{BinaryIteration, DEFAULT_ENCODING, ErrorPolicy, Mode, OpenOptions};
pub use decode::IncrementalDecoder;
pub use error::{BoxError, IterError, Result};
pub use newline::{Newline, NewlineNormalizer, Terminator};
pub use reader::{ByteReader, Items, ReadItem, StreamAdapter, TextReader, open};
pub use source::{ChunkSource, IterSource, TryIterSource};

#[cfg(feature = "async-io")]
pub use async_stream::{AsyncChunkReader, read_async};
