//! Async reading support.
//!
//! This module exposes a stream of chunks through the `futures-io`
//! `AsyncRead` and `AsyncBufRead` traits, making it runtime-agnostic and
//! compatible with tokio (via `tokio-util` compat), async-std, smol, and
//! other async runtimes.
//!
//! - [`AsyncChunkReader`] - Binary-mode async reader over a chunk stream
//! - [`read_async`] - Convenience constructor
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{AsyncChunkReader, read_async};
