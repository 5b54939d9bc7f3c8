//! File-like readers over chunk sources.
//!
//! - [`open`] - Validates [`OpenOptions`](crate::OpenOptions) and returns a [`StreamAdapter`]
//! - [`ByteReader`] - Binary mode; implements [`std::io::Read`] and [`std::io::BufRead`]
//! - [`TextReader`] - Text mode with incremental decoding and newline policy
//! - [`Items`] - Iterator over the lines (or chunks) of any of the above

mod adapter;
mod binary;
mod core;
mod items;
mod text;
mod upstream;

pub use adapter::{StreamAdapter, open};
pub use binary::ByteReader;
pub use items::{Items, ReadItem};
pub use text::TextReader;
