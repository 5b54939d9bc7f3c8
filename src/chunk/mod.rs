//! Chunk types.
//!
//! - [`Chunk`] - A unit of bytes or text flowing in from a source and out of a read

mod data;

pub use data::Chunk;
