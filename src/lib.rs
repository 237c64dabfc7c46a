#![forbid(unsafe_code)]
//! Reads and writes the column-chunk pipeline of the Apache Parquet format: schema
//! flattening, value encoding, compression, page framing and the page index, plus the
//! row-group orchestrator that drives them. It does not parse in-memory record types
//! (that is a caller concern, see [`write::ValueIter`]) and it does not frame whole
//! files (see [`write::write_file`] for the minimal glue this crate ships for tests).

#[macro_use]
pub mod error;
pub mod bits;
pub mod compression;
pub mod encoding;
pub mod hash;
pub mod indexes;
pub mod metadata;
pub mod page;
mod parquet_bridge;
pub mod read;
pub mod schema;
pub mod sparse;
pub mod statistics;
pub mod types;
pub mod write;

pub use fallible_streaming_iterator::FallibleStreamingIterator;

/// Magic bytes at the start and end of every Parquet file.
pub const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];

/// Size, in bytes, of the trailing `<footer length><magic>` suffix.
pub const FOOTER_SIZE: u64 = 8;

/// Bytes read speculatively from the end of the file on the first metadata read.
pub const DEFAULT_FOOTER_READ_SIZE: u64 = 64 * 1024;
