//! Value encodings for column-chunk pages (spec.md §4.4): PLAIN, the RLE/bit-pack
//! hybrid, dictionary, byte-stream-split and the delta family.

pub mod bitpacked;
pub mod byte_stream_split;
pub mod delta_bitpacked;
pub mod delta_byte_array;
pub mod delta_length_byte_array;
pub mod dictionary;
pub mod hybrid_rle;
pub mod plain;
pub mod plain_byte_array;
pub mod uleb128;
pub mod zigzag_leb128;

pub use crate::parquet_bridge::Encoding;

/// Reads the little-endian `u32` length prefix PLAIN uses ahead of every
/// variable-length value.
///
/// # Panics
/// Panics if `values` holds fewer than 4 bytes.
pub fn get_length(values: &[u8]) -> u32 {
    u32::from_le_bytes(values[0..4].try_into().unwrap())
}
