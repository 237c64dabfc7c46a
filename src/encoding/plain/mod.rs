//! `PLAIN` encoding of fixed-width native types and booleans (spec.md §4.4.1).
//! `byte_array` and `fixed_len_byte_array` are handled by
//! [`crate::encoding::plain_byte_array`] and raw concatenation respectively.

mod boolean;
mod fixed;

pub use boolean::{decode as decode_bool, encode as encode_bool};
pub use fixed::{decode, encode};
