//! `DELTA_LENGTH_BYTE_ARRAY`: delta-encoded lengths followed by concatenated values
//! (spec.md §4.4.6).

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::encode;
