//! The run-length/bit-packing hybrid (spec.md §4.4.2) shared by definition/repetition
//! levels, `RLE`-encoded booleans, and dictionary index streams.
//! <https://github.com/apache/parquet-format/blob/master/Encodings.md#run-length-encoding--bit-packing-hybrid-rle--3>

mod bitmap;
mod decoder;
mod encoder;

pub use bitmap::encode as bitpacked_encode;
pub use decoder::Decoder;
pub use encoder::{encode_bool, encode_u32};

/// One run decoded from a hybrid RLE/bit-packed stream.
#[derive(Debug, PartialEq, Eq)]
pub enum HybridEncoded<'a> {
    /// A bit-packed run: `run_length` values, each `num_bits` wide, packed into
    /// `compressed`.
    Bitpacked {
        compressed: &'a [u8],
        num_bits: usize,
        run_length: usize,
    },
    /// `run_length` repetitions of `value`.
    Rle { value: u32, run_length: usize },
}

impl<'a> IntoIterator for HybridEncoded<'a> {
    type Item = u32;
    type IntoIter = RunIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            HybridEncoded::Bitpacked {
                compressed,
                num_bits,
                run_length,
            } => RunIterator::Bitpacked(super::bitpacked::Decoder::new(
                compressed,
                num_bits as u8,
                run_length,
            )),
            HybridEncoded::Rle { value, run_length } => {
                RunIterator::Rle(std::iter::repeat(value).take(run_length))
            }
        }
    }
}

pub enum RunIterator<'a> {
    Bitpacked(super::bitpacked::Decoder<'a>),
    Rle(std::iter::Take<std::iter::Repeat<u32>>),
}

impl<'a> Iterator for RunIterator<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RunIterator::Bitpacked(delegate) => delegate.next(),
            RunIterator::Rle(delegate) => delegate.next(),
        }
    }
}
