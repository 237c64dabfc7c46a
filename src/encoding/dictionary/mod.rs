//! Dictionary encoding (spec.md §4.4.3): a dictionary page holds the distinct values
//! `PLAIN`-encoded in insertion order; each data page carries a bit-width prefix byte
//! followed by the index stream as RLE/bit-pack hybrid.
//!
//! Building the dictionary itself (deduplicating incoming values into a compact,
//! insertion-order index) is the column writer's job via [`crate::hash::HashTable`];
//! this module only knows how to frame and parse the resulting index stream.

use std::io::Write;

use crate::bits::min_len_u64;
use crate::encoding::hybrid_rle;
use crate::error::Result;

/// Bit width needed to represent indexes `0..dictionary_size` (`max(1, bitLength(n-1))`).
pub fn bit_width(dictionary_size: usize) -> u8 {
    if dictionary_size <= 1 {
        return 1;
    }
    min_len_u64((dictionary_size - 1) as u64).max(1) as u8
}

/// Writes the bit-width prefix byte followed by `indices` RLE/bit-pack hybrid encoded.
pub fn encode_indices<W: Write>(
    writer: &mut W,
    indices: &[i32],
    dictionary_size: usize,
) -> std::io::Result<()> {
    let num_bits = bit_width(dictionary_size);
    writer.write_all(&[num_bits])?;
    hybrid_rle::encode_u32(writer, indices.iter().map(|&x| x as u32), num_bits)
}

/// Reads the bit-width prefix byte and decodes `length` indices from the remaining
/// RLE/bit-pack hybrid stream.
pub fn decode_indices(values: &[u8], length: usize) -> Result<Vec<i32>> {
    let (num_bits, values) = match values.split_first() {
        Some((&b, rest)) => (b, rest),
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::with_capacity(length);
    'outer: for run in hybrid_rle::Decoder::new(values, num_bits as u32) {
        for v in run.into_iter() {
            if out.len() == length {
                break 'outer;
            }
            out.push(v as i32);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_width_matches_spec_example() {
        // encoding [1,2,1,3,2,1] builds dictionary [1,2,3], bitWidth = max(1, bitLen(2)) = 2
        assert_eq!(bit_width(3), 2);
    }

    #[test]
    fn round_trips() {
        let indices = vec![0i32, 1, 0, 2, 1, 0];
        let mut buffer = vec![];
        encode_indices(&mut buffer, &indices, 3).unwrap();

        assert_eq!(buffer[0], 2);

        let decoded = decode_indices(&buffer, indices.len()).unwrap();
        assert_eq!(decoded, indices);
    }
}
