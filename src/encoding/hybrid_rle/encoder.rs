use std::io::Write;

use crate::bits::ceil8;

use super::super::{bitpacked, uleb128};
use super::bitpacked_encode;

/// A run shorter than this is not worth breaking out of its bit-packed group; below
/// the threshold an RLE run's header plus value bytes can cost more than just leaving
/// the repeats bit-packed alongside their neighbours.
const MIN_RLE_RUN: usize = 8;

/// RLE-hybrid encoding of `u32`s. Scans for maximal runs of equal consecutive values:
/// a run of at least [`MIN_RLE_RUN`] values is emitted as an RLE run, everything else
/// is batched into bit-packed groups of 8.
pub fn encode_u32<W: Write, I: Iterator<Item = u32>>(
    writer: &mut W,
    iterator: I,
    num_bits: u8,
) -> std::io::Result<()> {
    let values: Vec<u32> = iterator.collect();

    let mut literals: Vec<u32> = Vec::new();
    let mut i = 0;
    while i < values.len() {
        let value = values[i];
        let run_length = values[i..].iter().take_while(|&&v| v == value).count();
        let run_end = i + run_length;

        if run_length >= MIN_RLE_RUN {
            write_bitpacked_run(writer, &literals, num_bits)?;
            literals.clear();
            write_rle_run(writer, value, run_length, num_bits)?;
        } else {
            literals.extend(std::iter::repeat(value).take(run_length));
        }
        i = run_end;
    }
    write_bitpacked_run(writer, &literals, num_bits)
}

/// Writes `values` as a single bit-packed run, zero-padded up to a whole number of
/// groups of 8 — the unit the decoder's `run_length = num_groups * 8` assumes. Does
/// nothing if `values` is empty (the common case between two adjacent RLE runs).
fn write_bitpacked_run<W: Write>(
    writer: &mut W,
    values: &[u32],
    num_bits: u8,
) -> std::io::Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let num_groups = ceil8(values.len());
    let mut header = num_groups as u64;
    header <<= 1;
    header |= 1; // bit-packed run
    let mut container = [0; 10];
    let used = uleb128::encode(header, &mut container);
    writer.write_all(&container[..used])?;

    let mut packed = vec![0u8; num_groups * num_bits as usize];
    bitpacked::encode(values, num_bits as usize, &mut packed);
    writer.write_all(&packed)
}

/// Writes a single RLE run: `run_length` repeats of `value`, stored once in
/// `ceil8(num_bits)` little-endian bytes.
fn write_rle_run<W: Write>(
    writer: &mut W,
    value: u32,
    run_length: usize,
    num_bits: u8,
) -> std::io::Result<()> {
    let header = (run_length as u64) << 1; // RLE run
    let mut container = [0; 10];
    let used = uleb128::encode(header, &mut container);
    writer.write_all(&container[..used])?;

    let rle_bytes = ceil8(num_bits as usize);
    writer.write_all(&value.to_le_bytes()[..rle_bytes])
}

/// The bit-packed part of the boolean (`PLAIN`/def-level) encoder.
pub fn encode_bool<W: Write, I: Iterator<Item = bool>>(
    writer: &mut W,
    iterator: I,
) -> std::io::Result<()> {
    let length = iterator.size_hint().1.unwrap();

    let mut header = ceil8(length) as u64;
    header <<= 1;
    header |= 1;
    let mut container = [0; 10];
    let used = uleb128::encode(header, &mut container);
    writer.write_all(&container[..used])?;

    bitpacked_encode(writer, iterator)
}

#[cfg(test)]
mod tests {
    use super::super::bitmap::BitmapIter;
    use super::*;

    #[test]
    fn bool_basics_1() -> std::io::Result<()> {
        let iter = BitmapIter::new(&[0b10011101u8, 0b10011101], 0, 14);

        let mut vec = vec![];
        encode_bool(&mut vec, iter)?;

        assert_eq!(vec, vec![(2 << 1 | 1), 0b10011101u8, 0b00011101]);

        Ok(())
    }

    #[test]
    fn test_encode_u32() -> std::io::Result<()> {
        let mut vec = vec![];

        // no run reaches `MIN_RLE_RUN`, so this stays a single bit-packed group of 8
        // plus one padding value (9 values -> ceil8(9) == 2 groups).
        encode_u32(&mut vec, vec![0, 1, 2, 1, 2, 1, 1, 0, 3].into_iter(), 2)?;

        assert_eq!(
            vec,
            vec![
                (2 << 1 | 1),
                0b01_10_01_00,
                0b00_01_01_10,
                0b_00_00_00_11,
                0b00_00_00_00,
            ]
        );
        Ok(())
    }

    #[test]
    fn encode_u32_emits_an_rle_run_for_eight_equal_values() -> std::io::Result<()> {
        let mut vec = vec![];

        encode_u32(&mut vec, std::iter::repeat(42u32).take(8), 6)?;

        // header = run_length << 1 = 8 << 1 = 0x10, then 42 in ceil8(6) == 1 byte.
        assert_eq!(vec, vec![0x10, 0x2A]);
        Ok(())
    }

    #[test]
    fn encode_u32_mixes_rle_and_bitpacked_runs() -> std::io::Result<()> {
        let mut vec = vec![];

        let mut values = vec![5u32, 6];
        values.extend(std::iter::repeat(9u32).take(10));
        values.extend([1u32, 2, 3]);
        encode_u32(&mut vec, values.into_iter(), 4)?;

        // leading literals [5, 6] bit-packed (1 group), then an RLE run of ten 9s,
        // then trailing literals [1, 2, 3] bit-packed (1 group).
        let mut expected = vec![(1u64 << 1 | 1) as u8];
        let mut leading = vec![0u8; 4];
        bitpacked::encode(&[5, 6], 4, &mut leading);
        expected.extend(leading);
        expected.push((10u64 << 1) as u8);
        expected.push(9);
        expected.push((1u64 << 1 | 1) as u8);
        let mut trailing = vec![0u8; 4];
        bitpacked::encode(&[1, 2, 3], 4, &mut trailing);
        expected.extend(trailing);

        assert_eq!(vec, expected);
        Ok(())
    }

    #[test]
    fn round_trips_via_decoder() -> std::io::Result<()> {
        let values: Vec<u32> = vec![3, 3, 0, 3, 2, 3, 3, 3, 3, 1, 3, 3, 3, 0, 3];
        let mut buffer = vec![];
        encode_u32(&mut buffer, values.iter().copied(), 2)?;

        let mut decoded = vec![];
        for run in super::super::Decoder::new(&buffer, 2) {
            decoded.extend(run.into_iter());
        }
        decoded.truncate(values.len());
        assert_eq!(decoded, values);
        Ok(())
    }
}
