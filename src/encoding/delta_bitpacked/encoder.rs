use crate::bits::{ceil8, min_len_u64};

use super::super::{bitpacked, uleb128, zigzag_leb128};

const BLOCK_SIZE: u64 = 128;
const NUM_MINIBLOCKS: u64 = 1;

/// Encodes an iterator of `i32` according to `DELTA_BINARY_PACKED`.
/// # Implementation
/// The number of mini-blocks per block is always 1; the format allows more, but one
/// keeps the bit-width computation (and this encoder) simple without losing
/// compression on the common monotonic/near-constant-delta case this encoding targets.
pub fn encode<I: Iterator<Item = i32>>(mut iterator: I, buffer: &mut Vec<u8>) {
    let mut container = [0u8; 10];
    let used = uleb128::encode(BLOCK_SIZE, &mut container);
    buffer.extend_from_slice(&container[..used]);

    let used = uleb128::encode(NUM_MINIBLOCKS, &mut container);
    buffer.extend_from_slice(&container[..used]);

    let length = iterator.size_hint().1.unwrap();
    let used = uleb128::encode(length as u64, &mut container);
    buffer.extend_from_slice(&container[..used]);

    let first_value = match iterator.next() {
        Some(v) => v as i64,
        None => return,
    };
    let used = zigzag_leb128::encode(first_value, &mut container);
    buffer.extend_from_slice(&container[..used]);

    let mut prev = first_value;
    let mut values = [0i64; BLOCK_SIZE as usize];
    let mut deltas = [0u32; BLOCK_SIZE as usize];

    let mut remaining = length - 1;
    while remaining != 0 {
        let mut consumed = 0;
        for (i, v) in (0..BLOCK_SIZE as usize).zip(&mut iterator) {
            values[i] = v as i64 - prev;
            prev = v as i64;
            consumed = i + 1;
        }
        let values = &values[..consumed];

        let min_delta = *values.iter().min().unwrap();
        let max_delta = *values.iter().max().unwrap();

        values
            .iter()
            .zip(deltas.iter_mut())
            .for_each(|(v, d)| *d = (v - min_delta) as u32);
        let deltas = &deltas[..consumed];

        let used = zigzag_leb128::encode(min_delta, &mut container);
        buffer.extend_from_slice(&container[..used]);

        let num_bits = min_len_u64((max_delta - min_delta) as u64) as u8;
        buffer.push(num_bits);

        if num_bits > 0 {
            let start = buffer.len();
            let bytes_needed = ceil8(BLOCK_SIZE as usize * num_bits as usize);
            buffer.resize(start + bytes_needed, 0);
            bitpacked::encode(deltas, num_bits as usize, &mut buffer[start..]);
        }

        remaining -= consumed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_delta() {
        let data = 1i32..=5;
        let expected = vec![128u8, 1, 1, 5, 2, 2, 0];

        let mut buffer = vec![];
        encode(data, &mut buffer);
        assert_eq!(expected, buffer);
    }
}
