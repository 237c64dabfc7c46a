//! Zigzag-encoded LEB128, used by `DELTA_BINARY_PACKED`'s first value and per-block
//! minimum delta (spec.md §4.4.5).

use super::uleb128;

pub fn decode(values: &[u8]) -> (i64, usize) {
    let (u, consumed) = uleb128::decode(values);
    ((u >> 1) as i64 ^ -((u & 1) as i64), consumed)
}

pub fn encode(value: i64, container: &mut [u8; 10]) -> usize {
    let zigzag = ((value << 1) ^ (value >> 63)) as u64;
    uleb128::encode(zigzag, container)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        // see e.g. https://stackoverflow.com/a/2211086/931303
        let cases = vec![
            (0u8, 0i64),
            (1, -1),
            (2, 1),
            (3, -2),
            (4, 2),
            (5, -3),
            (6, 3),
            (7, -4),
            (8, 4),
            (9, -5),
        ];
        for (data, expected) in cases {
            let (result, _) = decode(&[data]);
            assert_eq!(result, expected)
        }
    }

    #[test]
    fn round_trips() {
        for value in [0i64, -1, 1, -2, 2, i32::MIN as i64, i32::MAX as i64] {
            let mut container = [0u8; 10];
            let used = encode(value, &mut container);
            let (decoded, consumed) = decode(&container[..used]);
            assert_eq!(decoded, value);
            assert_eq!(consumed, used);
        }
    }
}
