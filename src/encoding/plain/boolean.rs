/// Bit-packs `values` LSB-first into `buffer`, one bit per value, padding the final
/// byte with zeros.
pub fn encode(values: &[bool], buffer: &mut Vec<u8>) {
    for chunk in values.chunks(8) {
        let mut byte = 0u8;
        for (i, v) in chunk.iter().enumerate() {
            if *v {
                byte |= 1 << i;
            }
        }
        buffer.push(byte);
    }
}

/// Unpacks `length` LSB-first-packed booleans from `values`.
pub fn decode(values: &[u8], length: usize) -> Vec<bool> {
    (0..length)
        .map(|i| {
            let byte = values[i / 8];
            (byte >> (i % 8)) & 1 == 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_spec_example() {
        let values: Vec<bool> = (0..100).map(|i| i % 2 != 0).collect();
        let mut buffer = vec![];
        encode(&values, &mut buffer);
        assert_eq!(buffer.len(), 13);
        assert_eq!(&buffer[..12], &[0xAAu8; 12][..]);
        assert_eq!(buffer[12], 0x0A);
    }

    #[test]
    fn round_trips() {
        let values = vec![true, false, false, true, true, false, true, true, false];
        let mut buffer = vec![];
        encode(&values, &mut buffer);
        let decoded = decode(&buffer, values.len());
        assert_eq!(decoded, values);
    }
}
