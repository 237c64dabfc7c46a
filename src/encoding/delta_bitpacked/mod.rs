//! `DELTA_BINARY_PACKED`: a first value plus per-block minimum-delta + bit-packed
//! deltas (spec.md §4.4.5).
//! <https://github.com/apache/parquet-format/blob/master/Encodings.md#delta-encoding-delta_binary_packed--5>

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::encode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let data = 1i32..=5;
        let mut buffer = vec![];
        encode(data.clone(), &mut buffer);

        let decoded = Decoder::new(&buffer).collect::<Vec<_>>();
        assert_eq!(decoded, data.collect::<Vec<_>>());
    }

    #[test]
    fn test_from_spec() {
        let expected = (1i32..=5).collect::<Vec<_>>();
        // VALIDATED FROM SPARK==3.1.1
        let data = &[128, 1, 4, 5, 2, 2, 0, 0, 0, 0];

        let mut decoder = Decoder::new(data);
        let r = decoder.by_ref().collect::<Vec<_>>();

        assert_eq!(expected, r);
        assert_eq!(decoder.consumed_bytes(), 10);
    }

    #[test]
    fn negative_values_round_trip() {
        let data = vec![1i32, 2, 3, 4, 5, 1];
        let mut buffer = vec![];
        encode(data.clone().into_iter(), &mut buffer);

        let decoded = Decoder::new(&buffer).collect::<Vec<_>>();
        assert_eq!(decoded, data);
    }

    #[test]
    fn more_than_one_block_round_trips() {
        let mut data = vec![1i32, 3, -1, 2, 3, 10, 1];
        for x in 0..128 {
            data.push(x - 10);
        }
        let mut buffer = vec![];
        encode(data.clone().into_iter(), &mut buffer);

        let decoded = Decoder::new(&buffer).collect::<Vec<_>>();
        assert_eq!(decoded, data);
    }
}
