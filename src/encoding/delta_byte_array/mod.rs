//! `DELTA_BYTE_ARRAY`: prefix lengths shared with the previous value, followed by
//! delta-length-encoded suffixes (spec.md §4.4.7).

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::encode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let data = vec!["Hello", "Help", "World"];
        let mut buffer = vec![];
        encode(data.iter().map(|x| x.as_bytes()), &mut buffer);

        let mut decoder = Decoder::new(&buffer);
        let prefixes = decoder.by_ref().collect::<Vec<_>>();
        assert_eq!(prefixes, vec![0, 3, 0]);

        let mut decoder = decoder.into_lengths();
        let lengths = decoder.by_ref().collect::<Vec<_>>();
        assert_eq!(lengths, vec![5, 1, 5]);

        let values = decoder.into_values();
        assert_eq!(values, b"HellopWorld" as &[u8]);
    }
}
