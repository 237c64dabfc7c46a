//! `PLAIN` encoding of variable-length byte arrays: a 4-byte little-endian length
//! prefix followed by the raw bytes, repeated (spec.md §4.4.1).

mod decoder;
mod encoder;

pub use decoder::Decoder;
pub use encoder::encode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let data = vec!["Hello", "", "World"];
        let mut buffer = vec![];
        encode(data.iter().map(|x| x.as_bytes()), &mut buffer);

        let decoded = Decoder::new(&buffer, Some(data.len())).collect::<Vec<_>>();
        assert_eq!(
            decoded,
            data.iter().map(|x| x.as_bytes()).collect::<Vec<_>>()
        );
    }
}
