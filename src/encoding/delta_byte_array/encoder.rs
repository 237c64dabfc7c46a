use super::super::{delta_bitpacked, delta_length_byte_array};

fn shared_prefix_len(previous: &[u8], current: &[u8]) -> usize {
    previous
        .iter()
        .zip(current.iter())
        .take_while(|(a, b)| a == b)
        .count()
}

/// Encodes `iterator` of byte slices according to `DELTA_BYTE_ARRAY`: prefix lengths
/// (shared with the previous value) as `DELTA_BINARY_PACKED`, followed by the
/// suffixes as `DELTA_LENGTH_BYTE_ARRAY`.
pub fn encode<'a, I: Iterator<Item = &'a [u8]> + Clone>(iterator: I, buffer: &mut Vec<u8>) {
    let mut previous: &[u8] = &[];
    let mut prefixes = Vec::new();
    let mut suffixes: Vec<Vec<u8>> = Vec::new();
    for value in iterator {
        let prefix_len = shared_prefix_len(previous, value);
        prefixes.push(prefix_len as i32);
        suffixes.push(value[prefix_len..].to_vec());
        previous = value;
    }

    delta_bitpacked::encode(prefixes.into_iter(), buffer);
    delta_length_byte_array::encode(suffixes.iter().map(|x| x.as_slice()), buffer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Decoder;

    #[test]
    fn round_trips() {
        let data = vec!["Hello", "Helper", "World"];
        let mut buffer = vec![];
        encode(data.iter().map(|x| x.as_bytes()), &mut buffer);

        let mut decoder = Decoder::new(&buffer);
        let prefixes = decoder.by_ref().collect::<Vec<_>>();
        assert_eq!(prefixes, vec![0, 3, 0]);

        let mut decoder = decoder.into_lengths();
        let lengths = decoder.by_ref().collect::<Vec<_>>();
        assert_eq!(lengths, vec![5, 3, 5]);

        let values = decoder.into_values();
        assert_eq!(values, b"HelloperWorld" as &[u8]);
    }
}
