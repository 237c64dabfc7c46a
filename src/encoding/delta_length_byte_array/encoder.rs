use super::super::delta_bitpacked;

/// Encodes `iterator` of byte slices according to `DELTA_LENGTH_BYTE_ARRAY`: the
/// lengths as `DELTA_BINARY_PACKED`, followed by the concatenated values.
pub fn encode<'a, I: Iterator<Item = &'a [u8]> + Clone>(iterator: I, buffer: &mut Vec<u8>) {
    let lengths = iterator.clone().map(|x| x.len() as i32);
    delta_bitpacked::encode(lengths, buffer);
    for x in iterator {
        buffer.extend_from_slice(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Decoder;

    #[test]
    fn basic() {
        let data = vec!["a", "bb", "ccc"];
        let mut buffer = vec![];
        encode(data.iter().map(|x| x.as_bytes()), &mut buffer);

        let mut decoder = Decoder::new(&buffer);
        let lengths = decoder.by_ref().collect::<Vec<_>>();
        assert_eq!(lengths, vec![1, 2, 3]);

        let values = decoder.into_values();
        assert_eq!(values, b"abbccc");
    }
}
