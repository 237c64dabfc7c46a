/// Encodes `iterator` of byte slices according to `PLAIN`: each value prefixed by
/// its 4-byte little-endian length.
pub fn encode<'a, I: Iterator<Item = &'a [u8]>>(iterator: I, buffer: &mut Vec<u8>) {
    for x in iterator {
        buffer.extend_from_slice(&(x.len() as u32).to_le_bytes());
        buffer.extend_from_slice(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Decoder;

    #[test]
    fn round_trips() {
        let data = vec!["a", "bc", ""];
        let mut buffer = vec![];
        encode(data.iter().map(|x| x.as_bytes()), &mut buffer);

        let decoded = Decoder::new(&buffer, None).collect::<Vec<_>>();
        assert_eq!(
            decoded,
            data.iter().map(|x| x.as_bytes()).collect::<Vec<_>>()
        );
    }
}
