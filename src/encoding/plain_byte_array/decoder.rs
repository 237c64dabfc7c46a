/// Decodes `PLAIN`-encoded variable-length byte arrays: a 4-byte little-endian
/// length prefix followed by that many bytes, repeated.
/// <https://github.com/apache/parquet-format/blob/master/Encodings.md#plain-plain--0>
/// # Implementation
/// This struct does not allocate on the heap.
#[derive(Debug)]
pub struct Decoder<'a> {
    values: &'a [u8],
    length: Option<usize>,
}

impl<'a> Decoder<'a> {
    pub fn new(values: &'a [u8], length: Option<usize>) -> Self {
        Self { values, length }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.values.len() < 4 {
            return None;
        }
        if let Some(x) = self.length.as_mut() {
            *x = x.saturating_sub(1)
        }
        let length = u32::from_le_bytes(self.values[0..4].try_into().unwrap()) as usize;
        self.values = &self.values[4..];
        let result = &self.values[..length];
        self.values = &self.values[length..];
        Some(result)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.length.unwrap_or_default(), self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic() {
        let data = &[1u8, 0, 0, 0, b'a', 2, 0, 0, 0, b'b', b'c'];
        let decoded = Decoder::new(data, None).collect::<Vec<_>>();
        assert_eq!(decoded, vec![b"a" as &[u8], b"bc" as &[u8]]);
    }
}
