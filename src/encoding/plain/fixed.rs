use crate::error::{Error, Result};
use crate::types::NativeType;

/// Appends the raw little-endian bytes of `values` to `buffer`.
pub fn encode<T: NativeType>(values: &[T], buffer: &mut Vec<u8>) {
    buffer.reserve(values.len() * T::BYTE_SIZE);
    for v in values {
        buffer.extend_from_slice(v.to_le_bytes().as_ref());
    }
}

/// Decodes raw little-endian `T` values from `values`.
pub fn decode<T: NativeType>(values: &[u8]) -> Result<Vec<T>> {
    if values.len() % T::BYTE_SIZE != 0 {
        return Err(Error::oos(
            "PLAIN-encoded fixed-width page length is not a multiple of the element size",
        ));
    }
    values
        .chunks_exact(T::BYTE_SIZE)
        .map(|chunk| {
            T::Bytes::try_from(chunk)
                .map(T::from_le_bytes)
                .map_err(|_| Error::oos("PLAIN-encoded element has the wrong width"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_i32() {
        let data = vec![1i32, -2, 3, i32::MIN];
        let mut buffer = vec![];
        encode(&data, &mut buffer);
        let decoded: Vec<i32> = decode(&buffer).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn rejects_wrong_width() {
        let buffer = vec![0u8; 5];
        assert!(decode::<i32>(&buffer).is_err());
    }
}
