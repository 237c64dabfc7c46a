use crate::types::NativeType;

/// Encodes `data` according to `BYTE_STREAM_SPLIT`: byte `n` of every value lands in
/// the `n`th contiguous stream of `data.len()` bytes.
pub fn encode<T: NativeType>(data: &[T], buffer: &mut Vec<u8>) {
    let element_size = T::BYTE_SIZE;
    let num_elements = data.len();
    buffer.resize(element_size * num_elements, 0);

    for (i, v) in data.iter().enumerate() {
        let value_bytes = v.to_le_bytes();
        let value_bytes = value_bytes.as_ref();
        for n in 0..element_size {
            buffer[num_elements * n + i] = value_bytes[n];
        }
    }
}
