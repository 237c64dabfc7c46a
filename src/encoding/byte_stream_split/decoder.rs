use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::types::NativeType;

/// Decodes a `BYTE_STREAM_SPLIT`-encoded page. Does not allocate beyond a single
/// element-sized scratch buffer.
/// <https://github.com/apache/parquet-format/blob/master/Encodings.md#byte-stream-split-byte_stream_split--9>
#[derive(Debug)]
pub struct Decoder<'a, T: NativeType> {
    values: &'a [u8],
    scratch: Vec<u8>,
    num_elements: usize,
    current: usize,
    element_size: usize,
    marker: PhantomData<T>,
}

impl<'a, T: NativeType> Decoder<'a, T> {
    pub fn try_new(values: &'a [u8]) -> Result<Self> {
        let element_size = T::BYTE_SIZE;
        if values.len() % element_size != 0 {
            return Err(Error::oos(
                "byte-stream-split page length is not a multiple of the element size",
            ));
        }
        let num_elements = values.len() / element_size;
        Ok(Self {
            values,
            scratch: vec![0u8; element_size],
            num_elements,
            current: 0,
            element_size,
            marker: PhantomData,
        })
    }
}

impl<'a, T: NativeType> Iterator for Decoder<'a, T> {
    type Item = Result<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.num_elements {
            return None;
        }

        for n in 0..self.element_size {
            self.scratch[n] = self.values[self.num_elements * n + self.current];
        }

        let bytes = match T::Bytes::try_from(self.scratch.as_slice()) {
            Ok(bytes) => bytes,
            Err(_) => return Some(Err(Error::oos("byte-stream-split element has the wrong width"))),
        };
        let value = T::from_le_bytes(bytes);

        self.current += 1;

        Some(Ok(value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_elements - self.current;
        (remaining, Some(remaining))
    }
}
