//! A read-only strided view over a contiguous byte buffer, used by the row-group
//! orchestrator to visit one leaf column's slot inside a sequence of heterogeneous
//! caller records without materialising a contiguous copy of that column.

use std::marker::PhantomData;

use crate::types::NativeType;

/// A sequence of `len` values of type `T`, each `stride` bytes apart inside `data`.
/// `stride` may exceed `T::BYTE_SIZE` when the values are interleaved with other
/// fields; it may never be smaller.
#[derive(Debug, Clone, Copy)]
pub struct StridedArray<'a, T: NativeType> {
    data: &'a [u8],
    stride: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: NativeType> StridedArray<'a, T> {
    /// Builds a view of `len` values, `stride` bytes apart, starting at the front of
    /// `data`.
    ///
    /// # Panics
    /// Panics if `stride < T::BYTE_SIZE`, or if `data` is too short to hold `len`
    /// strides.
    pub fn new(data: &'a [u8], stride: usize, len: usize) -> Self {
        assert!(stride >= T::BYTE_SIZE, "stride smaller than element width");
        if len > 0 {
            let needed = (len - 1) * stride + T::BYTE_SIZE;
            assert!(data.len() >= needed, "data too short for strided array");
        }
        Self {
            data,
            stride,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the `i`-th element.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn index(&self, i: usize) -> T {
        assert!(i < self.len, "index out of bounds");
        let start = i * self.stride;
        let bytes = &self.data[start..start + T::BYTE_SIZE];
        let bytes = T::Bytes::try_from(bytes).unwrap_or_else(|_| unreachable!());
        T::from_le_bytes(bytes)
    }

    /// Returns the sub-view `[i, j)`, sharing the same stride.
    ///
    /// # Panics
    /// Panics if `i > j` or `j > self.len()`.
    pub fn slice(&self, i: usize, j: usize) -> StridedArray<'a, T> {
        assert!(i <= j && j <= self.len, "slice out of bounds");
        StridedArray {
            data: &self.data[i * self.stride..],
            stride: self.stride,
            len: j - i,
            _marker: PhantomData,
        }
    }

    /// Materialises the view into a contiguous `Vec<T>`.
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.len).map(|i| self.index(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_packed_i32s() {
        let data: Vec<u8> = (0..5i32).flat_map(|v| v.to_le_bytes()).collect();
        let view = StridedArray::<i32>::new(&data, 4, 5);
        assert_eq!(view.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn reads_interleaved_records() {
        // Records of (i32, i32); we only want the second field.
        let mut data = Vec::new();
        for i in 0..4i32 {
            data.extend_from_slice(&(i * 10).to_le_bytes());
            data.extend_from_slice(&(i * 100).to_le_bytes());
        }
        let second_field = StridedArray::<i32>::new(&data[4..], 8, 4);
        assert_eq!(second_field.to_vec(), vec![0, 100, 200, 300]);
    }

    #[test]
    fn slice_narrows_the_view() {
        let data: Vec<u8> = (0..6i32).flat_map(|v| v.to_le_bytes()).collect();
        let view = StridedArray::<i32>::new(&data, 4, 6);
        let middle = view.slice(2, 5);
        assert_eq!(middle.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    #[should_panic]
    fn rejects_too_narrow_stride() {
        let data = [0u8; 4];
        StridedArray::<i64>::new(&data, 4, 1);
    }
}
