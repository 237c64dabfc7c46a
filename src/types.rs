//! Native fixed-width types with a little-endian on-disk representation, shared by
//! PLAIN encoding, byte-stream-split and the bit-utilities layer.

/// A Rust type whose values have a fixed byte width and a little-endian on-disk
/// representation matching one of the fixed-width Parquet physical types (`INT32`,
/// `INT64`, `FLOAT`, `DOUBLE`).
pub trait NativeType:
    std::fmt::Debug + Send + Sync + PartialOrd + Copy + Default + 'static
{
    /// Number of bytes this type occupies on disk.
    const BYTE_SIZE: usize;

    /// Owned little-endian byte representation.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + for<'a> TryFrom<&'a [u8]>;

    fn to_le_bytes(&self) -> Self::Bytes;
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! native {
    ($type:ty, $byte_size:expr) => {
        impl NativeType for $type {
            const BYTE_SIZE: usize = $byte_size;
            type Bytes = [u8; $byte_size];

            #[inline]
            fn to_le_bytes(&self) -> Self::Bytes {
                Self::to_le_bytes(*self)
            }

            #[inline]
            fn from_le_bytes(bytes: Self::Bytes) -> Self {
                Self::from_le_bytes(bytes)
            }
        }
    };
}

native!(i32, 4);
native!(i64, 8);
native!(u32, 4);
native!(u64, 8);
native!(f32, 4);
native!(f64, 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        assert_eq!(i32::from_le_bytes(42i32.to_le_bytes()), 42);
        assert_eq!(f64::from_le_bytes((-1.5f64).to_le_bytes()), -1.5);
        assert_eq!(i64::BYTE_SIZE, 8);
        assert_eq!(f32::BYTE_SIZE, 4);
    }
}
