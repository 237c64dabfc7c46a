use parquet_format_safe::Type;

use crate::error::{Error, Result};
use crate::types::NativeType;

/// The physical, on-disk representation of a leaf column's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    /// Deprecated by the format; only legal when reading, and only emitted by a writer
    /// when explicitly configured to.
    Int96,
    Float,
    Double,
    ByteArray,
    /// A fixed-width byte string; the `i32` is the width in bytes.
    FixedLenByteArray(i32),
}

impl PhysicalType {
    pub fn from_thrift(type_: Type, length: Option<i32>) -> Result<Self> {
        Ok(match type_ {
            Type::BOOLEAN => PhysicalType::Boolean,
            Type::INT32 => PhysicalType::Int32,
            Type::INT64 => PhysicalType::Int64,
            Type::INT96 => PhysicalType::Int96,
            Type::FLOAT => PhysicalType::Float,
            Type::DOUBLE => PhysicalType::Double,
            Type::BYTE_ARRAY => PhysicalType::ByteArray,
            Type::FIXED_LEN_BYTE_ARRAY => {
                let length = length
                    .ok_or_else(|| Error::oos("FIXED_LEN_BYTE_ARRAY requires a length"))?;
                PhysicalType::FixedLenByteArray(length)
            }
            _ => return Err(Error::oos("physical type thrift value out of range")),
        })
    }

    pub fn to_thrift(self) -> (Type, Option<i32>) {
        match self {
            PhysicalType::Boolean => (Type::BOOLEAN, None),
            PhysicalType::Int32 => (Type::INT32, None),
            PhysicalType::Int64 => (Type::INT64, None),
            PhysicalType::Int96 => (Type::INT96, None),
            PhysicalType::Float => (Type::FLOAT, None),
            PhysicalType::Double => (Type::DOUBLE, None),
            PhysicalType::ByteArray => (Type::BYTE_ARRAY, None),
            PhysicalType::FixedLenByteArray(length) => (Type::FIXED_LEN_BYTE_ARRAY, Some(length)),
        }
    }
}

/// Associates a fixed-width native type with the physical type tag its on-disk values
/// are read and written as. `types::NativeType` itself stays schema-agnostic; this is
/// the one place the two layers meet, shared by statistics and dictionary-page
/// decoding.
pub trait AssociatedPhysicalType: NativeType {
    const PHYSICAL_TYPE: PhysicalType;
}

impl AssociatedPhysicalType for i32 {
    const PHYSICAL_TYPE: PhysicalType = PhysicalType::Int32;
}
impl AssociatedPhysicalType for i64 {
    const PHYSICAL_TYPE: PhysicalType = PhysicalType::Int64;
}
impl AssociatedPhysicalType for f32 {
    const PHYSICAL_TYPE: PhysicalType = PhysicalType::Float;
}
impl AssociatedPhysicalType for f64 {
    const PHYSICAL_TYPE: PhysicalType = PhysicalType::Double;
}
