use std::io::Cursor;

use parquet_format_safe::{thrift::protocol::TCompactInputProtocol, ColumnIndex};

use crate::error::Result;
use crate::schema::types::ParquetType;

use super::index::{ByteIndex, FixedLenByteIndex, Index, NativeIndex};

/// Parses a raw `ColumnIndex` thrift payload into the typed index matching
/// `primitive_type`'s physical type. Returns `None` for boolean columns, which carry
/// no page index.
pub fn deserialize(data: &[u8], primitive_type: &ParquetType) -> Result<Option<Box<dyn Index>>> {
    let mut cursor = Cursor::new(data);
    let mut protocol = TCompactInputProtocol::new(&mut cursor);
    let index = ColumnIndex::read_from_in_protocol(&mut protocol)?;

    let physical_type = primitive_type
        .physical_type()
        .ok_or_else(|| crate::error::Error::oos("a page index requires a primitive column"))?;

    Ok(Some(match physical_type {
        crate::schema::types::PhysicalType::Boolean => return Ok(None),
        crate::schema::types::PhysicalType::Int32 => {
            Box::new(NativeIndex::<i32>::try_from(index)?) as Box<dyn Index>
        }
        crate::schema::types::PhysicalType::Int64 => Box::new(NativeIndex::<i64>::try_from(index)?),
        crate::schema::types::PhysicalType::Int96 => {
            Box::new(FixedLenByteIndex::try_from((index, physical_type))?)
        }
        crate::schema::types::PhysicalType::Float => Box::new(NativeIndex::<f32>::try_from(index)?),
        crate::schema::types::PhysicalType::Double => Box::new(NativeIndex::<f64>::try_from(index)?),
        crate::schema::types::PhysicalType::ByteArray => Box::new(ByteIndex::try_from(index)?),
        crate::schema::types::PhysicalType::FixedLenByteArray(_) => {
            Box::new(FixedLenByteIndex::try_from((index, physical_type))?)
        }
    }))
}
