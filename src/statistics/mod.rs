//! Chunk-level min/max/null-count accumulation (spec.md §3, §4.6, §8 "Statistics").

mod binary;
mod boolean;
mod fixed_len_binary;
mod primitive;

pub use binary::BinaryStatistics;
pub use boolean::BooleanStatistics;
pub use fixed_len_binary::FixedLenStatistics;
pub use primitive::PrimitiveStatistics;

use std::any::Any;
use std::sync::Arc;

use parquet_format_safe::Statistics as ThriftStatistics;

use crate::error::Result;
use crate::metadata::ColumnDescriptor;
use crate::schema::types::PhysicalType;

/// A type-erased chunk or page statistics record. Implementations are one per physical
/// type family (§3: "for variable-length types store a copy of the bytes").
pub trait Statistics: std::fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn physical_type(&self) -> PhysicalType;

    fn null_count(&self) -> Option<i64> {
        None
    }
}

/// Parses a thrift `Statistics` record into the typed accumulator matching
/// `physical_type`.
pub fn deserialize_statistics(
    thrift: &ThriftStatistics,
    descriptor: ColumnDescriptor,
) -> Result<Arc<dyn Statistics>> {
    Ok(match descriptor.type_().physical_type() {
        Some(PhysicalType::Boolean) => boolean::read(thrift)?,
        Some(PhysicalType::Int32) => primitive::read::<i32>(thrift)?,
        Some(PhysicalType::Int64) => primitive::read::<i64>(thrift)?,
        Some(PhysicalType::Float) => primitive::read::<f32>(thrift)?,
        Some(PhysicalType::Double) => primitive::read::<f64>(thrift)?,
        Some(PhysicalType::ByteArray) => binary::read(thrift, descriptor)?,
        Some(PhysicalType::FixedLenByteArray(_)) => fixed_len_binary::read(thrift, descriptor)?,
        _ => {
            return Err(crate::error::Error::oos(
                "statistics require a primitive column descriptor",
            ))
        }
    })
}

/// Serializes a typed statistics accumulator back into the thrift record the footer
/// stores.
pub fn serialize_statistics(stats: &dyn Statistics) -> ThriftStatistics {
    match stats.physical_type() {
        PhysicalType::Boolean => boolean::write(stats.as_any().downcast_ref().unwrap()),
        PhysicalType::Int32 => primitive::write::<i32>(stats.as_any().downcast_ref().unwrap()),
        PhysicalType::Int64 => primitive::write::<i64>(stats.as_any().downcast_ref().unwrap()),
        PhysicalType::Float => primitive::write::<f32>(stats.as_any().downcast_ref().unwrap()),
        PhysicalType::Double => primitive::write::<f64>(stats.as_any().downcast_ref().unwrap()),
        PhysicalType::ByteArray => binary::write(stats.as_any().downcast_ref().unwrap()),
        PhysicalType::FixedLenByteArray(_) => {
            fixed_len_binary::write(stats.as_any().downcast_ref().unwrap())
        }
        PhysicalType::Int96 => ThriftStatistics {
            null_count: stats.null_count(),
            distinct_count: None,
            max_value: None,
            min_value: None,
            min: None,
            max: None,
        },
    }
}
