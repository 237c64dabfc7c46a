//! The closed physical-type set, logical-type annotations and the schema tree they
//! compose into.

mod basic_type;
mod parquet_type;
mod physical_type;

pub use basic_type::BasicTypeInfo;
pub use parquet_type::ParquetType;
pub use physical_type::{AssociatedPhysicalType, PhysicalType};

pub use crate::parquet_bridge::{GroupLogicalType, IntegerType, PrimitiveLogicalType, Repetition, TimeUnit};
