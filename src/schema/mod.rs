//! The type and schema model: physical types, logical types, and the tree of named,
//! repetition-tagged nodes that a file's columns are flattened from.

mod io_thrift;
pub mod types;

pub use types::{ParquetType, PhysicalType, Repetition};
