//! Thrift-backed metadata records: column/schema descriptors, and the
//! `FileMetaData` / `RowGroup` / `ColumnMetaData` hierarchy persisted in the footer
//! (spec.md §6.2).

mod column_chunk_metadata;
mod column_descriptor;
mod column_path;
mod file_metadata;
mod parquet_metadata;
mod row_metadata;
mod schema_descriptor;
mod sort;

pub use column_chunk_metadata::ColumnChunkMetaData;
pub use column_descriptor::ColumnDescriptor;
pub use column_path::ColumnPath;
pub use file_metadata::{ColumnOrder, FileMetaData, KeyValue};
pub use parquet_metadata::ParquetMetaData;
pub use row_metadata::RowGroupMetaData;
pub use schema_descriptor::SchemaDescriptor;
pub use sort::{get_sort_order, SortOrder};
