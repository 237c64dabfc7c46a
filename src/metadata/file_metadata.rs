use crate::schema::types::ParquetType;

use super::schema_descriptor::SchemaDescriptor;
use super::sort::SortOrder;

pub type KeyValue = parquet_format_safe::KeyValue;

/// The sort order used for a column's min/max statistics, per the footer's
/// `column_orders` list (spec.md §6.2: "All on-disk metadata ... encoded with
/// thrift").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    TypeDefinedOrder(SortOrder),
    Undefined,
}

/// Top-level metadata for a Parquet file: row count, schema, and per-column sort
/// orders. Thrift payload only; the magic bytes and footer-length trailer are the file
/// framer's concern (spec.md §1, §6.1).
#[derive(Debug, Clone)]
pub struct FileMetaData {
    version: i32,
    num_rows: i64,
    created_by: Option<String>,
    key_value_metadata: Option<Vec<KeyValue>>,
    schema_descr: SchemaDescriptor,
    column_orders: Option<Vec<ColumnOrder>>,
}

impl FileMetaData {
    pub fn new(
        version: i32,
        num_rows: i64,
        created_by: Option<String>,
        key_value_metadata: Option<Vec<KeyValue>>,
        schema_descr: SchemaDescriptor,
        column_orders: Option<Vec<ColumnOrder>>,
    ) -> Self {
        FileMetaData {
            version,
            num_rows,
            created_by,
            key_value_metadata,
            schema_descr,
            column_orders,
        }
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn num_rows(&self) -> i64 {
        self.num_rows
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    pub fn key_value_metadata(&self) -> Option<&[KeyValue]> {
        self.key_value_metadata.as_deref()
    }

    pub fn schema(&self) -> &ParquetType {
        self.schema_descr.root_schema()
    }

    pub fn schema_descr(&self) -> &SchemaDescriptor {
        &self.schema_descr
    }

    pub fn column_orders(&self) -> Option<&[ColumnOrder]> {
        self.column_orders.as_deref()
    }

    /// The sort order for column `i`; legacy (undefined) when the footer carries none.
    pub fn column_order(&self, i: usize) -> ColumnOrder {
        self.column_orders
            .as_ref()
            .map(|orders| orders[i])
            .unwrap_or(ColumnOrder::Undefined)
    }
}
