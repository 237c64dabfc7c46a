use parquet_format_safe::RowGroup;

use crate::error::Result;

use super::column_chunk_metadata::ColumnChunkMetaData;
use super::schema_descriptor::SchemaDescriptor;

/// Metadata for one row group: its column chunks plus the row/byte counts every chunk
/// shares (spec.md §3: "All chunks share the same row count").
#[derive(Debug, Clone)]
pub struct RowGroupMetaData {
    columns: Vec<ColumnChunkMetaData>,
    num_rows: i64,
    total_byte_size: i64,
}

impl RowGroupMetaData {
    pub fn new(columns: Vec<ColumnChunkMetaData>, num_rows: i64, total_byte_size: i64) -> Self {
        Self {
            columns,
            num_rows,
            total_byte_size,
        }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, i: usize) -> &ColumnChunkMetaData {
        &self.columns[i]
    }

    pub fn columns(&self) -> &[ColumnChunkMetaData] {
        &self.columns
    }

    pub fn num_rows(&self) -> i64 {
        self.num_rows
    }

    pub fn total_byte_size(&self) -> i64 {
        self.total_byte_size
    }

    pub fn compressed_size(&self) -> Result<i64> {
        self.columns.iter().map(|c| c.compressed_size()).sum()
    }

    pub fn from_thrift(schema_descr: &SchemaDescriptor, row_group: RowGroup) -> Result<Self> {
        assert_eq!(schema_descr.num_columns(), row_group.columns.len());
        let total_byte_size = row_group.total_byte_size;
        let num_rows = row_group.num_rows;
        let columns = row_group
            .columns
            .into_iter()
            .zip(schema_descr.columns())
            .map(|(chunk, descr)| ColumnChunkMetaData::new(chunk, descr.clone()))
            .collect();
        Ok(RowGroupMetaData {
            columns,
            num_rows,
            total_byte_size,
        })
    }

    pub fn into_thrift(self) -> RowGroup {
        RowGroup {
            columns: self.columns.into_iter().map(|c| c.into_thrift()).collect(),
            total_byte_size: self.total_byte_size,
            num_rows: self.num_rows,
            sorting_columns: None,
            file_offset: None,
            total_compressed_size: None,
            ordinal: None,
        }
    }
}
