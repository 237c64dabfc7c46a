use std::convert::TryInto;

use parquet_format_safe::{ColumnChunk, ColumnMetaData, Statistics as ThriftStatistics};

use crate::error::{Error, Result};
use crate::parquet_bridge::{Compression, Encoding};

use super::column_descriptor::ColumnDescriptor;

/// Everything the footer records about one column chunk: where its pages live, how
/// they're encoded and compressed, and its chunk-level statistics (spec.md §3,
/// "ColumnMetaData").
#[derive(Debug, Clone)]
pub struct ColumnChunkMetaData {
    column_chunk: ColumnChunk,
    column_descr: ColumnDescriptor,
}

impl ColumnChunkMetaData {
    pub fn new(column_chunk: ColumnChunk, column_descr: ColumnDescriptor) -> Self {
        Self {
            column_chunk,
            column_descr,
        }
    }

    pub fn column_chunk(&self) -> &ColumnChunk {
        &self.column_chunk
    }

    pub fn file_path(&self) -> Option<&str> {
        self.column_chunk.file_path.as_deref()
    }

    pub fn file_offset(&self) -> i64 {
        self.column_chunk.file_offset
    }

    fn metadata(&self) -> Result<&ColumnMetaData> {
        self.column_chunk
            .meta_data
            .as_ref()
            .ok_or_else(|| Error::oos("column chunk is missing its ColumnMetaData"))
    }

    pub fn column_descriptor(&self) -> &ColumnDescriptor {
        &self.column_descr
    }

    pub fn num_values(&self) -> Result<i64> {
        Ok(self.metadata()?.num_values)
    }

    pub fn compression(&self) -> Result<Compression> {
        self.metadata()?.codec.try_into()
    }

    pub fn compressed_size(&self) -> Result<i64> {
        Ok(self.metadata()?.total_compressed_size)
    }

    pub fn uncompressed_size(&self) -> Result<i64> {
        Ok(self.metadata()?.total_uncompressed_size)
    }

    pub fn data_page_offset(&self) -> Result<i64> {
        Ok(self.metadata()?.data_page_offset)
    }

    pub fn dictionary_page_offset(&self) -> Result<Option<i64>> {
        Ok(self.metadata()?.dictionary_page_offset)
    }

    pub fn encodings(&self) -> Result<Vec<Encoding>> {
        self.metadata()?
            .encodings
            .iter()
            .map(|e| (*e).try_into())
            .collect()
    }

    pub fn statistics(&self) -> Result<Option<&ThriftStatistics>> {
        Ok(self.metadata()?.statistics.as_ref())
    }

    /// The offset and length, in bytes, of the column chunk's pages within the file
    /// (dictionary page if present, else the first data page, through the end of the
    /// compressed payload).
    pub fn byte_range(&self) -> Result<(u64, u64)> {
        let metadata = self.metadata()?;
        let start = metadata
            .dictionary_page_offset
            .unwrap_or(metadata.data_page_offset);
        let length = metadata.total_compressed_size;
        if start < 0 || length < 0 {
            return Err(Error::oos("column chunk byte range must be non-negative"));
        }
        Ok((start as u64, length as u64))
    }

    pub fn into_thrift(self) -> ColumnChunk {
        self.column_chunk
    }
}
