//! The full metadata hierarchy a reader needs: [`ParquetMetaData`] holds the file-level
//! [`FileMetaData`] and the [`RowGroupMetaData`] for every row group, each of which
//! holds a [`super::column_chunk_metadata::ColumnChunkMetaData`] per leaf column.

use super::file_metadata::FileMetaData;
use super::row_metadata::RowGroupMetaData;

#[derive(Debug, Clone)]
pub struct ParquetMetaData {
    file_metadata: FileMetaData,
    row_groups: Vec<RowGroupMetaData>,
}

impl ParquetMetaData {
    pub fn new(file_metadata: FileMetaData, row_groups: Vec<RowGroupMetaData>) -> Self {
        Self {
            file_metadata,
            row_groups,
        }
    }

    pub fn file_metadata(&self) -> &FileMetaData {
        &self.file_metadata
    }

    pub fn num_row_groups(&self) -> usize {
        self.row_groups.len()
    }

    pub fn row_group(&self, i: usize) -> &RowGroupMetaData {
        &self.row_groups[i]
    }

    pub fn row_groups(&self) -> &[RowGroupMetaData] {
        &self.row_groups
    }
}
