//! Drives the encode → compress → frame pipeline described by the column-chunk
//! pipeline: a [`FileWriter`] accepts one already-compressed page stream per column of
//! a row group (spec.md §5 "Concurrency model": encoding and compression are the
//! caller's to parallelize, this crate only orders and frames the result).

mod column;
mod column_chunk;
mod compression;
mod dyn_iter;
mod file;
pub(crate) mod page;
mod pool;
mod record;
mod row_group;
mod statistics;
mod value;

use std::collections::HashMap;

pub use column::{BooleanColumnWriter, ByteArrayColumnWriter, ColumnWriter, PrimitiveColumnWriter};
pub use column_chunk::write_column_chunk;
pub use compression::{compress, compress_dict};
pub use dyn_iter::{DynIter, DynStreamingIterator};
pub use file::{write_file, FileWriter};
pub use page::{write_page, PageWriteSpec};
pub use pool::{FreeListPool, PagePool};
pub use record::RecordWriter;
pub use row_group::{write_row_group, RowGroupIter};
pub use value::{LeveledValue, Value, ValueIter};

use crate::compression::Compression;
use crate::metadata::ColumnPath;

/// The physical layout a data page's header is assembled as (spec.md §4.6 "Data
/// pages"): v1 keeps levels and values in one compressed block, v2 compresses only the
/// values and leaves the levels section uncompressed so a reader can skip it cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V1,
    V2,
}

/// Configuration recognised by every writer in this crate (spec.md §6.3).
///
/// `column_encodings`/`column_compression` override the crate-wide defaults for a
/// specific leaf column, keyed by its dotted [`ColumnPath`].
#[derive(Debug, Clone)]
pub struct WriterProperties {
    pub created_by: Option<String>,
    pub page_buffer_size: usize,
    pub data_page_version: Version,
    pub row_group_target_size: usize,
    pub data_page_statistics: bool,
    pub column_encodings: HashMap<ColumnPath, crate::encoding::Encoding>,
    pub column_compression: HashMap<ColumnPath, Compression>,
    pub compression: Compression,
    pub dictionary_fallback_size: usize,
    pub dictionary_fallback_distinct_count: usize,
}

impl Default for WriterProperties {
    fn default() -> Self {
        Self {
            created_by: Some("parquet_core version 0.1.0".to_string()),
            page_buffer_size: 1024 * 1024,
            data_page_version: Version::V2,
            row_group_target_size: 128 * 1024 * 1024,
            data_page_statistics: true,
            column_encodings: HashMap::new(),
            column_compression: HashMap::new(),
            compression: Compression::Uncompressed,
            dictionary_fallback_size: 1024 * 1024,
            dictionary_fallback_distinct_count: 1 << 20,
        }
    }
}

impl WriterProperties {
    pub fn builder() -> WriterPropertiesBuilder {
        WriterPropertiesBuilder(Self::default())
    }

    /// The compression codec for `path`, falling back to the crate-wide default.
    pub fn compression_for(&self, path: &ColumnPath) -> Compression {
        self.column_compression
            .get(path)
            .copied()
            .unwrap_or(self.compression)
    }

    /// The encoding override for `path`, if one was configured.
    pub fn encoding_for(&self, path: &ColumnPath) -> Option<crate::encoding::Encoding> {
        self.column_encodings.get(path).copied()
    }
}

/// Builds a [`WriterProperties`] one field at a time.
pub struct WriterPropertiesBuilder(WriterProperties);

impl WriterPropertiesBuilder {
    pub fn with_created_by(mut self, created_by: Option<String>) -> Self {
        self.0.created_by = created_by;
        self
    }

    pub fn with_page_buffer_size(mut self, page_buffer_size: usize) -> Self {
        self.0.page_buffer_size = page_buffer_size;
        self
    }

    pub fn with_data_page_version(mut self, version: Version) -> Self {
        self.0.data_page_version = version;
        self
    }

    pub fn with_row_group_target_size(mut self, row_group_target_size: usize) -> Self {
        self.0.row_group_target_size = row_group_target_size;
        self
    }

    pub fn with_data_page_statistics(mut self, data_page_statistics: bool) -> Self {
        self.0.data_page_statistics = data_page_statistics;
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.0.compression = compression;
        self
    }

    pub fn with_column_encoding(
        mut self,
        path: ColumnPath,
        encoding: crate::encoding::Encoding,
    ) -> Self {
        self.0.column_encodings.insert(path, encoding);
        self
    }

    pub fn with_column_compression(mut self, path: ColumnPath, compression: Compression) -> Self {
        self.0.column_compression.insert(path, compression);
        self
    }

    pub fn with_dictionary_fallback_size(mut self, dictionary_fallback_size: usize) -> Self {
        self.0.dictionary_fallback_size = dictionary_fallback_size;
        self
    }

    pub fn with_dictionary_fallback_distinct_count(mut self, count: usize) -> Self {
        self.0.dictionary_fallback_distinct_count = count;
        self
    }

    pub fn build(self) -> WriterProperties {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_configuration_table() {
        let properties = WriterProperties::default();
        assert_eq!(properties.page_buffer_size, 1024 * 1024);
        assert_eq!(properties.data_page_version, Version::V2);
        assert_eq!(properties.row_group_target_size, 128 * 1024 * 1024);
        assert!(properties.data_page_statistics);
        assert_eq!(properties.dictionary_fallback_size, 1024 * 1024);
        assert_eq!(properties.dictionary_fallback_distinct_count, 1 << 20);
    }

    #[test]
    fn column_overrides_take_precedence_over_the_default() {
        let path = ColumnPath::new(vec!["a".to_string()]);
        let properties = WriterProperties::builder()
            .with_compression(Compression::Uncompressed)
            .with_column_compression(path.clone(), Compression::Snappy)
            .build();
        assert_eq!(properties.compression_for(&path), Compression::Snappy);
        let other = ColumnPath::new(vec!["b".to_string()]);
        assert_eq!(properties.compression_for(&other), Compression::Uncompressed);
    }
}
