//! The per-value column writer (spec.md §4.6): turns a [`ValueIter`] of one leaf
//! column's values into the already-compressed page stream `write_column_chunk`
//! expects, buffering values into one page at a time and promoting to dictionary
//! encoding when it pays off.
//!
//! State machine: `Empty` (nothing written yet) -> `Buffering` (at least one
//! `write_value` call since the last flush) -> `Closed` once `close()` returns. A
//! write or flush that fails moves the writer to `Failed` and every later call returns
//! the same error without touching already-written pages.

use std::collections::HashMap;

use parquet_format_safe::{DataPageHeaderV2, Encoding as ThriftEncoding};

use crate::bits::min_len_u32;
use crate::encoding::hybrid_rle;
use crate::encoding::{dictionary, plain, plain_byte_array};
use crate::error::{Error, Result};
use crate::hash::HashTable;
use crate::metadata::ColumnDescriptor;
use crate::page::{CompressedPage, DataPage, DataPageHeader};
use crate::schema::types::{AssociatedPhysicalType, PhysicalType};
use crate::statistics::{BinaryStatistics, BooleanStatistics, PrimitiveStatistics};
use crate::types::NativeType;

use super::{compress, compress_dict, Version, WriterProperties};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Empty,
    Buffering,
    Closed,
    Failed,
}

/// Dispatches to the physical-type-specific writer a column's descriptor requires.
pub enum ColumnWriter {
    Boolean(BooleanColumnWriter),
    Int32(PrimitiveColumnWriter<i32>),
    Int64(PrimitiveColumnWriter<i64>),
    Float(PrimitiveColumnWriter<f32>),
    Double(PrimitiveColumnWriter<f64>),
    ByteArray(ByteArrayColumnWriter),
}

impl ColumnWriter {
    /// Builds the writer matching `descriptor`'s physical type.
    ///
    /// `Int96` and `FixedLenByteArray` columns are not yet supported (see DESIGN.md).
    pub fn new(descriptor: ColumnDescriptor, properties: &WriterProperties) -> Result<Self> {
        let physical_type = descriptor.type_().physical_type().ok_or_else(|| {
            Error::oos("a column writer requires a primitive column descriptor")
        })?;
        let config = ColumnWriterConfig::new(&descriptor, properties);
        Ok(match physical_type {
            PhysicalType::Boolean => ColumnWriter::Boolean(BooleanColumnWriter::new(descriptor, config)),
            PhysicalType::Int32 => ColumnWriter::Int32(PrimitiveColumnWriter::new(descriptor, config)),
            PhysicalType::Int64 => ColumnWriter::Int64(PrimitiveColumnWriter::new(descriptor, config)),
            PhysicalType::Float => ColumnWriter::Float(PrimitiveColumnWriter::new(descriptor, config)),
            PhysicalType::Double => ColumnWriter::Double(PrimitiveColumnWriter::new(descriptor, config)),
            PhysicalType::ByteArray => {
                ColumnWriter::ByteArray(ByteArrayColumnWriter::new(descriptor, config))
            }
            PhysicalType::Int96 | PhysicalType::FixedLenByteArray(_) => {
                return Err(Error::FeatureNotSupported(format!(
                    "writing {:?} columns is not yet supported",
                    physical_type
                )))
            }
        })
    }

    pub fn write_value(&mut self, value: super::LeveledValue) -> Result<()> {
        macro_rules! dispatch {
            ($w:ident, $variant:ident) => {{
                let typed = match value.value {
                    None => None,
                    Some(super::Value::$variant(v)) => Some(v),
                    Some(_) => {
                        return Err(Error::oos(
                            "value does not match the column's physical type",
                        ))
                    }
                };
                $w.write_value(value.repetition_level, value.definition_level, typed)
            }};
        }
        match self {
            ColumnWriter::Boolean(w) => dispatch!(w, Boolean),
            ColumnWriter::Int32(w) => dispatch!(w, Int32),
            ColumnWriter::Int64(w) => dispatch!(w, Int64),
            ColumnWriter::Float(w) => dispatch!(w, Float),
            ColumnWriter::Double(w) => dispatch!(w, Double),
            ColumnWriter::ByteArray(w) => dispatch!(w, ByteArray),
        }
    }

    /// The total compressed size of every page flushed so far, used by the row-group
    /// orchestrator to decide when to close the current row group (spec.md §4.8).
    pub fn compressed_size(&self) -> usize {
        match self {
            ColumnWriter::Boolean(w) => w.compressed_size(),
            ColumnWriter::Int32(w) => w.compressed_size(),
            ColumnWriter::Int64(w) => w.compressed_size(),
            ColumnWriter::Float(w) => w.compressed_size(),
            ColumnWriter::Double(w) => w.compressed_size(),
            ColumnWriter::ByteArray(w) => w.compressed_size(),
        }
    }

    pub fn close(self) -> Result<Vec<CompressedPage>> {
        match self {
            ColumnWriter::Boolean(w) => w.close(),
            ColumnWriter::Int32(w) => w.close(),
            ColumnWriter::Int64(w) => w.close(),
            ColumnWriter::Float(w) => w.close(),
            ColumnWriter::Double(w) => w.close(),
            ColumnWriter::ByteArray(w) => w.close(),
        }
    }
}

/// The subset of [`WriterProperties`] resolved for one specific column.
struct ColumnWriterConfig {
    compression: crate::compression::Compression,
    page_size_threshold: usize,
    data_page_version: Version,
    collect_statistics: bool,
    use_dictionary: bool,
    dictionary_fallback_size: usize,
    dictionary_fallback_distinct_count: usize,
}

impl ColumnWriterConfig {
    fn new(descriptor: &ColumnDescriptor, properties: &WriterProperties) -> Self {
        let path = descriptor.path();
        let encoding = properties.encoding_for(path);
        Self {
            compression: properties.compression_for(path),
            page_size_threshold: properties.page_buffer_size,
            data_page_version: properties.data_page_version,
            collect_statistics: properties.data_page_statistics,
            use_dictionary: !matches!(encoding, Some(crate::encoding::Encoding::Plain)),
            dictionary_fallback_size: properties.dictionary_fallback_size,
            dictionary_fallback_distinct_count: properties.dictionary_fallback_distinct_count,
        }
    }
}

/// Encodes rep/def levels the way both page versions need: a v1 page RLE-encodes each
/// section with its own 4-byte little-endian length prefix baked into the shared
/// buffer; a v2 page RLE-encodes them the same way but reports their lengths in the
/// header instead, with no in-buffer prefix.
fn encode_levels(buffer: &mut Vec<u8>, levels: &[i16], max_level: i16, prefixed: bool) -> Result<u32> {
    if max_level == 0 {
        return Ok(0);
    }
    let num_bits = min_len_u32(max_level as u32) as u8;
    let mut encoded = Vec::new();
    hybrid_rle::encode_u32(&mut encoded, levels.iter().map(|&l| l as u32), num_bits)
        .map_err(Error::from)?;
    if prefixed {
        buffer.extend_from_slice(&(encoded.len() as u32).to_le_bytes());
    }
    buffer.extend_from_slice(&encoded);
    Ok(encoded.len() as u32)
}

/// Bookkeeping shared by every physical-type writer: levels, page/chunk row and value
/// counts, and the buffered pages of the chunk built so far.
struct ColumnWriterState {
    descriptor: ColumnDescriptor,
    config: ColumnWriterConfig,
    state: WriterState,

    repetition_levels: Vec<i16>,
    definition_levels: Vec<i16>,
    num_values: usize,
    num_rows: usize,
    null_count: i64,

    pages: Vec<CompressedPage>,
}

impl ColumnWriterState {
    fn new(descriptor: ColumnDescriptor, config: ColumnWriterConfig) -> Self {
        Self {
            descriptor,
            config,
            state: WriterState::Empty,
            repetition_levels: Vec::new(),
            definition_levels: Vec::new(),
            num_values: 0,
            num_rows: 0,
            null_count: 0,
            pages: Vec::new(),
        }
    }

    fn record_levels(&mut self, repetition_level: i16, definition_level: i16, is_null: bool) {
        if self.descriptor.max_rep_level() > 0 {
            self.repetition_levels.push(repetition_level);
        }
        if self.descriptor.max_def_level() > 0 {
            self.definition_levels.push(definition_level);
        }
        if repetition_level == 0 {
            self.num_rows += 1;
        }
        self.num_values += 1;
        if is_null {
            self.null_count += 1;
        }
    }

    fn reset_page(&mut self) {
        self.repetition_levels.clear();
        self.definition_levels.clear();
        self.num_values = 0;
        self.num_rows = 0;
        self.null_count = 0;
    }

    fn page_row_count(&self) -> usize {
        self.num_rows
    }

    fn compressed_size(&self) -> usize {
        self.pages.iter().map(|p| p.compressed_size()).sum()
    }

    fn build_buffer(&self, values: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
        let prefixed = self.config.data_page_version == Version::V1;
        let mut buffer = Vec::new();
        let rep_len = encode_levels(
            &mut buffer,
            &self.repetition_levels,
            self.descriptor.max_rep_level(),
            prefixed,
        )?;
        let def_len = encode_levels(
            &mut buffer,
            &self.definition_levels,
            self.descriptor.max_def_level(),
            prefixed,
        )?;
        buffer.extend_from_slice(values);
        Ok((buffer, rep_len, def_len))
    }

    fn assemble_and_push(
        &mut self,
        values: &[u8],
        encoding: crate::encoding::Encoding,
        statistics: Option<parquet_format_safe::Statistics>,
    ) -> Result<()> {
        let (buffer, rep_len, def_len) = self.build_buffer(values)?;
        let num_values = self.num_values as i32;

        let header = match self.config.data_page_version {
            Version::V1 => DataPageHeader::V1(parquet_format_safe::DataPageHeader {
                num_values,
                encoding: encoding.into(),
                definition_level_encoding: ThriftEncoding::RLE,
                repetition_level_encoding: ThriftEncoding::RLE,
                statistics,
            }),
            Version::V2 => DataPageHeader::V2(DataPageHeaderV2 {
                num_values,
                num_nulls: self.null_count as i32,
                num_rows: self.num_rows as i32,
                encoding: encoding.into(),
                definition_levels_byte_length: def_len as i32,
                repetition_levels_byte_length: rep_len as i32,
                is_compressed: Some(self.config.compression != crate::compression::Compression::Uncompressed),
                statistics,
            }),
        };

        let page = DataPage::new(
            header,
            buffer,
            None,
            self.descriptor.clone(),
            Some(self.page_row_count()),
        );
        let compressed = compress(page, self.config.compression)?;
        self.pages.push(CompressedPage::Data(compressed));
        self.reset_page();
        Ok(())
    }
}

/// A numeric type that can be bit-cast to a dictionary probe key without losing
/// distinctness (spec.md §4.4.3: the dictionary compares values for equality, not
/// order, so the bit pattern is all that matters).
pub trait DictKey: AssociatedPhysicalType {
    type Key: crate::hash::ProbeKey;
    fn dict_key(&self) -> Self::Key;
}

impl DictKey for i32 {
    type Key = u32;
    fn dict_key(&self) -> u32 {
        *self as u32
    }
}
impl DictKey for i64 {
    type Key = u64;
    fn dict_key(&self) -> u64 {
        *self as u64
    }
}
impl DictKey for f32 {
    type Key = u32;
    fn dict_key(&self) -> u32 {
        self.to_bits()
    }
}
impl DictKey for f64 {
    type Key = u64;
    fn dict_key(&self) -> u64 {
        self.to_bits()
    }
}

/// A column writer for `Int32`, `Int64`, `Float` or `Double` columns, promoting to
/// `RLE_DICTIONARY` until the dictionary outgrows
/// `WriterProperties::dictionary_fallback_size`/`dictionary_fallback_distinct_count`,
/// checked only before the chunk's first page is flushed (spec.md §4.6).
pub struct PrimitiveColumnWriter<T: DictKey> {
    inner: ColumnWriterState,
    values: Vec<T>,
    page_indices: Vec<i32>,
    dictionary: HashTable<T::Key>,
    dict_values: Vec<T>,
    use_dictionary: bool,
}

impl<T: DictKey + PartialOrd> PrimitiveColumnWriter<T> {
    fn new(descriptor: ColumnDescriptor, config: ColumnWriterConfig) -> Self {
        let use_dictionary = config.use_dictionary;
        Self {
            inner: ColumnWriterState::new(descriptor, config),
            values: Vec::new(),
            page_indices: Vec::new(),
            dictionary: HashTable::new(),
            dict_values: Vec::new(),
            use_dictionary,
        }
    }

    fn write_value(&mut self, repetition_level: i16, definition_level: i16, value: Option<T>) -> Result<()> {
        if self.inner.state == WriterState::Failed {
            return Err(Error::Closed);
        }
        if self.inner.state == WriterState::Closed {
            return Err(Error::Closed);
        }
        self.inner.state = WriterState::Buffering;

        self.inner
            .record_levels(repetition_level, definition_level, value.is_none());

        if let Some(v) = value {
            self.values.push(v);
            if self.use_dictionary {
                let index = self.dictionary.probe(v.dict_key());
                if index as usize == self.dict_values.len() {
                    self.dict_values.push(v);
                }
                self.page_indices.push(index);
            }
        }

        if self.estimated_size() >= self.inner.config.page_size_threshold {
            self.flush_page()?;
        }
        Ok(())
    }

    fn estimated_size(&self) -> usize {
        self.values.len() * T::BYTE_SIZE
            + self.inner.repetition_levels.len() * 2
            + self.inner.definition_levels.len() * 2
    }

    fn compressed_size(&self) -> usize {
        self.inner.compressed_size()
    }

    fn flush_page(&mut self) -> Result<()> {
        if self.inner.num_values == 0 {
            return Ok(());
        }

        if self.use_dictionary && self.inner.pages.is_empty() {
            let distinct = self.dict_values.len();
            let byte_size = distinct * T::BYTE_SIZE;
            if distinct > self.inner.config.dictionary_fallback_distinct_count
                || byte_size > self.inner.config.dictionary_fallback_size
            {
                self.use_dictionary = false;
            } else {
                self.push_dictionary_page()?;
            }
        }

        let statistics = self.page_statistics();
        if self.use_dictionary {
            let mut values_buffer = Vec::new();
            dictionary::encode_indices(
                &mut values_buffer,
                &self.page_indices,
                self.dict_values.len().max(1),
            )
            .map_err(Error::from)?;
            self.inner
                .assemble_and_push(&values_buffer, crate::encoding::Encoding::RleDictionary, statistics)?;
        } else {
            let mut values_buffer = Vec::new();
            plain::encode(&self.values, &mut values_buffer);
            self.inner
                .assemble_and_push(&values_buffer, crate::encoding::Encoding::Plain, statistics)?;
        }

        self.values.clear();
        self.page_indices.clear();
        Ok(())
    }

    fn push_dictionary_page(&mut self) -> Result<()> {
        let mut buffer = Vec::new();
        plain::encode(&self.dict_values, &mut buffer);
        let num_values = self.dict_values.len();
        let compressed = compress_dict(buffer, num_values, self.inner.config.compression)?;
        self.inner.pages.push(CompressedPage::Dict(compressed));
        Ok(())
    }

    fn page_statistics(&self) -> Option<parquet_format_safe::Statistics> {
        if !self.inner.config.collect_statistics {
            return None;
        }
        let min_value = self
            .values
            .iter()
            .copied()
            .fold(None, |acc: Option<T>, v| {
                Some(match acc {
                    Some(m) if m < v => m,
                    _ => v,
                })
            });
        let max_value = self
            .values
            .iter()
            .copied()
            .fold(None, |acc: Option<T>, v| {
                Some(match acc {
                    Some(m) if m > v => m,
                    _ => v,
                })
            });
        let stats = PrimitiveStatistics::<T> {
            null_count: Some(self.inner.null_count),
            distinct_count: None,
            min_value,
            max_value,
        };
        Some(crate::statistics::serialize_statistics(&stats))
    }

    fn close(mut self) -> Result<Vec<CompressedPage>> {
        if self.inner.state == WriterState::Failed {
            return Err(Error::Closed);
        }
        let result = self.flush_page();
        match result {
            Ok(()) => {
                self.inner.state = WriterState::Closed;
                Ok(self.inner.pages)
            }
            Err(e) => {
                self.inner.state = WriterState::Failed;
                Err(e)
            }
        }
    }
}

/// Boolean columns are never dictionary-encoded (the format disallows it: a
/// dictionary of at most two values has no benefit), so this writer only ever emits
/// `PLAIN` pages.
pub struct BooleanColumnWriter {
    inner: ColumnWriterState,
    values: Vec<bool>,
}

impl BooleanColumnWriter {
    fn new(descriptor: ColumnDescriptor, config: ColumnWriterConfig) -> Self {
        Self {
            inner: ColumnWriterState::new(descriptor, config),
            values: Vec::new(),
        }
    }

    fn write_value(&mut self, repetition_level: i16, definition_level: i16, value: Option<bool>) -> Result<()> {
        if self.inner.state == WriterState::Closed || self.inner.state == WriterState::Failed {
            return Err(Error::Closed);
        }
        self.inner.state = WriterState::Buffering;
        self.inner
            .record_levels(repetition_level, definition_level, value.is_none());

        if let Some(v) = value {
            self.values.push(v);
        }

        if self.estimated_size() >= self.inner.config.page_size_threshold {
            self.flush_page()?;
        }
        Ok(())
    }

    fn estimated_size(&self) -> usize {
        self.values.len() / 8
            + self.inner.repetition_levels.len() * 2
            + self.inner.definition_levels.len() * 2
    }

    fn compressed_size(&self) -> usize {
        self.inner.compressed_size()
    }

    fn flush_page(&mut self) -> Result<()> {
        if self.inner.num_values == 0 {
            return Ok(());
        }
        let mut values_buffer = Vec::new();
        crate::encoding::plain::encode_bool(&self.values, &mut values_buffer);

        let statistics = if self.inner.config.collect_statistics {
            let min_value = self.values.iter().copied().fold(None, |acc: Option<bool>, v| {
                Some(acc.map_or(v, |m| m & v))
            });
            let max_value = self.values.iter().copied().fold(None, |acc: Option<bool>, v| {
                Some(acc.map_or(v, |m| m | v))
            });
            let stats = BooleanStatistics {
                null_count: Some(self.inner.null_count),
                distinct_count: None,
                min_value,
                max_value,
            };
            Some(crate::statistics::serialize_statistics(&stats))
        } else {
            None
        };

        self.inner
            .assemble_and_push(&values_buffer, crate::encoding::Encoding::Plain, statistics)?;
        self.values.clear();
        Ok(())
    }

    fn close(mut self) -> Result<Vec<CompressedPage>> {
        if self.inner.state == WriterState::Failed {
            return Err(Error::Closed);
        }
        match self.flush_page() {
            Ok(()) => {
                self.inner.state = WriterState::Closed;
                Ok(self.inner.pages)
            }
            Err(e) => {
                self.inner.state = WriterState::Failed;
                Err(e)
            }
        }
    }
}

/// A column writer for `ByteArray` columns. The dictionary keys are variable-length,
/// so it uses a plain `HashMap` instead of [`crate::hash::HashTable`] (whose probe
/// keys are fixed-width integers).
pub struct ByteArrayColumnWriter {
    inner: ColumnWriterState,
    values: Vec<Vec<u8>>,
    page_indices: Vec<i32>,
    dictionary: HashMap<Vec<u8>, i32>,
    dict_values: Vec<Vec<u8>>,
    use_dictionary: bool,
}

impl ByteArrayColumnWriter {
    fn new(descriptor: ColumnDescriptor, config: ColumnWriterConfig) -> Self {
        let use_dictionary = config.use_dictionary;
        Self {
            inner: ColumnWriterState::new(descriptor, config),
            values: Vec::new(),
            page_indices: Vec::new(),
            dictionary: HashMap::new(),
            dict_values: Vec::new(),
            use_dictionary,
        }
    }

    fn write_value(&mut self, repetition_level: i16, definition_level: i16, value: Option<Vec<u8>>) -> Result<()> {
        if self.inner.state == WriterState::Closed || self.inner.state == WriterState::Failed {
            return Err(Error::Closed);
        }
        self.inner.state = WriterState::Buffering;
        self.inner
            .record_levels(repetition_level, definition_level, value.is_none());

        if let Some(v) = value {
            if self.use_dictionary {
                let next_index = self.dict_values.len() as i32;
                let index = *self.dictionary.entry(v.clone()).or_insert(next_index);
                if index == next_index {
                    self.dict_values.push(v.clone());
                }
                self.page_indices.push(index);
            }
            self.values.push(v);
        }

        if self.estimated_size() >= self.inner.config.page_size_threshold {
            self.flush_page()?;
        }
        Ok(())
    }

    fn estimated_size(&self) -> usize {
        self.values.iter().map(|v| v.len() + 4).sum::<usize>()
            + self.inner.repetition_levels.len() * 2
            + self.inner.definition_levels.len() * 2
    }

    fn compressed_size(&self) -> usize {
        self.inner.compressed_size()
    }

    fn flush_page(&mut self) -> Result<()> {
        if self.inner.num_values == 0 {
            return Ok(());
        }

        if self.use_dictionary && self.inner.pages.is_empty() {
            let distinct = self.dict_values.len();
            let byte_size: usize = self.dict_values.iter().map(|v| v.len()).sum();
            if distinct > self.inner.config.dictionary_fallback_distinct_count
                || byte_size > self.inner.config.dictionary_fallback_size
            {
                self.use_dictionary = false;
            } else {
                self.push_dictionary_page()?;
            }
        }

        let statistics = self.page_statistics();
        if self.use_dictionary {
            let mut values_buffer = Vec::new();
            dictionary::encode_indices(
                &mut values_buffer,
                &self.page_indices,
                self.dict_values.len().max(1),
            )
            .map_err(Error::from)?;
            self.inner
                .assemble_and_push(&values_buffer, crate::encoding::Encoding::RleDictionary, statistics)?;
        } else {
            let mut values_buffer = Vec::new();
            plain_byte_array::encode(self.values.iter().map(|v| v.as_slice()), &mut values_buffer);
            self.inner
                .assemble_and_push(&values_buffer, crate::encoding::Encoding::Plain, statistics)?;
        }

        self.values.clear();
        self.page_indices.clear();
        Ok(())
    }

    fn push_dictionary_page(&mut self) -> Result<()> {
        let mut buffer = Vec::new();
        plain_byte_array::encode(self.dict_values.iter().map(|v| v.as_slice()), &mut buffer);
        let num_values = self.dict_values.len();
        let compressed = compress_dict(buffer, num_values, self.inner.config.compression)?;
        self.inner.pages.push(CompressedPage::Dict(compressed));
        Ok(())
    }

    fn page_statistics(&self) -> Option<parquet_format_safe::Statistics> {
        if !self.inner.config.collect_statistics {
            return None;
        }
        let min_value = self
            .values
            .iter()
            .fold(None, |acc: Option<&Vec<u8>>, v| {
                Some(match acc {
                    Some(m) if m.as_slice() <= v.as_slice() => m,
                    _ => v,
                })
            })
            .cloned();
        let max_value = self
            .values
            .iter()
            .fold(None, |acc: Option<&Vec<u8>>, v| {
                Some(match acc {
                    Some(m) if m.as_slice() >= v.as_slice() => m,
                    _ => v,
                })
            })
            .cloned();
        let stats = BinaryStatistics {
            descriptor: self.inner.descriptor.clone(),
            null_count: Some(self.inner.null_count),
            distinct_count: None,
            min_value,
            max_value,
        };
        Some(crate::statistics::serialize_statistics(&stats))
    }

    fn close(mut self) -> Result<Vec<CompressedPage>> {
        if self.inner.state == WriterState::Failed {
            return Err(Error::Closed);
        }
        match self.flush_page() {
            Ok(()) => {
                self.inner.state = WriterState::Closed;
                Ok(self.inner.pages)
            }
            Err(e) => {
                self.inner.state = WriterState::Failed;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::ParquetType;

    fn int32_descriptor() -> ColumnDescriptor {
        ColumnDescriptor::new(
            ParquetType::new_primitive(
                "a".to_string(),
                PhysicalType::Int32,
                Repetition::Required,
                None,
                None,
            ),
            0,
            0,
            crate::metadata::ColumnPath::new(vec!["a".to_string()]),
        )
    }

    fn byte_array_descriptor() -> ColumnDescriptor {
        ColumnDescriptor::new(
            ParquetType::new_primitive(
                "s".to_string(),
                PhysicalType::ByteArray,
                Repetition::Optional,
                None,
                None,
            ),
            1,
            0,
            crate::metadata::ColumnPath::new(vec!["s".to_string()]),
        )
    }

    #[test]
    fn int32_column_closes_with_a_single_dictionary_page_and_a_data_page() {
        let descriptor = int32_descriptor();
        let properties = WriterProperties::default();
        let config = ColumnWriterConfig::new(&descriptor, &properties);
        let mut writer = PrimitiveColumnWriter::<i32>::new(descriptor, config);

        for v in [1, 2, 1, 3, 2, 1] {
            writer.write_value(0, 0, Some(v)).unwrap();
        }
        let pages = writer.close().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(matches!(pages[0], CompressedPage::Dict(_)));
        assert!(matches!(pages[1], CompressedPage::Data(_)));
    }

    #[test]
    fn byte_array_column_with_nulls_tracks_statistics() {
        let descriptor = byte_array_descriptor();
        let properties = WriterProperties::default();
        let config = ColumnWriterConfig::new(&descriptor, &properties);
        let mut writer = ByteArrayColumnWriter::new(descriptor, config);

        writer.write_value(0, 1, Some(b"hello".to_vec())).unwrap();
        writer.write_value(0, 0, None).unwrap();
        writer.write_value(0, 1, Some(b"abc".to_vec())).unwrap();

        let pages = writer.close().unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn closing_an_empty_column_produces_no_pages() {
        let descriptor = int32_descriptor();
        let properties = WriterProperties::default();
        let config = ColumnWriterConfig::new(&descriptor, &properties);
        let writer = PrimitiveColumnWriter::<i32>::new(descriptor, config);
        let pages = writer.close().unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn dictionary_falls_back_to_plain_past_the_distinct_count_threshold() {
        let descriptor = int32_descriptor();
        let properties = WriterProperties::builder()
            .with_dictionary_fallback_distinct_count(2)
            .build();
        let config = ColumnWriterConfig::new(&descriptor, &properties);
        let mut writer = PrimitiveColumnWriter::<i32>::new(descriptor, config);

        for v in 0..10 {
            writer.write_value(0, 0, Some(v)).unwrap();
        }
        let pages = writer.close().unwrap();
        assert_eq!(pages.len(), 1);
        assert!(matches!(pages[0], CompressedPage::Data(_)));
    }
}
