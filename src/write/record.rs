//! The row-group orchestrator (spec.md §4.8): drives one record's values into every
//! leaf column's [`ColumnWriter`] and flushes a row group once the running compressed
//! size crosses [`WriterProperties::row_group_target_size`]. Layered directly on top
//! of [`FileWriter`], which only knows how to frame an already-compressed page stream.

use std::io::Write;

use fallible_streaming_iterator::convert;

use crate::error::{Error, Result};
use crate::metadata::{ColumnDescriptor, SchemaDescriptor};

use super::file::KeyValue;
use super::{ColumnWriter, DynIter, DynStreamingIterator, FileWriter, LeveledValue, WriterProperties};

/// Writes a Parquet file one record at a time, shredding each record's values across
/// every leaf column before deciding whether to close the current row group.
pub struct RecordWriter<W: Write> {
    file: FileWriter<W>,
    descriptors: Vec<ColumnDescriptor>,
    writers: Vec<ColumnWriter>,
    rows_in_group: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, schema: SchemaDescriptor, properties: WriterProperties) -> Result<Self> {
        let descriptors = schema.columns().to_vec();
        let writers = new_column_writers(&descriptors, &properties)?;

        let mut file = FileWriter::new(writer, schema, properties);
        file.start()?;

        Ok(Self {
            file,
            descriptors,
            writers,
            rows_in_group: 0,
        })
    }

    /// Writes one record. `leaves` must yield exactly one value list per leaf column,
    /// in schema order; each list holds that leaf's values for this record (zero or
    /// more, per spec.md §4.8 — zero for an absent optional/repeated field).
    pub fn write_row<I>(&mut self, leaves: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<LeveledValue>>,
    {
        let mut leaves = leaves.into_iter();
        for writer in self.writers.iter_mut() {
            let values = leaves.next().ok_or_else(|| {
                Error::oos("the value-producer yielded fewer leaves than the schema has columns")
            })?;
            for value in values {
                writer.write_value(value)?;
            }
        }
        self.rows_in_group += 1;

        let total_compressed: usize = self.writers.iter().map(|w| w.compressed_size()).sum();
        if total_compressed >= self.file.options().row_group_target_size {
            self.flush_row_group()?;
        }
        Ok(())
    }

    /// Finalises every column writer's pages and hands the row group to the
    /// underlying [`FileWriter`]. A no-op if no row has been written since the last
    /// flush.
    fn flush_row_group(&mut self) -> Result<()> {
        if self.rows_in_group == 0 {
            return Ok(());
        }
        let num_rows = self.rows_in_group;
        self.rows_in_group = 0;

        let properties = self.file.options().clone();
        let finished = std::mem::replace(&mut self.writers, Vec::new());
        self.writers = new_column_writers(&self.descriptors, &properties)?;

        let column_pages = finished
            .into_iter()
            .map(ColumnWriter::close)
            .collect::<Result<Vec<_>>>()?;

        let columns = DynIter::new(column_pages.into_iter().map(|pages| {
            Ok(DynStreamingIterator::new(convert(
                pages.into_iter().map(Ok::<_, Error>),
            )))
        }));

        self.file.write::<Error>(columns, num_rows)
    }

    /// Flushes any remaining row and writes the page index and footer, returning the
    /// total file size and the underlying writer.
    pub fn close(mut self, key_value_metadata: Option<Vec<KeyValue>>) -> Result<(u64, W)> {
        self.flush_row_group()?;
        self.file.end(key_value_metadata)
    }
}

fn new_column_writers(
    descriptors: &[ColumnDescriptor],
    properties: &WriterProperties,
) -> Result<Vec<ColumnWriter>> {
    descriptors
        .iter()
        .map(|d| ColumnWriter::new(d.clone(), properties))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::{ParquetType, PhysicalType};
    use crate::write::Value;
    use std::io::Cursor;

    fn schema() -> SchemaDescriptor {
        let a = ParquetType::new_primitive(
            "a".to_string(),
            PhysicalType::Int32,
            Repetition::Required,
            None,
            None,
        );
        let b = ParquetType::new_primitive(
            "b".to_string(),
            PhysicalType::ByteArray,
            Repetition::Optional,
            None,
            None,
        );
        SchemaDescriptor::new(ParquetType::new_root("root".to_string(), vec![a, b]))
    }

    #[test]
    fn writes_rows_across_two_columns_into_one_row_group() -> Result<()> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer =
            RecordWriter::new(&mut buffer, schema(), WriterProperties::default())?;

        let rows = [
            (1, Some(b"x".to_vec())),
            (2, None),
            (3, Some(b"y".to_vec())),
        ];
        for (a, b) in rows {
            let a_value = vec![LeveledValue::new(0, 0, Some(Value::Int32(a)))];
            let b_value = match b {
                Some(bytes) => vec![LeveledValue::new(0, 1, Some(Value::ByteArray(bytes)))],
                None => vec![LeveledValue::new(0, 0, None)],
            };
            writer.write_row([a_value, b_value])?;
        }

        let (size, _) = writer.close(None)?;
        assert!(size > 0);
        Ok(())
    }

    #[test]
    fn rejects_a_leaf_count_mismatch() {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer =
            RecordWriter::new(&mut buffer, schema(), WriterProperties::default()).unwrap();
        let result = writer.write_row([vec![LeveledValue::new(0, 0, Some(Value::Int32(1)))]]);
        assert!(result.is_err());
    }

    #[test]
    fn row_group_target_size_triggers_an_intermediate_flush() -> Result<()> {
        let mut buffer = Cursor::new(Vec::new());
        let properties = WriterProperties::builder()
            .with_row_group_target_size(1)
            .build();
        let mut writer = RecordWriter::new(&mut buffer, schema(), properties)?;

        for a in 0..5 {
            let a_value = vec![LeveledValue::new(0, 0, Some(Value::Int32(a)))];
            let b_value = vec![LeveledValue::new(0, 1, Some(Value::ByteArray(b"z".to_vec())))];
            writer.write_row([a_value, b_value])?;
        }

        let (size, _) = writer.close(None)?;
        assert!(size > 0);
        Ok(())
    }
}
