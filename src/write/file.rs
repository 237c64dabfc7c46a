use std::io::Write;

use parquet_format_safe::thrift::protocol::TCompactOutputProtocol;
use parquet_format_safe::thrift::protocol::TOutputProtocol;
use parquet_format_safe::{FileMetaData, RowGroup};

pub use crate::metadata::KeyValue;
use crate::{
    error::{Error, Result},
    indexes::{write_column_index, write_offset_index},
    metadata::SchemaDescriptor,
    FOOTER_SIZE, PARQUET_MAGIC,
};

use super::page::PageWriteSpec;
use super::row_group::{write_row_group, RowGroupIter};
use super::WriterProperties;

pub(super) fn start_file<W: Write>(writer: &mut W) -> Result<u64> {
    writer.write_all(&PARQUET_MAGIC)?;
    Ok(PARQUET_MAGIC.len() as u64)
}

pub(super) fn end_file<W: Write>(mut writer: &mut W, metadata: FileMetaData) -> Result<u64> {
    let mut protocol = TCompactOutputProtocol::new(&mut writer);
    let metadata_len = metadata.write_to_out_protocol(&mut protocol)? as i32;
    protocol.flush()?;

    let metadata_bytes = metadata_len.to_le_bytes();
    let mut footer_buffer = [0u8; FOOTER_SIZE as usize];
    (0..4).for_each(|i| {
        footer_buffer[i] = metadata_bytes[i];
    });
    (&mut footer_buffer[4..]).write_all(&PARQUET_MAGIC)?;
    writer.write_all(&footer_buffer)?;
    Ok(metadata_len as u64 + FOOTER_SIZE)
}

/// Writes the `ColumnIndex` records for every column of every row group, then the
/// `OffsetIndex` records, in that order (spec.md §6.1), patching each column chunk's
/// `*_index_offset`/`*_index_length` fields in place as it goes.
fn write_indexes<W: Write>(
    writer: &mut W,
    mut offset: u64,
    row_groups: &mut [RowGroup],
    page_specs: &[Vec<Vec<PageWriteSpec>>],
) -> Result<u64> {
    let initial = offset;

    for (group, columns) in row_groups.iter_mut().zip(page_specs.iter()) {
        for (chunk, specs) in group.columns.iter_mut().zip(columns.iter()) {
            let length = write_column_index(writer, specs)?;
            chunk.column_index_offset = Some(offset as i64);
            chunk.column_index_length = Some(length as i32);
            offset += length;
        }
    }

    for (group, columns) in row_groups.iter_mut().zip(page_specs.iter()) {
        for (chunk, specs) in group.columns.iter_mut().zip(columns.iter()) {
            let length = write_offset_index(writer, specs)?;
            chunk.offset_index_offset = Some(offset as i64);
            chunk.offset_index_length = Some(length as i32);
            offset += length;
        }
    }

    Ok(offset - initial)
}

/// Writes one Parquet file: `start` the header, `write` each row group, `end` the
/// page index and footer. Io-bound: the value encoding and page compression that feed
/// `write` happen upstream, in whatever concurrency the caller chooses (spec.md §5).
pub struct FileWriter<W: Write> {
    writer: W,
    schema: SchemaDescriptor,
    options: WriterProperties,

    offset: u64,
    row_groups: Vec<RowGroup>,
    page_specs: Vec<Vec<Vec<PageWriteSpec>>>,
}

impl<W: Write> FileWriter<W> {
    pub fn options(&self) -> &WriterProperties {
        &self.options
    }

    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }
}

impl<W: Write> FileWriter<W> {
    pub fn new(writer: W, schema: SchemaDescriptor, options: WriterProperties) -> Self {
        Self {
            writer,
            schema,
            options,
            offset: 0,
            row_groups: vec![],
            page_specs: vec![],
        }
    }

    /// Writes the file's magic header. Must be called before the first [`Self::write`].
    pub fn start(&mut self) -> Result<()> {
        self.offset = start_file(&mut self.writer)?;
        Ok(())
    }

    /// Writes one row group's column chunks to the file.
    pub fn write<'a, E>(&mut self, row_group: RowGroupIter<'a, E>, num_rows: usize) -> Result<()>
    where
        Error: From<E>,
    {
        if self.offset == 0 {
            return Err(Error::oos(
                "you must call `start` before writing the first row group",
            ));
        }
        let (group, size, specs) = write_row_group(
            &mut self.writer,
            self.offset,
            self.schema.columns(),
            self.options.compression,
            row_group,
            num_rows,
        )?;
        self.offset += size;
        self.row_groups.push(group);
        self.page_specs.push(specs);
        Ok(())
    }

    /// Writes the page index and the footer, returning the total file size and the
    /// underlying writer.
    pub fn end(mut self, key_value_metadata: Option<Vec<KeyValue>>) -> Result<(u64, W)> {
        let index_size = write_indexes(
            &mut self.writer,
            self.offset,
            &mut self.row_groups,
            &self.page_specs,
        )?;
        self.offset += index_size;

        let num_rows = self.row_groups.iter().map(|group| group.num_rows).sum();

        let metadata = FileMetaData {
            version: 1,
            schema: self.schema.into_thrift()?,
            num_rows,
            row_groups: self.row_groups,
            key_value_metadata,
            created_by: self.options.created_by,
            column_orders: None,
            encryption_algorithm: None,
            footer_signing_key_metadata: None,
        };

        let footer_size = end_file(&mut self.writer, metadata)?;
        Ok((self.offset + footer_size, self.writer))
    }
}

/// Convenience wrapper: writes a whole file in one call from already-compressed
/// row-group page streams, for callers that don't need [`FileWriter`]'s incremental
/// interface (e.g. tests).
pub fn write_file<'a, W, E, I>(
    writer: &mut W,
    row_groups: I,
    schema: SchemaDescriptor,
    options: WriterProperties,
    key_value_metadata: Option<Vec<KeyValue>>,
) -> Result<u64>
where
    W: Write,
    Error: From<E>,
    I: IntoIterator<Item = Result<(RowGroupIter<'a, E>, usize)>>,
{
    let mut file_writer = FileWriter::new(writer, schema, options);
    file_writer.start()?;
    for row_group in row_groups {
        let (row_group, num_rows) = row_group?;
        file_writer.write(row_group, num_rows)?;
    }
    let (size, _) = file_writer.end(key_value_metadata)?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    use crate::error::Result;
    use crate::page::{CompressedPage, DataPage, DataPageHeader};
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::{ParquetType, PhysicalType};
    use crate::write::{compress, DynIter, DynStreamingIterator};

    fn schema() -> SchemaDescriptor {
        let a = ParquetType::new_primitive(
            "a".to_string(),
            PhysicalType::Int32,
            Repetition::Required,
            None,
            None,
        );
        SchemaDescriptor::new(ParquetType::new_root("root".to_string(), vec![a]))
    }

    #[test]
    fn empty_file_round_trips_through_start_end() -> Result<()> {
        let mut writer = Cursor::new(vec![]);
        start_file(&mut writer)?;

        let metadata = FileMetaData {
            version: 1,
            schema: schema().into_thrift()?,
            num_rows: 0,
            row_groups: vec![],
            key_value_metadata: None,
            created_by: None,
            column_orders: None,
            encryption_algorithm: None,
            footer_signing_key_metadata: None,
        };
        end_file(&mut writer, metadata)?;

        let bytes = writer.into_inner();
        assert_eq!(&bytes[0..4], &PARQUET_MAGIC);
        assert_eq!(&bytes[bytes.len() - 4..], &PARQUET_MAGIC);
        Ok(())
    }

    #[test]
    fn one_row_group_patches_index_offsets() -> Result<()> {
        let descriptor = schema().columns()[0].clone();

        let header = parquet_format_safe::DataPageHeader {
            num_values: 2,
            encoding: parquet_format_safe::Encoding::PLAIN,
            definition_level_encoding: parquet_format_safe::Encoding::RLE,
            repetition_level_encoding: parquet_format_safe::Encoding::RLE,
            statistics: None,
        };
        let page = DataPage::new(
            DataPageHeader::V1(header),
            vec![1, 0, 0, 0, 2, 0, 0, 0],
            None,
            descriptor,
            Some(2),
        );
        let compressed = compress(page, crate::compression::Compression::Uncompressed)?;
        let pages = DynStreamingIterator::new(fallible_streaming_iterator::convert(
            std::iter::once(Ok::<_, Error>(CompressedPage::Data(compressed))),
        ));
        let columns = DynIter::new(std::iter::once(Ok::<_, Error>(pages)));

        let mut writer = Cursor::new(vec![]);
        let mut file_writer: FileWriter<_> =
            FileWriter::new(&mut writer, schema(), WriterProperties::default());
        file_writer.start()?;
        file_writer.write::<Error>(columns, 2)?;
        let (size, _) = file_writer.end(None)?;

        assert!(size > 0);
        let bytes = writer.into_inner();
        assert_eq!(&bytes[0..4], &PARQUET_MAGIC);
        assert_eq!(&bytes[bytes.len() - 4..], &PARQUET_MAGIC);
        Ok(())
    }
}
