//! Parses a file's footer (spec.md §6.2): the magic-prefixed thrift `FileMetaData`
//! record, plus the schema and per-row-group bookkeeping derived from it.

use std::cmp::min;
use std::io::{Cursor, Read, Seek, SeekFrom};

use parquet_format_safe::thrift::protocol::TCompactInputProtocol;
use parquet_format_safe::{ColumnOrder as TColumnOrder, FileMetaData as TFileMetaData};

use crate::error::{Error, Result};
use crate::metadata::{ColumnOrder, FileMetaData, ParquetMetaData, RowGroupMetaData, SchemaDescriptor};
use crate::metadata::get_sort_order;
use crate::schema::types::ParquetType;
use crate::{DEFAULT_FOOTER_READ_SIZE, FOOTER_SIZE, PARQUET_MAGIC};

fn metadata_len(buffer: &[u8], len: usize) -> Result<i32> {
    let slice = buffer
        .get(len - 8..len - 4)
        .ok_or_else(|| Error::oos("footer buffer is too short to hold the metadata length"))?;
    Ok(i32::from_le_bytes(slice.try_into().unwrap()))
}

fn stream_len<S: Seek>(seek: &mut S) -> std::result::Result<u64, std::io::Error> {
    let old_pos = seek.stream_position()?;
    let len = seek.seek(SeekFrom::End(0))?;
    if old_pos != len {
        seek.seek(SeekFrom::Start(old_pos))?;
    }
    Ok(len)
}

/// Reads a file's footer and reconstructs its [`ParquetMetaData`] (spec.md §6.1 "File
/// layout"): the last 8 bytes are a little-endian metadata length followed by the
/// `PAR1` magic; the thrift-encoded `FileMetaData` sits immediately before them.
pub fn read_metadata<R: Read + Seek>(reader: &mut R) -> Result<ParquetMetaData> {
    let file_size = stream_len(reader)?;
    if file_size < FOOTER_SIZE {
        return Err(Error::oos("file is smaller than the footer"));
    }

    let default_end_len = min(DEFAULT_FOOTER_READ_SIZE, file_size) as usize;
    reader.seek(SeekFrom::End(-(default_end_len as i64)))?;
    let mut footer_buffer = vec![0; default_end_len];
    reader.read_exact(&mut footer_buffer)?;

    if footer_buffer[default_end_len - 4..] != PARQUET_MAGIC {
        return Err(Error::oos("file does not end with the PAR1 magic"));
    }

    let metadata_length = metadata_len(&footer_buffer, default_end_len)?;
    if metadata_length < 0 {
        return Err(Error::oos("metadata length is negative"));
    }
    let footer_metadata_len = FOOTER_SIZE + metadata_length as u64;
    if footer_metadata_len > file_size {
        return Err(Error::oos("metadata length is larger than the file"));
    }

    let t_file_metadata = if footer_metadata_len <= default_end_len as u64 {
        let mut cursor = Cursor::new(footer_buffer);
        cursor.seek(SeekFrom::End(-(footer_metadata_len as i64)))?;
        let mut protocol = TCompactInputProtocol::new(cursor);
        TFileMetaData::read_from_in_protocol(&mut protocol)?
    } else {
        reader.seek(SeekFrom::End(-(footer_metadata_len as i64)))?;
        let mut protocol = TCompactInputProtocol::new(reader);
        TFileMetaData::read_from_in_protocol(&mut protocol)?
    };

    deserialize_metadata(t_file_metadata)
}

fn deserialize_metadata(t_file_metadata: TFileMetaData) -> Result<ParquetMetaData> {
    let schema = ParquetType::try_from_thrift(&t_file_metadata.schema)?;
    let schema_descr = SchemaDescriptor::new(schema);

    let row_groups = t_file_metadata
        .row_groups
        .into_iter()
        .map(|rg| RowGroupMetaData::from_thrift(&schema_descr, rg))
        .collect::<Result<Vec<_>>>()?;

    let column_orders = t_file_metadata
        .column_orders
        .map(|orders| parse_column_orders(&orders, &schema_descr))
        .transpose()?;

    let file_metadata = FileMetaData::new(
        t_file_metadata.version,
        t_file_metadata.num_rows,
        t_file_metadata.created_by,
        t_file_metadata.key_value_metadata,
        schema_descr,
        column_orders,
    );

    Ok(ParquetMetaData::new(file_metadata, row_groups))
}

/// Derives each leaf column's sort order from the footer's `column_orders` list, or
/// `None` when the footer doesn't carry one (legacy writers).
fn parse_column_orders(
    orders: &[TColumnOrder],
    schema_descr: &SchemaDescriptor,
) -> Result<Vec<ColumnOrder>> {
    if orders.len() != schema_descr.num_columns() {
        return Err(Error::oos(
            "column_orders length does not match the schema's leaf count",
        ));
    }

    schema_descr
        .columns()
        .iter()
        .zip(orders)
        .map(|(column, order)| match order {
            TColumnOrder::TYPEORDER(_) => {
                let physical_type = column.type_().physical_type().ok_or_else(|| {
                    Error::oos("a leaf column's descriptor must carry a physical type")
                })?;
                let sort_order = get_sort_order(&column.type_().logical_type(), &physical_type);
                Ok(ColumnOrder::TypeDefinedOrder(sort_order))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::metadata::{ColumnPath, KeyValue};
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::PhysicalType;
    use crate::write::{write_file, RowGroupIter};

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

    fn write_empty_file() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        write_file(
            &mut buffer,
            std::iter::empty::<Result<(RowGroupIter<'static, Error>, usize)>>(),
            schema(),
            crate::write::WriterProperties::default(),
            Some(vec![KeyValue {
                key: "k".to_string(),
                value: Some("v".to_string()),
            }]),
        )
        .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn reads_back_an_empty_files_key_value_metadata() {
        let bytes = write_empty_file();
        let mut cursor = Cursor::new(bytes);
        let metadata = read_metadata(&mut cursor).unwrap();

        assert_eq!(metadata.num_row_groups(), 0);
        let kv = metadata.file_metadata().key_value_metadata().unwrap();
        assert_eq!(kv[0].key, "k");
    }

    #[test]
    fn rejects_a_truncated_footer() {
        let mut cursor = Cursor::new(vec![0u8; 4]);
        assert!(read_metadata(&mut cursor).is_err());
    }

    #[test]
    fn column_path_roundtrips_through_schema_descriptor() {
        let descr = schema();
        assert_eq!(descr.column(0).path(), &ColumnPath::new(vec!["a".to_string()]));
    }
}
