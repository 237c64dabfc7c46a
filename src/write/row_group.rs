use std::io::Write;

use parquet_format_safe::{ColumnMetaData, RowGroup};

use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::page::CompressedPage;

use super::column_chunk::write_column_chunk;
use super::page::PageWriteSpec;
use super::{DynIter, DynStreamingIterator};

fn calc_column_file_offset(metadata: &ColumnMetaData) -> i64 {
    metadata
        .dictionary_page_offset
        .filter(|x| *x > 0_i64)
        .unwrap_or(metadata.data_page_offset)
}

/// One already-compressed page stream per leaf column of a row group, in schema order.
pub type RowGroupIter<'a, E> =
    DynIter<'a, std::result::Result<DynStreamingIterator<'a, CompressedPage, E>, E>>;

/// Writes every column chunk of one row group, returning the assembled `RowGroup`
/// record, the total bytes written, and each column's page specs (consumed by the page
/// index writer once every row group in the file has been written).
pub fn write_row_group<'a, W, E>(
    writer: &mut W,
    mut offset: u64,
    descriptors: &[ColumnDescriptor],
    compression: Compression,
    columns: RowGroupIter<'a, E>,
    num_rows: usize,
) -> Result<(RowGroup, u64, Vec<Vec<PageWriteSpec>>)>
where
    W: Write,
    Error: From<E>,
{
    let column_iter = descriptors.iter().zip(columns);

    let initial = offset;
    let mut specs = Vec::with_capacity(descriptors.len());
    let columns = column_iter
        .map(|(descriptor, page_iter)| {
            let (column, size, column_specs) =
                write_column_chunk(writer, offset, descriptor, compression, page_iter?)?;
            offset += size;
            specs.push(column_specs);
            Ok(column)
        })
        .collect::<Result<Vec<_>>>()?;
    let bytes_written = offset - initial;

    let file_offset = match num_rows {
        0 => None,
        _ => Some(calc_column_file_offset(
            columns[0].meta_data.as_ref().unwrap(),
        )),
    };

    let total_byte_size = columns
        .iter()
        .map(|c| c.meta_data.as_ref().unwrap().total_compressed_size)
        .sum();

    Ok((
        RowGroup {
            columns,
            total_byte_size,
            num_rows: num_rows as i64,
            sorting_columns: None,
            file_offset,
            total_compressed_size: None,
            ordinal: None,
        },
        bytes_written,
        specs,
    ))
}
