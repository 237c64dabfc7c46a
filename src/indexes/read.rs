use std::io::{Cursor, Read, Seek, SeekFrom};

use parquet_format_safe::{thrift::protocol::TCompactInputProtocol, OffsetIndex, PageLocation};

use crate::error::{Error, Result};
use crate::metadata::ColumnChunkMetaData;

use super::deserialize::deserialize;
use super::index::Index;

fn prepare_read<F, G>(
    chunks: &[ColumnChunkMetaData],
    get_offset: F,
    get_length: G,
) -> Result<(u64, Vec<usize>)>
where
    F: Fn(&parquet_format_safe::ColumnChunk) -> Option<i64>,
    G: Fn(&parquet_format_safe::ColumnChunk) -> Option<i32>,
{
    let first_chunk = match chunks.first() {
        Some(chunk) => chunk,
        None => return Ok((0, vec![])),
    };

    let offset: u64 = match get_offset(first_chunk.column_chunk()) {
        Some(offset) => offset.try_into()?,
        None => return Ok((0, vec![])),
    };

    let lengths = chunks
        .iter()
        .map(|chunk| {
            let length = get_length(chunk.column_chunk()).ok_or_else(|| {
                Error::oos("the column index length must exist if its offset exists")
            })?;
            Ok(length.try_into()?)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((offset, lengths))
}

fn prepare_column_index_read(chunks: &[ColumnChunkMetaData]) -> Result<(u64, Vec<usize>)> {
    prepare_read(
        chunks,
        |x| x.column_index_offset,
        |x| x.column_index_length,
    )
}

fn prepare_offset_index_read(chunks: &[ColumnChunkMetaData]) -> Result<(u64, Vec<usize>)> {
    prepare_read(
        chunks,
        |x| x.offset_index_offset,
        |x| x.offset_index_length,
    )
}

fn deserialize_column_indexes(
    chunks: &[ColumnChunkMetaData],
    data: &[u8],
    lengths: Vec<usize>,
) -> Result<Vec<Option<Box<dyn Index>>>> {
    let mut start = 0;
    let slices = lengths.into_iter().map(|length| {
        let slice = &data[start..start + length];
        start += length;
        slice
    });

    chunks
        .iter()
        .zip(slices)
        .map(|(chunk, data)| deserialize(data, chunk.column_descriptor().type_()))
        .collect()
}

/// Reads and deserializes the column index of every chunk in a row group.
///
/// Returns `None` for a chunk with no page index (e.g. boolean columns, or a row group
/// written without page indexes).
pub fn read_columns_indexes<R: Read + Seek>(
    reader: &mut R,
    chunks: &[ColumnChunkMetaData],
) -> Result<Vec<Option<Box<dyn Index>>>> {
    let (offset, lengths) = prepare_column_index_read(chunks)?;
    if lengths.is_empty() {
        return Ok(vec![None; chunks.len()]);
    }

    let length = lengths.iter().sum::<usize>();

    reader.seek(SeekFrom::Start(offset))?;
    let mut data = vec![0; length];
    reader.read_exact(&mut data)?;

    deserialize_column_indexes(chunks, &data, lengths)
}

fn deserialize_page_locations(
    data: &[u8],
    num_columns: usize,
) -> Result<Vec<Vec<PageLocation>>> {
    let mut cursor = Cursor::new(data);

    (0..num_columns)
        .map(|_| {
            let mut protocol = TCompactInputProtocol::new(&mut cursor);
            let offset = OffsetIndex::read_from_in_protocol(&mut protocol)?;
            Ok(offset.page_locations)
        })
        .collect()
}

/// Reads the offset index of every chunk in a row group.
///
/// Returns an empty vector if offset indexes are not available.
pub fn read_pages_locations<R: Read + Seek>(
    reader: &mut R,
    chunks: &[ColumnChunkMetaData],
) -> Result<Vec<Vec<PageLocation>>> {
    let (offset, lengths) = prepare_offset_index_read(chunks)?;
    if lengths.is_empty() {
        return Ok(vec![]);
    }

    let length = lengths.iter().sum::<usize>();

    reader.seek(SeekFrom::Start(offset))?;
    let mut data = vec![0; length];
    reader.read_exact(&mut data)?;

    deserialize_page_locations(&data, chunks.len())
}
