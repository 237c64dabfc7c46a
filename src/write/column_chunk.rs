use std::collections::HashSet;
use std::io::Write;

use fallible_streaming_iterator::FallibleStreamingIterator;
use parquet_format_safe::thrift::protocol::TCompactOutputProtocol;
use parquet_format_safe::{ColumnChunk, ColumnMetaData};

use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::page::{CompressedPage, PageType};
use crate::parquet_bridge::Encoding;
use crate::schema::types::ParquetType;
use crate::statistics::serialize_statistics;

use super::page::{write_page, PageWriteSpec};
use super::statistics::reduce;
use super::DynStreamingIterator;

/// Writes every page of one column chunk and appends its thrift `ColumnChunk` metadata
/// record, returning it together with the total number of bytes written.
pub fn write_column_chunk<'a, W, E>(
    writer: &mut W,
    mut offset: u64,
    descriptor: &ColumnDescriptor,
    compression: Compression,
    mut compressed_pages: DynStreamingIterator<'a, CompressedPage, E>,
) -> Result<(ColumnChunk, u64, Vec<PageWriteSpec>)>
where
    W: Write,
    Error: From<E>,
{
    let initial = offset;

    let mut specs = vec![];
    while let Some(compressed_page) = compressed_pages.next()? {
        let spec = write_page(writer, offset, compressed_page)?;
        offset += spec.bytes_written;
        specs.push(spec);
    }
    let mut bytes_written = offset - initial;

    let column_chunk = build_column_chunk(&specs, descriptor, compression)?;

    let mut protocol = TCompactOutputProtocol::new(&mut *writer);
    bytes_written += column_chunk.write_to_out_protocol(&mut protocol)? as u64;

    Ok((column_chunk, bytes_written, specs))
}

fn build_column_chunk(
    specs: &[PageWriteSpec],
    descriptor: &ColumnDescriptor,
    compression: Compression,
) -> Result<ColumnChunk> {
    let total_compressed_size = specs
        .iter()
        .map(|spec| spec.header_size as i64 + spec.header.compressed_page_size as i64)
        .sum();
    let total_uncompressed_size = specs
        .iter()
        .map(|spec| spec.header_size as i64 + spec.header.uncompressed_page_size as i64)
        .sum();
    let data_page_offset = specs.first().map(|spec| spec.offset).unwrap_or(0) as i64;
    let dictionary_page_offset = specs
        .iter()
        .find(|spec| spec.page_type == PageType::DictionaryPage)
        .map(|spec| spec.offset as i64);

    let num_values = specs
        .iter()
        .filter(|spec| matches!(spec.page_type, PageType::DataPage | PageType::DataPageV2))
        .map(|spec| spec.num_values as i64)
        .sum();

    let encodings = specs
        .iter()
        .map(|spec| match spec.page_type {
            PageType::DataPage => vec![
                spec.header
                    .data_page_header
                    .as_ref()
                    .unwrap()
                    .encoding,
                Encoding::Rle.into(),
            ],
            PageType::DataPageV2 => vec![
                spec.header
                    .data_page_header_v2
                    .as_ref()
                    .unwrap()
                    .encoding,
                Encoding::Rle.into(),
            ],
            PageType::DictionaryPage => {
                vec![spec.header.dictionary_page_header.as_ref().unwrap().encoding]
            }
        })
        .flatten()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let statistics = specs.iter().map(|spec| &spec.statistics).collect::<Vec<_>>();
    let statistics = reduce(&statistics)?;
    let statistics = statistics.map(|x| serialize_statistics(x.as_ref()));

    let type_ = match descriptor.type_() {
        ParquetType::PrimitiveType { physical_type, .. } => physical_type.to_thrift().0,
        _ => return Err(Error::oos("a column chunk must be built from a primitive column")),
    };

    let metadata = ColumnMetaData {
        type_,
        encodings,
        path_in_schema: descriptor.path().parts().to_vec(),
        codec: compression.into(),
        num_values,
        total_uncompressed_size,
        total_compressed_size,
        key_value_metadata: None,
        data_page_offset,
        index_page_offset: None,
        dictionary_page_offset,
        statistics,
        encoding_stats: None,
        bloom_filter_offset: None,
    };

    Ok(ColumnChunk {
        file_path: None,
        file_offset: data_page_offset + total_compressed_size,
        meta_data: Some(metadata),
        offset_index_offset: None,
        offset_index_length: None,
        column_index_offset: None,
        column_index_length: None,
        crypto_metadata: None,
        encrypted_column_metadata: None,
    })
}
