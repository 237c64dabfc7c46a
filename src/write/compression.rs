use crate::compression::{create_codec, Codec, Compression};
use crate::error::Result;
use crate::page::{CompressedDataPage, CompressedDictPage, DataPage, DataPageHeader};

fn compress_into(input: &[u8], codec: &mut dyn Codec) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    codec.compress(input, &mut output)?;
    Ok(output)
}

/// Compresses a data page's buffer with `compression`, leaving it untouched for
/// [`Compression::Uncompressed`].
///
/// A v1 page compresses its whole buffer (levels included); a v2 page only compresses
/// the values section, since its levels are always stored uncompressed (spec.md §4.6
/// "Data pages").
pub fn compress(page: DataPage, compression: Compression) -> Result<CompressedDataPage> {
    let uncompressed_page_size = page.buffer().len();
    let codec = create_codec(&compression)?;

    let buffer = if let Some(mut codec) = codec {
        match page.header() {
            DataPageHeader::V1(_) => compress_into(page.buffer(), codec.as_mut())?,
            DataPageHeader::V2(header) => {
                let prefix = (header.repetition_levels_byte_length
                    + header.definition_levels_byte_length) as usize;
                let mut buffer = page.buffer()[..prefix].to_vec();
                buffer.extend(compress_into(&page.buffer()[prefix..], codec.as_mut())?);
                buffer
            }
        }
    } else {
        page.buffer().to_vec()
    };

    let num_rows = page.num_rows();
    let dictionary_page = page.dictionary_page().cloned();
    let descriptor = page.descriptor().clone();
    let header = page.header().clone();

    Ok(CompressedDataPage::new(
        header,
        buffer,
        compression,
        uncompressed_page_size,
        dictionary_page,
        descriptor,
        num_rows,
    ))
}

/// Compresses an encoded dictionary page's buffer with `compression`.
pub fn compress_dict(
    buffer: Vec<u8>,
    num_values: usize,
    compression: Compression,
) -> Result<CompressedDictPage> {
    let uncompressed_page_size = buffer.len();
    let codec = create_codec(&compression)?;

    let buffer = if let Some(mut codec) = codec {
        compress_into(&buffer, codec.as_mut())?
    } else {
        buffer
    };

    Ok(CompressedDictPage::new(
        buffer,
        num_values,
        uncompressed_page_size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ColumnDescriptor;
    use crate::metadata::ColumnPath;
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::{ParquetType, PhysicalType};

    fn descriptor() -> ColumnDescriptor {
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
            ColumnPath::new(vec!["a".to_string()]),
        )
    }

    #[test]
    fn uncompressed_roundtrips_buffer() {
        let header = parquet_format_safe::DataPageHeader {
            num_values: 3,
            encoding: parquet_format_safe::Encoding::PLAIN,
            definition_level_encoding: parquet_format_safe::Encoding::RLE,
            repetition_level_encoding: parquet_format_safe::Encoding::RLE,
            statistics: None,
        };
        let page = DataPage::new(
            DataPageHeader::V1(header),
            vec![1, 2, 3, 4],
            None,
            descriptor(),
            Some(3),
        );

        let compressed = compress(page, Compression::Uncompressed).unwrap();
        assert_eq!(compressed.buffer(), &[1, 2, 3, 4]);
        assert_eq!(compressed.uncompressed_size(), 4);
    }
}
