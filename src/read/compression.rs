//! Inverts [`crate::write::compression::compress`] (spec.md §4.7, step 2): a v1 page
//! decompresses its whole buffer; a v2 page decompresses only the values section past
//! the (always uncompressed) levels prefix, and only when the page header actually
//! says the values were compressed.

use crate::compression::{create_codec, Codec, Compression};
use crate::error::{Error, Result};
use crate::page::{CompressedDataPage, DataPage, DataPageHeader};

fn decompress_into(
    input: &[u8],
    uncompressed_size: usize,
    codec: &mut dyn Codec,
) -> Result<Vec<u8>> {
    let mut output = vec![0u8; uncompressed_size];
    codec.decompress(input, &mut output)?;
    Ok(output)
}

/// Decompresses a [`CompressedDataPage`] into a [`DataPage`], ready for level and
/// value decoding.
pub fn decompress(page: CompressedDataPage) -> Result<DataPage> {
    let compression = page.compression();
    let uncompressed_size = page.uncompressed_size();
    let num_rows = page.num_rows();
    let dictionary_page = page.dictionary_page().cloned();
    let descriptor = page.descriptor().clone();
    let header = page.header().clone();

    let codec = create_codec(&compression)?;

    let buffer = if let Some(mut codec) = codec {
        match &header {
            DataPageHeader::V1(_) => {
                decompress_into(page.buffer(), uncompressed_size, codec.as_mut())?
            }
            DataPageHeader::V2(v2) => {
                let prefix =
                    (v2.repetition_levels_byte_length + v2.definition_levels_byte_length) as usize;
                let is_compressed = v2.is_compressed.unwrap_or(true);
                if is_compressed {
                    let values_size = uncompressed_size
                        .checked_sub(prefix)
                        .ok_or_else(|| Error::oos("page levels prefix exceeds uncompressed size"))?;
                    let mut buffer = page.buffer()[..prefix].to_vec();
                    buffer.extend(decompress_into(
                        &page.buffer()[prefix..],
                        values_size,
                        codec.as_mut(),
                    )?);
                    buffer
                } else {
                    page.buffer().to_vec()
                }
            }
        }
    } else {
        page.buffer().to_vec()
    };

    Ok(DataPage::new(
        header,
        buffer,
        dictionary_page,
        descriptor,
        num_rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ColumnDescriptor, ColumnPath};
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::{ParquetType, PhysicalType};
    use crate::write::compress;

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

    fn v1_header() -> parquet_format_safe::DataPageHeader {
        parquet_format_safe::DataPageHeader {
            num_values: 3,
            encoding: parquet_format_safe::Encoding::PLAIN,
            definition_level_encoding: parquet_format_safe::Encoding::RLE,
            repetition_level_encoding: parquet_format_safe::Encoding::RLE,
            statistics: None,
        }
    }

    #[test]
    fn uncompressed_page_round_trips_unchanged() -> Result<()> {
        let page = DataPage::new(
            DataPageHeader::V1(v1_header()),
            vec![1, 2, 3, 4],
            None,
            descriptor(),
            Some(3),
        );
        let compressed = compress(page, Compression::Uncompressed)?;
        let decompressed = decompress(compressed)?;
        assert_eq!(decompressed.buffer(), &[1, 2, 3, 4]);
        Ok(())
    }

    #[cfg(feature = "snappy")]
    #[test]
    fn snappy_v1_page_round_trips() -> Result<()> {
        let original = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let page = DataPage::new(
            DataPageHeader::V1(v1_header()),
            original.clone(),
            None,
            descriptor(),
            Some(3),
        );
        let compressed = compress(page, Compression::Snappy)?;
        let decompressed = decompress(compressed)?;
        assert_eq!(decompressed.buffer(), &original[..]);
        Ok(())
    }

    #[cfg(feature = "snappy")]
    #[test]
    fn snappy_v2_page_leaves_levels_prefix_untouched() -> Result<()> {
        let header = parquet_format_safe::DataPageHeaderV2 {
            num_values: 3,
            num_nulls: 0,
            num_rows: 3,
            encoding: parquet_format_safe::Encoding::PLAIN,
            definition_levels_byte_length: 2,
            repetition_levels_byte_length: 1,
            is_compressed: Some(true),
            statistics: None,
        };
        let levels = vec![9u8, 8, 7];
        let values = vec![1u8, 2, 3, 4, 5];
        let mut buffer = levels.clone();
        buffer.extend(values.clone());

        let page = DataPage::new(
            DataPageHeader::V2(header),
            buffer,
            None,
            descriptor(),
            Some(3),
        );
        let compressed = compress(page, Compression::Snappy)?;
        let decompressed = decompress(compressed)?;
        assert_eq!(&decompressed.buffer()[..3], &levels[..]);
        assert_eq!(&decompressed.buffer()[3..], &values[..]);
        Ok(())
    }
}
