//! Reconstructs one data page's values (spec.md §4.7, steps 3-4): splits the
//! decompressed buffer into repetition levels, definition levels and values, decodes
//! each section, and zips them back into one [`LeveledValue`] per position, resolving
//! dictionary indexes against the page's attached dictionary.

use std::sync::Arc;

use crate::bits::min_len_u32;
use crate::encoding::hybrid_rle;
use crate::encoding::{dictionary, plain, plain_byte_array, Encoding};
use crate::error::{Error, Result};
use crate::metadata::ColumnChunkMetaData;
use crate::page::{
    BinaryPageDict, DataPage, DataPageHeader, DictPage, FixedLenByteArrayPageDict,
    PrimitivePageDict,
};
use crate::schema::types::PhysicalType;
use crate::write::{LeveledValue, Value};

use super::compression::decompress;
use super::page::PageReader;

fn decode_levels(data: &[u8], max_level: i16, num_values: usize) -> Result<Vec<i16>> {
    if max_level == 0 {
        return Ok(vec![0; num_values]);
    }
    let num_bits = min_len_u32(max_level as u32) as u32;
    let levels: Vec<i16> = hybrid_rle::Decoder::new(data, num_bits)
        .flat_map(|run| run.into_iter())
        .take(num_values)
        .map(|v| v as i16)
        .collect();
    if levels.len() != num_values {
        return Err(Error::oos(
            "level stream yielded fewer values than the page declares",
        ));
    }
    Ok(levels)
}

/// Splits a v1 page's buffer into (repetition levels, definition levels, values): each
/// level section carries its own 4-byte length prefix, unless its column has no
/// levels at that kind, in which case the section (and its prefix) is absent
/// entirely.
fn split_v1<'a>(
    buffer: &'a [u8],
    max_rep_level: i16,
    max_def_level: i16,
) -> Result<(&'a [u8], &'a [u8], &'a [u8])> {
    let mut offset = 0usize;
    let read_section = |buffer: &'a [u8], offset: &mut usize, max_level: i16| -> Result<&'a [u8]> {
        if max_level == 0 {
            return Ok(&buffer[*offset..*offset]);
        }
        let prefix = buffer
            .get(*offset..*offset + 4)
            .ok_or_else(|| Error::oos("page buffer is too short for a level length prefix"))?;
        let len = u32::from_le_bytes(prefix.try_into().unwrap()) as usize;
        *offset += 4;
        let section = buffer
            .get(*offset..*offset + len)
            .ok_or_else(|| Error::oos("page buffer is too short for its declared level length"))?;
        *offset += len;
        Ok(section)
    };

    let rep_section = read_section(buffer, &mut offset, max_rep_level)?;
    let def_section = read_section(buffer, &mut offset, max_def_level)?;
    let values_section = &buffer[offset..];
    Ok((rep_section, def_section, values_section))
}

/// Splits a v2 page's buffer using the header's declared level byte lengths, which
/// are `0` whenever the column has no levels of that kind.
fn split_v2(buffer: &[u8], rep_len: usize, def_len: usize) -> Result<(&[u8], &[u8], &[u8])> {
    let rep_section = buffer
        .get(0..rep_len)
        .ok_or_else(|| Error::oos("page buffer is too short for its repetition levels"))?;
    let def_section = buffer
        .get(rep_len..rep_len + def_len)
        .ok_or_else(|| Error::oos("page buffer is too short for its definition levels"))?;
    let values_section = &buffer[rep_len + def_len..];
    Ok((rep_section, def_section, values_section))
}

fn decode_int96(values: &[u8], count: usize) -> Result<Vec<Value>> {
    let expected = count * 12;
    let slice = values
        .get(..expected)
        .ok_or_else(|| Error::oos("PLAIN-encoded INT96 page is shorter than declared"))?;
    Ok(slice
        .chunks_exact(12)
        .map(|chunk| {
            let a = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
            let b = u32::from_le_bytes(chunk[4..8].try_into().unwrap());
            let c = u32::from_le_bytes(chunk[8..12].try_into().unwrap());
            Value::Int96([a, b, c])
        })
        .collect())
}

fn decode_fixed_len_binary(values: &[u8], size: usize, count: usize) -> Result<Vec<Value>> {
    let expected = count * size;
    let slice = values
        .get(..expected)
        .ok_or_else(|| Error::oos("PLAIN-encoded FIXED_LEN_BYTE_ARRAY page is shorter than declared"))?;
    Ok(slice
        .chunks_exact(size)
        .map(|chunk| Value::FixedLenByteArray(chunk.to_vec()))
        .collect())
}

/// Decodes `count` non-null values out of a page's values section per its physical
/// type, using `Plain` encoding directly.
fn decode_plain_values(values: &[u8], physical_type: PhysicalType, count: usize) -> Result<Vec<Value>> {
    Ok(match physical_type {
        PhysicalType::Boolean => plain::decode_bool(values, count)
            .into_iter()
            .map(Value::Boolean)
            .collect(),
        PhysicalType::Int32 => plain::decode::<i32>(values)?
            .into_iter()
            .map(Value::Int32)
            .collect(),
        PhysicalType::Int64 => plain::decode::<i64>(values)?
            .into_iter()
            .map(Value::Int64)
            .collect(),
        PhysicalType::Float => plain::decode::<f32>(values)?
            .into_iter()
            .map(Value::Float)
            .collect(),
        PhysicalType::Double => plain::decode::<f64>(values)?
            .into_iter()
            .map(Value::Double)
            .collect(),
        PhysicalType::ByteArray => plain_byte_array::Decoder::new(values, Some(count))
            .map(|slot| Value::ByteArray(slot.to_vec()))
            .collect(),
        PhysicalType::Int96 => decode_int96(values, count)?,
        PhysicalType::FixedLenByteArray(size) => decode_fixed_len_binary(values, size as usize, count)?,
    })
}

/// Resolves `count` dictionary indexes out of a page's values section into their
/// looked-up values, downcasting the attached dictionary per physical type.
fn decode_dictionary_values(
    values: &[u8],
    physical_type: PhysicalType,
    dictionary: &Arc<dyn DictPage>,
    count: usize,
) -> Result<Vec<Value>> {
    let indices = dictionary::decode_indices(values, count)?;
    if indices.len() != count {
        return Err(Error::oos(
            "dictionary index stream yielded fewer values than the page declares",
        ));
    }

    macro_rules! lookup_primitive {
        ($t:ty, $variant:ident) => {{
            let dict = dictionary
                .as_any()
                .downcast_ref::<PrimitivePageDict<$t>>()
                .ok_or_else(|| Error::oos("dictionary page does not match the column's physical type"))?;
            indices
                .iter()
                .map(|&i| {
                    dict.values()
                        .get(i as usize)
                        .copied()
                        .map(Value::$variant)
                        .ok_or_else(|| Error::oos("dictionary index is out of bounds"))
                })
                .collect::<Result<Vec<_>>>()?
        }};
    }

    Ok(match physical_type {
        PhysicalType::Int32 => lookup_primitive!(i32, Int32),
        PhysicalType::Int64 => lookup_primitive!(i64, Int64),
        PhysicalType::Float => lookup_primitive!(f32, Float),
        PhysicalType::Double => lookup_primitive!(f64, Double),
        PhysicalType::ByteArray => {
            let dict = dictionary
                .as_any()
                .downcast_ref::<BinaryPageDict>()
                .ok_or_else(|| Error::oos("dictionary page does not match the column's physical type"))?;
            indices
                .iter()
                .map(|&i| dict.value(i as usize).map(|v| Value::ByteArray(v.to_vec())))
                .collect::<Result<Vec<_>>>()?
        }
        PhysicalType::Int96 | PhysicalType::FixedLenByteArray(_) => {
            let dict = dictionary
                .as_any()
                .downcast_ref::<FixedLenByteArrayPageDict>()
                .ok_or_else(|| Error::oos("dictionary page does not match the column's physical type"))?;
            indices
                .iter()
                .map(|&i| Value::FixedLenByteArray(dict.value(i as usize).to_vec()))
                .collect()
        }
        PhysicalType::Boolean => {
            return Err(Error::oos("boolean columns cannot be dictionary-encoded"))
        }
    })
}

/// Decodes one decompressed data page into its per-position [`LeveledValue`]s, in
/// order (spec.md §4.7 step 3): a position with `definition_level ==
/// max_definition_level` consumes the next decoded value, everything else is a null
/// carrying its recorded levels.
pub fn decode_page(page: &DataPage) -> Result<Vec<LeveledValue>> {
    let descriptor = page.descriptor();
    let max_rep_level = descriptor.max_rep_level();
    let max_def_level = descriptor.max_def_level();
    let num_values = page.num_values();

    let (rep_bytes, def_bytes, values) = match page.header() {
        DataPageHeader::V1(_) => split_v1(page.buffer(), max_rep_level, max_def_level)?,
        DataPageHeader::V2(v2) => split_v2(
            page.buffer(),
            v2.repetition_levels_byte_length as usize,
            v2.definition_levels_byte_length as usize,
        )?,
    };

    let rep_levels = decode_levels(rep_bytes, max_rep_level, num_values)?;
    let def_levels = decode_levels(def_bytes, max_def_level, num_values)?;

    let defined_count = def_levels.iter().filter(|&&d| d == max_def_level).count();

    let physical_type = descriptor
        .type_()
        .physical_type()
        .ok_or_else(|| Error::oos("a data page requires a primitive column"))?;

    let encoding = page.encoding();
    let mut decoded_values = match encoding {
        Encoding::RleDictionary | Encoding::PlainDictionary => {
            let dictionary = page
                .dictionary_page()
                .ok_or_else(|| Error::oos("dictionary-encoded page has no attached dictionary"))?;
            decode_dictionary_values(values, physical_type, dictionary, defined_count)?
        }
        Encoding::Plain => decode_plain_values(values, physical_type, defined_count)?,
        other => {
            return Err(Error::FeatureNotSupported(format!(
                "reading {:?}-encoded data pages is not yet supported",
                other
            )))
        }
    }
    .into_iter();

    rep_levels
        .into_iter()
        .zip(def_levels)
        .map(|(repetition_level, definition_level)| {
            let value = if definition_level == max_def_level {
                Some(decoded_values.next().ok_or_else(|| {
                    Error::oos("value stream ran out before its defined positions did")
                })?)
            } else {
                None
            };
            Ok(LeveledValue::new(repetition_level, definition_level, value))
        })
        .collect()
}

/// A finite, non-restartable iterator over one column chunk's values, in page order
/// (spec.md §4.7 step 4): each item is the leaf column's index together with the
/// reconstructed [`LeveledValue`].
pub struct ColumnChunkIter<R: std::io::Read> {
    column_index: usize,
    pages: PageReader<R>,
    buffered: std::vec::IntoIter<LeveledValue>,
}

impl<R: std::io::Read> ColumnChunkIter<R> {
    pub fn new(pages: PageReader<R>, column_index: usize) -> Self {
        Self {
            column_index,
            pages,
            buffered: Vec::new().into_iter(),
        }
    }
}

impl<R: std::io::Read> Iterator for ColumnChunkIter<R> {
    type Item = Result<(usize, LeveledValue)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.buffered.next() {
                return Some(Ok((self.column_index, value)));
            }

            let compressed = self.pages.next()?;
            let compressed = match compressed {
                Ok(page) => page,
                Err(e) => return Some(Err(e)),
            };

            let page = match decompress(compressed) {
                Ok(page) => page,
                Err(e) => return Some(Err(e)),
            };

            let values = match decode_page(&page) {
                Ok(values) => values,
                Err(e) => return Some(Err(e)),
            };
            self.buffered = values.into_iter();
        }
    }
}

/// Opens `column`'s value iterator directly from its byte range (spec.md §4.7:
/// dictionary page first if present, then every data page's values in order).
pub fn get_column_iterator<R: std::io::Read + std::io::Seek>(
    column: &ColumnChunkMetaData,
    reader: R,
    column_index: usize,
) -> Result<ColumnChunkIter<R>> {
    let pages = super::page::get_page_iterator(column, reader)?;
    Ok(ColumnChunkIter::new(pages, column_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::metadata::{ColumnDescriptor, ColumnPath};
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::ParquetType;
    use crate::write::compress;
    use crate::compression::Compression;

    fn descriptor(max_def_level: i16) -> ColumnDescriptor {
        let repetition = if max_def_level == 0 {
            Repetition::Required
        } else {
            Repetition::Optional
        };
        ColumnDescriptor::new(
            ParquetType::new_primitive(
                "a".to_string(),
                PhysicalType::Int32,
                repetition,
                None,
                None,
            ),
            max_def_level,
            0,
            ColumnPath::new(vec!["a".to_string()]),
        )
    }

    fn v1_header(num_values: i32) -> parquet_format_safe::DataPageHeader {
        parquet_format_safe::DataPageHeader {
            num_values,
            encoding: parquet_format_safe::Encoding::PLAIN,
            definition_level_encoding: parquet_format_safe::Encoding::RLE,
            repetition_level_encoding: parquet_format_safe::Encoding::RLE,
            statistics: None,
        }
    }

    #[test]
    fn decodes_a_required_plain_page() -> Result<()> {
        let mut values_buffer = vec![];
        plain::encode(&[1i32, 2, 3], &mut values_buffer);

        let page = DataPage::new(
            DataPageHeader::V1(v1_header(3)),
            values_buffer,
            None,
            descriptor(0),
            Some(3),
        );

        let decoded = decode_page(&page)?;
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].value, Some(Value::Int32(1)));
        assert_eq!(decoded[1].value, Some(Value::Int32(2)));
        assert_eq!(decoded[2].value, Some(Value::Int32(3)));
        for leveled in &decoded {
            assert_eq!(leveled.definition_level, 0);
            assert_eq!(leveled.repetition_level, 0);
        }
        Ok(())
    }

    #[test]
    fn decodes_an_optional_page_with_a_null() -> Result<()> {
        let def_levels = vec![1i16, 0, 1];
        let mut buffer = vec![];
        let num_bits = min_len_u32(1) as u8;
        let mut encoded = vec![];
        hybrid_rle::encode_u32(
            &mut encoded,
            def_levels.iter().map(|&l| l as u32),
            num_bits,
        )
        .unwrap();
        buffer.extend_from_slice(&(encoded.len() as u32).to_le_bytes());
        buffer.extend_from_slice(&encoded);

        let mut values_buffer = vec![];
        plain::encode(&[10i32, 20], &mut values_buffer);
        buffer.extend_from_slice(&values_buffer);

        let page = DataPage::new(
            DataPageHeader::V1(v1_header(3)),
            buffer,
            None,
            descriptor(1),
            Some(3),
        );

        let decoded = decode_page(&page)?;
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].value, Some(Value::Int32(10)));
        assert_eq!(decoded[1].value, None);
        assert_eq!(decoded[1].definition_level, 0);
        assert_eq!(decoded[2].value, Some(Value::Int32(20)));
        Ok(())
    }

    #[test]
    fn end_to_end_iterator_reads_back_a_dictionary_page() -> Result<()> {
        // Build a dictionary-encoded chunk the way the column writer would (through
        // `write_column_chunk`), then read it back through `ColumnChunkIter`.
        use crate::metadata::ColumnChunkMetaData;
        use crate::page::{CompressedPage, EncodedDictPage};
        use crate::write::{compress_dict, write_column_chunk, DynStreamingIterator};

        let descr = descriptor(0);

        let mut dict_values = vec![];
        plain::encode(&[7i32, 9], &mut dict_values);
        let encoded_dict = EncodedDictPage::new(dict_values, 2);
        let compressed_dict = compress_dict(encoded_dict, Compression::Uncompressed)?;

        let mut indices_buffer = vec![];
        dictionary::encode_indices(&mut indices_buffer, &[1, 0, 1], 2).unwrap();
        let header = parquet_format_safe::DataPageHeader {
            num_values: 3,
            encoding: parquet_format_safe::Encoding::RLE_DICTIONARY,
            definition_level_encoding: parquet_format_safe::Encoding::RLE,
            repetition_level_encoding: parquet_format_safe::Encoding::RLE,
            statistics: None,
        };
        let page = DataPage::new(
            DataPageHeader::V1(header),
            indices_buffer,
            None,
            descr.clone(),
            Some(3),
        );
        let compressed_data = compress(page, Compression::Uncompressed)?;

        let pages = vec![
            Ok::<_, Error>(CompressedPage::Dict(compressed_dict)),
            Ok::<_, Error>(CompressedPage::Data(compressed_data)),
        ];
        let pages = DynStreamingIterator::new(fallible_streaming_iterator::convert(
            pages.into_iter(),
        ));

        let mut writer = Cursor::new(Vec::new());
        let (column_chunk, _written, _specs) =
            write_column_chunk(&mut writer, 0, &descr, Compression::Uncompressed, pages)?;
        let bytes = writer.into_inner();

        let chunk_metadata = ColumnChunkMetaData::new(column_chunk, descr);
        let reader = Cursor::new(bytes);
        let iter = get_column_iterator(&chunk_metadata, reader, 0)?;

        let values: Vec<_> = iter.collect::<Result<Vec<_>>>()?;
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], (0, LeveledValue::new(0, 0, Some(Value::Int32(9)))));
        assert_eq!(values[1], (0, LeveledValue::new(0, 0, Some(Value::Int32(7)))));
        assert_eq!(values[2], (0, LeveledValue::new(0, 0, Some(Value::Int32(9)))));
        Ok(())
    }
}
