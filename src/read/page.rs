//! Reads one column chunk's raw page stream back into [`CompressedPage`]s (spec.md
//! §4.7, step 1-2): parses each page's thrift header, validates its CRC, and decodes
//! the dictionary page (if any) up front so every subsequent data page can carry a
//! reference to it.

use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

use parquet_format_safe::thrift::protocol::TCompactInputProtocol;

use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::metadata::ColumnChunkMetaData;
use crate::page::{
    read_dict_page, CompressedDataPage, DataPageHeader, DictPage, EncodedDictPage, PageType,
    ParquetPageHeader,
};

/// Seeks `reader` to the start of `column`'s byte range and returns a [`PageReader`]
/// bounded to that column chunk.
pub fn get_page_iterator<R: Read + Seek>(
    column: &ColumnChunkMetaData,
    mut reader: R,
) -> Result<PageReader<R>> {
    let (start, _) = column.byte_range()?;
    reader.seek(SeekFrom::Start(start))?;
    PageReader::new(reader, column)
}

/// A finite, non-restartable iterator of one column chunk's [`CompressedDataPage`]s,
/// in on-disk order. Dictionary pages are consumed internally: they never appear as
/// an item, they're decoded once and attached to every data page that follows.
pub struct PageReader<R: Read> {
    reader: R,
    compression: Compression,
    seen_num_values: i64,
    total_num_values: i64,
    current_dictionary: Option<Arc<dyn DictPage>>,
    descriptor: crate::metadata::ColumnDescriptor,
}

impl<R: Read> PageReader<R> {
    pub fn new(reader: R, column: &ColumnChunkMetaData) -> Result<Self> {
        Ok(Self {
            reader,
            compression: column.compression()?,
            seen_num_values: 0,
            total_num_values: column.num_values()?,
            current_dictionary: None,
            descriptor: column.column_descriptor().clone(),
        })
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_page_header(&mut self) -> Result<ParquetPageHeader> {
        let mut protocol = TCompactInputProtocol::new(&mut self.reader);
        Ok(ParquetPageHeader::read_from_in_protocol(&mut protocol)?)
    }

    fn build_next_page(&mut self) -> Result<Option<CompressedDataPage>> {
        let header = self.read_page_header()?;

        let read_size = header.compressed_page_size as usize;
        let mut buffer = vec![0u8; read_size];
        if read_size > 0 {
            self.reader.read_exact(&mut buffer)?;
        }

        if let Some(crc) = header.crc {
            let actual = crc32c::crc32c(&buffer) as i32;
            if actual != crc {
                return Err(Error::oos(format!(
                    "page CRC mismatch: header says {}, computed {}",
                    crc, actual
                )));
            }
        }

        let type_: PageType = header.type_.try_into()?;
        match type_ {
            PageType::DictionaryPage => {
                let dict_header = header
                    .dictionary_page_header
                    .as_ref()
                    .ok_or_else(|| Error::oos("dictionary page is missing its dictionary_page_header"))?;

                let encoded = EncodedDictPage::new(buffer, dict_header.num_values as usize);
                let physical_type = self.descriptor.type_().physical_type().ok_or_else(|| {
                    Error::oos("a dictionary page requires a primitive column")
                })?;
                let dict = read_dict_page(
                    &encoded,
                    (self.compression, header.uncompressed_page_size as usize),
                    &physical_type,
                )?;
                self.current_dictionary = Some(dict);
                Ok(None)
            }
            PageType::DataPage => {
                let data_header = header
                    .data_page_header
                    .ok_or_else(|| Error::oos("data page is missing its data_page_header"))?;
                self.seen_num_values += data_header.num_values as i64;
                Ok(Some(CompressedDataPage::new(
                    DataPageHeader::V1(data_header),
                    buffer,
                    self.compression,
                    header.uncompressed_page_size as usize,
                    self.current_dictionary.clone(),
                    self.descriptor.clone(),
                    None,
                )))
            }
            PageType::DataPageV2 => {
                let data_header = header
                    .data_page_header_v2
                    .ok_or_else(|| Error::oos("data page v2 is missing its data_page_header_v2"))?;
                self.seen_num_values += data_header.num_values as i64;
                let num_rows = Some(data_header.num_rows as usize);
                Ok(Some(CompressedDataPage::new(
                    DataPageHeader::V2(data_header),
                    buffer,
                    self.compression,
                    header.uncompressed_page_size as usize,
                    self.current_dictionary.clone(),
                    self.descriptor.clone(),
                    num_rows,
                )))
            }
        }
    }
}

impl<R: Read> Iterator for PageReader<R> {
    type Item = Result<CompressedDataPage>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.seen_num_values < self.total_num_values {
            match self.build_next_page() {
                Ok(Some(page)) => return Some(Ok(page)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::metadata::ColumnPath;
    use crate::page::{CompressedPage, DataPage};
    use crate::parquet_bridge::Repetition;
    use crate::schema::types::{ParquetType, PhysicalType};
    use crate::write::{compress, write_page};

    fn descriptor() -> crate::metadata::ColumnDescriptor {
        crate::metadata::ColumnDescriptor::new(
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
    fn reads_back_a_single_v1_page() -> Result<()> {
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
            descriptor(),
            Some(2),
        );
        let compressed = crate::write::compress(page, Compression::Uncompressed)?;

        let mut bytes = Cursor::new(Vec::new());
        crate::write::write_page(&mut bytes, 0, &CompressedPage::Data(compressed))?;
        let bytes = bytes.into_inner();

        let mut reader = PageReader {
            reader: Cursor::new(bytes),
            compression: Compression::Uncompressed,
            seen_num_values: 0,
            total_num_values: 2,
            current_dictionary: None,
            descriptor: descriptor(),
        };

        let page = reader.next().unwrap()?;
        assert_eq!(page.buffer(), &[1, 0, 0, 0, 2, 0, 0, 0]);
        assert!(reader.next().is_none());
        Ok(())
    }

    #[test]
    fn rejects_a_corrupted_crc() -> Result<()> {
        let header = parquet_format_safe::DataPageHeader {
            num_values: 1,
            encoding: parquet_format_safe::Encoding::PLAIN,
            definition_level_encoding: parquet_format_safe::Encoding::RLE,
            repetition_level_encoding: parquet_format_safe::Encoding::RLE,
            statistics: None,
        };
        let page = DataPage::new(
            DataPageHeader::V1(header),
            vec![1, 0, 0, 0],
            None,
            descriptor(),
            Some(1),
        );
        let compressed = crate::write::compress(page, Compression::Uncompressed)?;

        let mut bytes = Cursor::new(Vec::new());
        crate::write::write_page(&mut bytes, 0, &CompressedPage::Data(compressed))?;
        let mut bytes = bytes.into_inner();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;

        let mut reader = PageReader {
            reader: Cursor::new(bytes),
            compression: Compression::Uncompressed,
            seen_num_values: 0,
            total_num_values: 1,
            current_dictionary: None,
            descriptor: descriptor(),
        };
        assert!(reader.next().unwrap().is_err());
        Ok(())
    }
}
