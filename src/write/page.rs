use std::io::Write;
use std::sync::Arc;

use parquet_format_safe::{DictionaryPageHeader, Encoding as ThriftEncoding, PageType as ThriftPageType};

use crate::error::{Error, Result};
use crate::page::{CompressedDataPage, CompressedDictPage, CompressedPage, DataPageHeader, ParquetPageHeader};
use crate::parquet_bridge::PageType;
use crate::statistics::Statistics;

fn maybe_bytes(uncompressed: usize, compressed: usize) -> Result<(i32, i32)> {
    let uncompressed_page_size: i32 = uncompressed.try_into().map_err(|_| {
        Error::oos(format!(
            "a page can only contain i32::MAX uncompressed bytes, this one contains {}",
            uncompressed
        ))
    })?;

    let compressed_page_size: i32 = compressed.try_into().map_err(|_| {
        Error::oos(format!(
            "a page can only contain i32::MAX compressed bytes, this one contains {}",
            compressed
        ))
    })?;

    Ok((uncompressed_page_size, compressed_page_size))
}

/// Metrics and metadata recorded for one written page, the unit both the column chunk
/// builder and the page index serializer aggregate over.
pub struct PageWriteSpec {
    pub header: ParquetPageHeader,
    pub header_size: u64,
    pub offset: u64,
    pub bytes_written: u64,
    pub statistics: Option<Arc<dyn Statistics>>,
    pub page_type: PageType,
    pub num_values: usize,
    pub num_rows: Option<usize>,
}

pub(crate) fn is_data_page(page: &PageWriteSpec) -> bool {
    matches!(page.page_type, PageType::DataPage | PageType::DataPageV2)
}

/// Writes a page's thrift header followed by its compressed body, computing a CRC32C
/// over the body (spec.md §4.6 `flushPage()` step 5) and returning the metrics needed
/// to later assemble the column chunk's metadata and page index.
pub fn write_page<W: Write>(
    writer: &mut W,
    offset: u64,
    compressed_page: &CompressedPage,
) -> Result<PageWriteSpec> {
    let crc = crc32c::crc32c(match compressed_page {
        CompressedPage::Data(page) => page.buffer(),
        CompressedPage::Dict(page) => page.buffer(),
    });

    let header = match &compressed_page {
        CompressedPage::Data(page) => assemble_data_page_header(page, crc),
        CompressedPage::Dict(page) => assemble_dict_page_header(page, crc),
    }?;

    let mut protocol = parquet_format_safe::thrift::protocol::TCompactOutputProtocol::new(&mut *writer);
    let header_size = header.write_to_out_protocol(&mut protocol)? as u64;
    let mut bytes_written = header_size;

    bytes_written += match &compressed_page {
        CompressedPage::Data(page) => {
            writer.write_all(page.buffer())?;
            page.buffer().len() as u64
        }
        CompressedPage::Dict(page) => {
            writer.write_all(page.buffer())?;
            page.buffer().len() as u64
        }
    };

    let (page_type, statistics, num_values, num_rows) = match &compressed_page {
        CompressedPage::Data(page) => {
            let page_type = match page.header() {
                DataPageHeader::V1(_) => PageType::DataPage,
                DataPageHeader::V2(_) => PageType::DataPageV2,
            };
            (
                page_type,
                page.statistics().transpose()?,
                page.num_values(),
                page.num_rows(),
            )
        }
        CompressedPage::Dict(page) => (PageType::DictionaryPage, None, page.num_values(), None),
    };

    Ok(PageWriteSpec {
        header,
        header_size,
        offset,
        bytes_written,
        statistics,
        page_type,
        num_values,
        num_rows,
    })
}

fn assemble_data_page_header(page: &CompressedDataPage, crc: u32) -> Result<ParquetPageHeader> {
    let (uncompressed_page_size, compressed_page_size) =
        maybe_bytes(page.uncompressed_size(), page.compressed_size())?;

    let mut page_header = ParquetPageHeader {
        type_: match page.header() {
            DataPageHeader::V1(_) => ThriftPageType::DATA_PAGE,
            DataPageHeader::V2(_) => ThriftPageType::DATA_PAGE_V2,
        },
        uncompressed_page_size,
        compressed_page_size,
        crc: Some(crc as i32),
        data_page_header: None,
        index_page_header: None,
        dictionary_page_header: None,
        data_page_header_v2: None,
    };

    match page.header() {
        DataPageHeader::V1(header) => page_header.data_page_header = Some(header.clone()),
        DataPageHeader::V2(header) => page_header.data_page_header_v2 = Some(header.clone()),
    }
    Ok(page_header)
}

fn assemble_dict_page_header(page: &CompressedDictPage, crc: u32) -> Result<ParquetPageHeader> {
    let (uncompressed_page_size, compressed_page_size) =
        maybe_bytes(page.uncompressed_size(), page.buffer().len())?;

    let num_values: i32 = page.num_values().try_into().map_err(|_| {
        Error::oos(format!(
            "a dictionary page can only contain i32::MAX items, this one contains {}",
            page.num_values()
        ))
    })?;

    Ok(ParquetPageHeader {
        type_: ThriftPageType::DICTIONARY_PAGE,
        uncompressed_page_size,
        compressed_page_size,
        crc: Some(crc as i32),
        data_page_header: None,
        index_page_header: None,
        dictionary_page_header: Some(DictionaryPageHeader {
            num_values,
            encoding: ThriftEncoding::PLAIN,
            is_sorted: None,
        }),
        data_page_header_v2: None,
    })
}
