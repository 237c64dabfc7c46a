use std::io::Write;

use parquet_format_safe::thrift::protocol::TCompactOutputProtocol;
use parquet_format_safe::{BoundaryOrder, ColumnIndex, OffsetIndex, PageLocation};

use crate::error::{Error, Result};
use crate::parquet_bridge::PageType;
use crate::statistics::serialize_statistics;
use crate::write::page::PageWriteSpec;

fn is_data_page(page: &PageWriteSpec) -> bool {
    matches!(page.page_type, PageType::DataPage | PageType::DataPageV2)
}

fn serialize_column_index(pages: &[PageWriteSpec]) -> Result<ColumnIndex> {
    let mut null_pages = Vec::with_capacity(pages.len());
    let mut min_values = Vec::with_capacity(pages.len());
    let mut max_values = Vec::with_capacity(pages.len());
    let mut null_counts = Vec::with_capacity(pages.len());

    pages
        .iter()
        .filter(|x| is_data_page(x))
        .try_for_each(|spec| {
            let stats = spec
                .statistics
                .as_ref()
                .ok_or_else(|| Error::oos("page index requires per-page statistics"))?;
            let stats = serialize_statistics(stats.as_ref());

            let null_count = stats
                .null_count
                .ok_or_else(|| Error::oos("null count of a page is required for the page index"))?;

            null_counts.push(null_count);
            if null_count as usize == spec.num_values {
                min_values.push(vec![0]);
                max_values.push(vec![0]);
                null_pages.push(true);
            } else {
                min_values.push(
                    stats
                        .min_value
                        .ok_or_else(|| Error::oos("min value of a page is required for the page index"))?,
                );
                max_values.push(
                    stats
                        .max_value
                        .ok_or_else(|| Error::oos("max value of a page is required for the page index"))?,
                );
                null_pages.push(false);
            }
            Result::Ok(())
        })?;

    Ok(ColumnIndex {
        null_pages,
        min_values,
        max_values,
        boundary_order: BoundaryOrder::UNORDERED,
        null_counts: Some(null_counts),
    })
}

fn serialize_offset_index(pages: &[PageWriteSpec]) -> Result<OffsetIndex> {
    let mut first_row_index = 0i64;
    let page_locations = pages
        .iter()
        .filter(|x| is_data_page(x))
        .map(|spec| {
            let location = PageLocation {
                offset: spec.offset.try_into()?,
                compressed_page_size: spec.bytes_written.try_into()?,
                first_row_index,
            };
            let num_rows = spec
                .num_rows
                .ok_or_else(|| Error::oos("offset index requires every page's row count"))?;
            first_row_index += num_rows as i64;
            Ok(location)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(OffsetIndex { page_locations })
}

/// Serializes and writes the `ColumnIndex` thrift record for one column chunk's
/// flushed pages, returning the number of bytes written.
pub fn write_column_index<W: Write>(writer: &mut W, pages: &[PageWriteSpec]) -> Result<u64> {
    let index = serialize_column_index(pages)?;
    let mut protocol = TCompactOutputProtocol::new(writer);
    Ok(index.write_to_out_protocol(&mut protocol)? as u64)
}

/// Serializes and writes the `OffsetIndex` thrift record for one column chunk's
/// flushed pages, returning the number of bytes written.
pub fn write_offset_index<W: Write>(writer: &mut W, pages: &[PageWriteSpec]) -> Result<u64> {
    let index = serialize_offset_index(pages)?;
    let mut protocol = TCompactOutputProtocol::new(&mut *writer);
    Ok(index.write_to_out_protocol(&mut protocol)? as u64)
}
