use parquet_format_safe::PageLocation;

use crate::error::Result;

use super::index::PageIndex;

/// A half-open range of rows: `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: u64,
    pub length: u64,
}

impl Interval {
    pub fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }
}

/// Row intervals covered by each page, derived from consecutive `firstRowIndex`es.
fn compute_page_row_intervals(
    locations: &[PageLocation],
    num_rows: u64,
) -> Result<Vec<Interval>> {
    if locations.is_empty() {
        return Ok(vec![]);
    }

    let last = (|| {
        let first = locations.last().unwrap().first_row_index;
        let start = u64::try_from(first)?;
        let length = num_rows - start;
        Result::Ok(Interval::new(start, length))
    })();

    locations
        .windows(2)
        .map(|x| {
            let start = u64::try_from(x[0].first_row_index)?;
            let length = u64::try_from(x[1].first_row_index - x[0].first_row_index)?;
            Ok(Interval::new(start, length))
        })
        .chain(std::iter::once(last))
        .collect()
}

/// Returns the `(start_row, num_rows)` of every page whose `PageIndex` is accepted by
/// `selector`, used to turn a predicate over min/max/null_count into the set of row
/// ranges a scan needs to materialise.
pub fn compute_rows<T>(
    indexes: &[PageIndex<T>],
    locations: &[PageLocation],
    num_rows: u64,
    selector: &dyn Fn(&PageIndex<T>) -> bool,
) -> Result<Vec<(u64, u64)>> {
    let page_intervals = compute_page_row_intervals(locations, num_rows)?;

    Ok(indexes
        .iter()
        .zip(page_intervals.iter())
        .filter_map(|(page, interval)| {
            if selector(page) {
                Some((interval.start, interval.length))
            } else {
                None
            }
        })
        .collect())
}

/// Either the rows of a page to materialise, or the bytes to skip over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilteredPage {
    Select {
        start: u64,
        length: usize,
        rows_offset: usize,
        rows_length: usize,
    },
    Skip {
        start: u64,
        length: usize,
        num_rows: usize,
    },
}

impl FilteredPage {
    pub fn start(&self) -> u64 {
        match self {
            Self::Select { start, .. } => *start,
            Self::Skip { start, .. } => *start,
        }
    }
}

fn is_in(probe: Interval, intervals: &[Interval]) -> Option<Interval> {
    intervals.iter().find_map(|interval| {
        let interval_end = interval.start + interval.length;
        let probe_end = probe.start + probe.length;
        let overlaps = (probe.start < interval_end) && (probe_end > interval.start);
        if overlaps {
            let start = interval.start.max(probe.start);
            let end = interval_end.min(probe_end);
            Some(Interval::new(start - probe.start, end - start))
        } else {
            None
        }
    })
}

/// Splits a chunk's pages into selected (overlapping `intervals`) and skipped ranges.
pub fn select_pages(
    intervals: &[Interval],
    locations: &[PageLocation],
    num_rows: u64,
) -> Result<Vec<FilteredPage>> {
    let page_intervals = compute_page_row_intervals(locations, num_rows)?;

    page_intervals
        .into_iter()
        .zip(locations.iter())
        .map(|(interval, location)| {
            Ok(if let Some(overlap) = is_in(interval, intervals) {
                FilteredPage::Select {
                    start: location.offset.try_into()?,
                    length: location.compressed_page_size.try_into()?,
                    rows_offset: overlap.start.try_into()?,
                    rows_length: overlap.length.try_into()?,
                }
            } else {
                FilteredPage::Skip {
                    start: location.offset.try_into()?,
                    length: location.compressed_page_size.try_into()?,
                    num_rows: interval.length.try_into()?,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_covers_all_rows() {
        let index = vec![PageIndex {
            min: Some(0i32),
            max: Some(10),
            null_count: Some(0),
        }];
        let locations = &[PageLocation {
            offset: 100,
            compressed_page_size: 10,
            first_row_index: 0,
        }];
        let selector = |_: &PageIndex<i32>| true;

        let row_intervals = compute_rows(&index, locations, 10, &selector).unwrap();
        assert_eq!(row_intervals, vec![(0, 10)]);
    }

    #[test]
    fn selector_picks_second_page() {
        let index = vec![
            PageIndex {
                min: Some(vec![0]),
                max: Some(vec![8, 9]),
                null_count: Some(0),
            },
            PageIndex {
                min: Some(vec![20]),
                max: Some(vec![98, 99]),
                null_count: Some(0),
            },
        ];
        let locations = &[
            PageLocation {
                offset: 100,
                compressed_page_size: 10,
                first_row_index: 0,
            },
            PageLocation {
                offset: 110,
                compressed_page_size: 20,
                first_row_index: 5,
            },
        ];
        let selector = |page: &PageIndex<Vec<u8>>| {
            page.max
                .as_ref()
                .map(|x| x.as_slice() > [97].as_slice())
                .unwrap_or(false)
        };

        let row_intervals = compute_rows(&index, locations, 10, &selector).unwrap();
        assert_eq!(row_intervals, vec![(5, 5)]);
    }
}
