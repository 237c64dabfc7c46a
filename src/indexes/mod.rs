//! `ColumnIndex`/`OffsetIndex` page-index records (spec.md §4.8 "Page index"):
//! per-page min/max/null-count bounds plus page byte locations, letting a reader skip
//! whole pages a predicate can't match.

mod deserialize;
mod index;
mod intervals;
mod read;
mod write;

pub use deserialize::deserialize;
pub use index::{ByteIndex, FixedLenByteIndex, Index, NativeIndex, PageIndex};
pub use intervals::{compute_rows, select_pages, FilteredPage, Interval};
pub use read::{read_columns_indexes, read_pages_locations};
pub use write::{write_column_index, write_offset_index};
