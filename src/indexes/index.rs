use std::any::Any;

use parquet_format_safe::ColumnIndex;

use crate::error::{Error, Result};
use crate::parquet_bridge::BoundaryOrder;
use crate::schema::types::{AssociatedPhysicalType, PhysicalType};

/// A column's page index (spec.md §4.8, "Page index"): one [`PageIndex`] per flushed
/// data page, used for page-level predicate skipping.
pub trait Index: Send + Sync + std::fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn physical_type(&self) -> PhysicalType;
}

/// Min/max/null-count bounds for a single page.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct PageIndex<T> {
    /// None when every value in the page is null.
    pub min: Option<T>,
    /// None when every value in the page is null.
    pub max: Option<T>,
    pub null_count: Option<i64>,
}

fn split_pages<T>(
    index: ColumnIndex,
    decode: impl Fn(Vec<u8>) -> Result<T>,
) -> Result<(Vec<PageIndex<T>>, BoundaryOrder)> {
    let len = index.min_values.len();

    let null_counts = index
        .null_counts
        .map(|x| x.into_iter().map(Some).collect::<Vec<_>>())
        .unwrap_or_else(|| vec![None; len]);

    let indexes = index
        .min_values
        .into_iter()
        .zip(index.max_values.into_iter())
        .zip(index.null_pages.into_iter())
        .zip(null_counts.into_iter())
        .map(|(((min, max), is_null), null_count)| {
            let (min, max) = if is_null {
                (None, None)
            } else {
                (Some(decode(min)?), Some(decode(max)?))
            };
            Ok(PageIndex {
                min,
                max,
                null_count,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((indexes, index.boundary_order.try_into()?))
}

/// The page index of a column stored as one of the fixed-width native types.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct NativeIndex<T: AssociatedPhysicalType> {
    pub indexes: Vec<PageIndex<T>>,
    pub boundary_order: BoundaryOrder,
}

impl<T: AssociatedPhysicalType> TryFrom<ColumnIndex> for NativeIndex<T> {
    type Error = Error;

    fn try_from(index: ColumnIndex) -> Result<Self> {
        let (indexes, boundary_order) = split_pages(index, |bytes| {
            let bytes: T::Bytes = bytes
                .as_slice()
                .try_into()
                .map_err(|_| Error::oos("page index value has the wrong byte width"))?;
            Ok(T::from_le_bytes(bytes))
        })?;
        Ok(Self {
            indexes,
            boundary_order,
        })
    }
}

impl<T: AssociatedPhysicalType> Index for NativeIndex<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        T::PHYSICAL_TYPE
    }
}

/// The page index of a `byte_array` column; min/max are stored as raw byte copies.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct ByteIndex {
    pub indexes: Vec<PageIndex<Vec<u8>>>,
    pub boundary_order: BoundaryOrder,
}

impl TryFrom<ColumnIndex> for ByteIndex {
    type Error = Error;

    fn try_from(index: ColumnIndex) -> Result<Self> {
        let (indexes, boundary_order) = split_pages(index, Ok)?;
        Ok(Self {
            indexes,
            boundary_order,
        })
    }
}

impl Index for ByteIndex {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        PhysicalType::ByteArray
    }
}

/// The page index of a `fixed_len_byte_array` (or `int96`) column.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct FixedLenByteIndex {
    pub type_: PhysicalType,
    pub indexes: Vec<PageIndex<Vec<u8>>>,
    pub boundary_order: BoundaryOrder,
}

impl TryFrom<(ColumnIndex, PhysicalType)> for FixedLenByteIndex {
    type Error = Error;

    fn try_from((index, type_): (ColumnIndex, PhysicalType)) -> Result<Self> {
        let (indexes, boundary_order) = split_pages(index, Ok)?;
        Ok(Self {
            type_,
            indexes,
            boundary_order,
        })
    }
}

impl Index for FixedLenByteIndex {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        self.type_
    }
}
