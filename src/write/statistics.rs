use std::sync::Arc;

use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;
use crate::statistics::*;
use crate::types::NativeType;

/// Combines one chunk-level statistics record per flushed page into the single record
/// stored in the column chunk's metadata (spec.md §4.6: "min/max/null-count are
/// accumulated across every page written to the chunk").
pub fn reduce(stats: &[&Option<Arc<dyn Statistics>>]) -> Result<Option<Arc<dyn Statistics>>> {
    if stats.is_empty() {
        return Ok(None);
    }
    let stats = stats
        .iter()
        .filter_map(|x| x.as_ref())
        .map(|x| x.as_ref())
        .collect::<Vec<&dyn Statistics>>();
    if stats.is_empty() {
        return Ok(None);
    };

    let same_type = stats
        .iter()
        .skip(1)
        .all(|x| x.physical_type() == stats[0].physical_type());
    if !same_type {
        return Err(Error::oos(
            "the statistics being reduced do not all have the same physical type",
        ));
    };
    Ok(match stats[0].physical_type() {
        PhysicalType::Boolean => {
            let stats = stats.iter().map(|x| x.as_any().downcast_ref().unwrap());
            Some(Arc::new(reduce_boolean(stats)) as Arc<dyn Statistics>)
        }
        PhysicalType::Int32 => {
            let stats = stats.iter().map(|x| x.as_any().downcast_ref().unwrap());
            Some(Arc::new(reduce_primitive::<i32, _>(stats)))
        }
        PhysicalType::Int64 => {
            let stats = stats.iter().map(|x| x.as_any().downcast_ref().unwrap());
            Some(Arc::new(reduce_primitive::<i64, _>(stats)))
        }
        PhysicalType::Float => {
            let stats = stats.iter().map(|x| x.as_any().downcast_ref().unwrap());
            Some(Arc::new(reduce_primitive::<f32, _>(stats)))
        }
        PhysicalType::Double => {
            let stats = stats.iter().map(|x| x.as_any().downcast_ref().unwrap());
            Some(Arc::new(reduce_primitive::<f64, _>(stats)))
        }
        PhysicalType::ByteArray => {
            let stats = stats.iter().map(|x| x.as_any().downcast_ref().unwrap());
            Some(Arc::new(reduce_binary(stats)))
        }
        PhysicalType::FixedLenByteArray(_) => {
            let stats = stats.iter().map(|x| x.as_any().downcast_ref().unwrap());
            Some(Arc::new(reduce_fixed_len(stats)))
        }
        PhysicalType::Int96 => {
            // Int96 carries no usable ordering (it is the deprecated 12-byte
            // timestamp encoding); only its null count is meaningful to aggregate.
            let null_count = stats.iter().try_fold(0i64, |acc, x| x.null_count().map(|n| acc + n));
            Some(Arc::new(Int96NullCountStatistics { null_count }))
        }
    })
}

fn reduce_binary<'a, I: Iterator<Item = &'a BinaryStatistics>>(mut stats: I) -> BinaryStatistics {
    let initial = stats.next().unwrap().clone();
    stats.fold(initial, |mut acc, new| {
        acc.min_value = match (acc.min_value, &new.min_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(x.clone()),
            (Some(x), Some(y)) => Some(ord_bytes(x, y.clone(), false)),
        };
        acc.max_value = match (acc.max_value, &new.max_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(x.clone()),
            (Some(x), Some(y)) => Some(ord_bytes(x, y.clone(), true)),
        };
        acc.null_count = match (acc.null_count, &new.null_count) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(x + *y),
        };
        acc.distinct_count = None;
        acc
    })
}

fn reduce_fixed_len<'a, I: Iterator<Item = &'a FixedLenStatistics>>(
    mut stats: I,
) -> FixedLenStatistics {
    let initial = stats.next().unwrap().clone();
    stats.fold(initial, |mut acc, new| {
        acc.min_value = match (acc.min_value, &new.min_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(x.clone()),
            (Some(x), Some(y)) => Some(ord_bytes(x, y.clone(), false)),
        };
        acc.max_value = match (acc.max_value, &new.max_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(x.clone()),
            (Some(x), Some(y)) => Some(ord_bytes(x, y.clone(), true)),
        };
        acc.null_count = match (acc.null_count, &new.null_count) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(x + *y),
        };
        acc.distinct_count = None;
        acc
    })
}

fn ord_bytes(a: Vec<u8>, b: Vec<u8>, max: bool) -> Vec<u8> {
    for (v1, v2) in a.iter().zip(b.iter()) {
        match v1.cmp(v2) {
            std::cmp::Ordering::Greater => return if max { a } else { b },
            std::cmp::Ordering::Less => return if max { b } else { a },
            _ => {}
        }
    }
    a
}

fn reduce_boolean<'a, I: Iterator<Item = &'a BooleanStatistics>>(
    mut stats: I,
) -> BooleanStatistics {
    let initial = stats.next().unwrap().clone();
    stats.fold(initial, |mut acc, new| {
        acc.min_value = match (acc.min_value, &new.min_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(x & *y),
        };
        acc.max_value = match (acc.max_value, &new.max_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(x | *y),
        };
        acc.null_count = match (acc.null_count, &new.null_count) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(x + *y),
        };
        acc.distinct_count = None;
        acc
    })
}

fn reduce_primitive<
    'a,
    T: NativeType + std::cmp::PartialOrd,
    I: Iterator<Item = &'a PrimitiveStatistics<T>>,
>(
    mut stats: I,
) -> PrimitiveStatistics<T> {
    let initial = stats.next().unwrap().clone();
    stats.fold(initial, |mut acc, new| {
        acc.min_value = match (acc.min_value, &new.min_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(if x > *y { *y } else { x }),
        };
        acc.max_value = match (acc.max_value, &new.max_value) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(if x < *y { x } else { *y }),
        };
        acc.null_count = match (acc.null_count, &new.null_count) {
            (None, None) => None,
            (Some(x), None) => Some(x),
            (None, Some(x)) => Some(*x),
            (Some(x), Some(y)) => Some(x + *y),
        };
        acc.distinct_count = None;
        acc
    })
}

/// A null-count-only statistics record, the only thing this crate tracks for Int96
/// columns (see [`PhysicalType::Int96`]).
#[derive(Debug)]
struct Int96NullCountStatistics {
    null_count: Option<i64>,
}

impl Statistics for Int96NullCountStatistics {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        PhysicalType::Int96
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_primitive_min_max() {
        let a: Arc<dyn Statistics> = Arc::new(PrimitiveStatistics::<i32> {
            null_count: Some(1),
            distinct_count: None,
            max_value: Some(10),
            min_value: Some(1),
        });
        let b: Arc<dyn Statistics> = Arc::new(PrimitiveStatistics::<i32> {
            null_count: Some(2),
            distinct_count: None,
            max_value: Some(20),
            min_value: Some(-5),
        });
        let reduced = reduce(&[&Some(a), &Some(b)]).unwrap().unwrap();
        let reduced = reduced
            .as_any()
            .downcast_ref::<PrimitiveStatistics<i32>>()
            .unwrap();
        assert_eq!(reduced.min_value, Some(-5));
        assert_eq!(reduced.max_value, Some(20));
        assert_eq!(reduced.null_count, Some(3));
    }

    #[test]
    fn empty_input_reduces_to_none() {
        assert!(reduce(&[]).unwrap().is_none());
    }

    #[test]
    fn mismatched_physical_types_error() {
        let a: Arc<dyn Statistics> = Arc::new(PrimitiveStatistics::<i32> {
            null_count: None,
            distinct_count: None,
            max_value: Some(1),
            min_value: Some(1),
        });
        let b: Arc<dyn Statistics> = Arc::new(PrimitiveStatistics::<i64> {
            null_count: None,
            distinct_count: None,
            max_value: Some(1),
            min_value: Some(1),
        });
        assert!(reduce(&[&Some(a), &Some(b)]).is_err());
    }
}
