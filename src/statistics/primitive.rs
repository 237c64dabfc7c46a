use std::any::Any;
use std::sync::Arc;

use parquet_format_safe::Statistics as ThriftStatistics;

use crate::error::{Error, Result};
use crate::schema::types::{AssociatedPhysicalType, PhysicalType};

use super::Statistics;

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveStatistics<T: AssociatedPhysicalType> {
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub max_value: Option<T>,
    pub min_value: Option<T>,
}

impl<T: AssociatedPhysicalType> Statistics for PrimitiveStatistics<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        T::PHYSICAL_TYPE
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

fn decode<T: AssociatedPhysicalType>(bytes: &[u8]) -> Result<T> {
    let bytes: T::Bytes = bytes
        .try_into()
        .map_err(|_| Error::oos("statistics value has the wrong byte width"))?;
    Ok(T::from_le_bytes(bytes))
}

pub(super) fn read<T: AssociatedPhysicalType + 'static>(
    thrift: &ThriftStatistics,
) -> Result<Arc<dyn Statistics>> {
    let max_value = thrift
        .max_value
        .as_deref()
        .or(thrift.max.as_deref())
        .map(decode::<T>)
        .transpose()?;
    let min_value = thrift
        .min_value
        .as_deref()
        .or(thrift.min.as_deref())
        .map(decode::<T>)
        .transpose()?;
    Ok(Arc::new(PrimitiveStatistics::<T> {
        null_count: thrift.null_count,
        distinct_count: thrift.distinct_count,
        max_value,
        min_value,
    }))
}

pub(super) fn write<T: AssociatedPhysicalType>(stats: &PrimitiveStatistics<T>) -> ThriftStatistics {
    let max = stats.max_value.map(|v| v.to_le_bytes().as_ref().to_vec());
    let min = stats.min_value.map(|v| v.to_le_bytes().as_ref().to_vec());
    ThriftStatistics {
        null_count: stats.null_count,
        distinct_count: stats.distinct_count,
        max_value: max.clone(),
        min_value: min.clone(),
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_i32() {
        let stats = PrimitiveStatistics::<i32> {
            null_count: Some(1),
            distinct_count: None,
            max_value: Some(42),
            min_value: Some(-7),
        };
        let thrift = write(&stats);
        let back = read::<i32>(&thrift).unwrap();
        let back = back.as_any().downcast_ref::<PrimitiveStatistics<i32>>().unwrap();
        assert_eq!(back, &stats);
    }

    #[test]
    fn rejects_wrong_width() {
        let thrift = ThriftStatistics {
            null_count: None,
            distinct_count: None,
            max_value: Some(vec![0, 1]),
            min_value: None,
            min: None,
            max: None,
        };
        assert!(read::<i64>(&thrift).is_err());
    }
}
