use std::any::Any;
use std::sync::Arc;

use parquet_format_safe::Statistics as ThriftStatistics;

use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

use super::Statistics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanStatistics {
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub max_value: Option<bool>,
    pub min_value: Option<bool>,
}

impl Statistics for BooleanStatistics {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        PhysicalType::Boolean
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

fn decode(bytes: &[u8]) -> Result<bool> {
    if bytes.len() != 1 {
        return Err(Error::oos("boolean statistics value must be exactly 1 byte"));
    }
    Ok(bytes[0] != 0)
}

pub(super) fn read(thrift: &ThriftStatistics) -> Result<Arc<dyn Statistics>> {
    let max_value = thrift
        .max_value
        .as_deref()
        .or(thrift.max.as_deref())
        .map(decode)
        .transpose()?;
    let min_value = thrift
        .min_value
        .as_deref()
        .or(thrift.min.as_deref())
        .map(decode)
        .transpose()?;
    Ok(Arc::new(BooleanStatistics {
        null_count: thrift.null_count,
        distinct_count: thrift.distinct_count,
        max_value,
        min_value,
    }))
}

pub(super) fn write(stats: &BooleanStatistics) -> ThriftStatistics {
    let max = stats.max_value.map(|v| vec![v as u8]);
    let min = stats.min_value.map(|v| vec![v as u8]);
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
    fn round_trips() {
        let stats = BooleanStatistics {
            null_count: Some(2),
            distinct_count: Some(2),
            max_value: Some(true),
            min_value: Some(false),
        };
        let thrift = write(&stats);
        let back = read(&thrift).unwrap();
        let back = back.as_any().downcast_ref::<BooleanStatistics>().unwrap();
        assert_eq!(back, &stats);
    }

    #[test]
    fn rejects_wrong_length() {
        let thrift = ThriftStatistics {
            null_count: None,
            distinct_count: None,
            max_value: Some(vec![1, 2]),
            min_value: None,
            min: None,
            max: None,
        };
        assert!(read(&thrift).is_err());
    }
}
