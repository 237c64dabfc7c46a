use std::any::Any;
use std::sync::Arc;

use parquet_format_safe::Statistics as ThriftStatistics;

use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::schema::types::PhysicalType;

use super::Statistics;

/// Statistics for `FIXED_LEN_BYTE_ARRAY` columns; the width is carried on the column's
/// physical type rather than on each value.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLenStatistics {
    pub descriptor: ColumnDescriptor,
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub max_value: Option<Vec<u8>>,
    pub min_value: Option<Vec<u8>>,
}

impl Statistics for FixedLenStatistics {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        self.descriptor
            .type_()
            .physical_type()
            .unwrap_or(PhysicalType::FixedLenByteArray(0))
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

fn expected_len(descriptor: &ColumnDescriptor) -> Result<usize> {
    match descriptor.type_().physical_type() {
        Some(PhysicalType::FixedLenByteArray(n)) => Ok(n as usize),
        _ => Err(Error::oos(
            "fixed-length statistics require a FIXED_LEN_BYTE_ARRAY column",
        )),
    }
}

fn validate(bytes: Vec<u8>, len: usize) -> Result<Vec<u8>> {
    if bytes.len() != len {
        return Err(Error::oos(
            "statistics value does not match the column's fixed width",
        ));
    }
    Ok(bytes)
}

pub(super) fn read(
    thrift: &ThriftStatistics,
    descriptor: ColumnDescriptor,
) -> Result<Arc<dyn Statistics>> {
    let len = expected_len(&descriptor)?;
    let max_value = thrift
        .max_value
        .clone()
        .or_else(|| thrift.max.clone())
        .map(|b| validate(b, len))
        .transpose()?;
    let min_value = thrift
        .min_value
        .clone()
        .or_else(|| thrift.min.clone())
        .map(|b| validate(b, len))
        .transpose()?;
    Ok(Arc::new(FixedLenStatistics {
        descriptor,
        null_count: thrift.null_count,
        distinct_count: thrift.distinct_count,
        max_value,
        min_value,
    }))
}

pub(super) fn write(stats: &FixedLenStatistics) -> ThriftStatistics {
    ThriftStatistics {
        null_count: stats.null_count,
        distinct_count: stats.distinct_count,
        max_value: stats.max_value.clone(),
        min_value: stats.min_value.clone(),
        min: stats.min_value.clone(),
        max: stats.max_value.clone(),
    }
}
