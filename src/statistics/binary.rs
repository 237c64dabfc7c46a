use std::any::Any;
use std::sync::Arc;

use parquet_format_safe::Statistics as ThriftStatistics;

use crate::error::Result;
use crate::metadata::ColumnDescriptor;
use crate::schema::types::PhysicalType;

use super::Statistics;

/// Statistics for `BYTE_ARRAY` columns: min/max are a copy of the shortest/longest
/// qualifying value's bytes, not a length (spec.md §3).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryStatistics {
    pub descriptor: ColumnDescriptor,
    pub null_count: Option<i64>,
    pub distinct_count: Option<i64>,
    pub max_value: Option<Vec<u8>>,
    pub min_value: Option<Vec<u8>>,
}

impl Statistics for BinaryStatistics {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        PhysicalType::ByteArray
    }

    fn null_count(&self) -> Option<i64> {
        self.null_count
    }
}

pub(super) fn read(
    thrift: &ThriftStatistics,
    descriptor: ColumnDescriptor,
) -> Result<Arc<dyn Statistics>> {
    let max_value = thrift.max_value.clone().or_else(|| thrift.max.clone());
    let min_value = thrift.min_value.clone().or_else(|| thrift.min.clone());
    Ok(Arc::new(BinaryStatistics {
        descriptor,
        null_count: thrift.null_count,
        distinct_count: thrift.distinct_count,
        max_value,
        min_value,
    }))
}

pub(super) fn write(stats: &BinaryStatistics) -> ThriftStatistics {
    ThriftStatistics {
        null_count: stats.null_count,
        distinct_count: stats.distinct_count,
        max_value: stats.max_value.clone(),
        min_value: stats.min_value.clone(),
        min: stats.min_value.clone(),
        max: stats.max_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ColumnPath;
    use crate::schema::types::ParquetType;
    use crate::parquet_bridge::Repetition;

    fn descriptor() -> ColumnDescriptor {
        let primitive = ParquetType::new_primitive(
            "s".to_string(),
            PhysicalType::ByteArray,
            Repetition::Required,
            None,
            None,
        );
        ColumnDescriptor::new(primitive, 0, 0, ColumnPath::new(vec!["s".to_string()]))
    }

    #[test]
    fn round_trips() {
        let stats = BinaryStatistics {
            descriptor: descriptor(),
            null_count: Some(0),
            distinct_count: None,
            max_value: Some(b"zzz".to_vec()),
            min_value: Some(b"aaa".to_vec()),
        };
        let thrift = write(&stats);
        let back = read(&thrift, descriptor()).unwrap();
        let back = back.as_any().downcast_ref::<BinaryStatistics>().unwrap();
        assert_eq!(back, &stats);
    }
}
