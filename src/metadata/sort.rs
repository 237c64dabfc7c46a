use crate::parquet_bridge::{IntegerType, PrimitiveLogicalType};
use crate::schema::types::PhysicalType;

/// How a logical or physical type's values should be compared when accumulating
/// min/max statistics (spec.md §3: "ordering, min/max semantics... dispatched by
/// logical type where it overrides physical").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Signed,
    Unsigned,
    Undefined,
}

pub fn get_sort_order(
    logical_type: &Option<PrimitiveLogicalType>,
    physical_type: &PhysicalType,
) -> SortOrder {
    if let Some(logical_type) = logical_type {
        return get_logical_sort_order(logical_type);
    }
    get_physical_sort_order(physical_type)
}

fn get_logical_sort_order(logical_type: &PrimitiveLogicalType) -> SortOrder {
    use PrimitiveLogicalType::*;
    match logical_type {
        String | Enum | Json | Bson => SortOrder::Unsigned,
        Integer(t) => match t {
            IntegerType::Int8 | IntegerType::Int16 | IntegerType::Int32 | IntegerType::Int64 => {
                SortOrder::Signed
            }
            IntegerType::UInt8 | IntegerType::UInt16 | IntegerType::UInt32 | IntegerType::UInt64 => {
                SortOrder::Unsigned
            }
        },
        Decimal(_, _) => SortOrder::Signed,
        Date => SortOrder::Signed,
        Time { .. } => SortOrder::Signed,
        Timestamp { .. } => SortOrder::Signed,
        Unknown => SortOrder::Undefined,
        Uuid => SortOrder::Unsigned,
    }
}

fn get_physical_sort_order(physical_type: &PhysicalType) -> SortOrder {
    use PhysicalType::*;
    match physical_type {
        // order: false, true
        Boolean => SortOrder::Unsigned,
        Int32 | Int64 => SortOrder::Signed,
        // deprecated; the format leaves INT96 ordering undefined
        Int96 => SortOrder::Undefined,
        Float | Double => SortOrder::Signed,
        ByteArray | FixedLenByteArray(_) => SortOrder::Unsigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_integer_is_unsigned() {
        assert_eq!(
            get_sort_order(
                &Some(PrimitiveLogicalType::Integer(IntegerType::UInt32)),
                &PhysicalType::Int32
            ),
            SortOrder::Unsigned
        );
    }

    #[test]
    fn falls_back_to_physical() {
        assert_eq!(get_sort_order(&None, &PhysicalType::Double), SortOrder::Signed);
        assert_eq!(get_sort_order(&None, &PhysicalType::ByteArray), SortOrder::Unsigned);
    }
}
