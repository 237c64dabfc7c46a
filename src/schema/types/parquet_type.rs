use crate::parquet_bridge::{GroupLogicalType, PrimitiveLogicalType, Repetition};

use super::{BasicTypeInfo, PhysicalType};

/// A node of the schema tree: either a leaf (primitive) column or a group of children.
/// The root of a schema is always a [`ParquetType::GroupType`] whose `basic_info` has no
/// repetition (see [`BasicTypeInfo::is_root`]).
#[derive(Clone, Debug, PartialEq)]
pub enum ParquetType {
    PrimitiveType {
        basic_info: BasicTypeInfo,
        logical_type: Option<PrimitiveLogicalType>,
        physical_type: PhysicalType,
    },
    GroupType {
        basic_info: BasicTypeInfo,
        logical_type: Option<GroupLogicalType>,
        fields: Vec<ParquetType>,
    },
}

impl ParquetType {
    pub fn get_basic_info(&self) -> &BasicTypeInfo {
        match self {
            Self::PrimitiveType { basic_info, .. } => basic_info,
            Self::GroupType { basic_info, .. } => basic_info,
        }
    }

    pub fn name(&self) -> &str {
        self.get_basic_info().name()
    }

    pub fn is_root(&self) -> bool {
        self.get_basic_info().is_root()
    }

    pub fn physical_type(&self) -> Option<PhysicalType> {
        match self {
            Self::PrimitiveType { physical_type, .. } => Some(*physical_type),
            Self::GroupType { .. } => None,
        }
    }

    pub fn logical_type(&self) -> Option<PrimitiveLogicalType> {
        match self {
            Self::PrimitiveType { logical_type, .. } => *logical_type,
            Self::GroupType { .. } => None,
        }
    }
}

impl ParquetType {
    /// The root "message" node: a group with no repetition of its own.
    pub fn new_root(name: String, fields: Vec<ParquetType>) -> Self {
        ParquetType::GroupType {
            basic_info: BasicTypeInfo::new(name, None, None),
            fields,
            logical_type: None,
        }
    }

    pub fn new_group(
        name: String,
        repetition: Repetition,
        logical_type: Option<GroupLogicalType>,
        fields: Vec<ParquetType>,
        id: Option<i32>,
    ) -> Self {
        ParquetType::GroupType {
            basic_info: BasicTypeInfo::new(name, Some(repetition), id),
            logical_type,
            fields,
        }
    }

    pub fn new_primitive(
        name: String,
        physical_type: PhysicalType,
        repetition: Repetition,
        logical_type: Option<PrimitiveLogicalType>,
        id: Option<i32>,
    ) -> Self {
        ParquetType::PrimitiveType {
            basic_info: BasicTypeInfo::new(name, Some(repetition), id),
            logical_type,
            physical_type,
        }
    }
}
