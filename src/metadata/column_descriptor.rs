use crate::schema::types::ParquetType;

use super::column_path::ColumnPath;

/// Everything needed to re-derive a leaf column's levels and identify it inside the
/// schema: its primitive type, its maximum definition/repetition levels, and its path.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    primitive_type: ParquetType,
    max_def_level: i16,
    max_rep_level: i16,
    path: ColumnPath,
}

impl ColumnDescriptor {
    pub fn new(
        primitive_type: ParquetType,
        max_def_level: i16,
        max_rep_level: i16,
        path: ColumnPath,
    ) -> Self {
        Self {
            primitive_type,
            max_def_level,
            max_rep_level,
            path,
        }
    }

    pub fn max_def_level(&self) -> i16 {
        self.max_def_level
    }

    pub fn max_rep_level(&self) -> i16 {
        self.max_rep_level
    }

    pub fn path(&self) -> &ColumnPath {
        &self.path
    }

    pub fn type_(&self) -> &ParquetType {
        &self.primitive_type
    }

    pub fn name(&self) -> &str {
        self.primitive_type.name()
    }
}
