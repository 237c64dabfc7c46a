use crate::error::Result;
use crate::parquet_bridge::Repetition;
use crate::schema::types::ParquetType;

use super::column_descriptor::ColumnDescriptor;
use super::column_path::ColumnPath;

/// The flattened view of a schema tree: every leaf column in pre-order, each carrying
/// its derived max definition/repetition levels and dotted path (spec.md §3).
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    schema: ParquetType,
    leaves: Vec<ColumnDescriptor>,
}

impl SchemaDescriptor {
    /// Flattens `schema` (which must be the root: `schema.is_root()`) into its leaves.
    ///
    /// # Panics
    /// Panics if `schema` is not the root group.
    pub fn new(schema: ParquetType) -> Self {
        assert!(schema.is_root(), "schema descriptor requires a root type");
        let mut leaves = Vec::new();
        match &schema {
            ParquetType::GroupType { fields, .. } => {
                let mut path = Vec::new();
                for field in fields {
                    build_leaves(field, 0, 0, &mut leaves, &mut path);
                }
            }
            ParquetType::PrimitiveType { .. } => unreachable!(),
        }
        Self { schema, leaves }
    }

    pub fn column(&self, i: usize) -> &ColumnDescriptor {
        &self.leaves[i]
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.leaves
    }

    pub fn num_columns(&self) -> usize {
        self.leaves.len()
    }

    pub fn root_schema(&self) -> &ParquetType {
        &self.schema
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Flattens the schema tree into the thrift `SchemaElement` list a footer stores.
    pub fn into_thrift(self) -> Result<Vec<parquet_format_safe::SchemaElement>> {
        self.schema.to_thrift()
    }
}

fn build_leaves(
    node: &ParquetType,
    mut max_rep_level: i16,
    mut max_def_level: i16,
    leaves: &mut Vec<ColumnDescriptor>,
    path_so_far: &mut Vec<String>,
) {
    path_so_far.push(node.name().to_string());
    match node.get_basic_info().repetition() {
        Some(Repetition::Optional) => max_def_level += 1,
        Some(Repetition::Repeated) => {
            max_def_level += 1;
            max_rep_level += 1;
        }
        _ => {}
    }

    match node {
        ParquetType::PrimitiveType { .. } => {
            leaves.push(ColumnDescriptor::new(
                node.clone(),
                max_def_level,
                max_rep_level,
                ColumnPath::new(path_so_far.clone()),
            ));
        }
        ParquetType::GroupType { fields, .. } => {
            for field in fields {
                build_leaves(field, max_rep_level, max_def_level, leaves, path_so_far);
            }
        }
    }
    path_so_far.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::PhysicalType;

    #[test]
    fn flattens_nested_optional_and_repeated() {
        // message root { required int32 a; optional group g { repeated int64 xs; } }
        let a = ParquetType::new_primitive(
            "a".to_string(),
            PhysicalType::Int32,
            Repetition::Required,
            None,
            None,
        );
        let xs = ParquetType::new_primitive(
            "xs".to_string(),
            PhysicalType::Int64,
            Repetition::Repeated,
            None,
            None,
        );
        let g = ParquetType::new_group(
            "g".to_string(),
            Repetition::Optional,
            None,
            vec![xs],
            None,
        );
        let root = ParquetType::new_root("root".to_string(), vec![a, g]);

        let descriptor = SchemaDescriptor::new(root);
        assert_eq!(descriptor.num_columns(), 2);
        assert_eq!(descriptor.column(0).max_def_level(), 0);
        assert_eq!(descriptor.column(0).max_rep_level(), 0);
        assert_eq!(descriptor.column(0).path().string(), "a");

        assert_eq!(descriptor.column(1).max_def_level(), 2);
        assert_eq!(descriptor.column(1).max_rep_level(), 1);
        assert_eq!(descriptor.column(1).path().string(), "g.xs");
    }
}
