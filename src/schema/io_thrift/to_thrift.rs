use parquet_format_safe::SchemaElement;

use crate::error::{Error, Result};

use super::super::types::ParquetType;

impl ParquetType {
    /// Flattens the schema tree into the thrift `SchemaElement` list a footer stores
    /// (spec.md §6.2: pre-order, each group preceded by its `num_children`).
    pub fn to_thrift(&self) -> Result<Vec<SchemaElement>> {
        if !self.is_root() {
            return Err(Error::oos("the root of a schema must be a group type"));
        }
        let mut elements = Vec::new();
        to_thrift_helper(self, &mut elements);
        Ok(elements)
    }
}

fn to_thrift_helper(schema: &ParquetType, elements: &mut Vec<SchemaElement>) {
    match schema {
        ParquetType::PrimitiveType {
            basic_info,
            logical_type,
            physical_type,
        } => {
            let (type_, type_length) = physical_type.to_thrift();

            elements.push(SchemaElement {
                type_: Some(type_),
                type_length,
                repetition_type: basic_info.repetition().map(Into::into),
                name: basic_info.name().to_owned(),
                num_children: None,
                converted_type: None,
                scale: None,
                precision: None,
                field_id: basic_info.id(),
                logical_type: logical_type.map(Into::into),
            });
        }
        ParquetType::GroupType {
            basic_info,
            logical_type,
            fields,
        } => {
            // The root ("message") node carries no repetition of its own.
            // https://github.com/apache/parquet-format/blob/master/src/main/thrift/parquet.thrift
            let repetition_type = basic_info.repetition().map(Into::into);

            elements.push(SchemaElement {
                type_: None,
                type_length: None,
                repetition_type,
                name: basic_info.name().to_owned(),
                num_children: Some(fields.len() as i32),
                converted_type: None,
                scale: None,
                precision: None,
                field_id: basic_info.id(),
                logical_type: logical_type.map(Into::into),
            });

            for field in fields {
                to_thrift_helper(field, elements);
            }
        }
    }
}
