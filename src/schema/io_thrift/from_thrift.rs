use parquet_format_safe::SchemaElement;

use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

use super::super::types::ParquetType;

impl ParquetType {
    /// Rebuilds the schema tree from a footer's flattened `SchemaElement` list.
    pub fn try_from_thrift(elements: &[SchemaElement]) -> Result<ParquetType> {
        let mut index = 0;
        let mut nodes = Vec::new();
        while index < elements.len() {
            let (next, node) = from_thrift_helper(elements, index)?;
            index = next;
            nodes.push(node);
        }
        if nodes.len() != 1 {
            return Err(Error::oos(format!(
                "expected exactly one root schema node, found {}",
                nodes.len()
            )));
        }
        Ok(nodes.remove(0))
    }
}

fn from_thrift_helper(elements: &[SchemaElement], index: usize) -> Result<(usize, ParquetType)> {
    let is_root = index == 0;
    let element = &elements[index];
    let name = element.name.clone();
    let field_id = element.field_id;

    match element.num_children {
        None | Some(0) if !is_root => {
            let repetition = element
                .repetition_type
                .ok_or_else(|| Error::oos("a primitive schema node requires a repetition"))?
                .try_into()?;
            let type_ = element
                .type_
                .ok_or_else(|| Error::oos("a primitive schema node requires a physical type"))?;
            let physical_type = PhysicalType::from_thrift(type_, element.type_length)?;
            let logical_type = element
                .logical_type
                .clone()
                .map(TryInto::try_into)
                .transpose()?;

            Ok((
                index + 1,
                ParquetType::new_primitive(name, physical_type, repetition, logical_type, field_id),
            ))
        }
        num_children => {
            let n = num_children.unwrap_or(0);
            let mut fields = Vec::with_capacity(n as usize);
            let mut next_index = index + 1;
            for _ in 0..n {
                let (advanced, child) = from_thrift_helper(elements, next_index)?;
                next_index = advanced;
                fields.push(child);
            }

            if is_root {
                Ok((next_index, ParquetType::new_root(name, fields)))
            } else {
                let repetition = element
                    .repetition_type
                    .ok_or_else(|| Error::oos("a group schema node requires a repetition"))?
                    .try_into()?;
                let logical_type = element
                    .logical_type
                    .clone()
                    .map(TryInto::try_into)
                    .transpose()?;
                Ok((
                    next_index,
                    ParquetType::new_group(name, repetition, logical_type, fields, field_id),
                ))
            }
        }
    }
}
