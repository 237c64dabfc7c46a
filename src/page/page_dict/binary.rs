use std::any::Any;
use std::sync::Arc;

use crate::encoding::plain_byte_array;
use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

use super::DictPage;

/// A decoded dictionary page for `byte_array`: all values concatenated, with an
/// offsets array marking each value's boundary (`offsets[i]..offsets[i+1]`).
#[derive(Debug)]
pub struct BinaryPageDict {
    values: Vec<u8>,
    offsets: Vec<i32>,
}

impl BinaryPageDict {
    pub fn new(values: Vec<u8>, offsets: Vec<i32>) -> Self {
        Self { values, offsets }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    #[inline]
    pub fn value(&self, index: usize) -> Result<&[u8]> {
        let end = *self.offsets.get(index + 1).ok_or_else(|| {
            Error::oos("dictionary index is out of bounds for the dictionary page")
        })?;
        let start = self.offsets[index];
        Ok(&self.values[start as usize..end as usize])
    }
}

impl DictPage for BinaryPageDict {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        PhysicalType::ByteArray
    }
}

pub fn read(buf: &[u8], num_values: usize) -> Result<Arc<dyn DictPage>> {
    let mut values = Vec::new();
    let mut offsets = Vec::with_capacity(num_values + 1);
    offsets.push(0i32);

    let mut current_length = 0i32;
    for slot in plain_byte_array::Decoder::new(buf, Some(num_values)) {
        values.extend_from_slice(slot);
        current_length += slot.len() as i32;
        offsets.push(current_length);
    }

    if offsets.len() != num_values + 1 {
        return Err(Error::oos(
            "dictionary page has fewer values than its declared count",
        ));
    }

    Ok(Arc::new(BinaryPageDict::new(values, offsets)))
}
