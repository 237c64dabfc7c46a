use std::any::Any;
use std::sync::Arc;

use crate::error::Result;
use crate::schema::types::PhysicalType;

use super::DictPage;

/// A decoded dictionary page for `fixed_len_byte_array` (and the deprecated `int96`,
/// which shares its raw-concatenation layout).
#[derive(Debug)]
pub struct FixedLenByteArrayPageDict {
    values: Vec<u8>,
    physical_type: PhysicalType,
    size: usize,
}

impl FixedLenByteArrayPageDict {
    pub fn new(values: Vec<u8>, physical_type: PhysicalType, size: usize) -> Self {
        Self {
            values,
            physical_type,
            size,
        }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn value(&self, index: usize) -> &[u8] {
        &self.values[index * self.size..(index + 1) * self.size]
    }
}

impl DictPage for FixedLenByteArrayPageDict {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        self.physical_type
    }
}

pub fn read(
    buf: &[u8],
    size: usize,
    num_values: usize,
    physical_type: PhysicalType,
) -> Result<Arc<dyn DictPage>> {
    let values = buf[..size * num_values].to_vec();
    Ok(Arc::new(FixedLenByteArrayPageDict::new(
        values,
        physical_type,
        size,
    )))
}
