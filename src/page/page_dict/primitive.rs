use std::any::Any;
use std::sync::Arc;

use crate::encoding::plain;
use crate::error::Result;
use crate::schema::types::{AssociatedPhysicalType, PhysicalType};

use super::DictPage;

/// A decoded dictionary page for a fixed-width `PLAIN` physical type.
#[derive(Debug)]
pub struct PrimitivePageDict<T: AssociatedPhysicalType> {
    values: Vec<T>,
}

impl<T: AssociatedPhysicalType> PrimitivePageDict<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: AssociatedPhysicalType> DictPage for PrimitivePageDict<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn physical_type(&self) -> PhysicalType {
        T::PHYSICAL_TYPE
    }
}

pub fn read<T: AssociatedPhysicalType + 'static>(
    buf: &[u8],
    num_values: usize,
) -> Result<Arc<dyn DictPage>> {
    let typed_size = num_values * T::BYTE_SIZE;
    let values: Vec<T> = plain::decode(&buf[..typed_size])?;
    Ok(Arc::new(PrimitivePageDict::new(values)))
}
