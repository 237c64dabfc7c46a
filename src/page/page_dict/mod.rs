//! Decoded dictionary pages, keyed by physical type (spec.md §4.4.3): a dictionary
//! page's payload is `PLAIN`-encoded in insertion order, one implementor per physical
//! type family.

mod binary;
mod fixed_len_binary;
mod primitive;

pub use binary::BinaryPageDict;
pub use fixed_len_binary::FixedLenByteArrayPageDict;
pub use primitive::PrimitivePageDict;

use std::any::Any;
use std::sync::Arc;

use crate::compression::{create_codec, Compression};
use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;

/// A decompressed, decoded dictionary page, downcastable to its physical-type-specific
/// representation via [`DictPage::as_any`].
pub trait DictPage: std::fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn physical_type(&self) -> PhysicalType;
}

/// An encoded, uncompressed dictionary page: `PLAIN`-encoded values, compression
/// applied (if any) on top.
#[derive(Debug)]
pub struct EncodedDictPage {
    pub(crate) buffer: Vec<u8>,
    pub(crate) num_values: usize,
}

impl EncodedDictPage {
    pub fn new(buffer: Vec<u8>, num_values: usize) -> Self {
        Self { buffer, num_values }
    }
}

/// An encoded and compressed dictionary page, ready to be written as a page body.
#[derive(Debug)]
pub struct CompressedDictPage {
    pub(crate) buffer: Vec<u8>,
    pub(crate) num_values: usize,
    pub(crate) uncompressed_page_size: usize,
}

impl CompressedDictPage {
    pub fn new(buffer: Vec<u8>, num_values: usize, uncompressed_page_size: usize) -> Self {
        Self {
            buffer,
            num_values,
            uncompressed_page_size,
        }
    }

    pub fn num_values(&self) -> usize {
        self.num_values
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn uncompressed_size(&self) -> usize {
        self.uncompressed_page_size
    }
}

/// Decompresses and decodes an [`EncodedDictPage`] into a physical-type-specific
/// [`DictPage`].
pub fn read_dict_page(
    page: &EncodedDictPage,
    compression: (Compression, usize),
    physical_type: &PhysicalType,
) -> Result<Arc<dyn DictPage>> {
    let decompressor = create_codec(&compression.0)?;
    if let Some(mut decompressor) = decompressor {
        let mut decompressed = vec![0; compression.1];
        decompressor.decompress(&page.buffer, &mut decompressed)?;
        deserialize(&decompressed, page.num_values, physical_type)
    } else {
        deserialize(&page.buffer, page.num_values, physical_type)
    }
}

fn deserialize(
    buf: &[u8],
    num_values: usize,
    physical_type: &PhysicalType,
) -> Result<Arc<dyn DictPage>> {
    match *physical_type {
        PhysicalType::Boolean => Err(Error::oos(
            "boolean is not a legal dictionary-encoded physical type",
        )),
        PhysicalType::Int32 => primitive::read::<i32>(buf, num_values),
        PhysicalType::Int64 => primitive::read::<i64>(buf, num_values),
        PhysicalType::Int96 => fixed_len_binary::read(buf, 12, num_values, PhysicalType::Int96),
        PhysicalType::Float => primitive::read::<f32>(buf, num_values),
        PhysicalType::Double => primitive::read::<f64>(buf, num_values),
        PhysicalType::ByteArray => binary::read(buf, num_values),
        PhysicalType::FixedLenByteArray(size) => {
            fixed_len_binary::read(buf, size as usize, num_values, *physical_type)
        }
    }
}
