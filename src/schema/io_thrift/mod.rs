//! Conversions between [`ParquetType`](super::types::ParquetType) and the thrift
//! `SchemaElement` list a file's footer actually stores.

mod from_thrift;
mod to_thrift;
