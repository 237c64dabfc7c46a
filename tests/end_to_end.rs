//! Drives the full write → footer → read round trip through the public API, the way a
//! caller assembling records would use this crate.

use std::io::Cursor;

use parquet_core::error::Result;
use parquet_core::metadata::SchemaDescriptor;
use parquet_core::read::read_metadata;
use parquet_core::schema::types::{ParquetType, PhysicalType, Repetition};
use parquet_core::statistics::{deserialize_statistics, BinaryStatistics, PrimitiveStatistics};
use parquet_core::write::{LeveledValue, RecordWriter, Value, WriterProperties};

fn schema_required_a_optional_b() -> SchemaDescriptor {
    let a = ParquetType::new_primitive(
        "a".to_string(),
        PhysicalType::Int32,
        Repetition::Required,
        None,
        None,
    );
    let b = ParquetType::new_primitive(
        "b".to_string(),
        PhysicalType::ByteArray,
        Repetition::Optional,
        None,
        None,
    );
    SchemaDescriptor::new(ParquetType::new_root("root".to_string(), vec![a, b]))
}

#[test]
fn a_required_int_and_an_optional_string_column_carry_their_own_stats() -> Result<()> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = RecordWriter::new(&mut buffer, schema_required_a_optional_b(), WriterProperties::default())?;

    let rows = [
        (1, Some(b"x".to_vec())),
        (2, None),
        (3, Some(b"y".to_vec())),
    ];
    for (a, b) in rows {
        let a_value = vec![LeveledValue::new(0, 0, Some(Value::Int32(a)))];
        let b_value = match b {
            Some(bytes) => vec![LeveledValue::new(0, 1, Some(Value::ByteArray(bytes)))],
            None => vec![LeveledValue::new(0, 0, None)],
        };
        writer.write_row([a_value, b_value])?;
    }
    let (size, buffer) = writer.close(None)?;
    assert!(size > 0);

    let mut cursor = Cursor::new(buffer.into_inner());
    let metadata = read_metadata(&mut cursor)?;
    assert_eq!(metadata.num_row_groups(), 1);

    let row_group = metadata.row_group(0);
    assert_eq!(row_group.num_columns(), 2);
    assert_eq!(row_group.num_rows(), 3);

    let column_a = row_group.column(0);
    let stats_a = deserialize_statistics(
        column_a.statistics()?.expect("column a carries statistics"),
        column_a.column_descriptor().clone(),
    )?;
    assert_eq!(stats_a.null_count(), Some(0));
    let stats_a = stats_a
        .as_any()
        .downcast_ref::<PrimitiveStatistics<i32>>()
        .unwrap();
    assert_eq!(stats_a.min_value, Some(1));
    assert_eq!(stats_a.max_value, Some(3));

    let column_b = row_group.column(1);
    let stats_b = deserialize_statistics(
        column_b.statistics()?.expect("column b carries statistics"),
        column_b.column_descriptor().clone(),
    )?;
    assert_eq!(stats_b.null_count(), Some(1));
    let stats_b = stats_b.as_any().downcast_ref::<BinaryStatistics>().unwrap();
    assert_eq!(stats_b.min_value, Some(b"x".to_vec()));
    assert_eq!(stats_b.max_value, Some(b"y".to_vec()));

    Ok(())
}

fn schema_repeated_xs() -> SchemaDescriptor {
    let xs = ParquetType::new_primitive(
        "xs".to_string(),
        PhysicalType::Int64,
        Repetition::Repeated,
        None,
        None,
    );
    SchemaDescriptor::new(ParquetType::new_root("root".to_string(), vec![xs]))
}

#[test]
fn a_repeated_column_carries_one_level_pair_per_element() -> Result<()> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = RecordWriter::new(&mut buffer, schema_repeated_xs(), WriterProperties::default())?;

    let xs = vec![
        LeveledValue::new(0, 1, Some(Value::Int64(10))),
        LeveledValue::new(1, 1, Some(Value::Int64(20))),
        LeveledValue::new(1, 1, Some(Value::Int64(30))),
    ];
    writer.write_row([xs])?;
    let (_, buffer) = writer.close(None)?;

    let mut cursor = Cursor::new(buffer.into_inner());
    let metadata = read_metadata(&mut cursor)?;
    let row_group = metadata.row_group(0);
    assert_eq!(row_group.num_rows(), 1);
    assert_eq!(row_group.column(0).num_values()?, 3);

    Ok(())
}

#[test]
fn an_empty_repeated_record_is_one_null_position_and_one_row() -> Result<()> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = RecordWriter::new(&mut buffer, schema_repeated_xs(), WriterProperties::default())?;

    writer.write_row([vec![LeveledValue::new(0, 0, None)]])?;
    let (_, buffer) = writer.close(None)?;

    let mut cursor = Cursor::new(buffer.into_inner());
    let metadata = read_metadata(&mut cursor)?;
    let row_group = metadata.row_group(0);
    assert_eq!(row_group.num_rows(), 1);
    assert_eq!(row_group.column(0).num_values()?, 1);

    Ok(())
}

fn schema_required_v() -> SchemaDescriptor {
    let v = ParquetType::new_primitive(
        "v".to_string(),
        PhysicalType::Int64,
        Repetition::Required,
        None,
        None,
    );
    SchemaDescriptor::new(ParquetType::new_root("root".to_string(), vec![v]))
}

#[test]
fn ten_thousand_distinct_values_fall_back_to_plain_past_the_dictionary_size_limit() -> Result<()> {
    let mut buffer = Cursor::new(Vec::new());
    let properties = WriterProperties::builder()
        .with_dictionary_fallback_size(65536)
        .build();
    let mut writer = RecordWriter::new(&mut buffer, schema_required_v(), properties)?;

    for v in 0..10_001i64 {
        writer.write_row([vec![LeveledValue::new(0, 0, Some(Value::Int64(v)))]])?;
    }
    let (_, buffer) = writer.close(None)?;

    let mut cursor = Cursor::new(buffer.into_inner());
    let metadata = read_metadata(&mut cursor)?;
    let row_group = metadata.row_group(0);
    let column = row_group.column(0);

    assert_eq!(column.dictionary_page_offset()?, None);
    assert!(!column
        .encodings()?
        .contains(&parquet_core::encoding::Encoding::RleDictionary));

    Ok(())
}

#[test]
fn a_small_row_group_target_size_splits_ten_thousand_rows_into_several_row_groups() -> Result<()> {
    let mut buffer = Cursor::new(Vec::new());
    let properties = WriterProperties::builder()
        .with_row_group_target_size(4096)
        .with_page_buffer_size(1024)
        .build();
    let mut writer = RecordWriter::new(&mut buffer, schema_required_v(), properties)?;

    for v in 0..10_000i64 {
        writer.write_row([vec![LeveledValue::new(0, 0, Some(Value::Int64(v)))]])?;
    }
    let (_, buffer) = writer.close(None)?;

    let mut cursor = Cursor::new(buffer.into_inner());
    let metadata = read_metadata(&mut cursor)?;
    assert!(metadata.num_row_groups() >= 2);

    let last = metadata.num_row_groups() - 1;
    for (i, row_group) in metadata.row_groups().iter().enumerate() {
        if i != last {
            assert!(row_group.compressed_size()? as usize >= 4096);
        }
    }

    Ok(())
}
