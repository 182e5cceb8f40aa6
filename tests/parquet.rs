use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Array, Float64Builder, Int32Builder, ListBuilder, StringArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use shot_map::data::loader::load_file;
use shot_map::error::LoadError;

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("shot_map_{}_{name}", std::process::id()));
    path
}

fn write_batch(name: &str, location: ArrayRef, location_type: DataType) -> PathBuf {
    let schema = Arc::new(Schema::new(vec![
        Field::new("type", DataType::Utf8, false),
        Field::new("team", DataType::Utf8, true),
        Field::new("player", DataType::Utf8, true),
        Field::new("location", location_type, true),
        Field::new("shot_statsbomb_xg", DataType::Float64, true),
        Field::new("shot_outcome", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["Shot", "Pass", "Shot"])),
        Arc::new(StringArray::from(vec![Some("France"), Some("Spain"), Some("Spain")])),
        Arc::new(StringArray::from(vec![Some("Mbappe"), Some("Rodri"), None])),
        location,
        Arc::new(Float64Array::from(vec![Some(0.5), None, Some(0.2)])),
        Arc::new(StringArray::from(vec![Some("Goal"), None, Some("Saved")])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("valid batch");

    let path = scratch_path(name);
    let file = std::fs::File::create(&path).expect("create parquet file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("parquet writer");
    writer.write(&batch).expect("write batch");
    writer.close().expect("close writer");
    path
}

fn list_locations(rows: &[&[f64]]) -> ArrayRef {
    let mut builder = ListBuilder::new(Float64Builder::new());
    for row in rows {
        for &v in *row {
            builder.values().append_value(v);
        }
        builder.append(true);
    }
    Arc::new(builder.finish())
}

fn list_type() -> DataType {
    DataType::List(Arc::new(Field::new("item", DataType::Float64, true)))
}

#[test]
fn reads_list_locations() {
    let path = write_batch(
        "list.parquet",
        list_locations(&[&[108.0, 36.0], &[50.0, 40.0], &[102.0, 44.0]]),
        list_type(),
    );
    let ds = load_file(&path).expect("parquet should load");
    std::fs::remove_file(&path).ok();

    assert_eq!(ds.len(), 2);
    assert_eq!(ds.shots[0].location, [108.0, 36.0]);
    assert!(ds.shots[0].outcome.is_goal());
    assert_eq!(ds.shots[1].player, "");
    assert_eq!(ds.shots[1].xg, 0.2);
}

#[test]
fn reads_text_locations() {
    let text = Arc::new(StringArray::from(vec!["[108.0, 36.0]", "[50, 40]", "[102.0, 44.0]"]));
    let path = write_batch("text.parquet", text, DataType::Utf8);
    let ds = load_file(&path).expect("parquet should load");
    std::fs::remove_file(&path).ok();

    assert_eq!(ds.len(), 2);
    assert_eq!(ds.shots[1].location, [102.0, 44.0]);
}

#[test]
fn null_list_element_is_rejected() {
    let mut builder = ListBuilder::new(Float64Builder::new());
    builder.values().append_value(108.0);
    builder.values().append_value(36.0);
    builder.append(true);
    builder.values().append_value(50.0);
    builder.values().append_value(40.0);
    builder.append(true);
    builder.values().append_null();
    builder.values().append_value(40.0);
    builder.append(true);

    let path = write_batch("null_item.parquet", Arc::new(builder.finish()), list_type());
    let err = load_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    match err.downcast_ref::<LoadError>() {
        Some(LoadError::Location { row, text, .. }) => {
            assert_eq!(*row, 2);
            assert_eq!(text, "[null, 40.0]");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn short_list_location_is_rejected() {
    let path = write_batch(
        "short.parquet",
        list_locations(&[&[108.0], &[50.0, 40.0], &[102.0, 44.0]]),
        list_type(),
    );
    let err = load_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::Location { row: 0, .. })
    ));
}

#[test]
fn list_read_errors_use_file_row_numbers() {
    const ROWS: usize = 1100;
    const BAD_ROW: usize = 1030;

    let schema = Arc::new(Schema::new(vec![
        Field::new("type", DataType::Utf8, false),
        Field::new("team", DataType::Utf8, true),
        Field::new("player", DataType::Utf8, true),
        Field::new(
            "location",
            DataType::List(Arc::new(Field::new("item", DataType::Int32, true))),
            true,
        ),
        Field::new("shot_statsbomb_xg", DataType::Float64, true),
        Field::new("shot_outcome", DataType::Utf8, true),
    ]));

    let mut locations = ListBuilder::new(Int32Builder::new());
    for row in 0..ROWS {
        if row == BAD_ROW {
            locations.values().append_value(108);
            locations.values().append_value(36);
            locations.append(true);
        } else {
            locations.append(false);
        }
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["Pass"; ROWS])),
        Arc::new(StringArray::from(vec![Some("France"); ROWS])),
        Arc::new(StringArray::from(vec![Some("Kante"); ROWS])),
        Arc::new(locations.finish()),
        Arc::new(Float64Array::from(vec![None::<f64>; ROWS])),
        Arc::new(StringArray::from(vec![None::<&str>; ROWS])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("valid batch");

    let path = scratch_path("batches.parquet");
    let file = std::fs::File::create(&path).expect("create parquet file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("parquet writer");
    writer.write(&batch).expect("write batch");
    writer.close().expect("close writer");

    let err = load_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    let msg = format!("{err:#}");
    assert!(msg.contains(&format!("Row {BAD_ROW}:")), "{msg}");
}
