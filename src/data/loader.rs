use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeListArray,
    ListArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ShotDataset, ShotEvent, ShotOutcome};
use crate::config::SHOT_TYPE;
use crate::error::LoadError;

/// Columns every input format must provide.
const COL_TYPE: &str = "type";
const COL_TEAM: &str = "team";
const COL_PLAYER: &str = "player";
const COL_LOCATION: &str = "location";
const COL_XG: &str = "shot_statsbomb_xg";
const COL_OUTCOME: &str = "shot_outcome";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a shot table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – `location` holds JSON-array text, e.g. `"[108.2, 38.5]"`
/// * `.json`    – `[{ "type": "Shot", "location": [108.2, 38.5], ... }, ...]`
/// * `.parquet` – `location` as a float list column or as text
///
/// Only rows whose `type` is `Shot` are kept. A shot with an unparseable
/// location aborts the whole load; a missing or non-numeric xG becomes NaN.
pub fn load_file(path: &Path) -> Result<ShotDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };
    dataset.with_context(|| format!("loading {}", path.display()))
}

// ---------------------------------------------------------------------------
// Format-independent row handling
// ---------------------------------------------------------------------------

/// Location cell before parsing.
#[derive(Debug, Clone, PartialEq)]
enum RawLocation {
    Text(String),
    Numbers(Vec<f64>),
    Missing,
}

/// One source row, whatever the file format.
#[derive(Debug, Clone)]
struct RawShot {
    kind: String,
    team: String,
    player: String,
    location: RawLocation,
    xg: Option<f64>,
    outcome: String,
}

/// Keep the `Shot` rows, reindex them, and parse their fields.
/// `row` numbers in errors refer to the source row (0-based, header excluded).
fn build_dataset<I>(rows: I) -> Result<ShotDataset>
where
    I: IntoIterator<Item = Result<RawShot>>,
{
    let mut shots = Vec::new();

    for (row, raw) in rows.into_iter().enumerate() {
        let raw = raw?;
        if raw.kind != SHOT_TYPE {
            continue;
        }

        let location = parse_location(&raw.location, row)?;

        shots.push(ShotEvent {
            team: raw.team,
            player: raw.player,
            location,
            xg: raw.xg.unwrap_or(f64::NAN),
            outcome: ShotOutcome::parse(&raw.outcome),
        });
    }

    Ok(ShotDataset::from_shots(shots))
}

fn parse_location(raw: &RawLocation, row: usize) -> Result<[f64; 2], LoadError> {
    match raw {
        RawLocation::Text(text) => {
            serde_json::from_str::<[f64; 2]>(text.trim()).map_err(|e| LoadError::Location {
                row,
                text: text.clone(),
                reason: e.to_string(),
            })
        }
        RawLocation::Numbers(values) => match values.as_slice() {
            &[x, y] if x.is_finite() && y.is_finite() => Ok([x, y]),
            _ => Err(LoadError::Location {
                row,
                text: format!("{values:?}"),
                reason: format!("expected 2 finite coordinates, got {}", values.len()),
            }),
        },
        RawLocation::Missing => Err(LoadError::Location {
            row,
            text: String::new(),
            reason: "value is missing".to_string(),
        }),
    }
}

fn parse_xg(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ShotDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

/// Parse CSV shot data from any reader. Extra columns (including an unnamed
/// index column) are ignored.
pub fn parse_csv<R: Read>(reader: R) -> Result<ShotDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name).into())
    };
    let type_idx = column(COL_TYPE)?;
    let team_idx = column(COL_TEAM)?;
    let player_idx = column(COL_PLAYER)?;
    let location_idx = column(COL_LOCATION)?;
    let xg_idx = column(COL_XG)?;
    let outcome_idx = column(COL_OUTCOME)?;

    let rows = reader.records().enumerate().map(|(row_no, result)| -> Result<RawShot> {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();

        let location = match record.get(location_idx).map(str::trim) {
            None | Some("") => RawLocation::Missing,
            Some(text) => RawLocation::Text(text.to_string()),
        };

        Ok(RawShot {
            kind: field(type_idx),
            team: field(team_idx),
            player: field(player_idx),
            location,
            xg: record.get(xg_idx).and_then(parse_xg),
            outcome: field(outcome_idx),
        })
    });

    build_dataset(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<ShotDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<ShotDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let rows = records.iter().enumerate().map(|(i, rec)| -> Result<RawShot> {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let text = |key: &str| -> String {
            match obj.get(key) {
                Some(JsonValue::String(s)) => s.clone(),
                Some(JsonValue::Null) | None => String::new(),
                Some(other) => other.to_string(),
            }
        };

        let location = match obj.get(COL_LOCATION) {
            Some(JsonValue::String(s)) if !s.trim().is_empty() => RawLocation::Text(s.clone()),
            Some(JsonValue::Array(items)) => match items.iter().map(JsonValue::as_f64).collect::<Option<Vec<f64>>>() {
                Some(values) => RawLocation::Numbers(values),
                None => RawLocation::Text(JsonValue::Array(items.clone()).to_string()),
            },
            _ => RawLocation::Missing,
        };

        let xg = match obj.get(COL_XG) {
            Some(JsonValue::Number(n)) => n.as_f64(),
            Some(JsonValue::String(s)) => parse_xg(s),
            _ => None,
        };

        Ok(RawShot {
            kind: text(COL_TYPE),
            team: text(COL_TEAM),
            player: text(COL_PLAYER),
            location,
            xg,
            outcome: text(COL_OUTCOME),
        })
    });

    build_dataset(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of shot events.
///
/// `location` may be a `List<Float64>` / `List<Float32>` column or a string
/// column with JSON-array text. The other required columns are strings except
/// `shot_statsbomb_xg` (any float or integer type).
fn load_parquet(path: &Path) -> Result<ShotDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    let mut offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<Arc<dyn Array>> {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name))?;
            Ok(batch.column(idx).clone())
        };
        let kind_col = column(COL_TYPE)?;
        let team_col = column(COL_TEAM)?;
        let player_col = column(COL_PLAYER)?;
        let location_col = column(COL_LOCATION)?;
        let xg_col = column(COL_XG)?;
        let outcome_col = column(COL_OUTCOME)?;

        for row in 0..batch.num_rows() {
            let location = if location_col.is_null(row) {
                RawLocation::Missing
            } else {
                match location_col.data_type() {
                    DataType::List(_) | DataType::LargeList(_) => {
                        let values = extract_f64_list(&location_col, row).with_context(|| {
                            format!("Row {}: failed to read 'location'", offset + row)
                        })?;
                        match values.iter().copied().collect::<Option<Vec<f64>>>() {
                            Some(values) => RawLocation::Numbers(values),
                            None => RawLocation::Text(format_list(&values)),
                        }
                    }
                    _ => extract_string(&location_col, row)
                        .map(RawLocation::Text)
                        .unwrap_or(RawLocation::Missing),
                }
            };

            rows.push(Ok(RawShot {
                kind: extract_string(&kind_col, row).unwrap_or_default(),
                team: extract_string(&team_col, row).unwrap_or_default(),
                player: extract_string(&player_col, row).unwrap_or_default(),
                location,
                xg: extract_f64(&xg_col, row),
                outcome: extract_string(&outcome_col, row).unwrap_or_default(),
            }));
        }
        offset += batch.num_rows();
    }

    build_dataset(rows)
}

// -- Parquet / Arrow helpers --

/// Extract the elements of a List or LargeList column at the given row.
/// Null elements stay `None`.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<Option<f64>>> {
    let values_array = match col.data_type() {
        DataType::List(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<ListArray>()
                .context("expected ListArray")?;
            list_arr.value(row)
        }
        DataType::LargeList(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<LargeListArray>()
                .context("expected LargeListArray")?;
            list_arr.value(row)
        }
        other => bail!("Expected List or LargeList column, got {other:?}"),
    };

    // The inner array can be Float64 or Float32
    if let Some(f64_arr) = values_array.as_any().downcast_ref::<Float64Array>() {
        Ok(f64_arr.iter().collect())
    } else if let Some(f32_arr) = values_array.as_any().downcast_ref::<Float32Array>() {
        Ok(f32_arr.iter().map(|v| v.map(f64::from)).collect())
    } else {
        bail!(
            "List inner type is {:?}, expected Float64 or Float32",
            values_array.data_type()
        )
    }
}

/// JSON text for a list with null elements, e.g. `[null, 40.0]`.
fn format_list(values: &[Option<f64>]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| v.map_or_else(|| "null".to_string(), |x| format!("{x:?}")))
        .collect();
    format!("[{}]", items.join(", "))
}

/// Text cell, or `None` for nulls and non-string columns.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

/// Numeric cell as `f64`, or `None` for nulls and non-numeric columns.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Utf8 | DataType::LargeUtf8 => extract_string(col, row).as_deref().and_then(parse_xg),
        _ => None,
    }
}
