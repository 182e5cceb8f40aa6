use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Float64Builder, Int64Array, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use shot_map::config::{DEFAULT_DATA_FILE, SHOT_TYPE};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One row of the generated event table.
#[derive(Debug, Serialize)]
struct SampleRow {
    id: i64,
    #[serde(rename = "type")]
    kind: String,
    minute: i64,
    team: String,
    player: String,
    location: String,
    shot_statsbomb_xg: Option<f64>,
    shot_outcome: Option<String>,
    #[serde(skip)]
    coords: [f64; 2],
}

const SQUADS: &[(&str, &[&str])] = &[
    ("England", &["Harry Kane", "Jude Bellingham", "Bukayo Saka", "Phil Foden"]),
    ("France", &["Kylian Mbappé", "Antoine Griezmann", "Ousmane Dembélé", "Randal Kolo Muani"]),
    ("Germany", &["Kai Havertz", "Jamal Musiala", "Florian Wirtz", "Niclas Füllkrug"]),
    ("Netherlands", &["Cody Gakpo", "Memphis Depay", "Xavi Simons", "Donyell Malen"]),
    ("Portugal", &["Cristiano Ronaldo", "Bruno Fernandes", "Bernardo Silva", "Rafael Leão"]),
    ("Spain", &["Álvaro Morata", "Lamine Yamal", "Nico Williams", "Dani Olmo"]),
];

const MISSES: &[&str] = &["Saved", "Off T", "Blocked", "Wayward", "Post", "Saved to Post"];
const OTHER_EVENTS: &[&str] = &["Pass", "Carry", "Pressure", "Ball Receipt*"];

/// Rough xG from distance and angle to the goal centre at (120, 40).
fn expected_goals(x: f64, y: f64, rng: &mut SimpleRng) -> f64 {
    let dx = 120.0 - x;
    let dy = (40.0 - y).abs();
    let distance = (dx * dx + dy * dy).sqrt();
    let angle = (8.0 * dx / (dx * dx + dy * dy - 16.0).max(1.0)).atan().abs();
    let base = 0.9 * (-distance / 9.0).exp() + 0.25 * angle;
    (base * rng.range(0.7, 1.3)).clamp(0.01, 0.95)
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    let mut id = 0;

    for (team, players) in SQUADS {
        for minute in 1..=90 {
            // A handful of non-shot events per minute, then maybe a shot.
            for _ in 0..2 {
                let coords = [rng.range(0.0, 120.0), rng.range(0.0, 80.0)];
                rows.push(SampleRow {
                    id,
                    kind: rng.pick(OTHER_EVENTS).to_string(),
                    minute,
                    team: team.to_string(),
                    player: rng.pick(players).to_string(),
                    location: format!("[{:.1}, {:.1}]", coords[0], coords[1]),
                    shot_statsbomb_xg: None,
                    shot_outcome: None,
                    coords,
                });
                id += 1;
            }

            if rng.next_f64() > 0.14 {
                continue;
            }

            let x = rng.range(84.0, 119.0);
            let y = rng.range(14.0, 66.0);
            let xg = expected_goals(x, y, rng);
            let outcome = if rng.next_f64() < xg {
                "Goal"
            } else {
                *rng.pick(MISSES)
            };

            rows.push(SampleRow {
                id,
                kind: SHOT_TYPE.to_string(),
                minute,
                team: team.to_string(),
                player: rng.pick(players).to_string(),
                location: format!("[{x:.1}, {y:.1}]"),
                shot_statsbomb_xg: Some((xg * 1000.0).round() / 1000.0),
                shot_outcome: Some(outcome.to_string()),
                coords: [x, y],
            });
            id += 1;
        }
    }

    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Parquet variant: `location` becomes a `List<Float64>` column.
fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut location_builder = ListBuilder::new(Float64Builder::new());
    for row in rows {
        let values = location_builder.values();
        for &v in &row.coords {
            values.append_value(v);
        }
        location_builder.append(true);
    }
    let location_array = location_builder.finish();

    let strings = |f: fn(&SampleRow) -> Option<&str>| {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("minute", DataType::Int64, false),
        Field::new("team", DataType::Utf8, true),
        Field::new("player", DataType::Utf8, true),
        Field::new(
            "location",
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        ),
        Field::new("shot_statsbomb_xg", DataType::Float64, true),
        Field::new("shot_outcome", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(rows.iter().map(|r| r.id).collect::<Vec<_>>())),
            Arc::new(strings(|r| Some(r.kind.as_str()))),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.minute).collect::<Vec<_>>())),
            Arc::new(strings(|r| Some(r.team.as_str()))),
            Arc::new(strings(|r| Some(r.player.as_str()))),
            Arc::new(location_array),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.shot_statsbomb_xg).collect::<Vec<_>>(),
            )),
            Arc::new(strings(|r| r.shot_outcome.as_deref())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let mut rng = SimpleRng::new(2024);
    let rows = generate(&mut rng);

    let is_parquet = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));

    if is_parquet {
        write_parquet(&output_path, &rows)?;
    } else {
        write_csv(&output_path, &rows)?;
    }

    let shots = rows.iter().filter(|r| r.kind == SHOT_TYPE).count();
    println!(
        "Wrote {} events ({shots} shots) to {}",
        rows.len(),
        output_path.display()
    );
    Ok(())
}
