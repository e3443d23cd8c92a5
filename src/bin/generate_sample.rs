use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Write a synthetic labelled review dataset (label 1 = negative, 2 = positive).
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Number of rows to generate.
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output file; `.parquet` writes Parquet, anything else CSV.
    #[arg(long, default_value = "sample_reviews.csv")]
    out: PathBuf,
}

const POSITIVE_TITLES: [&str; 5] = ["Great!!", "Loved it :)", "Five stars", "Sooooo good", "Best purchase"];
const NEGATIVE_TITLES: [&str; 5] = ["Terrible :(", "Broke fast", "Waste of money!!!", "Noooo", "Disappointed"];

const POSITIVE_BODIES: [&str; 4] = [
    "loved it soo much, the books arrived early",
    "works as described, would buy again :D",
    "my children enjoy these movies every night",
    "excellent quality <3 details at www.example.com/review",
];
const NEGATIVE_BODIES: [&str; 4] = [
    "stopped working after two days, contact support@example.com",
    "the boxes were damaged and the parts missing :'(",
    "worst movies ever, see http://example.org/complaint",
    "it is sooooo slow, do not buy",
];

fn generate(rows: usize, rng: &mut StdRng) -> Vec<(i64, String, String)> {
    (0..rows)
        .map(|_| {
            let positive = rng.gen_bool(0.5);
            let (titles, bodies) = if positive {
                (&POSITIVE_TITLES[..], &POSITIVE_BODIES[..])
            } else {
                (&NEGATIVE_TITLES[..], &NEGATIVE_BODIES[..])
            };
            let title = titles.choose(rng).copied().unwrap_or_default().to_string();
            // Roughly one row in ten has an empty body.
            let body = if rng.gen_ratio(1, 10) {
                String::new()
            } else {
                bodies.choose(rng).copied().unwrap_or_default().to_string()
            };
            (if positive { 2 } else { 1 }, title, body)
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[(i64, String, String)]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context("creating CSV output")?;
    for (label, title, body) in rows {
        writer.write_record([label.to_string().as_str(), title.as_str(), body.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[(i64, String, String)]) -> Result<()> {
    let labels = Int64Array::from(rows.iter().map(|r| r.0).collect::<Vec<_>>());
    let titles = StringArray::from(rows.iter().map(|r| r.1.as_str()).collect::<Vec<_>>());
    let bodies = StringArray::from(rows.iter().map(|r| r.2.as_str()).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("label", DataType::Int64, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("body", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(labels) as ArrayRef,
            Arc::new(titles) as ArrayRef,
            Arc::new(bodies) as ArrayRef,
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let rows = generate(args.rows, &mut rng);

    let is_parquet = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&args.out, &rows)?;
    } else {
        write_csv(&args.out, &rows)?;
    }

    println!("Wrote {} reviews to {}", rows.len(), args.out.display());
    Ok(())
}
