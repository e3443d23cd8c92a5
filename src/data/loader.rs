use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use arrow::array::{Array, AsArray, BooleanArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Label, Record};
use crate::error::{HarnessError, Result};

/// Positional column layout shared by every format: `[label, title, body, ...]`.
const LABEL_COL: usize = 0;
const TITLE_COL: usize = 1;
const BODY_COL: usize = 2;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a labelled review dataset. Dispatch by extension.
///
/// Supported formats, none of which carry a header row:
/// * `.csv` / `.txt` – comma-delimited
/// * `.tsv`          – tab-delimited
/// * `.json`         – `[[label, title, body], ...]`
/// * `.parquet`      – first three columns by position
///
/// Missing or null cells become empty strings. With `row_limit = Some(k)`
/// exactly `min(k, total_rows)` rows are returned.
pub fn load(path: &Path, row_limit: Option<usize>) -> Result<Dataset> {
    info!("Loading dataset from {}", path.display());
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let limit = row_limit.unwrap_or(usize::MAX);
    let records = match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b',', limit),
        "tsv" => load_delimited(path, b'\t', limit),
        "json" => load_json(path, limit),
        "parquet" | "pq" => load_parquet(path, limit),
        other => Err(anyhow::anyhow!("unsupported file extension: .{other}")),
    }
    .map_err(|e| HarnessError::load(path, e))?;

    info!("Loaded {} rows", records.len());
    Ok(Dataset::from_records(records))
}

/// Build a record from positional cells, filling absent ones with "".
fn record_from_cells<'a>(mut cell: impl FnMut(usize) -> Option<&'a str>) -> Record {
    Record {
        label: Label::parse(cell(LABEL_COL).unwrap_or("")),
        title: cell(TITLE_COL).unwrap_or("").to_string(),
        body: cell(BODY_COL).unwrap_or("").to_string(),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// The first row fixes the width. Shorter rows are padded with "", a wider
/// row is a load error naming it.
fn load_delimited(path: &Path, delimiter: u8, limit: usize) -> anyhow::Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context("opening delimited file")?;

    let mut records = Vec::new();
    let mut width = None;
    for (row_no, result) in reader.records().take(limit).enumerate() {
        let row = result.with_context(|| format!("row {row_no}"))?;
        let expected = *width.get_or_insert(row.len());
        if row.len() > expected {
            bail!(
                "row {row_no}: expected at most {expected} fields, saw {}",
                row.len()
            );
        }
        records.push(record_from_cells(|i| row.get(i)));
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON layout (`df.to_json(orient='values')`):
///
/// ```json
/// [
///   [2, "Great!!", "loved it soo much"],
///   [1, "Meh", null]
/// ]
/// ```
fn load_json(path: &Path, limit: usize) -> anyhow::Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len().min(limit));
    for (i, row) in rows.iter().take(limit).enumerate() {
        let cells = row
            .as_array()
            .with_context(|| format!("row {i} is not a JSON array"))?;
        let cells = cells
            .iter()
            .enumerate()
            .map(|(j, v)| json_cell(v).with_context(|| format!("row {i}, column {j}")))
            .collect::<anyhow::Result<Vec<String>>>()?;
        records.push(record_from_cells(|c| cells.get(c).map(String::as_str)));
    }
    Ok(records)
}

fn json_cell(val: &JsonValue) -> anyhow::Result<String> {
    Ok(match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => bail!("expected a scalar cell, got {other}"),
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Only column positions matter: 0 is the label, 1 the
/// title, 2 the body. Strings, integers and booleans are read; nulls become "".
fn load_parquet(path: &Path, limit: usize) -> anyhow::Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        if records.len() >= limit {
            break;
        }
        let batch = batch_result.context("reading parquet record batch")?;
        let n_cols = batch.num_columns();
        let take = batch.num_rows().min(limit - records.len());
        debug!("Parquet batch: {} rows, {n_cols} columns", batch.num_rows());

        for row in 0..take {
            let cells = (0..n_cols.min(BODY_COL + 1))
                .map(|c| {
                    extract_cell(batch.column(c), row)
                        .with_context(|| format!("row {}, column {c}", records.len()))
                })
                .collect::<anyhow::Result<Vec<String>>>()?;
            records.push(record_from_cells(|c| cells.get(c).map(String::as_str)));
        }
    }
    Ok(records)
}

/// Render one Arrow cell as text.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> anyhow::Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row)
            .to_string(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row)
            .to_string(),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .context("expected BooleanArray")?
            .value(row)
            .to_string(),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(value)
}
