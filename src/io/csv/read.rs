//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReader, DataType}};
use tracing::info;

use crate::data::ModeShare;

/// Reads a mode-share CSV file: one label column of transport modes, one numeric column per district.
pub fn read_mode_share(path: &Path, mode_column: &str) -> Result<ModeShare> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    let df = CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))?;

    let table = mode_share_from_frame(&df, mode_column)
        .with_context(|| format!("[io::csv::read] Invalid mode-share table {}", path.display()))?;
    info!(path = %path.display(), modes = table.modes().len(), districts = table.districts().len(), "[io::csv::read] loaded mode share");
    Ok(table)
}

/// Reads a mode-share table from a CSV string.
pub fn read_mode_share_str(csv: &str, mode_column: &str) -> Result<ModeShare> {
    let df = CsvReader::new(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[io::csv::read] Failed to read CSV from string")?;
    mode_share_from_frame(&df, mode_column)
}

/// Split a DataFrame into mode labels and per-district percentage columns.
/// Null or unparseable percentages read as 0.
fn mode_share_from_frame(df: &DataFrame, mode_column: &str) -> Result<ModeShare> {
    let labels = df.column(mode_column)
        .with_context(|| format!("[io::csv::read] missing column {mode_column:?}"))?
        .cast(&DataType::String)?;
    let modes: Vec<String> = labels.str()?
        .into_iter()
        .map(|label| label.unwrap_or_default().trim().to_string())
        .collect();

    let mut districts = Vec::with_capacity(df.width().saturating_sub(1));
    let mut shares = Vec::with_capacity(df.width().saturating_sub(1));
    for column in df.get_columns() {
        if column.name().as_str() == mode_column { continue }

        let values = column.cast(&DataType::Float64)
            .with_context(|| format!("[io::csv::read] column {:?} is not numeric", column.name().as_str()))?;
        shares.push(values.f64()?.into_iter().map(|v| v.unwrap_or(0.0)).collect::<Vec<f64>>());
        districts.push(column.name().as_str().trim().to_string());
    }

    ModeShare::new(modes, districts, shares)
}
