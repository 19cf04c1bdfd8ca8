//! Polars-backed reading for large metadata files.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use metaext_model::Table;

use crate::delimited::{Delimiter, normalize_cell, normalize_header};
use crate::polars_utils::any_to_string;

/// Default file size threshold (in bytes) above which Polars is used.
/// Default: 10 MB
pub const DEFAULT_STREAMING_THRESHOLD_BYTES: u64 = 10 * 1024 * 1024;

/// Check if a file should use streaming based on its size.
pub fn should_use_streaming(path: impl AsRef<Path>) -> bool {
    should_use_streaming_with_threshold(path, DEFAULT_STREAMING_THRESHOLD_BYTES)
}

/// Check if a file should use streaming based on a custom threshold.
pub fn should_use_streaming_with_threshold(path: impl AsRef<Path>, threshold_bytes: u64) -> bool {
    std::fs::metadata(path.as_ref())
        .map(|m| m.len() >= threshold_bytes)
        .unwrap_or(false)
}

/// Reads a delimited file through Polars with schema inference disabled, so
/// every column stays text. Rows longer than the header are an error.
pub fn read_with_polars(path: &Path, delimiter: Delimiter) -> Result<Table> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| {
            opts.with_separator(delimiter.as_byte())
                .with_truncate_ragged_lines(false)
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    dataframe_to_table(&df)
}

fn dataframe_to_table(df: &DataFrame) -> Result<Table> {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| normalize_header(name.as_str()))
        .collect();

    let mut rows = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for col in df.get_columns() {
            let value = col.get(row_idx).map_err(|e| anyhow::anyhow!("{}", e))?;
            row.push(normalize_cell(&any_to_string(value)));
        }
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    Ok(Table::from_text_rows(columns, rows))
}
