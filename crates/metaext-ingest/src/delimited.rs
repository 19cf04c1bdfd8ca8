#![deny(unsafe_code)]

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use metaext_model::Table;

use crate::streaming::{read_with_polars, should_use_streaming};

/// Field separator of a metadata file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// `.csv` is comma-separated; `.tsv` and `.txt` are tab-separated.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Comma),
            Some("tsv" | "txt") => Ok(Self::Tab),
            _ => anyhow::bail!(
                "unsupported metadata file type (expected .csv, .tsv or .txt): {}",
                path.display()
            ),
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

/// Reads a metadata table, picking the separator from the file extension.
///
/// Files at or above the streaming threshold go through Polars; everything is
/// kept as text either way.
pub fn read_metadata_table(path: &Path) -> Result<Table> {
    let delimiter = Delimiter::from_path(path)?;
    let table = if should_use_streaming(path) {
        debug!(path = %path.display(), "using Polars for large metadata file");
        read_with_polars(path, delimiter)?
    } else {
        read_delimited_table(path, delimiter)?
    };
    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        "metadata table read"
    );
    Ok(table)
}

pub fn read_delimited_table(path: &Path, delimiter: Delimiter) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_path(path)
        .with_context(|| format!("read metadata: {}", path.display()))?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let line = record.position().map_or(0, |position| position.line());
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        records.push((line, row));
    }

    let mut records = records.into_iter();
    let Some((_, header)) = records.next() else {
        return Ok(Table::default());
    };
    let columns: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
    let mut rows = Vec::with_capacity(records.len());
    for (line, mut row) in records {
        // Short rows are padded; long rows would lose cells.
        if row.len() > columns.len() {
            anyhow::bail!(
                "record on line {line} of {} has {} fields but the header has {}",
                path.display(),
                row.len(),
                columns.len()
            );
        }
        row.resize(columns.len(), String::new());
        rows.push(row);
    }
    Ok(Table::from_text_rows(columns, rows))
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}
