//! Output file naming and writers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;

use metaext_model::{FailureRecord, Table, ValidationRecord};

/// File locations for one run: `<name>.txt`, `<name>_validation_errors.csv`
/// and `<name>_fails.csv` under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub extended: PathBuf,
    pub validation_errors: PathBuf,
    pub fails: PathBuf,
}

impl OutputPaths {
    pub fn new(output_dir: &Path, name: &str) -> Self {
        Self {
            extended: output_dir.join(format!("{name}.txt")),
            validation_errors: output_dir.join(format!("{name}_validation_errors.csv")),
            fails: output_dir.join(format!("{name}_fails.csv")),
        }
    }
}

/// Writes the delivered table as tab-separated text in its column order.
pub fn write_extended_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(&table.columns)
        .with_context(|| format!("write header: {}", path.display()))?;
    for row in &table.rows {
        writer
            .write_record(table.columns.iter().map(|column| row.get(column).output_text()))
            .with_context(|| format!("write row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Writes `sample_name,field_name,error_message` rows; the header is always written.
pub fn write_validation_report(path: &Path, records: &[ValidationRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record(["sample_name", "field_name", "error_message"])?;
    for record in records {
        writer.write_record([
            record.sample_name.as_str(),
            record.field_name.as_str(),
            record.error_message.as_str(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Writes the failures side table. Returns `false` without touching the file
/// system when there is nothing to write and `write_empty` is off.
pub fn write_failures(path: &Path, records: &[FailureRecord], write_empty: bool) -> Result<bool> {
    if records.is_empty() && !write_empty {
        return Ok(false);
    }
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record([
        "sample_name",
        "hosttype_shorthand",
        "sampletype_shorthand",
        "qc_note",
    ])?;
    for record in records {
        writer.write_record([
            record.sample_name.as_str(),
            record.hosttype_shorthand.as_str(),
            record.sampletype_shorthand.as_str(),
            record.qc_note.as_str(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(true)
}
