//! Column names and quality-note values shared across the pipeline.

pub const SAMPLE_NAME: &str = "sample_name";
pub const HOSTTYPE_SHORTHAND: &str = "hosttype_shorthand";
pub const SAMPLETYPE_SHORTHAND: &str = "sampletype_shorthand";

/// Internal quality-note column, removed from the delivered table.
pub const QC_NOTE: &str = "qc_note";

pub const SAMPLE_TYPE: &str = "sample_type";
pub const QIITA_SAMPLE_TYPE: &str = "qiita_sample_type";

pub const INVALID_HOST_TYPE: &str = "invalid host_type";
pub const INVALID_SAMPLE_TYPE: &str = "invalid sample_type";

/// Columns every input table must carry.
pub const REQUIRED_INPUT_COLUMNS: &[&str] = &[SAMPLE_NAME, HOSTTYPE_SHORTHAND, SAMPLETYPE_SHORTHAND];

/// Columns added by the pipeline for its own bookkeeping.
pub const INTERNAL_COLUMNS: &[&str] = &[QC_NOTE];

pub fn is_internal(column: &str) -> bool {
    INTERNAL_COLUMNS.contains(&column)
}
