use std::path::PathBuf;

use metaext_core::PartitionSummary;
use metaext_ingest::OutputPaths;
use metaext_model::ValidationRecord;

/// What an `extend` run produced.
#[derive(Debug)]
pub struct ExtendResult {
    pub name: String,
    pub metadata: PathBuf,
    pub rows: usize,
    pub partitions: Vec<PartitionSummary>,
    pub records: Vec<ValidationRecord>,
    /// Files written; `None` on a dry run.
    pub outputs: Option<WrittenOutputs>,
}

impl ExtendResult {
    pub fn has_violations(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn failed_rows(&self) -> usize {
        self.partitions
            .iter()
            .filter(|summary| summary.qc_note.is_some())
            .map(|summary| summary.rows)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    pub paths: OutputPaths,
    /// Whether the failures file was written.
    pub fails_written: bool,
}

/// One row of the `hosts` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostListing {
    pub host: String,
    pub default: Option<String>,
    pub fields: usize,
    pub sample_types: Vec<String>,
}
