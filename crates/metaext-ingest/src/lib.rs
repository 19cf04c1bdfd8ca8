//! Metadata ingestion and output.
//!
//! - **delimited**: CSV/TSV reading with the `csv` crate
//! - **streaming**: Polars reader used for large files
//! - **output**: extended table, validation report and failures writers

pub mod delimited;
pub mod output;
pub mod polars_utils;
pub mod streaming;

pub use delimited::{Delimiter, read_delimited_table, read_metadata_table};
pub use output::{
    OutputPaths, write_extended_table, write_failures, write_validation_report,
};
pub use polars_utils::any_to_string;
pub use streaming::{
    DEFAULT_STREAMING_THRESHOLD_BYTES, read_with_polars, should_use_streaming,
    should_use_streaming_with_threshold,
};
