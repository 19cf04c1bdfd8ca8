//! Metadata extension pipeline.
//!
//! - **partition**: first-observed grouping of rows by a column
//! - **materialize**: defaults, required placeholders and fills for one
//!   (host, sample type) partition
//! - **extend**: the full run over an input table
//! - **output**: delivered column order and the failures side table

pub mod context;
pub mod error;
pub mod extend;
pub mod materialize;
pub mod output;
pub mod partition;

pub use context::ExtendContext;
pub use error::ExtendError;
pub use extend::{ExtendedMetadata, PartitionSummary, extend_metadata, extend_metadata_with_cache};
pub use materialize::materialize_partition;
pub use output::{ordered_columns, output_table};
pub use partition::partition_rows;
