//! Metadata transformers.
//!
//! This crate provides the column transformers a schema document may bind
//! under `metadata_transformers`:
//!
//! - **datetime**: fuzzy (month-first) date parsing
//! - **transformer**: the [`Transformer`] trait and the built-in functions
//! - **registry**: name -> transformer lookup
//! - **apply**: running a set of bindings over a table

pub mod apply;
pub mod datetime;
pub mod error;
pub mod registry;
pub mod transformer;

pub use apply::apply_transformers;
pub use datetime::{format_minute_datetime, parse_fuzzy_datetime};
pub use error::TransformError;
pub use registry::TransformerRegistry;
pub use transformer::{
    AgeToLifeStage, DateToFormattedDate, PassThrough, SexToStdSex, Transformer,
};
