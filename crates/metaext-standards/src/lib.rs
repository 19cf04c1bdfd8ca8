#![deny(unsafe_code)]

pub mod compose;
pub mod document;
pub mod error;
pub mod merge;
pub mod registry;
pub mod resolve;

pub use crate::compose::{compose, flatten};
pub use crate::document::{SchemaDocument, StudyOverrides, load_schema_document, parse_schema_document};
pub use crate::error::SchemaError;
pub use crate::merge::{combine_host, merge_fields};
pub use crate::registry::{SchemaCache, SchemaRegistry};
pub use crate::resolve::{effective_schema, sample_type_rule};
