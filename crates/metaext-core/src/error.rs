#![deny(unsafe_code)]

use metaext_standards::SchemaError;
use metaext_transform::TransformError;
use metaext_validate::ValidateError;

#[derive(Debug, thiserror::Error)]
pub enum ExtendError {
    #[error("metadata is missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}
