use thiserror::Error;

/// Shape errors for a sample-type record, raised while a document is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleTypeError {
    #[error("sample type record carries both alias and metadata_fields")]
    AliasWithFields,
    #[error("sample type record carries both alias and base_type")]
    AliasWithBaseType,
    #[error("sample type record needs one of alias, base_type or metadata_fields")]
    Empty,
}
