#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema document {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse schema document: {0}")]
    YamlText(#[from] serde_yaml::Error),

    #[error("unknown host type: {host}")]
    UnknownHostType { host: String },

    #[error("unknown sample type {sample_type} under host type {host}")]
    UnknownSampleType { host: String, sample_type: String },

    #[error("sample type {sample_type} under host type {host} is an alias of missing sample type {target}")]
    MissingAliasTarget {
        host: String,
        sample_type: String,
        target: String,
    },

    #[error(
        "sample type {sample_type} under host type {host} is an alias of {target}, \
         which has no metadata_fields (aliases cannot be chained)"
    )]
    AliasChain {
        host: String,
        sample_type: String,
        target: String,
    },

    #[error("sample type {sample_type} under host type {host} names missing base type {base_type}")]
    MissingBaseType {
        host: String,
        sample_type: String,
        base_type: String,
    },

    #[error(
        "base type {base_type} of sample type {sample_type} under host type {host} \
         must carry only metadata_fields"
    )]
    InvalidBaseType {
        host: String,
        sample_type: String,
        base_type: String,
    },
}

impl SchemaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
