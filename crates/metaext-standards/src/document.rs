//! Schema documents.
//!
//! A standards document carries the nested host tree under
//! `host_type_specific_metadata`. A study document carries a flat,
//! host-keyed override layer under `study_specific_metadata`. Both may set the
//! run-wide `default`, `leave_requireds_blank` and `metadata_transformers`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use metaext_model::{HostMap, Literal, MetadataTransformers};

use crate::error::SchemaError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_requireds_blank: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_specific_metadata: Option<StudyOverrides>,
    #[serde(default, skip_serializing_if = "HostMap::is_empty")]
    pub host_type_specific_metadata: HostMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_transformers: Option<MetadataTransformers>,
}

/// The flat study layer: host-type name -> overrides for that host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyOverrides {
    #[serde(default, skip_serializing_if = "HostMap::is_empty")]
    pub host_type_specific_metadata: HostMap,
}

pub fn load_schema_document(path: &Path) -> Result<SchemaDocument, SchemaError> {
    let text = std::fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
    serde_yaml::from_str(&text).map_err(|source| SchemaError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_schema_document(text: &str) -> Result<SchemaDocument, SchemaError> {
    Ok(serde_yaml::from_str(text)?)
}
