//! Sample-type records.
//!
//! A sample type under a host is either an alias to another sample type, a
//! derivation from a metadata-only base type (optionally with its own fields),
//! or a direct set of metadata fields. The raw YAML shape is checked when the
//! document is parsed, so an invalid combination never reaches the merger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SampleTypeError;
use crate::field::FieldMap;

/// Sample-type name -> record.
pub type SampleTypeMap = BTreeMap<String, SampleTypeDef>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleType", into = "RawSampleType")]
pub enum SampleTypeDef {
    Alias(String),
    Derived {
        base_type: String,
        metadata_fields: Option<FieldMap>,
    },
    Direct(FieldMap),
}

/// How a record defines its metadata, used when two records are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Alias,
    BaseType,
    MetadataFields,
}

impl SampleTypeDef {
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Alias(_) => DefinitionKind::Alias,
            Self::Derived {
                metadata_fields: Some(_),
                ..
            }
            | Self::Direct(_) => DefinitionKind::MetadataFields,
            Self::Derived {
                metadata_fields: None,
                ..
            } => DefinitionKind::BaseType,
        }
    }

    pub fn metadata_fields(&self) -> Option<&FieldMap> {
        match self {
            Self::Alias(_) => None,
            Self::Derived {
                metadata_fields, ..
            } => metadata_fields.as_ref(),
            Self::Direct(fields) => Some(fields),
        }
    }

    pub fn base_type(&self) -> Option<&str> {
        match self {
            Self::Derived { base_type, .. } => Some(base_type),
            _ => None,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Alias(target) => Some(target),
            _ => None,
        }
    }

    /// Rebuilds a record from an optional base type and optional fields.
    pub fn from_parts(base_type: Option<String>, metadata_fields: Option<FieldMap>) -> Self {
        match (base_type, metadata_fields) {
            (Some(base_type), metadata_fields) => Self::Derived {
                base_type,
                metadata_fields,
            },
            (None, fields) => Self::Direct(fields.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawSampleType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata_fields: Option<FieldMap>,
}

impl TryFrom<RawSampleType> for SampleTypeDef {
    type Error = SampleTypeError;

    fn try_from(raw: RawSampleType) -> Result<Self, Self::Error> {
        match (raw.alias, raw.base_type, raw.metadata_fields) {
            (Some(_), _, Some(_)) => Err(SampleTypeError::AliasWithFields),
            (Some(_), Some(_), None) => Err(SampleTypeError::AliasWithBaseType),
            (Some(target), None, None) => Ok(Self::Alias(target)),
            (None, Some(base_type), metadata_fields) => Ok(Self::Derived {
                base_type,
                metadata_fields,
            }),
            (None, None, Some(fields)) => Ok(Self::Direct(fields)),
            (None, None, None) => Err(SampleTypeError::Empty),
        }
    }
}

impl From<SampleTypeDef> for RawSampleType {
    fn from(def: SampleTypeDef) -> Self {
        match def {
            SampleTypeDef::Alias(target) => Self {
                alias: Some(target),
                ..Self::default()
            },
            SampleTypeDef::Derived {
                base_type,
                metadata_fields,
            } => Self {
                base_type: Some(base_type),
                metadata_fields,
                ..Self::default()
            },
            SampleTypeDef::Direct(fields) => Self {
                metadata_fields: Some(fields),
                ..Self::default()
            },
        }
    }
}
