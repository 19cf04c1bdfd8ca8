use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldMap;
use crate::literal::Literal;
use crate::sample_type::SampleTypeMap;

/// Host-type name -> node.
pub type HostMap = BTreeMap<String, HostTypeNode>;

/// One host type: a fallback fill value, host-wide field rules, per-sample-type
/// records and, in the nested standards only, child host types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostTypeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata_fields: FieldMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sample_type_specific_metadata: SampleTypeMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub host_type_specific_metadata: HostMap,
}

impl HostTypeNode {
    pub fn has_children(&self) -> bool {
        !self.host_type_specific_metadata.is_empty()
    }

    pub fn has_sample_type(&self, name: &str) -> bool {
        self.sample_type_specific_metadata.contains_key(name)
    }

    /// Copy of the node without its child host map.
    pub fn without_children(&self) -> Self {
        Self {
            default: self.default.clone(),
            metadata_fields: self.metadata_fields.clone(),
            sample_type_specific_metadata: self.sample_type_specific_metadata.clone(),
            host_type_specific_metadata: HostMap::new(),
        }
    }
}
