use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One transformer binding: target column <- function(sources).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerSpec {
    pub sources: Vec<String>,
    pub function: String,
    #[serde(default)]
    pub overwrite_non_empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTransformers {
    #[serde(default, alias = "pre", skip_serializing_if = "BTreeMap::is_empty")]
    pub pre_transformers: BTreeMap<String, TransformerSpec>,
    #[serde(default, alias = "post", skip_serializing_if = "BTreeMap::is_empty")]
    pub post_transformers: BTreeMap<String, TransformerSpec>,
}

impl MetadataTransformers {
    pub fn is_empty(&self) -> bool {
        self.pre_transformers.is_empty() && self.post_transformers.is_empty()
    }

    /// Entries of `other` replace same-named entries here.
    pub fn overlay(&mut self, other: &MetadataTransformers) {
        for (target, spec) in &other.pre_transformers {
            self.pre_transformers.insert(target.clone(), spec.clone());
        }
        for (target, spec) in &other.post_transformers {
            self.post_transformers.insert(target.clone(), spec.clone());
        }
    }
}
