//! Validation results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One item of a violation's error list: a plain message, or the per-branch
/// messages of a failed `anyof`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorItem {
    Message(String),
    Branches(BTreeMap<usize, Vec<ErrorItem>>),
}

impl ErrorItem {
    pub fn message(value: impl Into<String>) -> Self {
        Self::Message(value.into())
    }
}

/// Renders a branch map as `branch 0: v1, v2; branch 1: v3`.
impl fmt::Display for ErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.write_str(message),
            Self::Branches(branches) => {
                let rendered: Vec<String> = branches
                    .iter()
                    .map(|(index, items)| {
                        let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
                        format!("branch {index}: {}", joined.join(", "))
                    })
                    .collect();
                f.write_str(&rendered.join("; "))
            }
        }
    }
}

/// Every failing (row, field) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub sample_name: String,
    pub field_name: String,
    pub error_message: Vec<ErrorItem>,
}

/// One flattened report line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub sample_name: String,
    pub field_name: String,
    pub error_message: String,
}

/// A row the pipeline could not apply rules to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub sample_name: String,
    pub hosttype_shorthand: String,
    pub sampletype_shorthand: String,
    pub qc_note: String,
}
