//! Field-rule records.
//!
//! A [`FieldRule`] mirrors one entry of a `metadata_fields` mapping. Shape keys
//! (`type`, `anyof`, `allowed`, `regex`, `check_with`) drive validation,
//! defaulting keys (`default`, `required`) drive materialization, and
//! annotation keys are carried for humans and stripped before validation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::literal::Literal;

/// Field name -> rule, ordered by field name.
pub type FieldMap = BTreeMap<String, FieldRule>;

/// Keys that carry human-facing information only.
pub const ANNOTATION_KEYS: &[&str] = &["is_phi", "field_desc", "units", "min_exclusive", "unique"];

/// Primitive value types a cell may be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Integer,
    Float,
    Number,
    #[serde(alias = "boolean")]
    Bool,
    Datetime,
}

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<PrimitiveType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anyof: Option<Vec<FieldRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Literal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_phi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_exclusive: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    /// Keys this crate does not interpret; carried through merges unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typed(field_type: PrimitiveType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    pub fn any_of(branches: Vec<FieldRule>) -> Self {
        Self {
            anyof: Some(branches),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_allowed<I, L>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Literal>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_check_with(mut self, predicate: impl Into<String>) -> Self {
        self.check_with = Some(predicate.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Overwrites every key set in `add`; keys only present here survive.
    pub fn overlay(&mut self, add: &FieldRule) {
        overlay_option(&mut self.field_type, &add.field_type);
        overlay_option(&mut self.anyof, &add.anyof);
        overlay_option(&mut self.allowed, &add.allowed);
        overlay_option(&mut self.regex, &add.regex);
        overlay_option(&mut self.check_with, &add.check_with);
        overlay_option(&mut self.default, &add.default);
        overlay_option(&mut self.required, &add.required);
        overlay_option(&mut self.is_phi, &add.is_phi);
        overlay_option(&mut self.field_desc, &add.field_desc);
        overlay_option(&mut self.units, &add.units);
        overlay_option(&mut self.min_exclusive, &add.min_exclusive);
        overlay_option(&mut self.unique, &add.unique);
        for (key, value) in &add.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Copy of the rule without annotation keys, applied to `anyof` branches too.
    pub fn strip_annotations(&self) -> FieldRule {
        let mut stripped = self.clone();
        stripped.is_phi = None;
        stripped.field_desc = None;
        stripped.units = None;
        stripped.min_exclusive = None;
        stripped.unique = None;
        for key in ANNOTATION_KEYS {
            stripped.extra.remove(*key);
        }
        if let Some(branches) = &self.anyof {
            stripped.anyof = Some(branches.iter().map(FieldRule::strip_annotations).collect());
        }
        stripped
    }

    /// Names of the keys set on this rule.
    pub fn keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        let known = [
            ("type", self.field_type.is_some()),
            ("anyof", self.anyof.is_some()),
            ("allowed", self.allowed.is_some()),
            ("regex", self.regex.is_some()),
            ("check_with", self.check_with.is_some()),
            ("default", self.default.is_some()),
            ("required", self.required.is_some()),
            ("is_phi", self.is_phi.is_some()),
            ("field_desc", self.field_desc.is_some()),
            ("units", self.units.is_some()),
            ("min_exclusive", self.min_exclusive.is_some()),
            ("unique", self.unique.is_some()),
        ];
        for (name, present) in known {
            if present {
                keys.insert(name.to_string());
            }
        }
        keys.extend(self.extra.keys().cloned());
        keys
    }
}

fn overlay_option<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}
