//! Casting text cells to the primitive types a field allows.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use metaext_model::columns::SAMPLE_NAME;
use metaext_model::{CellValue, FieldMap, FieldRule, Literal, PrimitiveType, Row, format_numeric};
use metaext_transform::parse_fuzzy_datetime;

use crate::error::ValidateError;

/// A cell after casting.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Datetime(NaiveDateTime),
}

impl CoercedValue {
    /// Whether the value satisfies `type: <field_type>`.
    pub fn is_of_type(&self, field_type: PrimitiveType) -> bool {
        match field_type {
            PrimitiveType::String => matches!(self, Self::Text(_)),
            PrimitiveType::Integer => matches!(self, Self::Integer(_)),
            PrimitiveType::Float => matches!(self, Self::Float(_)),
            PrimitiveType::Number => matches!(self, Self::Integer(_) | Self::Float(_)),
            PrimitiveType::Bool => matches!(self, Self::Bool(_)),
            PrimitiveType::Datetime => matches!(self, Self::Datetime(_)),
        }
    }

    /// Literal equality; integers and floats compare numerically.
    pub fn matches_literal(&self, literal: &Literal) -> bool {
        match (self, literal) {
            (Self::Text(value), Literal::Text(expected)) => value == expected,
            (Self::Bool(value), Literal::Bool(expected)) => value == expected,
            (Self::Integer(value), Literal::Integer(expected)) => value == expected,
            (Self::Integer(_) | Self::Float(_), Literal::Integer(_) | Literal::Float(_)) => {
                self.as_f64() == literal.as_f64()
            }
            _ => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_numeric(*value)),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Datetime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A schema field as seen by one row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The row has no value (missing cell or absent column).
    Absent,
    /// The row carries the field but leaves it blank.
    Empty,
    Value(CoercedValue),
}

/// A row with every schema field cast; the input to rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedRow {
    pub sample_name: String,
    pub fields: BTreeMap<String, FieldValue>,
}

/// The primitive types a field accepts, in declaration order.
pub fn allowed_types(field: &str, rule: &FieldRule) -> Result<Vec<PrimitiveType>, ValidateError> {
    if let Some(branches) = &rule.anyof {
        let mut types = Vec::with_capacity(branches.len());
        for branch in branches {
            let branch_type = branch
                .field_type
                .ok_or_else(|| ValidateError::AnyofBranchMissingType {
                    field: field.to_string(),
                })?;
            if !types.contains(&branch_type) {
                types.push(branch_type);
            }
        }
        return Ok(types);
    }
    rule.field_type
        .map(|t| vec![t])
        .ok_or_else(|| ValidateError::UntypedField {
            field: field.to_string(),
        })
}

/// Casts `text` to `target`, or `None` when it does not fit.
pub fn cast_value(text: &str, target: PrimitiveType) -> Option<CoercedValue> {
    let trimmed = text.trim();
    match target {
        PrimitiveType::String => Some(CoercedValue::Text(text.to_string())),
        PrimitiveType::Integer => trimmed.parse().ok().map(CoercedValue::Integer),
        PrimitiveType::Float => parse_finite(trimmed).map(CoercedValue::Float),
        PrimitiveType::Number => trimmed
            .parse()
            .ok()
            .map(CoercedValue::Integer)
            .or_else(|| parse_finite(trimmed).map(CoercedValue::Float)),
        PrimitiveType::Bool => parse_bool(trimmed).map(CoercedValue::Bool),
        PrimitiveType::Datetime => parse_fuzzy_datetime(trimmed).map(CoercedValue::Datetime),
    }
}

/// Casts every schema field the row carries.
///
/// Missing cells are absent; blank cells are present but empty and are not
/// cast. A value that fits none of its field's types is an error.
pub fn coerce_row(row: &Row, schema: &FieldMap) -> Result<CoercedRow, ValidateError> {
    let sample_name = row.text(SAMPLE_NAME).unwrap_or_default().to_string();
    let mut fields = BTreeMap::new();
    for (field, rule) in schema {
        let value = match row.get(field) {
            CellValue::Missing => FieldValue::Absent,
            CellValue::LeaveBlank | CellValue::RequiredPlaceholder => FieldValue::Empty,
            CellValue::Text(text) if text.trim().is_empty() => FieldValue::Empty,
            CellValue::Text(text) => {
                let types = allowed_types(field, rule)?;
                let coerced = types
                    .iter()
                    .find_map(|t| cast_value(text, *t))
                    .ok_or_else(|| ValidateError::UncastableValue {
                        sample_name: sample_name.clone(),
                        field: field.clone(),
                        value: text.clone(),
                        allowed: types.clone(),
                    })?;
                FieldValue::Value(coerced)
            }
        };
        fields.insert(field.clone(), value);
    }
    Ok(CoercedRow {
        sample_name,
        fields,
    })
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
