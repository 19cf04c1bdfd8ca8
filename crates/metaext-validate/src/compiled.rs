//! Schemas prepared for evaluation: annotations stripped, regexes compiled,
//! predicates looked up.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use regex::Regex;

use metaext_model::{ErrorItem, FieldMap, FieldRule};

use crate::coerce::{CoercedRow, CoercedValue, FieldValue};
use crate::context::ValidationContext;
use crate::error::ValidateError;
use crate::predicates::CustomCheck;

pub(crate) const REQUIRED_FIELD: &str = "required field";
pub(crate) const NO_DEFINITIONS_VALIDATE: &str = "no definitions validate";

pub(crate) struct CompiledSchema {
    pub(crate) rules: FieldMap,
    fields: BTreeMap<String, CompiledRule>,
}

struct CompiledRule {
    rule: FieldRule,
    regex: Option<Regex>,
    check: Option<Arc<dyn CustomCheck>>,
    branches: Vec<CompiledRule>,
}

impl CompiledSchema {
    pub(crate) fn compile(schema: &FieldMap, ctx: &ValidationContext) -> Result<Self, ValidateError> {
        let rules: FieldMap = schema
            .iter()
            .map(|(field, rule)| (field.clone(), rule.strip_annotations()))
            .collect();
        let fields = rules
            .iter()
            .map(|(field, rule)| Ok((field.clone(), CompiledRule::compile(field, rule, ctx)?)))
            .collect::<Result<_, ValidateError>>()?;
        Ok(Self { rules, fields })
    }

    pub(crate) fn evaluate(&self, row: &CoercedRow, now: NaiveDateTime) -> BTreeMap<String, Vec<ErrorItem>> {
        let mut failures = BTreeMap::new();
        for (field, compiled) in &self.fields {
            let errors = match row.fields.get(field) {
                None | Some(FieldValue::Absent) => {
                    if compiled.rule.is_required() {
                        vec![ErrorItem::message(REQUIRED_FIELD)]
                    } else {
                        Vec::new()
                    }
                }
                Some(FieldValue::Empty) => Vec::new(),
                Some(FieldValue::Value(value)) => compiled.errors(value, now),
            };
            if !errors.is_empty() {
                failures.insert(field.clone(), errors);
            }
        }
        failures
    }
}

impl CompiledRule {
    fn compile(field: &str, rule: &FieldRule, ctx: &ValidationContext) -> Result<Self, ValidateError> {
        let regex = rule
            .regex
            .as_deref()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|source| ValidateError::InvalidRegex {
                    field: field.to_string(),
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;
        let check = rule
            .check_with
            .as_deref()
            .map(|name| {
                ctx.predicates
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ValidateError::UnknownPredicate {
                        field: field.to_string(),
                        name: name.to_string(),
                    })
            })
            .transpose()?;
        let branches = rule
            .anyof
            .iter()
            .flatten()
            .map(|branch| CompiledRule::compile(field, branch, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rule: rule.clone(),
            regex,
            check,
            branches,
        })
    }

    /// Violations of `value` against this rule. A type mismatch ends evaluation.
    fn errors(&self, value: &CoercedValue, now: NaiveDateTime) -> Vec<ErrorItem> {
        if let Some(field_type) = self.rule.field_type {
            if !value.is_of_type(field_type) {
                return vec![ErrorItem::Message(format!("must be of {field_type} type"))];
            }
        }

        let mut errors = Vec::new();
        if let Some(allowed) = &self.rule.allowed {
            if !allowed.iter().any(|literal| value.matches_literal(literal)) {
                errors.push(ErrorItem::Message(format!("unallowed value {value}")));
            }
        }
        if let (Some(regex), CoercedValue::Text(text)) = (&self.regex, value) {
            if !regex.is_match(text) {
                let pattern = self.rule.regex.as_deref().unwrap_or_default();
                errors.push(ErrorItem::Message(format!(
                    "value does not match regex '{pattern}'"
                )));
            }
        }
        if let Some(check) = &self.check {
            errors.extend(check.check(value, now).into_iter().map(ErrorItem::Message));
        }
        if !self.branches.is_empty() {
            let mut branch_errors = BTreeMap::new();
            for (index, branch) in self.branches.iter().enumerate() {
                let found = branch.errors(value, now);
                if found.is_empty() {
                    return errors;
                }
                branch_errors.insert(index, found);
            }
            errors.push(ErrorItem::message(NO_DEFINITIONS_VALIDATE));
            errors.push(ErrorItem::Branches(branch_errors));
        }
        errors
    }
}
