use metaext_model::PrimitiveType;

/// Errors that stop validation of a partition.
///
/// Rule violations are data, not errors; these cover schemas the validator
/// cannot run and cells that fit none of a field's types.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error(
        "value '{value}' of field {field} in sample {sample_name} cannot be cast to any of {}",
        format_types(.allowed)
    )]
    UncastableValue {
        sample_name: String,
        field: String,
        value: String,
        allowed: Vec<PrimitiveType>,
    },

    #[error("anyof branch of field {field} has no type")]
    AnyofBranchMissingType { field: String },

    #[error("field {field} has neither type nor anyof")]
    UntypedField { field: String },

    #[error("field {field} names unknown check_with predicate {name}")]
    UnknownPredicate { field: String, name: String },

    #[error("field {field} has invalid regex '{pattern}': {source}")]
    InvalidRegex {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

fn format_types(types: &[PrimitiveType]) -> String {
    let names: Vec<&str> = types.iter().copied().map(PrimitiveType::as_str).collect();
    format!("[{}]", names.join(", "))
}
