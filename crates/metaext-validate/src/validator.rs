use tracing::debug;

use metaext_model::{FieldMap, Row, Violation};

use crate::coerce::coerce_row;
use crate::compiled::CompiledSchema;
use crate::context::ValidationContext;
use crate::error::ValidateError;

/// Validates every row of a materialized partition against its effective schema.
///
/// Returns one [`Violation`] per failing (row, field), in row order and then
/// field-name order. Schema problems and uncastable cells are errors.
pub fn validate_rows(
    rows: &[Row],
    schema: &FieldMap,
    ctx: &ValidationContext,
) -> Result<Vec<Violation>, ValidateError> {
    let compiled = CompiledSchema::compile(schema, ctx)?;
    let mut violations = Vec::new();
    for row in rows {
        violations.extend(check_row(&compiled, row, ctx)?);
    }
    debug!(
        rows = rows.len(),
        fields = schema.len(),
        violations = violations.len(),
        "rows validated"
    );
    Ok(violations)
}

pub fn validate_row(
    row: &Row,
    schema: &FieldMap,
    ctx: &ValidationContext,
) -> Result<Vec<Violation>, ValidateError> {
    let compiled = CompiledSchema::compile(schema, ctx)?;
    check_row(&compiled, row, ctx)
}

fn check_row(
    compiled: &CompiledSchema,
    row: &Row,
    ctx: &ValidationContext,
) -> Result<Vec<Violation>, ValidateError> {
    let coerced = coerce_row(row, &compiled.rules)?;
    let violations = compiled
        .evaluate(&coerced, ctx.now)
        .into_iter()
        .map(|(field_name, error_message)| Violation {
            sample_name: coerced.sample_name.clone(),
            field_name,
            error_message,
        })
        .collect();
    Ok(violations)
}
