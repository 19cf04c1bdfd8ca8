//! The transformer trait and the built-in functions.

use crate::datetime::{format_minute_datetime, parse_fuzzy_datetime};
use crate::error::TransformError;

/// A single-column value transformer.
///
/// Transformers see one non-empty source value at a time and return the value
/// to write into the target column.
pub trait Transformer: Send + Sync {
    /// Function name used in schema documents.
    fn name(&self) -> &str;

    fn transform(&self, value: &str) -> Result<String, TransformError>;
}

/// Copies the source value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Transformer for PassThrough {
    fn name(&self) -> &str {
        "pass_through"
    }

    fn transform(&self, value: &str) -> Result<String, TransformError> {
        Ok(value.to_string())
    }
}

/// Normalizes free-text sex values to `female`, `male`, `intersex` or
/// `not provided`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SexToStdSex;

impl Transformer for SexToStdSex {
    fn name(&self) -> &str {
        "transform_input_sex_to_std_sex"
    }

    fn transform(&self, value: &str) -> Result<String, TransformError> {
        let normalized = value.trim().to_lowercase();
        let standard = match normalized.as_str() {
            "f" | "female" | "woman" => "female",
            "m" | "male" | "man" => "male",
            "intersex" => "intersex",
            "not provided" | "unknown" | "prefer not to answer" => "not provided",
            _ => {
                return Err(TransformError::invalid(
                    self.name(),
                    value,
                    "unrecognized sex value",
                ));
            }
        };
        Ok(standard.to_string())
    }
}

/// Maps a numeric age in years to `child` (under 17) or `adult`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeToLifeStage;

impl AgeToLifeStage {
    pub const ADULT_AGE: f64 = 17.0;
}

impl Transformer for AgeToLifeStage {
    fn name(&self) -> &str {
        "transform_age_to_life_stage"
    }

    fn transform(&self, value: &str) -> Result<String, TransformError> {
        let age: f64 = value
            .trim()
            .parse()
            .map_err(|_| TransformError::invalid(self.name(), value, "age is not numeric"))?;
        if !age.is_finite() {
            return Err(TransformError::invalid(self.name(), value, "age is not finite"));
        }
        let stage = if age < Self::ADULT_AGE { "child" } else { "adult" };
        Ok(stage.to_string())
    }
}

/// Reformats a free-text date as `YYYY-MM-DD HH:MM`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateToFormattedDate;

impl Transformer for DateToFormattedDate {
    fn name(&self) -> &str {
        "transform_date_to_formatted_date"
    }

    fn transform(&self, value: &str) -> Result<String, TransformError> {
        parse_fuzzy_datetime(value)
            .map(format_minute_datetime)
            .ok_or_else(|| TransformError::invalid(self.name(), value, "unparseable date"))
    }
}
