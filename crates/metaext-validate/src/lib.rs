#![deny(unsafe_code)]

mod coerce;
mod compiled;
mod context;
mod error;
mod predicates;
mod report;
mod validator;

pub use coerce::{CoercedRow, CoercedValue, FieldValue, allowed_types, cast_value, coerce_row};
pub use context::ValidationContext;
pub use error::ValidateError;
pub use predicates::{CustomCheck, DateNotInFuture, PredicateRegistry};
pub use report::{flatten_violations, render_report};
pub use validator::{validate_row, validate_rows};
