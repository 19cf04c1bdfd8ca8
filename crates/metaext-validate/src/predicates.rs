//! Named `check_with` predicates.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;

use metaext_transform::parse_fuzzy_datetime;

use crate::coerce::CoercedValue;

/// A custom rule referenced by name from `check_with`.
pub trait CustomCheck: Send + Sync {
    fn name(&self) -> &str;

    /// Messages for every way `value` fails the check; empty when it passes.
    fn check(&self, value: &CoercedValue, now: NaiveDateTime) -> Vec<String>;
}

/// Rejects values that are not dates, or dates after `now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateNotInFuture;

impl DateNotInFuture {
    pub const INVALID_DATE: &'static str = "Must be a valid date";
    pub const FUTURE_DATE: &'static str = "Date cannot be in the future";
}

impl CustomCheck for DateNotInFuture {
    fn name(&self) -> &str {
        "date_not_in_future"
    }

    fn check(&self, value: &CoercedValue, now: NaiveDateTime) -> Vec<String> {
        let parsed = match value {
            CoercedValue::Datetime(dt) => Some(*dt),
            other => parse_fuzzy_datetime(&other.to_string()),
        };
        match parsed {
            None => vec![Self::INVALID_DATE.to_string()],
            Some(dt) if dt > now => vec![Self::FUTURE_DATE.to_string()],
            Some(_) => Vec::new(),
        }
    }
}

/// Predicate lookup by name.
#[derive(Clone)]
pub struct PredicateRegistry {
    checks: BTreeMap<String, Arc<dyn CustomCheck>>,
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.checks.keys()).finish()
    }
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self {
            checks: BTreeMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DateNotInFuture));
        registry
    }

    pub fn register(&mut self, check: Arc<dyn CustomCheck>) {
        self.checks.insert(check.name().to_string(), check);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn CustomCheck>> {
        self.checks.get(name)
    }
}
