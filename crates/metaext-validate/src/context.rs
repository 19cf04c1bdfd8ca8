use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::predicates::{CustomCheck, PredicateRegistry};

/// Everything rule evaluation reads besides the row and the schema.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Reference time for date predicates.
    pub now: NaiveDateTime,
    pub predicates: PredicateRegistry,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::at_local_now()
    }
}

impl ValidationContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            predicates: PredicateRegistry::with_builtins(),
        }
    }

    /// A context pinned to the current local wall-clock time.
    pub fn at_local_now() -> Self {
        Self::new(Local::now().naive_local())
    }

    #[must_use]
    pub fn with_predicates(mut self, predicates: PredicateRegistry) -> Self {
        self.predicates = predicates;
        self
    }

    #[must_use]
    pub fn with_check(mut self, check: Arc<dyn CustomCheck>) -> Self {
        self.predicates.register(check);
        self
    }
}
