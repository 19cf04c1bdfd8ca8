use serde::{Deserialize, Serialize};

use crate::literal::Literal;

/// Run-wide fill settings: the global default and the required-blank switch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default)]
    pub leave_requireds_blank: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Literal>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_leave_requireds_blank(mut self, enable: bool) -> Self {
        self.leave_requireds_blank = enable;
        self
    }

    /// Settings for one host: the host default, when present, replaces the global one.
    #[must_use]
    pub fn for_host(&self, host_default: Option<&Literal>) -> Self {
        Self {
            default: host_default.cloned().or_else(|| self.default.clone()),
            leave_requireds_blank: self.leave_requireds_blank,
        }
    }
}
