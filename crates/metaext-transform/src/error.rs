#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("unknown transformer function: {name}")]
    UnknownFunction { name: String },

    #[error("transformer for {target} takes exactly one source column, got {count}")]
    SourceCount { target: String, count: usize },

    #[error("{function} cannot transform value '{value}': {reason}")]
    InvalidValue {
        function: String,
        value: String,
        reason: String,
    },
}

impl TransformError {
    pub(crate) fn invalid(function: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            function: function.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
