use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::TransformError;
use crate::transformer::{AgeToLifeStage, DateToFormattedDate, PassThrough, SexToStdSex, Transformer};

/// Transformer lookup by function name.
#[derive(Clone)]
pub struct TransformerRegistry {
    transformers: BTreeMap<String, Arc<dyn Transformer>>,
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl TransformerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            transformers: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in transformer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PassThrough));
        registry.register(Arc::new(SexToStdSex));
        registry.register(Arc::new(AgeToLifeStage));
        registry.register(Arc::new(DateToFormattedDate));
        registry
    }

    /// Adds a transformer, replacing any registered under the same name.
    pub fn register(&mut self, transformer: Arc<dyn Transformer>) {
        self.transformers
            .insert(transformer.name().to_string(), transformer);
    }

    pub fn get(&self, name: &str) -> Result<&Arc<dyn Transformer>, TransformError> {
        self.transformers
            .get(name)
            .ok_or_else(|| TransformError::UnknownFunction {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transformers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transformers.keys().map(String::as_str)
    }
}
