use metaext_standards::SchemaRegistry;
use metaext_transform::TransformerRegistry;
use metaext_validate::ValidationContext;

/// Inputs shared by every partition of one extension run.
///
/// Unset transformer and validation contexts fall back to the built-in
/// transformers and a context pinned to the local time at the start of the run.
#[derive(Debug, Clone, Copy)]
pub struct ExtendContext<'a> {
    pub registry: &'a SchemaRegistry,
    pub transformers: Option<&'a TransformerRegistry>,
    pub validation: Option<&'a ValidationContext>,
}

impl<'a> ExtendContext<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            transformers: None,
            validation: None,
        }
    }

    pub fn with_transformers(mut self, transformers: &'a TransformerRegistry) -> Self {
        self.transformers = Some(transformers);
        self
    }

    pub fn with_validation(mut self, validation: &'a ValidationContext) -> Self {
        self.validation = Some(validation);
        self
    }
}
