#![deny(unsafe_code)]

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use metaext_model::{FieldMap, HostMap, HostTypeNode, MetadataTransformers, Settings};

use crate::compose::{compose, flatten};
use crate::document::{SchemaDocument, load_schema_document};
use crate::error::SchemaError;
use crate::resolve::effective_schema;

/// The composed, flattened schema for one run. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    hosts: HostMap,
    settings: Settings,
    transformers: MetadataTransformers,
}

impl SchemaRegistry {
    /// Composes the study layer onto the standards and flattens the result.
    ///
    /// Without a study document, the standards document's own
    /// `study_specific_metadata` (if any) is used as the study layer. Study
    /// settings and transformers take precedence over the standards ones.
    pub fn build(standards: &SchemaDocument, study: Option<&SchemaDocument>) -> Self {
        let overrides = study
            .and_then(|doc| doc.study_specific_metadata.as_ref())
            .or(standards.study_specific_metadata.as_ref())
            .map(|layer| layer.host_type_specific_metadata.clone())
            .unwrap_or_default();

        let nested = compose(&overrides, &standards.host_type_specific_metadata);
        let hosts = flatten(&nested);

        let settings = Settings {
            default: study
                .and_then(|doc| doc.default.clone())
                .or_else(|| standards.default.clone()),
            leave_requireds_blank: study
                .and_then(|doc| doc.leave_requireds_blank)
                .or(standards.leave_requireds_blank)
                .unwrap_or(false),
        };

        let mut transformers = standards.metadata_transformers.clone().unwrap_or_default();
        if let Some(study_transformers) = study.and_then(|doc| doc.metadata_transformers.as_ref()) {
            transformers.overlay(study_transformers);
        }

        info!(
            host_count = hosts.len(),
            override_count = overrides.len(),
            "schema registry built"
        );
        Self {
            hosts,
            settings,
            transformers,
        }
    }

    pub fn from_paths(standards: &Path, study: Option<&Path>) -> Result<Self, SchemaError> {
        let standards_doc = load_schema_document(standards)?;
        let study_doc = study.map(load_schema_document).transpose()?;
        Ok(Self::build(&standards_doc, study_doc.as_ref()))
    }

    /// Builds a registry from an already flattened host map.
    pub fn from_flat(hosts: HostMap, settings: Settings) -> Self {
        Self {
            hosts,
            settings,
            transformers: MetadataTransformers::default(),
        }
    }

    #[must_use]
    pub fn with_transformers(mut self, transformers: MetadataTransformers) -> Self {
        self.transformers = transformers;
        self
    }

    pub fn hosts(&self) -> &HostMap {
        &self.hosts
    }

    pub fn host(&self, name: &str) -> Option<&HostTypeNode> {
        self.hosts.get(name)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn transformers(&self) -> &MetadataTransformers {
        &self.transformers
    }

    pub fn effective_schema(&self, host: &str, sample_type: &str) -> Result<FieldMap, SchemaError> {
        let node = self
            .hosts
            .get(host)
            .ok_or_else(|| SchemaError::UnknownHostType {
                host: host.to_string(),
            })?;
        effective_schema(host, node, sample_type)
    }
}

/// Effective schemas resolved so far, keyed by (host, sample type).
///
/// One cache per worker; the registry itself is shared read-only.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: HashMap<(String, String), FieldMap>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_resolve(
        &mut self,
        registry: &SchemaRegistry,
        host: &str,
        sample_type: &str,
    ) -> Result<&FieldMap, SchemaError> {
        let key = (host.to_string(), sample_type.to_string());
        if !self.entries.contains_key(&key) {
            let schema = registry.effective_schema(host, sample_type)?;
            self.entries.insert(key.clone(), schema);
        } else {
            debug!(host, sample_type, "effective schema cache hit");
        }
        Ok(&self.entries[&key])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
