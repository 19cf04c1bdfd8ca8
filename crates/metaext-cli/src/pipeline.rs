//! Stages behind the `metaext` subcommands.
//!
//! Each stage is a plain function over paths and registries so the binary and
//! the integration tests drive exactly the same code.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use metaext_core::{ExtendContext, ExtendedMetadata, extend_metadata};
use metaext_ingest::{
    OutputPaths, read_metadata_table, write_extended_table, write_failures,
    write_validation_report,
};
use metaext_model::Literal;
use metaext_standards::SchemaRegistry;
use metaext_transform::TransformerRegistry;
use metaext_validate::ValidationContext;

use crate::logging::redact_value;
use crate::types::{ExtendResult, HostListing, WrittenOutputs};

/// Inputs of one `extend` run.
#[derive(Debug, Clone)]
pub struct ExtendRequest {
    pub metadata: PathBuf,
    pub standards: PathBuf,
    pub study: Option<PathBuf>,
    /// Defaults to the directory holding the metadata file.
    pub output_dir: Option<PathBuf>,
    /// Defaults to `<metadata stem>_extended`.
    pub name: Option<String>,
    pub dry_run: bool,
    /// Write `<name>_fails.csv` even when no row failed.
    pub write_empty_fails: bool,
}

impl ExtendRequest {
    pub fn new(metadata: impl Into<PathBuf>, standards: impl Into<PathBuf>) -> Self {
        Self {
            metadata: metadata.into(),
            standards: standards.into(),
            study: None,
            output_dir: None,
            name: None,
            dry_run: false,
            write_empty_fails: false,
        }
    }

    #[must_use]
    pub fn with_study(mut self, study: impl Into<PathBuf>) -> Self {
        self.study = Some(study.into());
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let stem = self
            .metadata
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("metadata");
        format!("{stem}_extended")
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        match self.metadata.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Loads, composes and flattens the standards document and optional study overlay.
pub fn load_registry(standards: &Path, study: Option<&Path>) -> Result<SchemaRegistry> {
    SchemaRegistry::from_paths(standards, study).with_context(|| match study {
        Some(study) => format!(
            "load schema: {} + {}",
            standards.display(),
            study.display()
        ),
        None => format!("load schema: {}", standards.display()),
    })
}

/// Flattened hosts in name order.
pub fn list_hosts(registry: &SchemaRegistry) -> Vec<HostListing> {
    registry
        .hosts()
        .iter()
        .map(|(name, node)| HostListing {
            host: name.clone(),
            default: node.default.as_ref().map(Literal::to_cell_text),
            fields: node.metadata_fields.len(),
            sample_types: node.sample_type_specific_metadata.keys().cloned().collect(),
        })
        .collect()
}

/// The resolved schema for one (host, sample type) pair as pretty JSON.
pub fn effective_schema_json(
    registry: &SchemaRegistry,
    host: &str,
    sample_type: &str,
) -> Result<String> {
    let schema = registry
        .effective_schema(host, sample_type)
        .with_context(|| format!("resolve schema for {host}/{sample_type}"))?;
    serde_json::to_string_pretty(&schema).context("serialize schema")
}

/// Runs ingest, extension, validation and output for one metadata file.
pub fn run_extend(request: &ExtendRequest, validation: &ValidationContext) -> Result<ExtendResult> {
    let name = request.output_name();
    let span = info_span!("extend", name = %name);
    let _guard = span.enter();
    let started = Instant::now();

    let registry = load_registry(&request.standards, request.study.as_deref())?;
    let input = read_metadata_table(&request.metadata)?;
    info!(
        rows = input.len(),
        columns = input.columns.len(),
        hosts = registry.hosts().len(),
        "metadata loaded"
    );

    let transformers = TransformerRegistry::with_builtins();
    let ctx = ExtendContext::new(&registry)
        .with_transformers(&transformers)
        .with_validation(validation);
    let extended = extend_metadata(&input, &ctx)
        .with_context(|| format!("extend {}", request.metadata.display()))?;

    let records = extended.validation_records();
    for record in &records {
        trace!(
            sample = redact_value(&record.sample_name),
            field = %record.field_name,
            message = %record.error_message,
            "validation error"
        );
    }

    let outputs = if request.dry_run {
        info!("dry run, no files written");
        None
    } else {
        Some(write_outputs(request, &name, &extended)?)
    };

    let rows = extended.table.len();
    info!(
        rows,
        violations = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "extend complete"
    );
    Ok(ExtendResult {
        name,
        metadata: request.metadata.clone(),
        rows,
        partitions: extended.partitions,
        records,
        outputs,
    })
}

fn write_outputs(
    request: &ExtendRequest,
    name: &str,
    extended: &ExtendedMetadata,
) -> Result<WrittenOutputs> {
    let output_dir = request.resolved_output_dir();
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;
    let paths = OutputPaths::new(&output_dir, name);

    write_extended_table(&paths.extended, &extended.output_table())?;
    write_validation_report(&paths.validation_errors, &extended.validation_records())?;
    let fails_written = write_failures(
        &paths.fails,
        &extended.failures(),
        request.write_empty_fails,
    )?;
    info!(dir = %output_dir.display(), fails_written, "outputs written");
    Ok(WrittenOutputs {
        paths,
        fails_written,
    })
}
