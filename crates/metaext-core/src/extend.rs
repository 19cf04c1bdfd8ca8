//! Full extension run over an input table.

use std::collections::BTreeSet;

use tracing::{info, info_span, warn};

use metaext_model::columns::{
    HOSTTYPE_SHORTHAND, INVALID_HOST_TYPE, INVALID_SAMPLE_TYPE, QC_NOTE, REQUIRED_INPUT_COLUMNS,
    SAMPLETYPE_SHORTHAND,
};
use metaext_model::{CellValue, FailureRecord, Literal, Row, Table, ValidationRecord, Violation};
use metaext_standards::SchemaCache;
use metaext_transform::{TransformerRegistry, apply_transformers};
use metaext_validate::{ValidationContext, flatten_violations, validate_rows};

use crate::context::ExtendContext;
use crate::error::ExtendError;
use crate::materialize::materialize_partition;
use crate::output::{failures, output_table};
use crate::partition::partition_rows;

/// Row and violation counts for one (host, sample type) partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSummary {
    pub host: String,
    pub sample_type: Option<String>,
    pub rows: usize,
    pub violations: usize,
    /// Quality note applied to every row of a partition rules could not run on.
    pub qc_note: Option<String>,
}

/// Result of an extension run.
#[derive(Debug, Clone)]
pub struct ExtendedMetadata {
    /// All rows, including the internal `qc_note` column.
    pub table: Table,
    pub violations: Vec<Violation>,
    pub partitions: Vec<PartitionSummary>,
}

impl ExtendedMetadata {
    pub fn validation_records(&self) -> Vec<ValidationRecord> {
        flatten_violations(&self.violations)
    }

    pub fn failures(&self) -> Vec<FailureRecord> {
        failures(&self.table)
    }

    /// The delivered table: ordered columns, internal columns removed.
    pub fn output_table(&self) -> Table {
        output_table(&self.table)
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Extends `input` with a fresh effective-schema cache.
pub fn extend_metadata(input: &Table, ctx: &ExtendContext<'_>) -> Result<ExtendedMetadata, ExtendError> {
    let mut cache = SchemaCache::new();
    extend_metadata_with_cache(input, ctx, &mut cache)
}

/// Extends `input`: fills defaults and required fields per (host, sample
/// type), tags rows that cannot be resolved, and validates the rest.
///
/// Partitions are concatenated in first-observed host order and, within a
/// host, first-observed sample-type order.
pub fn extend_metadata_with_cache(
    input: &Table,
    ctx: &ExtendContext<'_>,
    cache: &mut SchemaCache,
) -> Result<ExtendedMetadata, ExtendError> {
    let span = info_span!("extend_metadata", rows = input.len());
    let _guard = span.enter();

    let missing: Vec<String> = REQUIRED_INPUT_COLUMNS
        .iter()
        .filter(|column| !input.has_column(column))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ExtendError::MissingColumns { columns: missing });
    }

    let builtin_transformers;
    let transformers = match ctx.transformers {
        Some(transformers) => transformers,
        None => {
            builtin_transformers = TransformerRegistry::with_builtins();
            &builtin_transformers
        }
    };
    let local_validation;
    let validation = match ctx.validation {
        Some(validation) => validation,
        None => {
            local_validation = ValidationContext::at_local_now();
            &local_validation
        }
    };

    let registry = ctx.registry;
    let settings = registry.settings();
    let hooks = registry.transformers();

    let mut table = apply_transformers(input, &hooks.pre_transformers, transformers)?;
    table.ensure_column(QC_NOTE);
    for row in &mut table.rows {
        row.set(QC_NOTE, CellValue::LeaveBlank);
    }

    let columns = table.columns.clone();
    let mut parts = Vec::new();
    let mut violations = Vec::new();
    let mut partitions = Vec::new();

    for (host_name, host_rows) in partition_rows(table.rows, HOSTTYPE_SHORTHAND) {
        let Some(host) = registry.host(&host_name) else {
            warn!(host = %host_name, rows = host_rows.len(), "rows with unknown host type");
            partitions.push(PartitionSummary {
                host: host_name,
                sample_type: None,
                rows: host_rows.len(),
                violations: 0,
                qc_note: Some(INVALID_HOST_TYPE.to_string()),
            });
            parts.push(flag_rows(&columns, host_rows, INVALID_HOST_TYPE));
            continue;
        };
        let host_settings = settings.for_host(host.default.as_ref());

        for (sample_type, rows) in partition_rows(host_rows, SAMPLETYPE_SHORTHAND) {
            let span = info_span!(
                "partition",
                host = %host_name,
                sample_type = %sample_type,
                rows = rows.len()
            );
            let _guard = span.enter();

            if !host.has_sample_type(&sample_type) {
                warn!("rows with unknown sample type");
                partitions.push(PartitionSummary {
                    host: host_name.clone(),
                    sample_type: Some(sample_type),
                    rows: rows.len(),
                    violations: 0,
                    qc_note: Some(INVALID_SAMPLE_TYPE.to_string()),
                });
                parts.push(flag_rows(&columns, rows, INVALID_SAMPLE_TYPE));
                continue;
            }

            let schema = cache.get_or_resolve(registry, &host_name, &sample_type)?;
            let partition = Table {
                columns: columns.clone(),
                rows,
            };
            let materialized = materialize_partition(&partition, schema, &host_settings);
            let transformed =
                apply_transformers(&materialized, &hooks.post_transformers, transformers)?;
            let found = validate_rows(&transformed.rows, schema, validation)?;

            partitions.push(PartitionSummary {
                host: host_name.clone(),
                sample_type: Some(sample_type),
                rows: transformed.len(),
                violations: found.len(),
                qc_note: None,
            });
            violations.extend(found);
            parts.push(transformed);
        }
    }

    let mut table = concat_partitions(parts, settings.default.as_ref());
    for row in &mut table.rows {
        for cell in row.cells.values_mut() {
            if matches!(cell, CellValue::LeaveBlank) {
                *cell = CellValue::text("");
            }
        }
    }

    info!(
        rows = table.len(),
        partitions = partitions.len(),
        violations = violations.len(),
        "metadata extended"
    );
    Ok(ExtendedMetadata {
        table,
        violations,
        partitions,
    })
}

fn flag_rows(columns: &[String], rows: Vec<Row>, note: &str) -> Table {
    let mut table = Table::new(columns.to_vec());
    for mut row in rows {
        row.set(QC_NOTE, CellValue::text(note));
        table.push_row(row);
    }
    table
}

/// Stacks partitions under the union of their columns. Cells of columns a
/// partition did not have take the global default when one is set.
fn concat_partitions(parts: Vec<Table>, global_default: Option<&Literal>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for part in &parts {
        for column in &part.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let fill = global_default.map(|default| CellValue::text(default.to_cell_text()));
    let mut out = Table::new(columns);
    for part in parts {
        let own: BTreeSet<&str> = part.columns.iter().map(String::as_str).collect();
        let introduced: Vec<&String> = out
            .columns
            .iter()
            .filter(|column| !own.contains(column.as_str()))
            .collect();
        for mut row in part.rows {
            if let Some(fill) = &fill {
                for column in &introduced {
                    row.set(column.as_str(), fill.clone());
                }
            }
            out.rows.push(row);
        }
    }
    out
}
