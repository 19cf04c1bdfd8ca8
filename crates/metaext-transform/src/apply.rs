//! Running transformer bindings over a table.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use metaext_model::{CellValue, Table, TransformerSpec};

use crate::error::TransformError;
use crate::registry::TransformerRegistry;
use crate::transformer::Transformer;

/// Applies every binding in `specs` (target column -> spec) to a copy of `table`.
///
/// All bindings are checked before any row is touched: each must name a
/// registered function and exactly one source column. Per row, an empty source
/// leaves the target as is, and a non-empty target is only replaced when the
/// binding sets `overwrite_non_empty`. Missing target columns are added.
pub fn apply_transformers(
    table: &Table,
    specs: &BTreeMap<String, TransformerSpec>,
    registry: &TransformerRegistry,
) -> Result<Table, TransformError> {
    let bindings = specs
        .iter()
        .map(|(target, spec)| resolve_binding(target, spec, registry))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = table.clone();
    for binding in bindings {
        out.ensure_column(binding.target);
        let mut applied = 0usize;
        for row in &mut out.rows {
            let Some(source) = row.text(binding.source).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            if !binding.overwrite && !is_blank(row.get(binding.target)) {
                continue;
            }
            let value = binding.transformer.transform(source)?;
            row.set(binding.target, CellValue::from_raw(&value));
            applied += 1;
        }
        debug!(
            target = binding.target,
            function = binding.transformer.name(),
            applied,
            "transformer applied"
        );
    }
    Ok(out)
}

struct Binding<'a> {
    target: &'a str,
    source: &'a str,
    overwrite: bool,
    transformer: &'a Arc<dyn Transformer>,
}

fn resolve_binding<'a>(
    target: &'a str,
    spec: &'a TransformerSpec,
    registry: &'a TransformerRegistry,
) -> Result<Binding<'a>, TransformError> {
    let [source] = spec.sources.as_slice() else {
        return Err(TransformError::SourceCount {
            target: target.to_string(),
            count: spec.sources.len(),
        });
    };
    Ok(Binding {
        target,
        source,
        overwrite: spec.overwrite_non_empty,
        transformer: registry.get(&spec.function)?,
    })
}

fn is_blank(cell: &CellValue) -> bool {
    matches!(cell, CellValue::LeaveBlank) || cell.is_absent_or_empty()
}
