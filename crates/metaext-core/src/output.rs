//! Delivered table shape and the failures side table.

use metaext_model::columns::{
    HOSTTYPE_SHORTHAND, QC_NOTE, SAMPLE_NAME, SAMPLETYPE_SHORTHAND, is_internal,
};
use metaext_model::{FailureRecord, Table};

/// `sample_name` first, other columns alphabetically, internal columns last.
pub fn ordered_columns(columns: &[String]) -> Vec<String> {
    let mut regular: Vec<String> = columns
        .iter()
        .filter(|c| c.as_str() != SAMPLE_NAME && !is_internal(c))
        .cloned()
        .collect();
    regular.sort();
    let mut internal: Vec<String> = columns.iter().filter(|c| is_internal(c)).cloned().collect();
    internal.sort();

    let mut ordered = Vec::with_capacity(columns.len());
    if columns.iter().any(|c| c == SAMPLE_NAME) {
        ordered.push(SAMPLE_NAME.to_string());
    }
    ordered.extend(regular);
    ordered.extend(internal);
    ordered
}

/// The table as delivered: ordered columns, internal columns removed.
pub fn output_table(table: &Table) -> Table {
    let columns: Vec<String> = ordered_columns(&table.columns)
        .into_iter()
        .filter(|c| !is_internal(c))
        .collect();
    let mut out = Table::new(columns);
    for row in &table.rows {
        let mut row = row.clone();
        row.cells.retain(|column, _| !is_internal(column));
        out.push_row(row);
    }
    out
}

/// Rows carrying a non-empty quality note.
pub fn failures(table: &Table) -> Vec<FailureRecord> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let note = row.text(QC_NOTE).filter(|note| !note.is_empty())?;
            Some(FailureRecord {
                sample_name: row.get(SAMPLE_NAME).output_text().to_string(),
                hosttype_shorthand: row.get(HOSTTYPE_SHORTHAND).output_text().to_string(),
                sampletype_shorthand: row.get(SAMPLETYPE_SHORTHAND).output_text().to_string(),
                qc_note: note.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_name_first_internal_last() {
        let columns: Vec<String> = ["zeta", "qc_note", "alpha", "sample_name"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            ordered_columns(&columns),
            vec!["sample_name", "alpha", "zeta", "qc_note"]
        );
    }
}
