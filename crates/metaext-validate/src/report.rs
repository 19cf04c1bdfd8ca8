use metaext_model::{ValidationRecord, Violation};

/// One record per error item, sorted by (sample, field, message).
pub fn flatten_violations(violations: &[Violation]) -> Vec<ValidationRecord> {
    let mut records: Vec<ValidationRecord> = violations
        .iter()
        .flat_map(|violation| {
            violation.error_message.iter().map(|item| ValidationRecord {
                sample_name: violation.sample_name.clone(),
                field_name: violation.field_name.clone(),
                error_message: item.to_string(),
            })
        })
        .collect();
    records.sort();
    records
}

/// Plain-text rendering of flattened records, one `sample | field | message`
/// line each.
pub fn render_report(records: &[ValidationRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} | {} | {}", r.sample_name, r.field_name, r.error_message))
        .collect::<Vec<_>>()
        .join("\n")
}
