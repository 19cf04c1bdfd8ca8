use std::collections::HashMap;

use metaext_model::Row;

/// Groups rows by the text of `column`, in first-observed order.
///
/// Rows keep their relative order inside a group. Missing cells group under
/// the empty string.
pub fn partition_rows(rows: Vec<Row>, column: &str) -> Vec<(String, Vec<Row>)> {
    let mut groups: Vec<(String, Vec<Row>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let key = row.text(column).unwrap_or_default().to_string();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row);
    }
    groups
}
