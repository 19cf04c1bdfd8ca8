//! Rule application for one (host, sample type) partition.

use metaext_model::{CellValue, FieldMap, Settings, Table};

/// Applies defaults and required-field placeholders to a partition.
///
/// For each field, in name order: a field with a `default` fills absent or
/// empty cells (never non-empty ones), adding the column if needed. A required
/// field without a default whose column is absent gets the column, filled with
/// the required placeholder. Placeholders then become blank when
/// `leave_requireds_blank` is set and missing otherwise, and missing cells of
/// every column take the partition default.
pub fn materialize_partition(table: &Table, schema: &FieldMap, settings: &Settings) -> Table {
    let mut out = table.clone();

    for (field, rule) in schema {
        if let Some(default) = &rule.default {
            out.ensure_column(field);
            let value = default.to_cell_text();
            for row in &mut out.rows {
                if row.get(field).is_absent_or_empty() {
                    row.set(field.as_str(), CellValue::text(value.as_str()));
                }
            }
        } else if rule.is_required() && out.ensure_column(field) {
            for row in &mut out.rows {
                row.set(field.as_str(), CellValue::RequiredPlaceholder);
            }
        }
    }

    let placeholder = if settings.leave_requireds_blank {
        CellValue::LeaveBlank
    } else {
        CellValue::Missing
    };
    let fill = settings
        .default
        .as_ref()
        .map(|default| CellValue::text(default.to_cell_text()));

    let columns = out.columns.clone();
    for row in &mut out.rows {
        for column in &columns {
            if matches!(row.get(column), CellValue::RequiredPlaceholder) {
                row.set(column.as_str(), placeholder.clone());
            }
            if row.get(column).is_missing() {
                if let Some(fill) = &fill {
                    row.set(column.as_str(), fill.clone());
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use metaext_model::{FieldRule, PrimitiveType, Row};

    use super::*;

    fn partition() -> Table {
        let mut table = Table::new(vec!["sample_name".to_string(), "country".to_string()]);
        table.push_row(Row::from_pairs([("sample_name", "s1"), ("country", "")]));
        table.push_row(Row::from_pairs([("sample_name", "s2"), ("country", "Canada")]));
        table
    }

    #[test]
    fn defaults_fill_only_empty_cells() {
        let schema = FieldMap::from([(
            "country".to_string(),
            FieldRule::typed(PrimitiveType::String).with_default("USA"),
        )]);
        let out = materialize_partition(&partition(), &schema, &Settings::new());
        assert_eq!(out.rows[0].text("country"), Some("USA"));
        assert_eq!(out.rows[1].text("country"), Some("Canada"));
    }

    #[test]
    fn required_columns_are_blank_or_defaulted() {
        let schema = FieldMap::from([(
            "host_age".to_string(),
            FieldRule::typed(PrimitiveType::Integer).with_required(true),
        )]);

        let blank = Settings::new()
            .with_default("not provided")
            .with_leave_requireds_blank(true);
        let out = materialize_partition(&partition(), &schema, &blank);
        assert!(out.has_column("host_age"));
        assert_eq!(out.rows[0].get("host_age"), &CellValue::LeaveBlank);
        // unrelated missing cells still take the partition default
        assert_eq!(out.rows[0].text("country"), Some("not provided"));

        let filled = Settings::new().with_default("not provided");
        let out = materialize_partition(&partition(), &schema, &filled);
        assert_eq!(out.rows[0].text("host_age"), Some("not provided"));
    }

    #[test]
    fn required_fields_with_existing_columns_are_left_alone() {
        let schema = FieldMap::from([(
            "country".to_string(),
            FieldRule::typed(PrimitiveType::String).with_required(true),
        )]);
        let out = materialize_partition(
            &partition(),
            &schema,
            &Settings::new().with_leave_requireds_blank(true),
        );
        assert_eq!(out.rows[0].get("country"), &CellValue::Missing);
    }
}
