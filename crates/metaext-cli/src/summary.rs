use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use metaext_cli::types::{ExtendResult, HostListing};

/// Violations shown before the table is cut off; the report file has all of them.
const MAX_LISTED_VIOLATIONS: usize = 50;

pub fn print_summary(result: &ExtendResult) {
    println!("Metadata: {}", result.metadata.display());
    match &result.outputs {
        Some(outputs) => {
            println!("Extended: {}", outputs.paths.extended.display());
            println!("Validation report: {}", outputs.paths.validation_errors.display());
            if outputs.fails_written {
                println!("Failures: {}", outputs.paths.fails.display());
            }
        }
        None => println!("Dry run: no files written"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Host"),
        header_cell("Sample type"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Note"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_rows = 0usize;
    let mut total_errors = 0usize;
    for summary in &result.partitions {
        total_rows += summary.rows;
        total_errors += summary.violations;
        let sample_type = match &summary.sample_type {
            Some(name) => Cell::new(name),
            None => dim_cell("-"),
        };
        let (errors, note) = match &summary.qc_note {
            Some(note) => (dim_cell("-"), Cell::new(note).fg(Color::Yellow)),
            None => (count_cell(Some(summary.violations), Color::Red), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(&summary.host)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            sample_type,
            Cell::new(summary.rows),
            errors,
            note,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        count_cell(Some(total_errors), Color::Red).add_attribute(Attribute::Bold),
        count_cell(Some(result.failed_rows()), Color::Yellow),
    ]);
    println!("{table}");
    print_violation_table(result);
}

fn print_violation_table(result: &ExtendResult) {
    if result.records.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sample"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for record in result.records.iter().take(MAX_LISTED_VIOLATIONS) {
        table.add_row(vec![
            Cell::new(&record.sample_name),
            Cell::new(&record.field_name).fg(Color::Blue),
            Cell::new(&record.error_message).fg(Color::Red),
        ]);
    }
    println!();
    println!("Validation errors:");
    println!("{table}");
    let hidden = result.records.len().saturating_sub(MAX_LISTED_VIOLATIONS);
    if hidden > 0 {
        println!("... {hidden} more, see the validation report");
    }
}

pub fn print_hosts(hosts: &[HostListing]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Host"),
        header_cell("Default"),
        header_cell("Fields"),
        header_cell("Sample types"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for listing in hosts {
        let default = match &listing.default {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        };
        let sample_types = if listing.sample_types.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(listing.sample_types.join(", "))
        };
        table.add_row(vec![
            Cell::new(&listing.host)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            default,
            Cell::new(listing.fields),
            sample_types,
        ]);
    }
    println!("{table}");
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
