use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dedup_cli::pipeline::RunResult;

pub fn print_summary(result: &RunResult) {
    let report = &result.report;
    let counts = report.method_counts();
    println!("Master records: {}", result.master_records);
    println!("Threshold: {}", result.options.threshold.value());
    if result.dry_run {
        println!("Output: skipped (dry run)");
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Result"),
        header_cell("Records"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Duplicates")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        count_cell(report.duplicates.len(), Color::Yellow),
        file_cell(result.outputs.duplicates.as_ref()),
    ]);
    for (label, count) in [
        ("email", counts.email),
        ("name", counts.name),
        ("address", counts.address),
    ] {
        table.add_row(vec![
            Cell::new(format!("  -> {label}")).fg(Color::DarkGrey),
            count_cell(count, Color::Yellow),
            dim_cell(""),
        ]);
    }
    table.add_row(vec![
        Cell::new("Non-duplicates")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(report.non_duplicates.len()),
        file_cell(result.outputs.non_duplicates.as_ref()),
    ]);
    table.add_row(vec![
        Cell::new("Skipped (blank name)"),
        count_cell(report.skipped_blank_names, Color::Red),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total).add_attribute(Attribute::Bold),
        file_cell(result.match_report.as_ref()),
    ]);
    println!("{table}");

    print_missing_fields("master", &result.missing_master_fields);
    print_missing_fields("small", &result.missing_small_fields);
}

fn print_missing_fields(dataset: &str, fields: &[String]) {
    if fields.is_empty() {
        return;
    }
    eprintln!("Fields missing from the {dataset} header (read as empty):");
    for field in fields {
        eprintln!("- {field}");
    }
}

pub fn apply_table_style(table: &mut Table) {
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

fn file_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
