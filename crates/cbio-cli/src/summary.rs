use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cbio_cli::types::{BatchSummary, BulkEntry, PairStatus, StudyResult};
use cbio_model::{DiagnosticReport, Severity};

pub fn print_study(result: &StudyResult) {
    println!("Study: {}", result.key);
    println!("Output: {}", result.output_dir.display());
    if let Some(guid) = &result.guid {
        println!("GUID: {guid}");
    }
    if result.skipped {
        println!("Outputs already complete, skipped.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.rows),
        Cell::new(result.columns),
        count_cell(result.report.error_count(), Color::Red),
        count_cell(result.report.warning_count(), Color::Yellow),
    ]);
    println!("{table}");
    print_diagnostics(&result.report);
}

pub fn print_bulk(entries: &[BulkEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Study"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Warnings"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for entry in entries {
        let row = match &entry.outcome {
            Ok(result) => vec![
                name_cell(&entry.name),
                if result.skipped {
                    dim_cell("skipped")
                } else {
                    ok_cell("converted")
                },
                Cell::new(result.rows),
                Cell::new(result.columns),
                count_cell(result.report.warning_count(), Color::Yellow),
                dim_cell(result.guid.as_deref().unwrap_or("-")),
            ],
            Err(message) => vec![
                name_cell(&entry.name),
                failed_cell(),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(message),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
    let failed = entries.iter().filter(|entry| entry.outcome.is_err()).count();
    println!("{} studies, {failed} failed", entries.len());
}

pub fn print_batch(summary: &BatchSummary) {
    println!("Omics output: {}", summary.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Prefix"),
        header_cell("Profile"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    for index in 3..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for pair in &summary.pairs {
        let status = match pair.status {
            PairStatus::Converted => ok_cell("converted"),
            PairStatus::Skipped => dim_cell("skipped"),
            PairStatus::Failed => failed_cell(),
        };
        table.add_row(vec![
            name_cell(&pair.prefix),
            Cell::new(pair.profile_type.as_deref().unwrap_or("-")),
            status,
            Cell::new(pair.rows),
            Cell::new(pair.columns),
            count_cell(pair.report.error_count(), Color::Red),
            count_cell(pair.report.warning_count(), Color::Yellow),
            Cell::new(pair.error.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");
    println!(
        "{} converted, {} skipped, {} failed",
        summary.converted(),
        summary.skipped(),
        summary.failed()
    );
}

fn print_diagnostics(report: &DiagnosticReport) {
    if report.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for diagnostic in &report.diagnostics {
        let severity = match diagnostic.severity {
            Severity::Error => Cell::new("ERROR").fg(Color::Red),
            Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        };
        table.add_row(vec![
            severity,
            Cell::new(diagnostic.code.as_str()),
            Cell::new(diagnostic.column.as_deref().unwrap_or("-")),
            Cell::new(&diagnostic.message),
        ]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn name_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn ok_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Green)
}

fn failed_cell() -> Cell {
    Cell::new("failed")
        .fg(Color::Red)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
