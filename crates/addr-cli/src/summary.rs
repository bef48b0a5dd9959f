use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use addr_cli::pipeline::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("Standardized data saved to {}", summary.output.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Metric"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("input"),
        dim_cell(summary.input.display()),
        Cell::new(summary.rows),
    ]);
    table.add_row(vec![
        Cell::new("column"),
        Cell::new(format!("{} -> {}", summary.column, summary.target)),
        dim_cell("-"),
    ]);
    if let Some(report) = &summary.rules {
        table.add_row(vec![
            Cell::new("rules"),
            Cell::new("changed"),
            count_cell(report.changed, Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("rules"),
            Cell::new("missing"),
            count_cell(report.missing, Color::Yellow),
        ]);
    }
    if let Some(report) = &summary.rewrite {
        table.add_row(vec![
            Cell::new("rewrite"),
            Cell::new("rewritten"),
            count_cell(report.rewritten, Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("rewrite"),
            Cell::new("fallbacks"),
            count_cell(report.fallbacks, Color::Red),
        ]);
        table.add_row(vec![
            Cell::new("rewrite"),
            Cell::new("skipped"),
            count_cell(report.skipped, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} ms", summary.duration.as_millis())),
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
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

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
