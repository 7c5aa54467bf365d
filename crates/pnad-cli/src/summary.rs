//! Run summaries and listings rendered with `comfy-table`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pnad_core::{NeetRun, RunReport};
use pnad_model::{AggregateTable, GroupValue, format_numeric};
use pnad_standards::{CodeDictionary, MissingPolicy};

pub fn print_run_summary(report: &RunReport) {
    println!("Workflow: {}", report.workflow);
    println!(
        "Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Output: {}", report.output.display());
    println!("{}", sources_table(report));
    println!("{}", counts_table(report));
    if report.label.total_unmapped() > 0 {
        println!("{}", unmapped_table(report));
    }
}

pub fn print_neet_summary(run: &NeetRun) {
    print_run_summary(&run.report);
    println!("{}", aggregate_table(&run.summary));
    if run.latest.is_empty() {
        println!("No rows with a year were returned.");
        return;
    }
    println!("Latest year:");
    println!("{}", aggregate_table(&run.latest));
}

/// One row per source with its row count and the expected columns it lacked.
pub fn sources_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Missing columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for source in &report.sources {
        let missing = if source.schema.missing.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(source.schema.missing.join(", ")).fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(&source.source), Cell::new(source.rows), missing]);
    }
    table
}

pub fn counts_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(report.rows_in)]);
    table.add_row(vec![
        Cell::new("Excluded by filter"),
        count_cell(report.excluded, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable values"),
        count_cell(report.normalize.total_unparseable(), Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Suppressed values"),
        count_cell(report.suppressed(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unmapped codes"),
        count_cell(report.label.total_unmapped(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rows written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.rows_out).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        dim_cell("Duration"),
        dim_cell(format!("{} ms", report.duration.as_millis())),
    ]);
    table
}

fn unmapped_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Label"),
        header_cell("Code"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (field, codes) in &report.label.unmapped {
        for (code, count) in codes {
            table.add_row(vec![
                Cell::new(field),
                Cell::new(code),
                Cell::new(count).fg(Color::Yellow),
            ]);
        }
    }
    table
}

/// Aggregate rows followed by a total row.
pub fn aggregate_table(aggregate: &AggregateTable) -> Table {
    let mut table = Table::new();
    let mut header: Vec<Cell> = aggregate.key_headers.iter().map(|h| header_cell(h)).collect();
    header.push(header_cell(&aggregate.measure_header));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    let measure_column = aggregate.key_headers.len();
    align_column(&mut table, measure_column, CellAlignment::Right);
    for row in &aggregate.rows {
        let mut cells: Vec<Cell> = row.key.iter().map(key_cell).collect();
        cells.push(Cell::new(format_numeric(row.total)));
        table.add_row(cells);
    }
    let mut total: Vec<Cell> = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    total.extend((1..measure_column).map(|_| dim_cell("-")));
    total.push(Cell::new(format_numeric(aggregate.total())).add_attribute(Attribute::Bold));
    table.add_row(total);
    table
}

/// One row per dictionary with its code domain.
pub fn dictionary_table(dictionaries: &[&CodeDictionary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Variable"),
        header_cell("Description"),
        header_cell("Codes"),
        header_cell("Fallback"),
    ]);
    apply_table_style(&mut table);
    for dictionary in dictionaries {
        let codes: Vec<String> = dictionary.domain().map(|code| code.to_string()).collect();
        table.add_row(vec![
            Cell::new(dictionary.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(dictionary.source_variable),
            Cell::new(dictionary.description),
            Cell::new(codes.join(", ")),
            Cell::new(dictionary.fallback()),
        ]);
    }
    table
}

/// Codes of one dictionary, then how out-of-domain and missing codes resolve.
pub fn entries_table(dictionary: &CodeDictionary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Label")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (code, label) in dictionary.entries() {
        table.add_row(vec![Cell::new(code), Cell::new(label)]);
    }
    table.add_row(vec![dim_cell("other"), dim_cell(dictionary.fallback())]);
    let missing = match dictionary.missing_policy() {
        MissingPolicy::Fallback => dictionary.fallback(),
        MissingPolicy::Missing => "(empty)",
    };
    table.add_row(vec![dim_cell("missing"), dim_cell(missing)]);
    table
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn key_cell(value: &GroupValue) -> Cell {
    match value {
        GroupValue::Missing => dim_cell("-"),
        other => Cell::new(other.render()),
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
