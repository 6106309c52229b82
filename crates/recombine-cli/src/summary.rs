use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recombine_model::SetOrder;

use crate::types::{BlockKind, GenerateResult, InspectReport};

/// Generation summary, printed to stderr so stdout carries only output.
pub fn print_summary(result: &GenerateResult) {
    eprintln!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => eprintln!("Output: {}", path.display()),
        None => eprintln!("Output: <stdout>"),
    }
    if let Some(path) = &result.config {
        eprintln!("Config: {}", path.display());
    }

    let summary = &result.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Tokens"), Cell::new(summary.tokens)]);
    table.add_row(vec![Cell::new("Prompts"), Cell::new(summary.prompts)]);
    table.add_row(vec![
        Cell::new("Combination sequences"),
        Cell::new(summary.combination_sequences),
    ]);
    table.add_row(vec![
        Cell::new("Combination lines"),
        Cell::new(summary.combination_lines),
    ]);
    table.add_row(vec![
        Cell::new("Bytes written"),
        Cell::new(summary.bytes_written),
    ]);
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(summary.warning_count(), Color::Yellow),
    ]);
    eprintln!("{table}");

    if summary.has_warnings() {
        let mut warnings = Table::new();
        warnings.set_header(vec![header_cell("Code"), header_cell("Warning")]);
        apply_table_style(&mut warnings);
        for warning in &summary.warnings {
            warnings.add_row(vec![
                Cell::new(warning.code()).fg(Color::Yellow),
                Cell::new(warning),
            ]);
        }
        eprintln!("{warnings}");
    }
}

pub fn print_inspect(report: &InspectReport) {
    println!("Document: {}", report.input.display());
    if let Some(path) = &report.config {
        println!("Config: {}", path.display());
    }

    let mut blocks = Table::new();
    blocks.set_header(vec![
        header_cell("Block"),
        header_cell("Kind"),
        header_cell("Lines"),
        header_cell("Preview"),
    ]);
    apply_table_style(&mut blocks);
    align_column(&mut blocks, 0, CellAlignment::Right);
    align_column(&mut blocks, 2, CellAlignment::Right);
    for block in &report.blocks {
        let kind = match block.kind {
            BlockKind::Set => Cell::new("set").fg(Color::Green),
            BlockKind::Text => dim_cell("text"),
        };
        blocks.add_row(vec![
            Cell::new(block.index),
            kind,
            Cell::new(block.lines),
            Cell::new(&block.preview),
        ]);
    }
    println!("{blocks}");

    if report.sets.is_empty() {
        println!("No sets declared.");
    } else {
        let mut sets = Table::new();
        sets.set_header(vec![
            header_cell("Block"),
            header_cell("Set"),
            header_cell("Order"),
            header_cell("Size"),
            header_cell("Items"),
        ]);
        apply_table_style(&mut sets);
        align_column(&mut sets, 0, CellAlignment::Right);
        align_column(&mut sets, 3, CellAlignment::Right);
        for set in &report.sets {
            let order = match set.order {
                SetOrder::Sorted => "sorted",
                SetOrder::Random => "random",
            };
            sets.add_row(vec![
                Cell::new(set.index),
                Cell::new(&set.name).add_attribute(Attribute::Bold),
                dim_cell(order),
                count_cell(set.len(), Color::Reset),
                Cell::new(set.items.join(", ")),
            ]);
        }
        println!("{sets}");
    }
    println!("Tokens: {}", report.tokens.len());
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
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
