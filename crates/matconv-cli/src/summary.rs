use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use matconv_map::{MatchPriority, PresetMetadata};
use matconv_model::{CanonicalType, MappingCandidate};

use crate::types::{CatalogResult, ConvertResult};

pub fn print_catalog(result: &CatalogResult) {
    println!("Source: {}", result.source_schema);
    println!("Target: {}", result.target_schema);
    println!("{}", catalog_table(result));
    let summary = result.mapping.summary();
    println!(
        "{} attributes: {} mapped, {} unmapped, {} without options",
        summary.total, summary.confirmed, summary.unmapped, summary.without_options
    );
}

/// Candidate table: one row per source attribute, in catalog order.
pub fn catalog_table(result: &CatalogResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Options"),
        header_cell("Match"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for candidate in &result.mapping {
        let priority = result
            .proposals
            .iter()
            .find(|p| p.source == candidate.source.name && p.kind == candidate.source.kind)
            .map(|p| p.priority);
        table.add_row(vec![
            kind_cell(candidate.source.kind),
            Cell::new(&candidate.source.name),
            target_cell(candidate),
            Cell::new(candidate.options.len() - 1),
            match_cell(priority),
        ]);
    }
    table
}

pub fn print_preset_list(presets: &[PresetMetadata]) {
    if presets.is_empty() {
        println!("No presets found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Pairs"),
        header_cell("Description"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for preset in presets {
        let file = preset
            .file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&preset.source_schema),
            Cell::new(&preset.target_schema),
            Cell::new(preset.pair_count),
            preset
                .description
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            dim_cell(file),
        ]);
    }
    println!("{table}");
}

pub fn print_conversion(result: &ConvertResult) {
    for entry in &result.unresolved {
        eprintln!(
            "Preset pair not applied: {} -> {} ({}): {}",
            entry.pair.source, entry.pair.target, entry.pair.kind, entry.reason
        );
    }
    for failure in &result.rejected {
        eprintln!("Material skipped: {}: {}", failure.path.display(), failure.error);
    }
    if result.batch.is_empty() {
        println!("No materials to convert.");
        return;
    }
    println!("{}", result.batch);
    for failure in &result.write_failures {
        eprintln!("Material not written: {}: {}", failure.path.display(), failure.error);
    }
    if result.dry_run {
        println!(
            "Dry run: {} of {} materials would be converted.",
            result.batch.converted(),
            result.batch.len()
        );
    } else {
        println!(
            "Converted {} of {} materials, {} files written.",
            result.batch.converted(),
            result.batch.len(),
            result.written.len()
        );
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: CanonicalType) -> Cell {
    let color = match kind {
        CanonicalType::Scalar => Color::Blue,
        CanonicalType::Color => Color::Magenta,
        CanonicalType::Vector => Color::Yellow,
        CanonicalType::Texture => Color::Green,
        CanonicalType::Unsupported => Color::DarkGrey,
    };
    Cell::new(kind).fg(color)
}

fn target_cell(candidate: &MappingCandidate) -> Cell {
    match candidate.target_name() {
        Some(name) => Cell::new(name).add_attribute(Attribute::Bold),
        None if candidate.has_targets() => dim_cell("None"),
        None => dim_cell("-"),
    }
}

fn match_cell(priority: Option<MatchPriority>) -> Cell {
    match priority {
        Some(priority) => Cell::new(priority.description()),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
