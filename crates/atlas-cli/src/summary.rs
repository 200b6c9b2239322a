//! Terminal tables for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use atlas_classify::{CascadeOptions, ClassificationOutcome};
use atlas_ingest::LoadedDataset;
use atlas_model::{LegendEntry, ReferenceRegions, RegionColor, ResolvedColor};

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
        .set_width(100);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

/// Color name cell tinted with the color itself.
fn swatch_cell(color: &ResolvedColor) -> Cell {
    let rgb = color.rgb;
    Cell::new(format!("■ {}", color.name)).fg(Color::Rgb {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
    })
}

pub fn regions_table(regions: &ReferenceRegions) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Region")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, region) in regions.iter().enumerate() {
        table.add_row(vec![Cell::new(idx + 1), Cell::new(&region.canonical_name)]);
    }
    table
}

pub fn dataset_table(loaded: &LoadedDataset) -> Table {
    let summary = &loaded.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Records", summary.record_count.to_string()),
        ("Families", summary.family_count.to_string()),
        ("Genera", summary.genus_count.to_string()),
        ("Species", summary.species_count.to_string()),
        ("Years", summary.year_range()),
        ("Regions with records", summary.region_count.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("Unmatched rows"),
        count_cell(loaded.unmatched.count, Color::Yellow),
    ]);
    table
}

pub fn options_table(label: &str, options: &CascadeOptions) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(label)]);
    apply_table_style(&mut table);
    for choice in options.choices() {
        table.add_row(vec![Cell::new(choice)]);
    }
    table
}

pub fn region_colors_table(regions: &[RegionColor]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Color"),
        header_cell("RGB"),
        header_cell("Band"),
    ]);
    apply_table_style(&mut table);
    for entry in regions {
        let band = match entry.band {
            Some(slot) => Cell::new(slot.label()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&entry.region),
            swatch_cell(&entry.color),
            Cell::new(entry.color.rgb),
            band,
        ]);
    }
    table
}

pub fn legend_table(legend: &[LegendEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Legend"),
        header_cell("Color"),
        header_cell("Regions"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in legend {
        table.add_row(vec![
            Cell::new(&entry.label),
            swatch_cell(&entry.color),
            count_cell(entry.regions, Color::Green),
        ]);
    }
    table
}

/// Unmatched names as listed in the warnings block.
pub fn unmatched_lines(names: &[String]) -> Vec<String> {
    names.iter().map(|name| format!("- {name}")).collect()
}

pub fn print_classification(outcome: &ClassificationOutcome, title: &str, image_filename: &str) {
    println!("Map: {title}");
    println!("Suggested image name: {image_filename}");
    println!("Records mapped: {}", outcome.matched_records);
    println!("{}", region_colors_table(&outcome.result.regions));
    println!("{}", legend_table(&outcome.legend));
    if !outcome.unmatched_regions.is_empty() {
        eprintln!("Warning: filtered rows name regions that are not on the map:");
        for line in unmatched_lines(&outcome.unmatched_regions) {
            eprintln!("{line}");
        }
    }
}

pub fn print_dataset_summary(loaded: &LoadedDataset, families: &CascadeOptions) {
    println!("{}", dataset_table(loaded));
    if !loaded.unmatched.is_empty() {
        eprintln!(
            "Warning: {} rows excluded, unknown regions:",
            loaded.unmatched.count
        );
        for line in unmatched_lines(&loaded.unmatched.names) {
            eprintln!("{line}");
        }
    }
    println!("{}", options_table("Family", families));
}
