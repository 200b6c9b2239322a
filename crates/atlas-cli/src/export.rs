//! Writing classification results to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use atlas_classify::ClassificationOutcome;
use atlas_model::{ColorSlot, LegendEntry, RegionColor};

/// Output file formats for `classify --output`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Full document: title, suggested image name, regions, legend, warnings.
    #[default]
    Json,
    /// One `region,color,rgb,band` row per region.
    Csv,
}

/// JSON document written for a classification.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub title: &'a str,
    pub image_filename: &'a str,
    pub matched_records: usize,
    pub regions: &'a [RegionColor],
    pub legend: &'a [LegendEntry],
    pub unmatched_regions: &'a [String],
}

#[derive(Serialize)]
struct CsvRow<'a> {
    region: &'a str,
    color: &'a str,
    rgb: String,
    band: &'a str,
}

pub fn write_json<W: Write>(writer: W, document: &ExportDocument<'_>) -> Result<()> {
    serde_json::to_writer_pretty(writer, document).context("serialize classification")
}

pub fn write_csv<W: Write>(writer: W, regions: &[RegionColor]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for entry in regions {
        out.serialize(CsvRow {
            region: &entry.region,
            color: &entry.color.name,
            rgb: entry.color.rgb.to_string(),
            band: entry.band.map_or("", ColorSlot::label),
        })?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the outcome to `path` in the requested format.
pub fn write_outcome(
    path: &Path,
    format: ExportFormat,
    outcome: &ClassificationOutcome,
    title: &str,
    image_filename: &str,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Json => write_json(
            &mut writer,
            &ExportDocument {
                title,
                image_filename,
                matched_records: outcome.matched_records,
                regions: &outcome.result.regions,
                legend: &outcome.legend,
                unmatched_regions: &outcome.unmatched_regions,
            },
        )?,
        ExportFormat::Csv => write_csv(&mut writer, &outcome.result.regions)?,
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), ?format, "wrote classification");
    Ok(())
}
