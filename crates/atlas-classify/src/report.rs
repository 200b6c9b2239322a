//! Presentation helpers: map title, legend and export filename.

use chrono::NaiveDateTime;

use atlas_model::{
    ClassificationResult, ColorSlot, LegendEntry, ResolvedColor, Selection, TaxonFilter,
    YearBoundaries, title_case,
};

use crate::bands::{PriorityBand, YearPredicate};

/// Legend label for regions no band painted.
pub const NO_RECORDS_LABEL: &str = "No records";

const EXPORT_EXTENSION: &str = "tiff";

fn taxon_label(selection: &Selection, case: fn(&str) -> String) -> String {
    match selection {
        Selection::Exact(value) => case(value),
        other => other.to_string(),
    }
}

fn lowercase(value: &str) -> String {
    value.trim().to_lowercase()
}

/// `"{Family} > {Genus} > {species}"`, with "All" and "Not Specified" kept verbatim.
pub fn map_title(taxon: &TaxonFilter) -> String {
    format!(
        "{} > {} > {}",
        taxon_label(&taxon.family, title_case),
        taxon_label(&taxon.genus, title_case),
        taxon_label(&taxon.species, lowercase),
    )
}

/// Legend text for a band, e.g. `"Pre-Year (<= 2000)"` or `"Second Period (1981-2000)"`.
pub fn band_label(slot: ColorSlot, predicate: YearPredicate) -> String {
    match predicate {
        YearPredicate::Any => slot.label().to_string(),
        YearPredicate::AtMost { bound } => format!("{} (<= {bound})", slot.label()),
        YearPredicate::After { bound } => format!("{} (> {bound})", slot.label()),
        YearPredicate::Within { after, up_to } => {
            format!("{} ({}-{up_to})", slot.label(), after.saturating_add(1))
        }
    }
}

/// Legend entries, highest-priority band first, then the default color.
pub fn legend(result: &ClassificationResult, bands: &[PriorityBand]) -> Vec<LegendEntry> {
    let count = |slot: Option<ColorSlot>| result.regions.iter().filter(|r| r.band == slot).count();

    let mut entries: Vec<LegendEntry> = bands
        .iter()
        .rev()
        .map(|band| LegendEntry {
            label: band_label(band.slot, band.predicate),
            color: band.color.clone(),
            band: Some(band.slot),
            regions: count(Some(band.slot)),
        })
        .collect();
    entries.push(LegendEntry {
        label: NO_RECORDS_LABEL.to_string(),
        color: ResolvedColor::unassigned(),
        band: None,
        regions: count(None),
    });
    entries
}

fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

fn years_part(boundaries: &YearBoundaries) -> String {
    match boundaries {
        YearBoundaries::None => "all-years".to_string(),
        YearBoundaries::Single { year } => format!("pre-post-{year}"),
        YearBoundaries::Dual { boundary } => format!("{}-{}", boundary.first(), boundary.second()),
    }
}

/// Suggested file name for an exported map image.
///
/// `{Family}-{Genus}-{species}_{years}_{YYYYmmdd_HHMMSS}.tiff`, where
/// `years` is `all-years`, `pre-post-{Y}` or `{Y1}-{Y2}`. Characters outside
/// `[A-Za-z0-9.-]` become underscores.
pub fn export_filename(
    taxon: &TaxonFilter,
    boundaries: &YearBoundaries,
    timestamp: NaiveDateTime,
) -> String {
    format!(
        "{}-{}-{}_{}_{}.{EXPORT_EXTENSION}",
        sanitize(&taxon_label(&taxon.family, title_case)),
        sanitize(&taxon_label(&taxon.genus, title_case)),
        sanitize(&taxon_label(&taxon.species, lowercase)),
        years_part(boundaries),
        timestamp.format("%Y%m%d_%H%M%S"),
    )
}
