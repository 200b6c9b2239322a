//! Occurrence records and the validated dataset.

use serde::{Deserialize, Serialize};

use crate::names::{normalize, normalize_taxon};

/// Fields every occurrence spreadsheet must provide, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 5] = ["county", "family", "genus", "species", "year"];

/// A taxonomic classifier value: the trimmed original text plus its matching key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Taxon {
    pub display: String,
    pub key: String,
}

impl Taxon {
    /// Builds a taxon from a raw cell; blank cells yield `None`.
    pub fn from_cell(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            display: trimmed.to_string(),
            key: normalize_taxon(trimmed),
        })
    }
}

/// One row of validated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    /// Region text as it appeared in the spreadsheet (trimmed).
    pub region_name: String,
    /// Normalized region name used for matching.
    pub region_key: String,
    pub family: Option<Taxon>,
    pub genus: Option<Taxon>,
    pub species: Option<Taxon>,
    /// First 4-digit run of the year cell, if any.
    pub year: Option<i32>,
}

impl OccurrenceRecord {
    pub fn new(
        region_name: &str,
        family: Option<&str>,
        genus: Option<&str>,
        species: Option<&str>,
        year: Option<i32>,
    ) -> Self {
        Self {
            region_name: region_name.trim().to_string(),
            region_key: normalize(region_name),
            family: Taxon::from_cell(family),
            genus: Taxon::from_cell(genus),
            species: Taxon::from_cell(species),
            year,
        }
    }
}

/// Rows whose region did not match any reference region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedRows {
    pub count: usize,
    /// Distinct raw (trimmed) region names, sorted.
    pub names: Vec<String>,
}

impl UnmatchedRows {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Immutable dataset produced by a successful load.
///
/// `records` only contains rows that matched a reference region. Rows that
/// did not match are kept apart in `unmatched_records` so that each
/// classification can report which of its filtered rows fell outside the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedDataset {
    pub records: Vec<OccurrenceRecord>,
    pub unmatched_records: Vec<OccurrenceRecord>,
}

impl ValidatedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matched and unmatched rows together, in load order per group.
    pub fn all_records(&self) -> impl Iterator<Item = &OccurrenceRecord> {
        self.records.iter().chain(self.unmatched_records.iter())
    }
}

/// Observational statistics shown after a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub family_count: usize,
    pub genus_count: usize,
    pub species_count: usize,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub region_count: usize,
}

impl DatasetSummary {
    /// "1990 - 2010", or "unknown" when no row had a year.
    pub fn year_range(&self) -> String {
        match (self.year_min, self.year_max) {
            (Some(min), Some(max)) => format!("{min} - {max}"),
            _ => "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxon_from_blank_cell_is_none() {
        assert!(Taxon::from_cell(None).is_none());
        assert!(Taxon::from_cell(Some("   ")).is_none());
        let taxon = Taxon::from_cell(Some(" Bombus ")).unwrap();
        assert_eq!(taxon.display, "Bombus");
        assert_eq!(taxon.key, "bombus");
    }

    #[test]
    fn record_normalizes_region() {
        let record = OccurrenceRecord::new(" Lewis & Clark ", Some("Apidae"), None, None, None);
        assert_eq!(record.region_name, "Lewis & Clark");
        assert_eq!(record.region_key, "lewis and clark");
        assert!(record.genus.is_none());
    }

    #[test]
    fn year_range_display() {
        let mut summary = DatasetSummary::default();
        assert_eq!(summary.year_range(), "unknown");
        summary.year_min = Some(1990);
        summary.year_max = Some(2010);
        assert_eq!(summary.year_range(), "1990 - 2010");
    }
}
