//! Dataset validation: required columns, year extraction, region matching.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use atlas_model::{
    DatasetSummary, OccurrenceRecord, REQUIRED_COLUMNS, ReferenceRegions, UnmatchedRows,
    ValidatedDataset, ValidationError,
};

use crate::error::Result;
use crate::reader::read_csv_frame;
use crate::table::RawTable;
use crate::workbook::{is_workbook, read_workbook_table};
use crate::year::extract_year;

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDataset {
    pub dataset: ValidatedDataset,
    pub summary: DatasetSummary,
    /// Rows excluded because their region is not on the map.
    pub unmatched: UnmatchedRows,
}

struct ColumnIndexes {
    county: usize,
    family: usize,
    genus: usize,
    species: usize,
    year: usize,
}

fn resolve_columns(table: &RawTable) -> std::result::Result<ColumnIndexes, ValidationError> {
    let found: Vec<Option<usize>> = REQUIRED_COLUMNS
        .iter()
        .map(|name| table.column_index(name))
        .collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip(&found)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| (*name).to_string())
        .collect();
    match found.as_slice() {
        [Some(county), Some(family), Some(genus), Some(species), Some(year)] => {
            Ok(ColumnIndexes {
                county: *county,
                family: *family,
                genus: *genus,
                species: *species,
                year: *year,
            })
        }
        _ => Err(ValidationError::MissingColumns { columns: missing }),
    }
}

/// Validates a raw table against the reference regions.
///
/// Rows whose normalized county is not a reference region are moved to
/// [`ValidatedDataset::unmatched_records`] and counted in
/// [`LoadedDataset::unmatched`]; they never fail the load on their own.
pub fn validate_and_load(
    table: &RawTable,
    regions: &ReferenceRegions,
) -> std::result::Result<LoadedDataset, ValidationError> {
    let columns = resolve_columns(table)?;

    let mut records = Vec::new();
    let mut unmatched_records = Vec::new();
    let mut unmatched_names = BTreeSet::new();

    for row_idx in 0..table.len() {
        let record = OccurrenceRecord::new(
            table.cell(row_idx, columns.county).unwrap_or_default(),
            table.cell(row_idx, columns.family),
            table.cell(row_idx, columns.genus),
            table.cell(row_idx, columns.species),
            extract_year(table.cell(row_idx, columns.year)),
        );
        if regions.contains_key(&record.region_key) {
            records.push(record);
        } else {
            if !record.region_name.is_empty() {
                unmatched_names.insert(record.region_name.clone());
            }
            unmatched_records.push(record);
        }
    }

    if records.is_empty() {
        return Err(ValidationError::NoValidRecords {
            total_rows: table.len(),
        });
    }

    let unmatched = UnmatchedRows {
        count: unmatched_records.len(),
        names: unmatched_names.into_iter().collect(),
    };
    if !unmatched.is_empty() {
        warn!(
            unmatched_rows = unmatched.count,
            names = ?unmatched.names,
            "rows with unknown regions excluded"
        );
    }

    let summary = summarize(&records);
    info!(
        records = summary.record_count,
        regions = summary.region_count,
        families = summary.family_count,
        "dataset validated"
    );

    Ok(LoadedDataset {
        dataset: ValidatedDataset {
            records,
            unmatched_records,
        },
        summary,
        unmatched,
    })
}

/// Summary statistics over a set of records.
pub fn summarize(records: &[OccurrenceRecord]) -> DatasetSummary {
    let mut families = BTreeSet::new();
    let mut genera = BTreeSet::new();
    let mut species = BTreeSet::new();
    let mut regions = BTreeSet::new();
    let mut year_min: Option<i32> = None;
    let mut year_max: Option<i32> = None;

    for record in records {
        if let Some(taxon) = &record.family {
            families.insert(taxon.key.as_str());
        }
        if let Some(taxon) = &record.genus {
            genera.insert(taxon.key.as_str());
        }
        if let Some(taxon) = &record.species {
            species.insert(taxon.key.as_str());
        }
        regions.insert(record.region_key.as_str());
        if let Some(year) = record.year {
            year_min = Some(year_min.map_or(year, |min| min.min(year)));
            year_max = Some(year_max.map_or(year, |max| max.max(year)));
        }
    }

    DatasetSummary {
        record_count: records.len(),
        family_count: families.len(),
        genus_count: genera.len(),
        species_count: species.len(),
        year_min,
        year_max,
        region_count: regions.len(),
    }
}

/// Reads a CSV export or workbook and validates it in one step.
pub fn load_dataset(path: &Path, regions: &ReferenceRegions) -> Result<LoadedDataset> {
    let table = if is_workbook(path) {
        read_workbook_table(path)?
    } else {
        RawTable::from_dataframe(&read_csv_frame(path)?)?
    };
    Ok(validate_and_load(&table, regions)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> ReferenceRegions {
        ReferenceRegions::new(["Gallatin", "Park", "Lewis and Clark"])
    }

    const HEADERS: [&str; 5] = ["county", "family", "genus", "species", "year"];

    #[test]
    fn missing_columns_are_named_in_order() {
        let table = RawTable::from_strings(&["County", "Family", "Species"], &[]);
        let err = validate_and_load(&table, &regions()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingColumns {
                columns: vec!["genus".to_string(), "year".to_string()]
            }
        );
    }

    #[test]
    fn headers_match_case_insensitively_after_trim() {
        let table = RawTable::from_strings(
            &[" County", "FAMILY ", "Genus", "Species", "Year"],
            &[vec!["Park", "Apidae", "Bombus", "huntii", "1999"]],
        );
        let loaded = validate_and_load(&table, &regions()).unwrap();
        assert_eq!(loaded.dataset.len(), 1);
    }

    #[test]
    fn unmatched_rows_are_surfaced_not_lost() {
        let table = RawTable::from_strings(
            &HEADERS,
            &[
                vec!["Gallatin", "Apidae", "Bombus", "huntii", "1990"],
                vec!["Yellowstone NP", "Apidae", "Bombus", "huntii", "1991"],
                vec!["Yellowstone NP", "Apidae", "Bombus", "huntii", "1992"],
                vec!["", "Apidae", "Bombus", "huntii", "1993"],
                vec!["lewis & clark", "Apidae", "Bombus", "huntii", "2001"],
            ],
        );
        let loaded = validate_and_load(&table, &regions()).unwrap();
        assert_eq!(loaded.dataset.records.len(), 2);
        assert_eq!(loaded.dataset.unmatched_records.len(), 3);
        assert_eq!(loaded.unmatched.count, 3);
        assert_eq!(loaded.unmatched.names, vec!["Yellowstone NP".to_string()]);
    }

    #[test]
    fn no_matching_rows_fails() {
        let table = RawTable::from_strings(
            &HEADERS,
            &[vec!["Atlantis", "Apidae", "Bombus", "huntii", "1990"]],
        );
        assert_eq!(
            validate_and_load(&table, &regions()).unwrap_err(),
            ValidationError::NoValidRecords { total_rows: 1 }
        );
    }

    #[test]
    fn rows_without_year_are_kept() {
        let table = RawTable::from_strings(
            &HEADERS,
            &[
                vec!["Park", "Apidae", "Bombus", "huntii", "unknown"],
                vec!["Park", "Apidae", "Bombus", "huntii", ""],
            ],
        );
        let loaded = validate_and_load(&table, &regions()).unwrap();
        assert_eq!(loaded.dataset.len(), 2);
        assert!(loaded.dataset.records.iter().all(|r| r.year.is_none()));
        assert_eq!(loaded.summary.year_min, None);
        assert_eq!(loaded.summary.year_range(), "unknown");
    }

    #[test]
    fn summary_counts_distinct_values() {
        let table = RawTable::from_strings(
            &HEADERS,
            &[
                vec!["Park", "Apidae", "Bombus", "huntii", "1990"],
                vec!["park", "APIDAE", "Bombus", "Fervidus", "2010"],
                vec!["Gallatin", "Halictidae", "", "", "ca. 1975"],
            ],
        );
        let loaded = validate_and_load(&table, &regions()).unwrap();
        let summary = loaded.summary;
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.family_count, 2);
        assert_eq!(summary.genus_count, 1);
        assert_eq!(summary.species_count, 2);
        assert_eq!(summary.year_min, Some(1975));
        assert_eq!(summary.year_max, Some(2010));
        assert_eq!(summary.region_count, 2);
    }
}
