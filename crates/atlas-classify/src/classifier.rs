//! Region coloring.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use atlas_model::{
    ClassificationResult, ClassifyError, ColorConfig, FilterSelection, LegendEntry,
    MissingYearPolicy, ReferenceRegions, RegionColor, ResolvedColor, TaxonFilter,
    ValidatedDataset, YearBoundaries,
};

use crate::bands::{PriorityBand, build_bands, slots_for};
use crate::color::validate_colors;
use crate::report::{legend, map_title};
use crate::unmatched::unmatched_regions;

/// Everything one classification run needs besides the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub taxon: TaxonFilter,
    pub boundaries: YearBoundaries,
    pub colors: ColorConfig,
    pub missing_year: MissingYearPolicy,
}

impl ClassificationRequest {
    /// Validates picker state into a request.
    ///
    /// Fails when a taxon level is unselected or the year fields do not
    /// parse; colors are checked later by [`classify`].
    pub fn from_selection(
        selection: &FilterSelection,
        colors: ColorConfig,
        missing_year: MissingYearPolicy,
    ) -> Result<Self, ClassifyError> {
        Ok(Self {
            taxon: selection.taxon_filter()?,
            boundaries: selection.boundaries.validate()?,
            colors,
            missing_year,
        })
    }
}

/// Result of a classification plus what the caller should show next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationOutcome {
    pub result: ClassificationResult,
    pub legend: Vec<LegendEntry>,
    /// Normalized region names of filtered rows that are not on the map.
    pub unmatched_regions: Vec<String>,
    /// Filtered rows that landed on a reference region.
    pub matched_records: usize,
}

/// Assigns a color to every reference region.
///
/// Colors for the active mode are validated before anything else, and all
/// invalid slots are reported together. The returned result holds exactly
/// one entry per reference region, in reference order.
pub fn classify(
    dataset: &ValidatedDataset,
    regions: &ReferenceRegions,
    request: &ClassificationRequest,
) -> Result<ClassificationOutcome, ClassifyError> {
    let resolved = validate_colors(&request.colors, slots_for(&request.boundaries))?;
    let bands = build_bands(&request.boundaries, &resolved);

    let filtered: Vec<_> = dataset
        .all_records()
        .filter(|record| request.taxon.matches(record))
        .collect();
    let unmatched: Vec<String> = unmatched_regions(filtered.iter().copied(), regions)
        .into_iter()
        .collect();
    if !unmatched.is_empty() {
        warn!(regions = ?unmatched, "filtered rows name regions missing from the map");
    }

    let mut best: BTreeMap<&str, usize> = BTreeMap::new();
    let mut matched_records = 0;
    for record in &filtered {
        if !regions.contains_key(&record.region_key) {
            continue;
        }
        matched_records += 1;
        let Some(rank) = top_band(&bands, record.year, request.missing_year) else {
            continue;
        };
        best.entry(record.region_key.as_str())
            .and_modify(|current| *current = (*current).max(rank))
            .or_insert(rank);
    }

    let result = ClassificationResult {
        regions: regions
            .iter()
            .map(|region| {
                let band = best.get(region.key.as_str()).map(|&rank| &bands[rank]);
                RegionColor {
                    region: region.canonical_name.clone(),
                    color: band.map_or_else(ResolvedColor::unassigned, |b| b.color.clone()),
                    band: band.map(|b| b.slot),
                }
            })
            .collect(),
    };

    for band in &bands {
        debug!(
            band = %band.slot,
            color = %band.color,
            regions = result.regions.iter().filter(|r| r.band == Some(band.slot)).count(),
            "band painted"
        );
    }
    info!(
        taxon = %map_title(&request.taxon),
        records = matched_records,
        painted = result.painted_count(),
        regions = result.len(),
        "classification complete"
    );

    Ok(ClassificationOutcome {
        legend: legend(&result, &bands),
        result,
        unmatched_regions: unmatched,
        matched_records,
    })
}

fn top_band(bands: &[PriorityBand], year: Option<i32>, policy: MissingYearPolicy) -> Option<usize> {
    bands
        .iter()
        .rev()
        .find(|band| band.predicate.matches(year, policy))
        .map(|band| band.rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_model::{BoundaryInput, ColorSlot, ColorSpec, OccurrenceRecord, Selection};

    fn record(region: &str, year: Option<i32>) -> OccurrenceRecord {
        OccurrenceRecord::new(region, Some("Apidae"), Some("Bombus"), Some("huntii"), year)
    }

    fn request(boundaries: YearBoundaries) -> ClassificationRequest {
        ClassificationRequest {
            taxon: TaxonFilter::any(),
            boundaries,
            colors: ColorConfig::default(),
            missing_year: MissingYearPolicy::Exclude,
        }
    }

    #[test]
    fn every_region_gets_exactly_one_entry() {
        let regions = ReferenceRegions::new(["Gallatin", "Park", "Missoula"]);
        let dataset = ValidatedDataset {
            records: vec![record("Park", Some(1990))],
            unmatched_records: vec![],
        };
        let outcome = classify(&dataset, &regions, &request(YearBoundaries::None)).unwrap();
        let names: Vec<&str> = outcome
            .result
            .regions
            .iter()
            .map(|r| r.region.as_str())
            .collect();
        assert_eq!(names, vec!["Gallatin", "Park", "Missoula"]);
        assert_eq!(outcome.result.color_of("Park").unwrap().name, "green");
        assert_eq!(outcome.result.color_of("Gallatin").unwrap().name, "white");
        assert_eq!(outcome.matched_records, 1);
    }

    #[test]
    fn no_year_mode_paints_undated_records() {
        let regions = ReferenceRegions::new(["Park"]);
        let dataset = ValidatedDataset {
            records: vec![record("Park", None)],
            unmatched_records: vec![],
        };
        let outcome = classify(&dataset, &regions, &request(YearBoundaries::None)).unwrap();
        assert_eq!(outcome.result.regions[0].band, Some(ColorSlot::All));
    }

    #[test]
    fn assume_older_paints_undated_records_as_pre() {
        let regions = ReferenceRegions::new(["Park"]);
        let dataset = ValidatedDataset {
            records: vec![record("Park", None)],
            unmatched_records: vec![],
        };
        let mut req = request(YearBoundaries::Single { year: 2000 });
        assert_eq!(
            classify(&dataset, &regions, &req).unwrap().result.regions[0].band,
            None
        );
        req.missing_year = MissingYearPolicy::AssumeOlder;
        assert_eq!(
            classify(&dataset, &regions, &req).unwrap().result.regions[0].band,
            Some(ColorSlot::Pre)
        );
    }

    #[test]
    fn invalid_color_stops_before_painting() {
        let regions = ReferenceRegions::new(["Park"]);
        let dataset = ValidatedDataset {
            records: vec![record("Park", Some(1990))],
            unmatched_records: vec![],
        };
        let mut req = request(YearBoundaries::Single { year: 2000 });
        req.colors.set(ColorSlot::All, ColorSpec::new("chartreuse-ish"));
        let err = classify(&dataset, &regions, &req).unwrap_err();
        assert_eq!(err.invalid_slots(), vec![ColorSlot::All]);
    }

    #[test]
    fn unmatched_regions_respect_taxon_filter() {
        let regions = ReferenceRegions::new(["Park"]);
        let dataset = ValidatedDataset {
            records: vec![record("Park", Some(1990))],
            unmatched_records: vec![
                record("Yellowstone  NP", Some(1990)),
                OccurrenceRecord::new(
                    "Glacier NP",
                    Some("Apidae"),
                    Some("Apis"),
                    Some("mellifera"),
                    None,
                ),
            ],
        };
        let mut req = request(YearBoundaries::None);
        req.taxon = TaxonFilter::new(
            Selection::exact("Apidae"),
            Selection::exact("Bombus"),
            Selection::AnyNonEmpty,
        );
        let outcome = classify(&dataset, &regions, &req).unwrap();
        assert_eq!(outcome.unmatched_regions, vec!["yellowstone np".to_string()]);
        assert_eq!(outcome.matched_records, 1);
    }

    #[test]
    fn request_from_selection_reports_missing_levels() {
        let mut selection = FilterSelection::new();
        selection.set_family(Selection::parse("Apidae"));
        let err = ClassificationRequest::from_selection(
            &selection,
            ColorConfig::default(),
            MissingYearPolicy::Exclude,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "please select Genus, Species");

        selection.set_genus(Selection::parse("All"));
        selection.set_species(Selection::parse("Not Specified"));
        selection.boundaries = BoundaryInput::Dual {
            first: Some("2000".to_string()),
            second: Some("1980".to_string()),
        };
        let err = ClassificationRequest::from_selection(
            &selection,
            ColorConfig::default(),
            MissingYearPolicy::Exclude,
        )
        .unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidYearRange { .. }));
    }
}
