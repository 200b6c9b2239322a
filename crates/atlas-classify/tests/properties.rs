//! Property tests for the coloring rules.

use std::collections::BTreeMap;

use proptest::prelude::*;

use atlas_classify::{ClassificationRequest, build_bands, classify, slots_for, validate_colors};
use atlas_model::{
    ClassifyError, ColorConfig, ColorSlot, DualBoundary, MissingYearPolicy, OccurrenceRecord,
    ReferenceRegions, ResolvedColor, TaxonFilter, ValidatedDataset, YearBoundaries,
};

const REGIONS: [&str; 4] = ["Gallatin", "Park", "Madison", "Lewis and Clark"];

fn regions() -> ReferenceRegions {
    ReferenceRegions::new(REGIONS)
}

fn record_strategy() -> impl Strategy<Value = OccurrenceRecord> {
    (
        0..REGIONS.len(),
        proptest::option::weighted(0.85, 1950i32..2030),
        proptest::bool::weighted(0.9),
    )
        .prop_map(|(region, year, has_species)| {
            OccurrenceRecord::new(
                REGIONS[region],
                Some("Apidae"),
                Some("Bombus"),
                has_species.then_some("huntii"),
                year,
            )
        })
}

fn dataset_strategy() -> impl Strategy<Value = ValidatedDataset> {
    proptest::collection::vec(record_strategy(), 0..40).prop_map(|records| ValidatedDataset {
        records,
        unmatched_records: Vec::new(),
    })
}

fn boundaries_strategy() -> impl Strategy<Value = YearBoundaries> {
    prop_oneof![
        Just(YearBoundaries::None),
        (1950i32..2030).prop_map(|year| YearBoundaries::Single { year }),
        (1950i32..2030, 1i32..40).prop_map(|(first, gap)| YearBoundaries::Dual {
            boundary: DualBoundary::new(first, first + gap).unwrap(),
        }),
    ]
}

fn policy_strategy() -> impl Strategy<Value = MissingYearPolicy> {
    prop_oneof![
        Just(MissingYearPolicy::Exclude),
        Just(MissingYearPolicy::AssumeOlder)
    ]
}

fn request(boundaries: YearBoundaries, missing_year: MissingYearPolicy) -> ClassificationRequest {
    ClassificationRequest {
        taxon: TaxonFilter::any(),
        boundaries,
        colors: ColorConfig::default(),
        missing_year,
    }
}

fn records_in<'a>(
    dataset: &'a ValidatedDataset,
    region: &str,
) -> impl Iterator<Item = &'a OccurrenceRecord> {
    let key = atlas_model::normalize(region);
    dataset
        .records
        .iter()
        .filter(move |record| record.region_key == key && record.species.is_some())
}

/// Paints bands one at a time, later bands overwriting earlier ones.
fn paint_in_passes(
    dataset: &ValidatedDataset,
    request: &ClassificationRequest,
) -> BTreeMap<String, String> {
    let colors = validate_colors(&request.colors, slots_for(&request.boundaries)).unwrap();
    let bands = build_bands(&request.boundaries, &colors);
    let mut canvas: BTreeMap<String, String> = REGIONS
        .iter()
        .map(|name| (name.to_string(), ResolvedColor::unassigned().name))
        .collect();
    for band in &bands {
        for name in REGIONS {
            if records_in(dataset, name)
                .any(|record| band.predicate.matches(record.year, request.missing_year))
            {
                canvas.insert(name.to_string(), band.color.name.clone());
            }
        }
    }
    canvas
}

proptest! {
    #[test]
    fn every_region_colored_exactly_once(
        dataset in dataset_strategy(),
        boundaries in boundaries_strategy(),
        policy in policy_strategy(),
    ) {
        let outcome = classify(&dataset, &regions(), &request(boundaries, policy)).unwrap();
        let names: Vec<&str> = outcome.result.regions.iter().map(|r| r.region.as_str()).collect();
        prop_assert_eq!(names, REGIONS.to_vec());
    }

    #[test]
    fn matches_pass_by_pass_painting(
        dataset in dataset_strategy(),
        boundaries in boundaries_strategy(),
        policy in policy_strategy(),
    ) {
        let req = request(boundaries, policy);
        let outcome = classify(&dataset, &regions(), &req).unwrap();
        prop_assert_eq!(outcome.result.color_names(), paint_in_passes(&dataset, &req));
    }

    #[test]
    fn classifying_twice_gives_the_same_outcome(
        dataset in dataset_strategy(),
        boundaries in boundaries_strategy(),
        policy in policy_strategy(),
    ) {
        let req = request(boundaries, policy);
        let first = classify(&dataset, &regions(), &req).unwrap();
        let second = classify(&dataset, &regions(), &req).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn regions_without_records_stay_white(
        dataset in dataset_strategy(),
        boundaries in boundaries_strategy(),
    ) {
        let outcome = classify(
            &dataset,
            &regions(),
            &request(boundaries, MissingYearPolicy::Exclude),
        )
        .unwrap();
        for entry in &outcome.result.regions {
            if records_in(&dataset, &entry.region).next().is_none() {
                prop_assert_eq!(entry.color.name.as_str(), "white");
                prop_assert_eq!(entry.band, None);
            }
        }
    }

    #[test]
    fn single_mode_pre_takes_precedence(
        dataset in dataset_strategy(),
        year in 1950i32..2030,
    ) {
        let outcome = classify(
            &dataset,
            &regions(),
            &request(YearBoundaries::Single { year }, MissingYearPolicy::Exclude),
        )
        .unwrap();
        for entry in &outcome.result.regions {
            let years: Vec<i32> = records_in(&dataset, &entry.region)
                .filter_map(|record| record.year)
                .collect();
            let expected = if years.iter().any(|&y| y <= year) {
                Some(ColorSlot::Pre)
            } else if years.iter().any(|&y| y > year) {
                Some(ColorSlot::Post)
            } else {
                None
            };
            prop_assert_eq!(entry.band, expected, "region {}", entry.region);
        }
    }

    #[test]
    fn dual_mode_oldest_period_takes_precedence(
        dataset in dataset_strategy(),
        first in 1950i32..2030,
        gap in 1i32..40,
    ) {
        let boundary = DualBoundary::new(first, first + gap).unwrap();
        let outcome = classify(
            &dataset,
            &regions(),
            &request(YearBoundaries::Dual { boundary }, MissingYearPolicy::Exclude),
        )
        .unwrap();
        for entry in &outcome.result.regions {
            let years: Vec<i32> = records_in(&dataset, &entry.region)
                .filter_map(|record| record.year)
                .collect();
            let expected = if years.iter().any(|&y| y <= boundary.first()) {
                Some(ColorSlot::FirstPeriod)
            } else if years.iter().any(|&y| y <= boundary.second()) {
                Some(ColorSlot::SecondPeriod)
            } else if !years.is_empty() {
                Some(ColorSlot::ThirdPeriod)
            } else {
                None
            };
            prop_assert_eq!(entry.band, expected, "region {}", entry.region);
        }
    }

    #[test]
    fn dual_boundaries_require_strict_order(first in -3000i32..3000, second in -3000i32..3000) {
        let result = DualBoundary::new(first, second);
        if first < second {
            let boundary = result.unwrap();
            prop_assert_eq!((boundary.first(), boundary.second()), (first, second));
        } else {
            let is_range_error = matches!(result, Err(ClassifyError::InvalidYearRange { .. }));
            prop_assert!(is_range_error);
        }
    }
}
