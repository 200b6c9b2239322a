//! Cascading taxon options and record filtering.

use std::collections::BTreeMap;

use serde::Serialize;

use atlas_model::{OccurrenceRecord, Selection, Taxon, TaxonFilter, ValidatedDataset, title_case};

/// Distinct values offered by one picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeOptions {
    /// Display values, sorted and deduplicated case-insensitively.
    pub values: Vec<String>,
    /// Whether some candidate row leaves this level blank.
    pub has_unspecified: bool,
}

impl CascadeOptions {
    fn collect<'a>(
        taxa: impl Iterator<Item = Option<&'a Taxon>>,
        display: impl Fn(&Taxon) -> String,
    ) -> Self {
        let mut values = BTreeMap::new();
        let mut has_unspecified = false;
        for taxon in taxa {
            match taxon {
                Some(taxon) => {
                    values
                        .entry(taxon.key.clone())
                        .or_insert_with(|| display(taxon));
                }
                None => has_unspecified = true,
            }
        }
        Self {
            values: values.into_values().collect(),
            has_unspecified,
        }
    }

    /// Picker entries: "All", the values, then "Not Specified" when relevant.
    pub fn choices(&self) -> Vec<String> {
        let mut choices = Vec::with_capacity(self.values.len() + 2);
        choices.push(Selection::ALL_LABEL.to_string());
        choices.extend(self.values.iter().cloned());
        if self.has_unspecified {
            choices.push(Selection::NOT_SPECIFIED_LABEL.to_string());
        }
        choices
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && !self.has_unspecified
    }
}

/// Genus options for a family, plus species options once a genus is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cascade {
    pub genera: CascadeOptions,
    pub species: Option<CascadeOptions>,
}

fn title_display(taxon: &Taxon) -> String {
    title_case(&taxon.key)
}

fn species_display(taxon: &Taxon) -> String {
    taxon.key.clone()
}

/// Family options over every mapped record. Values are title case.
pub fn family_options(dataset: &ValidatedDataset) -> CascadeOptions {
    CascadeOptions::collect(
        dataset.records.iter().map(|record| record.family.as_ref()),
        title_display,
    )
}

/// Genus options among records matching the family selection.
pub fn genus_options(dataset: &ValidatedDataset, family: &Selection) -> CascadeOptions {
    CascadeOptions::collect(
        dataset
            .records
            .iter()
            .filter(|record| family.matches(record.family.as_ref()))
            .map(|record| record.genus.as_ref()),
        title_display,
    )
}

/// Species options among records matching both upstream selections.
/// Values are lowercase, following binomial convention.
pub fn species_options(
    dataset: &ValidatedDataset,
    family: &Selection,
    genus: &Selection,
) -> CascadeOptions {
    CascadeOptions::collect(
        dataset
            .records
            .iter()
            .filter(|record| {
                family.matches(record.family.as_ref()) && genus.matches(record.genus.as_ref())
            })
            .map(|record| record.species.as_ref()),
        species_display,
    )
}

/// Candidate genera for a family and, when a genus is given, candidate species.
pub fn cascade_filter(
    dataset: &ValidatedDataset,
    family: &Selection,
    genus: Option<&Selection>,
) -> Cascade {
    Cascade {
        genera: genus_options(dataset, family),
        species: genus.map(|genus| species_options(dataset, family, genus)),
    }
}

/// Mapped records matching all three selections.
pub fn filter_records<'a>(
    dataset: &'a ValidatedDataset,
    filter: &TaxonFilter,
) -> Vec<&'a OccurrenceRecord> {
    dataset
        .records
        .iter()
        .filter(|record| filter.matches(record))
        .collect()
}
