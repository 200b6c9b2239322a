//! User filter state: taxon selections and year boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::{OccurrenceRecord, Taxon};
use crate::error::ClassifyError;
use crate::names::normalize_taxon;

/// A choice made in one of the family/genus/species pickers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Selection {
    /// Case-insensitive match on the trimmed value.
    Exact(String),
    /// "All": any row where the field is present and non-blank.
    AnyNonEmpty,
    /// "Not Specified": any row where the field is null or blank.
    ExplicitlyEmpty,
}

impl Selection {
    pub const ALL_LABEL: &'static str = "All";
    pub const NOT_SPECIFIED_LABEL: &'static str = "Not Specified";

    /// Interprets picker text. Blank text means nothing was picked.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) {
            Some(Self::AnyNonEmpty)
        } else if trimmed.eq_ignore_ascii_case(Self::NOT_SPECIFIED_LABEL) {
            Some(Self::ExplicitlyEmpty)
        } else {
            Some(Self::Exact(trimmed.to_string()))
        }
    }

    pub fn exact(value: impl Into<String>) -> Self {
        Self::Exact(value.into().trim().to_string())
    }

    pub fn matches(&self, value: Option<&Taxon>) -> bool {
        match self {
            Self::AnyNonEmpty => value.is_some(),
            Self::ExplicitlyEmpty => value.is_none(),
            Self::Exact(expected) => value.is_some_and(|taxon| taxon.key == normalize_taxon(expected)),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(value) => f.write_str(value),
            Self::AnyNonEmpty => f.write_str(Self::ALL_LABEL),
            Self::ExplicitlyEmpty => f.write_str(Self::NOT_SPECIFIED_LABEL),
        }
    }
}

/// The three cascading picker levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxonLevel {
    Family,
    Genus,
    Species,
}

impl fmt::Display for TaxonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Family => "Family",
            Self::Genus => "Genus",
            Self::Species => "Species",
        })
    }
}

/// A fully specified family/genus/species filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonFilter {
    pub family: Selection,
    pub genus: Selection,
    pub species: Selection,
}

impl TaxonFilter {
    pub fn new(family: Selection, genus: Selection, species: Selection) -> Self {
        Self {
            family,
            genus,
            species,
        }
    }

    /// Filter that accepts every row with all three levels filled in.
    pub fn any() -> Self {
        Self::new(
            Selection::AnyNonEmpty,
            Selection::AnyNonEmpty,
            Selection::AnyNonEmpty,
        )
    }

    pub fn matches(&self, record: &OccurrenceRecord) -> bool {
        self.family.matches(record.family.as_ref())
            && self.genus.matches(record.genus.as_ref())
            && self.species.matches(record.species.as_ref())
    }
}

/// How rows without an extractable year take part in year-bounded bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingYearPolicy {
    /// Undated rows match no year-bounded band.
    #[default]
    Exclude,
    /// Undated rows count as older than every boundary.
    AssumeOlder,
}

/// Two boundary years with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDualBoundary")]
pub struct DualBoundary {
    first: i32,
    second: i32,
}

#[derive(Deserialize)]
struct RawDualBoundary {
    first: i32,
    second: i32,
}

impl TryFrom<RawDualBoundary> for DualBoundary {
    type Error = ClassifyError;

    fn try_from(raw: RawDualBoundary) -> Result<Self, Self::Error> {
        Self::new(raw.first, raw.second)
    }
}

impl DualBoundary {
    pub fn new(first: i32, second: i32) -> Result<Self, ClassifyError> {
        if first >= second {
            return Err(ClassifyError::InvalidYearRange {
                first: first.to_string(),
                second: second.to_string(),
            });
        }
        Ok(Self { first, second })
    }

    /// Parses both boundaries from user text; blank or non-numeric input
    /// fails with both raw values named.
    pub fn parse(first: Option<&str>, second: Option<&str>) -> Result<Self, ClassifyError> {
        let raw_first = first.unwrap_or_default().trim();
        let raw_second = second.unwrap_or_default().trim();
        let invalid = || ClassifyError::InvalidYearRange {
            first: raw_first.to_string(),
            second: raw_second.to_string(),
        };
        let first = raw_first.parse::<i32>().map_err(|_| invalid())?;
        let second = raw_second.parse::<i32>().map_err(|_| invalid())?;
        Self::new(first, second)
    }

    pub const fn first(self) -> i32 {
        self.first
    }

    pub const fn second(self) -> i32 {
        self.second
    }
}

/// Validated year boundaries for one classification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum YearBoundaries {
    /// Single-boundary mode without a year: every matching record counts.
    #[default]
    None,
    Single {
        year: i32,
    },
    Dual {
        boundary: DualBoundary,
    },
}

impl YearBoundaries {
    /// Parses the optional single-boundary year field.
    pub fn parse_single(text: Option<&str>) -> Result<Self, ClassifyError> {
        let Some(raw) = text.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self::None);
        };
        raw.parse::<i32>()
            .map(|year| Self::Single { year })
            .map_err(|_| ClassifyError::InvalidYear {
                value: raw.to_string(),
            })
    }

    pub fn is_dual(&self) -> bool {
        matches!(self, Self::Dual { .. })
    }
}

/// Raw year fields as entered, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryInput {
    Single(Option<String>),
    Dual {
        first: Option<String>,
        second: Option<String>,
    },
}

impl Default for BoundaryInput {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl BoundaryInput {
    pub fn validate(&self) -> Result<YearBoundaries, ClassifyError> {
        match self {
            Self::Single(year) => YearBoundaries::parse_single(year.as_deref()),
            Self::Dual { first, second } => {
                DualBoundary::parse(first.as_deref(), second.as_deref())
                    .map(|boundary| YearBoundaries::Dual { boundary })
            }
        }
    }
}

/// Mutable picker state owned by the caller.
///
/// Changing an upstream level clears every level below it, mirroring the
/// cascading dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    family: Option<Selection>,
    genus: Option<Selection>,
    species: Option<Selection>,
    pub boundaries: BoundaryInput,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(&self) -> Option<&Selection> {
        self.family.as_ref()
    }

    pub fn genus(&self) -> Option<&Selection> {
        self.genus.as_ref()
    }

    pub fn species(&self) -> Option<&Selection> {
        self.species.as_ref()
    }

    pub fn set_family(&mut self, selection: Option<Selection>) {
        self.family = selection;
        self.genus = None;
        self.species = None;
    }

    pub fn set_genus(&mut self, selection: Option<Selection>) {
        self.genus = selection;
        self.species = None;
    }

    pub fn set_species(&mut self, selection: Option<Selection>) {
        self.species = selection;
    }

    /// Returns the complete filter, or names every level still unselected.
    pub fn taxon_filter(&self) -> Result<TaxonFilter, ClassifyError> {
        match (&self.family, &self.genus, &self.species) {
            (Some(family), Some(genus), Some(species)) => Ok(TaxonFilter::new(
                family.clone(),
                genus.clone(),
                species.clone(),
            )),
            _ => {
                let fields = [
                    (TaxonLevel::Family, self.family.is_none()),
                    (TaxonLevel::Genus, self.genus.is_none()),
                    (TaxonLevel::Species, self.species.is_none()),
                ]
                .into_iter()
                .filter_map(|(level, missing)| missing.then_some(level))
                .collect();
                Err(ClassifyError::MissingSelection { fields })
            }
        }
    }
}
