//! Error taxonomy for dataset validation and classification.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorSlot;
use crate::selection::TaxonLevel;

/// Fatal problems detected while loading a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are absent from the table header.
    #[error("missing required columns: {}", join(.columns))]
    MissingColumns { columns: Vec<String> },

    /// The table loaded but no row names a known region.
    #[error("no records match a known region ({total_rows} rows checked)")]
    NoValidRecords { total_rows: usize },
}

/// A single color slot whose value could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidColor {
    pub slot: ColorSlot,
    pub spec: String,
}

impl fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.slot.label(), self.spec)
    }
}

/// Fatal problems detected before any region is colored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Family, genus or species has not been chosen.
    #[error("please select {}", join(.fields))]
    MissingSelection { fields: Vec<TaxonLevel> },

    /// A single boundary year that is not a number.
    #[error("invalid boundary year '{value}': expected a number such as 2000")]
    InvalidYear { value: String },

    /// Dual boundary years missing, non-numeric, or not strictly increasing.
    #[error(
        "invalid year range: first year '{first}' must be a number strictly less than second year '{second}'"
    )]
    InvalidYearRange { first: String, second: String },

    /// Every color slot that failed to resolve, in slot order.
    #[error("invalid color specification for {}", join(.errors))]
    InvalidColors { errors: Vec<InvalidColor> },
}

impl ClassifyError {
    /// Slots named by an [`ClassifyError::InvalidColors`] error.
    pub fn invalid_slots(&self) -> Vec<ColorSlot> {
        match self {
            Self::InvalidColors { errors } => errors.iter().map(|e| e.slot).collect(),
            _ => Vec::new(),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
