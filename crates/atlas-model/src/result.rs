//! Classification output: per-region colors and legend entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::{ColorSlot, ResolvedColor};

/// Color assigned to one reference region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionColor {
    pub region: String,
    pub color: ResolvedColor,
    /// Band that painted the region; `None` keeps the default color.
    pub band: Option<ColorSlot>,
}

/// One line of the map legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: ResolvedColor,
    pub band: Option<ColorSlot>,
    pub regions: usize,
}

/// Region -> color mapping handed to the presentation layer.
///
/// Holds exactly one entry per reference region, in reference order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub regions: Vec<RegionColor>,
}

impl ClassificationResult {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Color of a region by canonical name.
    pub fn color_of(&self, region: &str) -> Option<&ResolvedColor> {
        self.regions
            .iter()
            .find(|entry| entry.region == region)
            .map(|entry| &entry.color)
    }

    /// Canonical name -> color name.
    pub fn color_names(&self) -> BTreeMap<String, String> {
        self.regions
            .iter()
            .map(|entry| (entry.region.clone(), entry.color.name.clone()))
            .collect()
    }

    /// Number of regions painted by some band.
    pub fn painted_count(&self) -> usize {
        self.regions.iter().filter(|entry| entry.band.is_some()).count()
    }
}
