//! Reference region names and lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::names::normalize;

/// One named administrative region of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRegion {
    /// Display name as provided by the region source.
    pub canonical_name: String,
    /// Normalized name used for matching records.
    pub key: String,
}

impl ReferenceRegion {
    pub fn new(name: &str) -> Self {
        Self {
            canonical_name: name.trim().to_string(),
            key: normalize(name),
        }
    }
}

/// The fixed, ordered set of regions a map is drawn over.
///
/// Read-only once built; classification runs build their own color state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceRegions {
    regions: Vec<ReferenceRegion>,
    by_key: BTreeMap<String, usize>,
}

impl ReferenceRegions {
    /// Builds the set, skipping blank names and keeping the first spelling of
    /// names that normalize to the same key.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            let region = ReferenceRegion::new(name.as_ref());
            if region.key.is_empty() || set.by_key.contains_key(&region.key) {
                continue;
            }
            set.by_key.insert(region.key.clone(), set.regions.len());
            set.regions.push(region);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRegion> {
        self.regions.iter()
    }

    /// Looks up a region by an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&ReferenceRegion> {
        self.by_key.get(key).map(|&idx| &self.regions[idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Looks up a region by free text, normalizing it first.
    pub fn find(&self, name: &str) -> Option<&ReferenceRegion> {
        self.get(&normalize(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_dedupe_by_key() {
        let regions = ReferenceRegions::new(["Lewis and Clark", "LEWIS & CLARK", "", "Park"]);
        assert_eq!(regions.len(), 2);
        assert_eq!(
            regions.find("lewis & clark").unwrap().canonical_name,
            "Lewis and Clark"
        );
        assert!(regions.contains_key("park"));
        assert!(regions.find("Gallatin").is_none());
    }

    #[test]
    fn regions_keep_source_order() {
        let regions = ReferenceRegions::new(["Park", "Gallatin"]);
        let names: Vec<&str> = regions.iter().map(|r| r.canonical_name.as_str()).collect();
        assert_eq!(names, vec!["Park", "Gallatin"]);
    }
}
