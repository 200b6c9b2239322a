//! Region names the reference map does not know.

use std::collections::BTreeSet;

use atlas_model::{OccurrenceRecord, ReferenceRegions};

/// Distinct normalized region names among `records` that are not reference regions.
///
/// Blank region cells are not reported.
pub fn unmatched_regions<'a>(
    records: impl IntoIterator<Item = &'a OccurrenceRecord>,
    regions: &ReferenceRegions,
) -> BTreeSet<String> {
    records
        .into_iter()
        .map(|record| record.region_key.as_str())
        .filter(|key| !key.is_empty() && !regions.contains_key(key))
        .map(str::to_string)
        .collect()
}
