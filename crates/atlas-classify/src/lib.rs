//! Region classification engine.
//!
//! Given a validated dataset, a taxon filter, year boundaries and colors,
//! assigns every reference region exactly one color:
//!
//! - [`filter`]: cascading family/genus/species options and record filtering
//! - [`color`]: named/hex color resolution with per-slot error aggregation
//! - [`bands`]: priority bands built from the year boundaries
//! - [`classifier`]: the coloring itself
//! - [`unmatched`]: filtered rows whose region is not on the map
//! - [`report`]: map title, legend labels and export filename

pub mod bands;
pub mod classifier;
pub mod color;
pub mod filter;
pub mod report;
pub mod unmatched;

pub use bands::{PriorityBand, YearPredicate, build_bands, slots_for};
pub use classifier::{ClassificationOutcome, ClassificationRequest, classify};
pub use color::{resolve_color, validate_colors};
pub use filter::{
    Cascade, CascadeOptions, cascade_filter, family_options, filter_records, genus_options,
    species_options,
};
pub use report::{NO_RECORDS_LABEL, band_label, export_filename, legend, map_title};
pub use unmatched::unmatched_regions;
