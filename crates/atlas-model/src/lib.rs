//! Data model for the county occurrence map engine.
//!
//! Everything here is plain data: reference regions, validated occurrence
//! records, taxon selections, year boundaries, color slots and the
//! classification result handed to the presentation layer. The logic that
//! produces these values lives in `atlas-ingest` and `atlas-classify`.

pub mod color;
pub mod dataset;
pub mod error;
pub mod names;
pub mod region;
pub mod result;
pub mod selection;

pub use color::{ColorConfig, ColorSlot, ColorSpec, DEFAULT_COLOR_NAME, ResolvedColor, Rgb};
pub use dataset::{
    DatasetSummary, OccurrenceRecord, REQUIRED_COLUMNS, Taxon, UnmatchedRows, ValidatedDataset,
};
pub use error::{ClassifyError, InvalidColor, ValidationError};
pub use names::{normalize, normalize_opt, normalize_taxon, title_case};
pub use region::{ReferenceRegion, ReferenceRegions};
pub use result::{ClassificationResult, LegendEntry, RegionColor};
pub use selection::{
    BoundaryInput, DualBoundary, FilterSelection, MissingYearPolicy, Selection, TaxonFilter,
    TaxonLevel, YearBoundaries,
};
