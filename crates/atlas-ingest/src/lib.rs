//! Occurrence data ingestion.
//!
//! This crate turns a spreadsheet export into a [`ValidatedDataset`] the
//! classifier can consume.
//!
//! # Features
//!
//! - **CSV Loading**: Read a CSV export into a Polars `DataFrame`, every column as text
//! - **Workbook Loading**: Read the first sheet of an `.xlsx`/`.xls`/`.ods` file
//! - **Raw Tables**: Flatten a `DataFrame` into trimmed header and cell strings
//! - **Validation**: Check required columns, extract years, match regions, summarize
//! - **Reference Regions**: Built-in Montana county list or a names file
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use atlas_ingest::{load_dataset, montana_counties};
//!
//! let regions = montana_counties();
//! let loaded = load_dataset(Path::new("bumble_bees.csv"), &regions)?;
//! println!("{} records", loaded.summary.record_count);
//! ```
//!
//! [`ValidatedDataset`]: atlas_model::ValidatedDataset

mod dataset;
mod error;
mod reader;
mod regions;
mod table;
mod workbook;
mod year;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{read_csv_frame, validate_encoding};

// === Workbook Reading ===
pub use workbook::{WORKBOOK_EXTENSIONS, is_workbook, range_to_table, read_workbook_table};

// === Raw Tables ===
pub use table::RawTable;

// === Validation ===
pub use dataset::{LoadedDataset, load_dataset, summarize, validate_and_load};
pub use year::extract_year;

// === Reference Regions ===
pub use regions::{MONTANA_COUNTIES, load_reference_regions, montana_counties};
