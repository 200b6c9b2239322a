//! Row-oriented text view of an input table.

use polars::prelude::*;

use crate::error::Result;

/// Header names and text cells as delivered by the ingestion step.
///
/// Headers are trimmed; cells keep their text with blank values mapped to
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: Option<&str>) -> Option<String> {
    let value = raw?;
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl RawTable {
    pub fn new<H, S>(headers: H, rows: Vec<Vec<Option<String>>>) -> Self
    where
        H: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|h| normalize_header(h.as_ref()))
                .collect(),
            rows,
        }
    }

    /// Convenience constructor for string literals; `""` cells become `None`.
    pub fn from_strings(headers: &[&str], rows: &[Vec<&str>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| normalize_cell(Some(*cell))).collect())
            .collect();
        Self::new(headers.iter().copied(), rows)
    }

    /// Flattens every column of the frame to text.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| normalize_header(name.as_str()))
            .collect();

        let mut columns: Vec<Vec<Option<String>>> = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            let series = col.cast(&DataType::String)?.take_materialized_series();
            let values = series
                .str()?
                .iter()
                .map(normalize_cell)
                .collect::<Vec<_>>();
            columns.push(values);
        }

        let rows = (0..df.height())
            .map(|row_idx| {
                columns
                    .iter()
                    .map(|column| column.get(row_idx).cloned().flatten())
                    .collect()
            })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by case-insensitive header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name.trim()))
    }

    /// Cell text at `(row, column)`; short rows read as blank.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(Option::as_deref)
    }
}
