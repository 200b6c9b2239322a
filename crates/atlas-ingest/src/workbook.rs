//! Excel and OpenDocument workbook reading.

use std::ffi::OsStr;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// File extensions read as workbooks rather than CSV.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` names a workbook by its extension.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Reads the first sheet of a workbook; its first row is the header.
pub fn read_workbook_table(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error("workbook has no sheets".to_string()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    let table = range_to_table(&range);
    if table.headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "read workbook"
    );
    Ok(table)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(value) if value.trim().is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Converts a sheet range to text cells; numeric years like `1987.0` read as "1987".
pub fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return RawTable::default();
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    RawTable::new(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    #[test]
    fn test_range_to_table_reads_text_and_numbers() {
        let range = sheet(&[
            &[
                Data::String("County".into()),
                Data::String("Year".into()),
            ],
            &[Data::String("Park".into()), Data::Float(1987.0)],
            &[Data::String("Gallatin".into()), Data::Empty],
        ]);
        let table = range_to_table(&range);

        assert_eq!(table.headers, vec!["County", "Year"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), Some("Park"));
        assert_eq!(table.cell(0, 1), Some("1987"));
        assert_eq!(table.cell(1, 1), None);
    }

    #[test]
    fn test_workbook_extensions() {
        assert!(is_workbook(Path::new("bees.xlsx")));
        assert!(is_workbook(Path::new("bees.XLS")));
        assert!(!is_workbook(Path::new("bees.csv")));
        assert!(!is_workbook(Path::new("bees")));
    }

    #[test]
    fn test_corrupt_workbook_is_reported() {
        let mut file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .unwrap();
        file.write_all(b"County,Year\nPark,1990\n").unwrap();

        let result = read_workbook_table(file.path());
        assert!(matches!(result, Err(IngestError::Workbook { .. })));
    }

    #[test]
    fn test_missing_workbook() {
        let result = read_workbook_table(Path::new("/definitely/not/here.xlsx"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
