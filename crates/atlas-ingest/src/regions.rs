//! Reference region names.

use std::path::Path;

use atlas_model::ReferenceRegions;

use crate::error::{IngestError, Result};

/// The 56 counties of Montana, as named in the state county boundary layer.
pub const MONTANA_COUNTIES: [&str; 56] = [
    "Beaverhead",
    "Big Horn",
    "Blaine",
    "Broadwater",
    "Carbon",
    "Carter",
    "Cascade",
    "Chouteau",
    "Custer",
    "Daniels",
    "Dawson",
    "Deer Lodge",
    "Fallon",
    "Fergus",
    "Flathead",
    "Gallatin",
    "Garfield",
    "Glacier",
    "Golden Valley",
    "Granite",
    "Hill",
    "Jefferson",
    "Judith Basin",
    "Lake",
    "Lewis and Clark",
    "Liberty",
    "Lincoln",
    "Madison",
    "McCone",
    "Meagher",
    "Mineral",
    "Missoula",
    "Musselshell",
    "Park",
    "Petroleum",
    "Phillips",
    "Pondera",
    "Powder River",
    "Powell",
    "Prairie",
    "Ravalli",
    "Richland",
    "Roosevelt",
    "Rosebud",
    "Sanders",
    "Sheridan",
    "Silver Bow",
    "Stillwater",
    "Sweet Grass",
    "Teton",
    "Toole",
    "Treasure",
    "Valley",
    "Wheatland",
    "Wibaux",
    "Yellowstone",
];

/// Header names recognized as the region name column of a names file.
const NAME_HEADERS: [&str; 3] = ["name", "county", "region"];

pub fn montana_counties() -> ReferenceRegions {
    ReferenceRegions::new(MONTANA_COUNTIES)
}

/// Loads region names exported from a boundary layer's attribute table.
///
/// Accepts either a CSV whose header has a `NAME`, `county` or `region`
/// column, or a plain list with one name per line.
pub fn load_reference_regions(path: &Path) -> Result<ReferenceRegions> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| regions_error(path, source))?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| regions_error(path, source))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let header_column = rows.first().and_then(|header| {
        header.iter().position(|cell| {
            NAME_HEADERS
                .iter()
                .any(|name| cell.trim_matches('\u{feff}').eq_ignore_ascii_case(name))
        })
    });
    let (column, skip) = match header_column {
        Some(idx) => (idx, 1),
        None => (0, 0),
    };

    let names: Vec<&str> = rows
        .iter()
        .skip(skip)
        .filter_map(|row| row.get(column).map(String::as_str))
        .filter(|name| !name.is_empty())
        .collect();
    let regions = ReferenceRegions::new(names);
    if regions.is_empty() {
        return Err(IngestError::EmptyRegions {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), regions = regions.len(), "loaded region names");
    Ok(regions)
}

fn regions_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::RegionsParse {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn montana_has_56_distinct_counties() {
        let regions = montana_counties();
        assert_eq!(regions.len(), 56);
        assert!(regions.find("Lewis & Clark").is_some());
        assert!(regions.find("SILVER BOW").is_some());
    }

    #[test]
    fn loads_name_column_from_attribute_export() {
        let file = create_temp_file("FID,NAME,ABBR\n1,Gallatin,GALL\n2,Park,PARK\n");
        let regions = load_reference_regions(file.path()).unwrap();
        let names: Vec<&str> = regions.iter().map(|r| r.canonical_name.as_str()).collect();
        assert_eq!(names, vec!["Gallatin", "Park"]);
    }

    #[test]
    fn loads_plain_name_list() {
        let file = create_temp_file("Gallatin\nPark\n\nLewis and Clark\n");
        let regions = load_reference_regions(file.path()).unwrap();
        assert_eq!(regions.len(), 3);
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = create_temp_file("NAME\n");
        let result = load_reference_regions(file.path());
        assert!(matches!(result, Err(IngestError::EmptyRegions { .. })));
    }
}
