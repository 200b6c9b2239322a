//! Load, classify and export a small dataset end to end.

use std::fs;

use atlas_classify::{ClassificationRequest, classify, export_filename, map_title};
use atlas_cli::export::{ExportFormat, write_outcome};
use atlas_ingest::{load_dataset, load_reference_regions};
use atlas_model::{
    ColorConfig, DualBoundary, MissingYearPolicy, Selection, TaxonFilter, YearBoundaries,
};
use chrono::NaiveDate;
use insta::assert_snapshot;
use tempfile::TempDir;

const DATA: &str = "\
County,Family,Genus,Species,Year
Gallatin,Apidae,Bombus,huntii,1990
Gallatin,Apidae,Bombus,huntii,2010
Park,Apidae,Bombus,huntii,1970
Park,Apidae,Bombus,huntii,2010
Madison,Apidae,Bombus,huntii,1999
Glacier NP,Apidae,Bombus,huntii,1999
Madison,Apidae,Bombus,fervidus,1950
";

const REGIONS: &str = "NAME\nGallatin\nPark\nMadison\nMissoula\n";

fn run(format: ExportFormat) -> String {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("bees.csv");
    let names = dir.path().join("counties.csv");
    let output = dir.path().join("out");
    fs::write(&data, DATA).unwrap();
    fs::write(&names, REGIONS).unwrap();

    let regions = load_reference_regions(&names).unwrap();
    let loaded = load_dataset(&data, &regions).unwrap();
    let request = ClassificationRequest {
        taxon: TaxonFilter::new(
            Selection::exact("apidae"),
            Selection::exact("bombus"),
            Selection::exact("huntii"),
        ),
        boundaries: YearBoundaries::Dual {
            boundary: DualBoundary::new(1980, 2000).unwrap(),
        },
        colors: ColorConfig::default(),
        missing_year: MissingYearPolicy::Exclude,
    };
    let outcome = classify(&loaded.dataset, &regions, &request).unwrap();
    let timestamp = NaiveDate::from_ymd_opt(2024, 6, 2)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .unwrap();
    let filename = export_filename(&request.taxon, &request.boundaries, timestamp);

    write_outcome(&output, format, &outcome, &map_title(&request.taxon), &filename).unwrap();
    fs::read_to_string(&output).unwrap()
}

#[test]
fn csv_export_lists_every_region() {
    assert_snapshot!(run(ExportFormat::Csv), @r"
    region,color,rgb,band
    Gallatin,red,#ff0000,Second Period
    Park,grey,#808080,First Period
    Madison,red,#ff0000,Second Period
    Missoula,white,#ffffff,
    ");
}

#[test]
fn json_export_carries_title_legend_and_warnings() {
    let document: serde_json::Value = serde_json::from_str(&run(ExportFormat::Json)).unwrap();

    assert_eq!(document["title"], "Apidae > Bombus > huntii");
    assert_eq!(
        document["image_filename"],
        "Apidae-Bombus-huntii_1980-2000_20240602_093000.tiff"
    );
    assert_eq!(document["matched_records"], 5);
    assert_eq!(document["unmatched_regions"][0], "glacier np");
    assert_eq!(document["regions"].as_array().map(Vec::len), Some(4));

    let legend: Vec<String> = document["legend"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| format!("{} = {}", entry["label"], entry["regions"]))
        .collect();
    assert_snapshot!(legend.join("\n"), @r#"
    "First Period (<= 1980)" = 1
    "Second Period (1981-2000)" = 2
    "Third Period (> 2000)" = 0
    "No records" = 1
    "#);
}
