//! Year extraction from free-text date cells.

use std::sync::LazyLock;

use regex::Regex;

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]{4}").expect("valid year pattern"));

/// Extracts the first run of four ASCII digits from a year cell.
///
/// `"1987"`, `"ca. 1987"` and `"1987-06-02"` all yield 1987. Cells with no
/// such run yield `None`; the row stays in the dataset with an unknown year.
pub fn extract_year(cell: Option<&str>) -> Option<i32> {
    let text = cell?;
    FOUR_DIGITS
        .find(text)
        .and_then(|found| found.as_str().parse::<i32>().ok())
}
