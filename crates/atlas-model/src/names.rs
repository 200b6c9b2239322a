//! Name canonicalization shared by ingestion and classification.

/// Canonical form of a region name used for matching.
///
/// Trims, lowercases, spells `&` as `and` and collapses whitespace runs, so
/// `" Lewis & Clark "` and `"lewis and  clark"` compare equal. Total and
/// idempotent.
pub fn normalize(name: &str) -> String {
    let spelled = name.replace('&', " and ");
    let mut normalized = String::with_capacity(spelled.len());
    for word in spelled.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(word.chars().flat_map(char::to_lowercase));
    }
    normalized
}

/// Like [`normalize`], with absent input mapping to an empty string.
pub fn normalize_opt(name: Option<&str>) -> String {
    name.map(normalize).unwrap_or_default()
}

/// Matching key for taxonomic classifiers: trimmed and lowercased.
pub fn normalize_taxon(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Title-cases each word the way dropdown labels are shown ("bombus" -> "Bombus").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.trim().chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
