//! Color specification resolution.

use std::collections::BTreeMap;

use atlas_model::{ClassifyError, ColorConfig, ColorSlot, InvalidColor, ResolvedColor, Rgb};

/// Resolves a named color keyword or a `#RRGGBB` hex string.
///
/// Names are matched case-insensitively against the CSS/SVG keyword table
/// ("grey" and "gray" both resolve). The resolved name is the trimmed,
/// lowercased spec.
pub fn resolve_color(slot: ColorSlot, spec: &str) -> Result<ResolvedColor, InvalidColor> {
    let name = spec.trim().to_lowercase();
    let rgb = match name.strip_prefix('#') {
        Some(digits) => parse_hex(digits),
        None => palette::named::from_str(&name).map(|c| Rgb::new(c.red, c.green, c.blue)),
    };
    rgb.map(|rgb| ResolvedColor::new(name, rgb))
        .ok_or_else(|| InvalidColor {
            slot,
            spec: spec.to_string(),
        })
}

fn parse_hex(digits: &str) -> Option<Rgb> {
    if digits.len() != 6 {
        return None;
    }
    match hex::decode(digits).ok()?.as_slice() {
        [red, green, blue] => Some(Rgb::new(*red, *green, *blue)),
        _ => None,
    }
}

/// Resolves every requested slot, collecting all failures before reporting.
pub fn validate_colors(
    config: &ColorConfig,
    slots: &[ColorSlot],
) -> Result<BTreeMap<ColorSlot, ResolvedColor>, ClassifyError> {
    let mut resolved = BTreeMap::new();
    let mut errors = Vec::new();
    for &slot in slots {
        match resolve_color(slot, config.spec(slot).as_str()) {
            Ok(color) => {
                resolved.insert(slot, color);
            }
            Err(error) => errors.push(error),
        }
    }
    if errors.is_empty() {
        Ok(resolved)
    } else {
        Err(ClassifyError::InvalidColors { errors })
    }
}
