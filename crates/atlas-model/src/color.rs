//! Color slots, user color specifications and resolved colors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the color every region starts with before classification.
pub const DEFAULT_COLOR_NAME: &str = "white";

/// A logical color slot the user can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSlot {
    /// Single-boundary: records at or before the boundary year.
    Pre,
    /// Single-boundary: records after the boundary year.
    Post,
    /// Single-boundary without a year: every record.
    All,
    /// Dual-boundary: records at or before the first boundary.
    FirstPeriod,
    /// Dual-boundary: records after the first and at or before the second boundary.
    SecondPeriod,
    /// Dual-boundary: records after the second boundary.
    ThirdPeriod,
}

impl ColorSlot {
    /// User-facing label used in error messages and legends.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pre => "Pre-Year",
            Self::Post => "Post-Year",
            Self::All => "All Records",
            Self::FirstPeriod => "First Period",
            Self::SecondPeriod => "Second Period",
            Self::ThirdPeriod => "Third Period",
        }
    }
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw color text as typed or picked by the user (named color or `#RRGGBB`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorSpec(String);

impl ColorSpec {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorSpec {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// A color that passed validation, keeping the canonical spec for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedColor {
    /// Lowercased, trimmed spec ("grey", "#ff5733").
    pub name: String,
    pub rgb: Rgb,
}

impl ResolvedColor {
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }

    /// The "unassigned" sentinel color.
    pub fn unassigned() -> Self {
        Self::new(DEFAULT_COLOR_NAME, Rgb::WHITE)
    }
}

impl fmt::Display for ResolvedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Color choices for every slot of both classification modes.
///
/// Defaults follow the map generator's initial picks: grey for the oldest
/// band, red for the newer band, green for "all records" and yellow for the
/// newest band of the dual-boundary mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub pre: ColorSpec,
    pub post: ColorSpec,
    pub all: ColorSpec,
    pub first: ColorSpec,
    pub second: ColorSpec,
    pub third: ColorSpec,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            pre: ColorSpec::new("grey"),
            post: ColorSpec::new("red"),
            all: ColorSpec::new("green"),
            first: ColorSpec::new("grey"),
            second: ColorSpec::new("red"),
            third: ColorSpec::new("yellow"),
        }
    }
}

impl ColorConfig {
    /// Suggested keywords offered by the color pickers.
    pub const SUGGESTED: [&'static str; 10] = [
        "red", "green", "blue", "grey", "black", "yellow", "purple", "orange", "pink", "brown",
    ];

    pub fn spec(&self, slot: ColorSlot) -> &ColorSpec {
        match slot {
            ColorSlot::Pre => &self.pre,
            ColorSlot::Post => &self.post,
            ColorSlot::All => &self.all,
            ColorSlot::FirstPeriod => &self.first,
            ColorSlot::SecondPeriod => &self.second,
            ColorSlot::ThirdPeriod => &self.third,
        }
    }

    pub fn set(&mut self, slot: ColorSlot, spec: ColorSpec) {
        let target = match slot {
            ColorSlot::Pre => &mut self.pre,
            ColorSlot::Post => &mut self.post,
            ColorSlot::All => &mut self.all,
            ColorSlot::FirstPeriod => &mut self.first,
            ColorSlot::SecondPeriod => &mut self.second,
            ColorSlot::ThirdPeriod => &mut self.third,
        };
        *target = spec;
    }
}
